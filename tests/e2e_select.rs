//! End-to-end tests for the SELECT graph builder.
//!
//! Each test exercises: resolve field paths -> select::create_root against the
//! brewery schema in `common`.

mod common;

use common::{ex, path, pred, shapes};
use pretty_assertions::assert_eq;
use shape_query::builder::{deep_list, select};
use shape_query::vocab::xsd;
use shape_query::{
    BuildConfig, Edge, Error, FilterCriteria, FilterOperator, Iri, Literal, NodeShape, OrderExpression,
    PropertyShape, Result, ShapeRegistry, ShapeSource, SortCriteria, SortDirection, Term, Value,
    VariableSource, Vertice,
};

// ============================================================================
// Helpers
// ============================================================================

fn build(filters: &[FilterCriteria], sorts: &[SortCriteria]) -> Result<Vertice> {
    let shapes = shapes();
    let brewery = shapes.require("Brewery")?;
    select::create_root(&mut VariableSource::default(), &shapes, &brewery, filters, sorts, &BuildConfig::default())
}

fn non_type(v: &Vertice) -> Vec<&Edge> {
    v.edges().iter().filter(|e| !e.is_type_constraint()).collect()
}

fn edges_for<'a>(v: &'a Vertice, local: &str) -> Vec<&'a Edge> {
    let p = pred(local);
    v.edges().iter().filter(|e| e.predicate() == &p).collect()
}

// ============================================================================
// 1. Structural edges follow cardinality
// ============================================================================

#[test]
fn test_required_property_has_edge_without_criteria() {
    let root = build(&[], &[]).unwrap();

    let identifier = edges_for(&root, "Brewery_identifier");
    assert_eq!(identifier.len(), 1);
    assert!(!identifier[0].is_optional());
    assert!(identifier[0].is_required());
}

#[test]
fn test_nullable_properties_have_no_edge_without_criteria() {
    let root = build(&[], &[]).unwrap();

    for local in ["Brewery_name", "Brewery_founded", "Brewery_beers"] {
        assert!(edges_for(&root, local).is_empty(), "{local} should not be joined");
    }
    assert_eq!(non_type(&root).len(), 1);
}

#[test]
fn test_single_type_edge_on_root() {
    let root = build(&[], &[]).unwrap();

    let types: Vec<_> = root.edges().iter().filter(|e| e.is_type_constraint()).collect();
    assert_eq!(types.len(), 1);
    assert_eq!(types[0].object().type_set().unwrap(), &[Iri::new(ex("Brewery"))]);
    assert!(!types[0].is_optional());
}

#[test]
fn test_no_type_edge_without_target_classes() {
    let shapes = ShapeRegistry::new().with_shape(
        NodeShape::builder("Thing")
            .property(PropertyShape::predicate("label", "urn:label").with_min_count(1))
            .build()
            .unwrap(),
    );
    let thing = shapes.require("Thing").unwrap();
    let root = select::create_root(&mut VariableSource::default(), &shapes, &thing, &[], &[], &BuildConfig::default())
        .unwrap();
    assert!(root.type_edge().is_none());
    assert_eq!(root.edges().len(), 1);
}

// ============================================================================
// 2. Brewery → beers → identifier scenario
// ============================================================================

#[test]
fn test_required_nested_shape_expands_one_level() {
    let shapes = ShapeRegistry::new()
        .with_shape(
            NodeShape::builder("Brewery")
                .target_class(ex("Brewery"))
                .property(PropertyShape::predicate("beers", ex("Brewery_beers")).with_min_count(1).with_node("Beer"))
                .build()
                .unwrap(),
        )
        .with_shape(
            NodeShape::builder("Beer")
                .property(PropertyShape::predicate("identifier", ex("Beer_identifier")).with_min_count(1))
                .build()
                .unwrap(),
        );
    let brewery = shapes.require("Brewery").unwrap();
    let root = select::create_root(&mut VariableSource::default(), &shapes, &brewery, &[], &[], &BuildConfig::default())
        .unwrap();

    assert_eq!(root.edges().iter().filter(|e| e.is_type_constraint()).count(), 1);
    let beers = non_type(&root);
    assert_eq!(beers.len(), 1);
    assert_eq!(beers[0].predicate(), &pred("Brewery_beers"));

    let beer_edges = non_type(beers[0].object());
    assert_eq!(beer_edges.len(), 1);
    assert_eq!(beer_edges[0].predicate(), &pred("Beer_identifier"));
    assert!(beer_edges[0].object().edges().is_empty());

    let all: Vec<_> = deep_list(root.edges()).into_iter().filter(|e| !e.is_type_constraint()).collect();
    assert_eq!(all.len(), 2);
}

// ============================================================================
// 3. Filter-driven edges
// ============================================================================

#[test]
fn test_three_segment_filter_builds_three_nested_edges() {
    let filter = FilterCriteria::new(path("Brewery", "beers.ingredients.name"), FilterOperator::Eq, "Hop");
    let root = build(&[filter], &[]).unwrap();

    let beers = edges_for(&root, "Brewery_beers");
    assert_eq!(beers.len(), 1);
    let ingredients = edges_for(beers[0].object(), "Beer_ingredients");
    assert_eq!(ingredients.len(), 1);
    let names = edges_for(ingredients[0].object(), "Ingredient_name");
    assert_eq!(names.len(), 1);

    for edge in [beers[0], ingredients[0], names[0]] {
        assert!(!edge.is_optional());
        assert!(!edge.is_required());
    }
    assert!(beers[0].object().filters().is_empty());
    assert!(ingredients[0].object().filters().is_empty());

    let filters = names[0].object().filters();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].operator, FilterOperator::Eq);
    assert_eq!(filters[0].operands, vec![Term::Literal(Literal::typed("Hop", Iri::new(xsd::STRING)))]);
}

#[test]
fn test_nested_filter_vertices_carry_type_constraints() {
    let filter = FilterCriteria::new(path("Brewery", "beers.name"), FilterOperator::Ne, "Tripel");
    let root = build(&[filter], &[]).unwrap();

    let beer = edges_for(&root, "Brewery_beers")[0].object();
    assert_eq!(beer.type_edge().unwrap().object().type_set().unwrap(), &[Iri::new(ex("Beer"))]);
}

#[test]
fn test_shared_prefix_shares_edge_chain() {
    let filters = vec![
        FilterCriteria::new(path("Brewery", "beers.name"), FilterOperator::Eq, "Tripel"),
        FilterCriteria::new(path("Brewery", "beers.abv"), FilterOperator::Gte, Value::Float(8.5)),
    ];
    let sorts = vec![SortCriteria::asc(path("Brewery", "beers.ingredients.name"))];
    let root = build(&filters, &sorts).unwrap();

    let beers = edges_for(&root, "Brewery_beers");
    assert_eq!(beers.len(), 1);
    let beer = beers[0].object();
    assert_eq!(edges_for(beer, "Beer_name").len(), 1);
    assert_eq!(edges_for(beer, "Beer_abv").len(), 1);
    assert_eq!(edges_for(beer, "Beer_ingredients").len(), 1);
    assert_eq!(
        edges_for(beer, "Beer_abv")[0].object().filters()[0].operands,
        vec![Term::Literal(Literal::typed("8.5", Iri::new(xsd::DECIMAL)))]
    );
}

#[test]
fn test_filter_on_required_field_reuses_structural_edge() {
    let filter = FilterCriteria::new(path("Brewery", "identifier"), FilterOperator::Eq, "123");
    let root = build(&[filter], &[]).unwrap();

    let identifier = edges_for(&root, "Brewery_identifier");
    assert_eq!(identifier.len(), 1);
    assert!(identifier[0].is_required());
    assert_eq!(identifier[0].object().filters().len(), 1);
}

#[test]
fn test_date_filter_is_typed_and_validated() {
    let ok = build(&[FilterCriteria::new(path("Brewery", "founded"), FilterOperator::Lt, "1900-01-01")], &[]).unwrap();
    assert_eq!(
        edges_for(&ok, "Brewery_founded")[0].object().filters()[0].operands,
        vec![Term::Literal(Literal::typed("1900-01-01", Iri::new(xsd::DATE)))]
    );

    let err = build(&[FilterCriteria::new(path("Brewery", "founded"), FilterOperator::Lt, "last year")], &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidOperand { ref datatype, .. } if datatype == xsd::DATE));
}

#[test]
fn test_inverse_path_filter_uses_iri_operand() {
    let shapes = shapes();
    let beer = shapes.require("Beer").unwrap();
    let filter = FilterCriteria::new(path("Beer", "brewery"), FilterOperator::Eq, "https://example.org/brewery/1");
    let root = select::create_root(&mut VariableSource::default(), &shapes, &beer, &[filter], &[], &BuildConfig::default())
        .unwrap();

    let brewery = root.edges().iter().find(|e| e.predicate().to_string().starts_with('^')).unwrap();
    assert_eq!(
        brewery.object().filters()[0].operands,
        vec![Term::Iri(Iri::new("https://example.org/brewery/1"))]
    );
}

// ============================================================================
// 4. Sort-driven edges
// ============================================================================

#[test]
fn test_desc_sort_on_nullable_field_is_null_safe() {
    let root = build(&[], &[SortCriteria::desc(path("Brewery", "name"))]).unwrap();

    let name = edges_for(&root, "Brewery_name");
    assert_eq!(name.len(), 1);
    assert!(name[0].is_optional());

    let orderable = &root.orderables()[0];
    assert_eq!(orderable.direction, SortDirection::Desc);
    assert_eq!(
        orderable.expression,
        OrderExpression::Coalesce { variable: name[0].object().variable().unwrap().clone(), fallback: Literal::plain("") }
    );
    assert!(name[0].object().orderables().is_empty());
}

#[test]
fn test_sort_on_required_field_uses_raw_variable() {
    let root = build(&[], &[SortCriteria::desc(path("Brewery", "identifier"))]).unwrap();

    let identifier = edges_for(&root, "Brewery_identifier");
    assert_eq!(identifier.len(), 1);
    assert!(!identifier[0].is_optional());
    assert_eq!(
        root.orderables()[0].expression,
        OrderExpression::Variable { variable: identifier[0].object().variable().unwrap().clone() }
    );
}

#[test]
fn test_nested_nullable_sort_makes_chain_optional() {
    let root = build(&[], &[SortCriteria::asc(path("Brewery", "beers.name"))]).unwrap();

    let beers = edges_for(&root, "Brewery_beers");
    assert!(beers[0].is_optional());
    let name = edges_for(beers[0].object(), "Beer_name");
    assert!(name[0].is_optional());
    assert_eq!(root.orderables()[0].expression.variable(), name[0].object().variable().unwrap());
}

#[test]
fn test_sort_fallback_is_configurable() {
    let shapes = shapes();
    let brewery = shapes.require("Brewery").unwrap();
    let config = BuildConfig { null_sort_fallback: " ".into(), ..BuildConfig::default() };
    let root = select::create_root(
        &mut VariableSource::default(),
        &shapes,
        &brewery,
        &[],
        &[SortCriteria::asc(path("Brewery", "city"))],
        &config,
    )
    .unwrap();
    assert!(matches!(
        &root.orderables()[0].expression,
        OrderExpression::Coalesce { fallback, .. } if fallback == &Literal::plain(" ")
    ));
}

// ============================================================================
// 5. Errors
// ============================================================================

#[test]
fn test_field_without_property_shape_fails() {
    let shapes = ShapeRegistry::new().with_shape(
        NodeShape::builder("Brewery").target_class(ex("Brewery")).build().unwrap(),
    );
    let brewery = shapes.require("Brewery").unwrap();
    let filter = FilterCriteria::new(path("Brewery", "name"), FilterOperator::Eq, "De Molen");
    let err = select::create_root(&mut VariableSource::default(), &shapes, &brewery, &[filter], &[], &BuildConfig::default())
        .unwrap_err();
    assert_eq!(err, Error::MissingPropertyShape { shape: "Brewery".into(), field: "name".into() });
}

#[test]
fn test_unknown_nested_shape_fails() {
    let shapes = ShapeRegistry::new().with_shape(
        NodeShape::builder("Brewery")
            .property(PropertyShape::predicate("beers", ex("Brewery_beers")).with_min_count(1).with_node("Beer"))
            .build()
            .unwrap(),
    );
    let brewery = shapes.require("Brewery").unwrap();
    let err = select::create_root(&mut VariableSource::default(), &shapes, &brewery, &[], &[], &BuildConfig::default())
        .unwrap_err();
    assert_eq!(err, Error::UnknownShape("Beer".into()));
}

#[test]
fn test_variables_are_unique_per_build() {
    let filters = vec![FilterCriteria::new(path("Brewery", "beers.ingredients.name"), FilterOperator::Eq, "Hop")];
    let mut vars = VariableSource::default();
    let shapes = shapes();
    let brewery = shapes.require("Brewery").unwrap();
    let root = select::create_root(&mut vars, &shapes, &brewery, &filters, &[], &BuildConfig::default()).unwrap();

    let mut seen: Vec<_> = deep_list(root.edges()).iter().filter_map(|e| e.object().variable().cloned()).collect();
    seen.push(root.variable().unwrap().clone());
    let total = seen.len();
    seen.sort_by(|a, b| a.name().cmp(b.name()));
    seen.dedup();
    assert_eq!(seen.len(), total);
    assert_eq!(vars.allocated(), total);
}

// ============================================================================
// 6. Polymorphic edges sharing one predicate
// ============================================================================

/// Organisation ─related→ Person | Organisation | Contact (untyped)
fn org_shapes() -> ShapeRegistry {
    ShapeRegistry::new()
        .with_shape(
            NodeShape::builder("Organisation")
                .target_class("urn:Organisation")
                .property(PropertyShape::predicate("name", "urn:name").with_datatype(xsd::STRING))
                .property(PropertyShape::predicate("member", "urn:related").with_node("Person"))
                .property(PropertyShape::predicate("employer", "urn:related").with_node("Organisation"))
                .property(PropertyShape::predicate("contact", "urn:related").with_node("Contact"))
                .build()
                .unwrap(),
        )
        .with_shape(
            NodeShape::builder("Person")
                .target_class("urn:Person")
                .property(PropertyShape::predicate("name", "urn:name").with_datatype(xsd::STRING))
                .property(PropertyShape::predicate("age", "urn:age").with_datatype(xsd::INTEGER))
                .build()
                .unwrap(),
        )
        .with_shape(
            NodeShape::builder("Contact")
                .property(PropertyShape::predicate("name", "urn:name").with_datatype(xsd::STRING))
                .build()
                .unwrap(),
        )
}

fn org_path(field: &str, leaf: &str) -> shape_query::FieldPath {
    shape_query::FieldPath::from_steps([
        shape_query::FieldDefinition::object(field, "Related"),
        shape_query::FieldDefinition::scalar(leaf, "String"),
    ])
    .unwrap()
}

fn org_build(filters: &[FilterCriteria], permissive_type_match: bool) -> Vertice {
    let shapes = org_shapes();
    let org = shapes.require("Organisation").unwrap();
    let config = BuildConfig { permissive_type_match, ..BuildConfig::default() };
    select::create_root(&mut VariableSource::default(), &shapes, &org, filters, &[], &config).unwrap()
}

fn related(v: &Vertice) -> Vec<&Edge> {
    let p = shape_query::PropertyPath::predicate("urn:related");
    v.edges().iter().filter(|e| e.predicate() == &p).collect()
}

fn object_classes(edge: &Edge) -> Vec<Iri> {
    edge.object()
        .type_edge()
        .and_then(|t| t.object().type_set())
        .map(<[Iri]>::to_vec)
        .unwrap_or_default()
}

#[test]
fn test_disjoint_target_classes_keep_separate_edges() {
    let filters = vec![
        FilterCriteria::new(org_path("member", "name"), FilterOperator::Eq, "Ada"),
        FilterCriteria::new(org_path("employer", "name"), FilterOperator::Eq, "Acme"),
        FilterCriteria::new(org_path("member", "age"), FilterOperator::Gt, 30),
    ];
    let root = org_build(&filters, true);

    let edges = related(&root);
    assert_eq!(edges.len(), 2);
    assert_eq!(object_classes(edges[0]), vec![Iri::new("urn:Person")]);
    assert_eq!(object_classes(edges[1]), vec![Iri::new("urn:Organisation")]);

    // second member filter joins the existing Person edge
    let person = edges[0].object();
    assert_eq!(non_type(person).len(), 2);
    let organisation = edges[1].object();
    assert_eq!(non_type(organisation).len(), 1);
    assert_eq!(non_type(organisation)[0].object().filters().len(), 1);
}

#[test]
fn test_one_sided_type_information_follows_permissive_flag() {
    let filters = vec![
        FilterCriteria::new(org_path("member", "name"), FilterOperator::Eq, "Ada"),
        FilterCriteria::new(org_path("contact", "name"), FilterOperator::Eq, "Bob"),
    ];

    let merged = org_build(&filters, true);
    let edges = related(&merged);
    assert_eq!(edges.len(), 1);
    let names = non_type(edges[0].object());
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].object().filters().len(), 2);

    let strict = org_build(&filters, false);
    let edges = related(&strict);
    assert_eq!(edges.len(), 2);
    assert_eq!(object_classes(edges[0]), vec![Iri::new("urn:Person")]);
    assert!(edges[1].object().type_edge().is_none());
    for edge in edges {
        assert_eq!(non_type(edge.object())[0].object().filters().len(), 1);
    }
}

#[test]
fn test_non_finite_decimal_filter_is_rejected() {
    let filter = FilterCriteria::new(path("Brewery", "beers.abv"), FilterOperator::Gt, "inf");
    let err = build(&[filter], &[]).unwrap_err();
    assert!(matches!(err, Error::InvalidOperand { ref datatype, .. } if datatype == xsd::DECIMAL));
}
