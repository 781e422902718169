//! Select graph builder.
//!
//! Produces the `WHERE` graph of a SELECT query:
//!
//! ```text
//! root ─ a <TargetClass>                       (type constraint)
//!      ─ <required>  ?x1 ─ <required> ?x2 …    (cardinality-driven, recursive)
//!      ─ <filtered>  ?x3  FILTER(…)            (filter-driven)
//!      ─ OPTIONAL <sorted> ?x4                 (sort-driven, ORDER BY on root)
//! ```
//!
//! Path-driven edges reuse any edge already present for the same predicate
//! and a compatible object type, so a field that is both mandatory and
//! filtered joins once.

use std::sync::Arc;

use tracing::{debug, trace};

use super::helpers::{deep_list, has_equal_target_class};
use super::{object_vertice, root_vertice, BuildConfig, VariableSource};
use crate::criteria::{FilterCriteria, SortCriteria};
use crate::model::{Edge, Filter, FilterOperator, Literal, OrderExpression, Orderable, Term, Vertice};
use crate::schema::FieldPath;
use crate::shape::{NodeShape, PropertyShape, ShapeSource};
use crate::{Error, Result};

/// Build the SELECT graph for `node_shape`.
pub fn create_root(
    vars: &mut VariableSource,
    shapes: &dyn ShapeSource,
    node_shape: &NodeShape,
    filters: &[FilterCriteria],
    sorts: &[SortCriteria],
    config: &BuildConfig,
) -> Result<Vertice> {
    let mut root = root_vertice(vars, node_shape);
    debug!(
        shape = node_shape.name(),
        filters = filters.len(),
        sorts = sorts.len(),
        "building select graph"
    );

    let mut stack = vec![node_shape.name().to_owned()];
    add_structural_edges(vars, shapes, node_shape, &mut root, &mut stack, config)?;

    for criteria in filters {
        add_filter(vars, shapes, node_shape, &mut root, criteria, config)?;
    }
    for criteria in sorts {
        add_sort(vars, shapes, node_shape, &mut root, criteria, config)?;
    }

    debug!(
        shape = node_shape.name(),
        edges = deep_list(root.edges()).len(),
        variables = vars.allocated(),
        "select graph built"
    );
    Ok(root)
}

// ============================================================================
// Structural (cardinality-driven) edges
// ============================================================================

/// One required edge per property with `min_count >= 1`, recursing into
/// nested shapes. Shapes already on `stack` are not expanded again.
fn add_structural_edges(
    vars: &mut VariableSource,
    shapes: &dyn ShapeSource,
    shape: &NodeShape,
    vertice: &mut Vertice,
    stack: &mut Vec<String>,
    config: &BuildConfig,
) -> Result<()> {
    for property in shape.required_properties() {
        let nested = nested_shape(shapes, property)?;
        let mut object = object_vertice(vars, nested.as_deref());

        if let Some(nested) = &nested {
            if stack.iter().any(|s| s == nested.name()) {
                trace!(shape = nested.name(), "recursive shape, not expanding");
            } else if stack.len() >= config.max_depth {
                trace!(shape = nested.name(), depth = stack.len(), "max depth reached, not expanding");
            } else {
                stack.push(nested.name().to_owned());
                add_structural_edges(vars, shapes, nested, &mut object, stack, config)?;
                stack.pop();
            }
        }

        trace!(shape = shape.name(), property = %property.name, "structural edge");
        vertice.push_edge(Edge::new(property.path.clone(), object).with_required(true));
    }
    Ok(())
}

// ============================================================================
// Path-driven edges
// ============================================================================

/// A field path step resolved to its property shape.
struct Step {
    property: PropertyShape,
    nested: Option<Arc<NodeShape>>,
}

fn nested_shape(shapes: &dyn ShapeSource, property: &PropertyShape) -> Result<Option<Arc<NodeShape>>> {
    property.node.as_deref().map(|name| shapes.require(name)).transpose()
}

/// Resolve every step of `path` to a property shape, starting at `root`.
fn resolve_steps(shapes: &dyn ShapeSource, root: &NodeShape, path: &FieldPath) -> Result<Vec<Step>> {
    let mut steps: Vec<Step> = Vec::with_capacity(path.len());

    for field in path.steps() {
        let shape = match steps.last() {
            None => root,
            Some(Step { nested: Some(nested), .. }) => nested.as_ref(),
            Some(Step { property, .. }) => {
                return Err(Error::InvalidFieldPath {
                    path: path.to_string(),
                    message: format!("'{}' is not object-valued", property.name),
                });
            }
        };
        let property = shape.require_property(&field.name)?.clone();
        let nested = nested_shape(shapes, &property)?;
        steps.push(Step { property, nested });
    }
    Ok(steps)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Filter,
    Sort { optional: bool },
}

/// Walk `steps` from `root`, reusing compatible edges and creating missing
/// ones. Returns the terminal vertice.
fn walk<'v>(
    vars: &mut VariableSource,
    root: &'v mut Vertice,
    steps: &[Step],
    purpose: Purpose,
    config: &BuildConfig,
) -> &'v mut Vertice {
    let mut current = root;
    for step in steps {
        let classes = step.nested.as_deref().map(NodeShape::target_classes).unwrap_or(&[]);
        let existing = current.edges.iter().position(|e| {
            e.predicate == step.property.path
                && !e.object.is_type_constraint()
                && has_equal_target_class(e, classes, config.permissive_type_match)
        });

        let idx = match existing {
            Some(idx) => {
                trace!(property = %step.property.name, ?purpose, "reusing edge");
                if purpose == Purpose::Filter {
                    current.edges[idx].optional = false;
                }
                idx
            }
            None => {
                trace!(property = %step.property.name, ?purpose, "creating edge");
                let optional = matches!(purpose, Purpose::Sort { optional: true });
                let object = object_vertice(vars, step.nested.as_deref());
                current.push_edge(Edge::new(step.property.path.clone(), object).with_optional(optional));
                current.edges.len() - 1
            }
        };
        current = current.edges[idx].object_mut();
    }
    current
}

fn add_filter(
    vars: &mut VariableSource,
    shapes: &dyn ShapeSource,
    shape: &NodeShape,
    root: &mut Vertice,
    criteria: &FilterCriteria,
    config: &BuildConfig,
) -> Result<()> {
    let steps = resolve_steps(shapes, shape, &criteria.field_path)?;
    let terminal = &steps[steps.len() - 1].property;
    let filter = typed_filter(terminal, criteria)?;

    let vertice = walk(vars, root, &steps, Purpose::Filter, config);
    vertice.push_filter(filter);
    Ok(())
}

fn add_sort(
    vars: &mut VariableSource,
    shapes: &dyn ShapeSource,
    shape: &NodeShape,
    root: &mut Vertice,
    criteria: &SortCriteria,
    config: &BuildConfig,
) -> Result<()> {
    let steps = resolve_steps(shapes, shape, &criteria.field_path)?;
    let nullable = steps[steps.len() - 1].property.is_nullable();

    let vertice = walk(vars, root, &steps, Purpose::Sort { optional: nullable }, config);
    let Some(variable) = vertice.variable().cloned() else {
        return Err(Error::InvalidFieldPath {
            path: criteria.field_path.to_string(),
            message: "sort target has no variable".into(),
        });
    };

    let expression = if nullable {
        OrderExpression::Coalesce { variable, fallback: Literal::plain(config.null_sort_fallback.as_str()) }
    } else {
        OrderExpression::Variable { variable }
    };
    root.push_orderable(Orderable::new(criteria.direction, expression));
    Ok(())
}

/// Type the criteria's operands per the terminal property shape.
fn typed_filter(property: &PropertyShape, criteria: &FilterCriteria) -> Result<Filter> {
    let invalid = |message: &str| Error::InvalidOperand {
        datatype: property.datatype.as_ref().map(|d| d.as_str().to_owned()).unwrap_or_else(|| "untyped".into()),
        message: format!("{} on '{}': {message}", criteria.operator, criteria.field_path),
    };

    match criteria.operands.len() {
        0 => return Err(invalid("no operands")),
        1 => {}
        _ if !criteria.operator.is_multi_valued() => return Err(invalid("expected a single operand")),
        _ => {}
    }

    let operands = if criteria.operator == FilterOperator::Language {
        criteria
            .operands
            .iter()
            .map(|v| match v.as_str() {
                Some(tag) => Ok(Term::Literal(Literal::plain(tag))),
                None => Err(invalid("language tag must be a string")),
            })
            .collect::<Result<Vec<_>>>()?
    } else {
        criteria
            .operands
            .iter()
            .map(|v| v.to_term(property.datatype.as_ref(), property.is_resource()))
            .collect::<Result<Vec<_>>>()?
    };
    Ok(Filter::new(criteria.operator, operands))
}
