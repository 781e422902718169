//! Shared brewery schema used by the end-to-end tests.

#![allow(dead_code)]

use shape_query::vocab::xsd;
use shape_query::{
    FieldDefinition, FieldPath, NodeShape, ObjectType, PropertyPath, PropertyShape, ShapeRegistry,
    TypeRegistry,
};

pub const EX: &str = "https://github.com/dotwebstack/beer/def#";

pub fn ex(local: &str) -> String {
    format!("{EX}{local}")
}

pub fn pred(local: &str) -> PropertyPath {
    PropertyPath::predicate(ex(local))
}

/// Brewery ─beers→ Beer ─ingredients→ Ingredient
///
/// Only `identifier` fields are mandatory.
pub fn shapes() -> ShapeRegistry {
    let brewery = NodeShape::builder("Brewery")
        .target_class(ex("Brewery"))
        .property(
            PropertyShape::predicate("identifier", ex("Brewery_identifier"))
                .with_min_count(1)
                .with_max_count(1)
                .with_datatype(xsd::STRING),
        )
        .property(PropertyShape::predicate("name", ex("Brewery_name")).with_datatype(xsd::STRING))
        .property(PropertyShape::predicate("founded", ex("Brewery_founded")).with_datatype(xsd::DATE))
        .property(PropertyShape::predicate("beers", ex("Brewery_beers")).with_node("Beer"))
        .property(PropertyShape::new(
            "city",
            PropertyPath::sequence([pred("Brewery_address"), pred("Address_city")]),
        ).with_datatype(xsd::STRING))
        .build()
        .unwrap();

    let beer = NodeShape::builder("Beer")
        .target_class(ex("Beer"))
        .property(
            PropertyShape::predicate("identifier", ex("Beer_identifier"))
                .with_min_count(1)
                .with_datatype(xsd::STRING),
        )
        .property(PropertyShape::predicate("name", ex("Beer_name")).with_datatype(xsd::STRING))
        .property(PropertyShape::predicate("abv", ex("Beer_abv")).with_datatype(xsd::DECIMAL))
        .property(PropertyShape::predicate("ingredients", ex("Beer_ingredients")).with_node("Ingredient"))
        .property(
            PropertyShape::new("brewery", PropertyPath::inverse(pred("Brewery_beers"))).with_node("Brewery"),
        )
        .build()
        .unwrap();

    let ingredient = NodeShape::builder("Ingredient")
        .target_class(ex("Ingredient"))
        .property(PropertyShape::predicate("name", ex("Ingredient_name")).with_datatype(xsd::STRING))
        .build()
        .unwrap();

    let registry = ShapeRegistry::new().with_shape(brewery).with_shape(beer).with_shape(ingredient);
    registry.validate().unwrap();
    registry
}

pub fn types() -> TypeRegistry {
    TypeRegistry::new()
        .with_type(
            ObjectType::new("Brewery")
                .with_field(FieldDefinition::scalar("identifier", "ID").required())
                .with_field(FieldDefinition::scalar("name", "String"))
                .with_field(FieldDefinition::scalar("founded", "Date"))
                .with_field(FieldDefinition::scalar("city", "String"))
                .with_field(FieldDefinition::object("beers", "Beer").list()),
        )
        .with_type(
            ObjectType::new("Beer")
                .with_field(FieldDefinition::scalar("identifier", "ID").required())
                .with_field(FieldDefinition::scalar("name", "String"))
                .with_field(FieldDefinition::scalar("abv", "Float"))
                .with_field(FieldDefinition::object("ingredients", "Ingredient").list())
                .with_field(FieldDefinition::object("brewery", "Brewery")),
        )
        .with_type(ObjectType::new("Ingredient").with_field(FieldDefinition::scalar("name", "String")))
}

pub fn path(root: &str, dotted: &str) -> FieldPath {
    FieldPath::resolve(&types(), root, dotted).unwrap()
}
