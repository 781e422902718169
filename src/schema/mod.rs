//! # Type Schema
//!
//! Object types and fields that requests are phrased in. Field paths are
//! resolved here before any shape is consulted; the shape schema then
//! supplies the graph-level meaning of each field.

pub mod field_path;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

pub use field_path::FieldPath;

/// A field of an object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    /// Named type of the field (object type name or scalar name).
    pub type_name: String,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub list: bool,
}

fn default_nullable() -> bool {
    true
}

impl FieldDefinition {
    pub fn scalar(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self { name: name.into(), type_name: type_name.into(), nullable: true, list: false }
    }

    pub fn object(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::scalar(name, type_name)
    }

    /// Non-null (`Type!`).
    pub fn required(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// List-valued (`[Type]`).
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectType {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl ObjectType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), fields: Vec::new() }
    }

    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Object types keyed by name. Scalars are implicit: any type name that is
/// not registered here is a leaf.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, ObjectType>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, object_type: ObjectType) -> Self {
        self.insert(object_type);
        self
    }

    pub fn insert(&mut self, object_type: ObjectType) {
        self.types.insert(object_type.name.clone(), object_type);
    }

    pub fn get(&self, name: &str) -> Option<&ObjectType> {
        self.types.get(name)
    }

    pub fn is_object_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }
}
