//! # Shape Schema
//!
//! `ShapeSource` is the contract between the compiler and whatever loads
//! node/property shapes. Shapes are built once and shared read-only.
//!
//! ## Implementations
//!
//! | Source | Description |
//! |--------|-------------|
//! | `ShapeRegistry` | In-memory map of shapes keyed by name |

pub mod node;
pub mod path;
pub mod property;

use std::sync::Arc;

use hashbrown::HashMap;

use crate::{Error, Result};

pub use node::{NodeShape, NodeShapeBuilder};
pub use path::PropertyPath;
pub use property::{NodeKind, PropertyShape};

// ============================================================================
// ShapeSource trait
// ============================================================================

/// Lookup of node shapes by name.
pub trait ShapeSource: Send + Sync {
    fn node_shape(&self, name: &str) -> Option<Arc<NodeShape>>;

    /// Like [`ShapeSource::node_shape`], failing with `UnknownShape`.
    fn require(&self, name: &str) -> Result<Arc<NodeShape>> {
        self.node_shape(name).ok_or_else(|| Error::UnknownShape(name.to_owned()))
    }
}

// ============================================================================
// ShapeRegistry
// ============================================================================

/// In-memory shape schema.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    shapes: HashMap<String, Arc<NodeShape>>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: NodeShape) -> Self {
        self.insert(shape);
        self
    }

    /// Register a shape, replacing any shape of the same name.
    pub fn insert(&mut self, shape: NodeShape) -> Option<Arc<NodeShape>> {
        self.shapes.insert(shape.name().to_owned(), Arc::new(shape))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Check that every nested node reference resolves.
    pub fn validate(&self) -> Result<()> {
        for shape in self.shapes.values() {
            for property in shape.properties() {
                if let Some(nested) = &property.node {
                    if !self.shapes.contains_key(nested) {
                        return Err(Error::UnknownShape(nested.clone()));
                    }
                }
            }
        }
        Ok(())
    }
}

impl ShapeSource for ShapeRegistry {
    fn node_shape(&self, name: &str) -> Option<Arc<NodeShape>> {
        self.shapes.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beer() -> NodeShape {
        NodeShape::builder("Beer")
            .property(PropertyShape::predicate("brewery", "urn:brewery").with_node("Brewery"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_require_unknown_shape() {
        let registry = ShapeRegistry::new().with_shape(beer());
        assert!(registry.require("Beer").is_ok());
        assert_eq!(registry.require("Hop").unwrap_err(), Error::UnknownShape("Hop".into()));
    }

    #[test]
    fn test_validate_dangling_reference() {
        let mut registry = ShapeRegistry::new().with_shape(beer());
        assert_eq!(registry.validate().unwrap_err(), Error::UnknownShape("Brewery".into()));

        registry.insert(NodeShape::builder("Brewery").build().unwrap());
        assert!(registry.validate().is_ok());
        assert_eq!(registry.len(), 2);
    }
}
