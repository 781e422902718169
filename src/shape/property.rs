//! Property shape — a typed, cardinality-constrained field of a node shape.

use serde::{Deserialize, Serialize};

use super::PropertyPath;
use crate::model::Iri;

/// `sh:nodeKind` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Iri,
    Literal,
    BlankNode,
    BlankNodeOrIri,
    BlankNodeOrLiteral,
    IriOrLiteral,
}

impl NodeKind {
    /// Values of this kind are resources, never literals.
    pub fn is_resource(self) -> bool {
        matches!(self, NodeKind::Iri | NodeKind::BlankNode | NodeKind::BlankNodeOrIri)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyShape {
    /// Field name the shape is addressed by.
    pub name: String,
    pub path: PropertyPath,
    #[serde(default)]
    pub min_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<Iri>,
    /// Name of the nested node shape for object-valued properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_kind: Option<NodeKind>,
}

impl PropertyShape {
    pub fn new(name: impl Into<String>, path: PropertyPath) -> Self {
        Self {
            name: name.into(),
            path,
            min_count: 0,
            max_count: None,
            datatype: None,
            node: None,
            node_kind: None,
        }
    }

    /// Shape over a plain predicate path.
    pub fn predicate(name: impl Into<String>, iri: impl Into<Iri>) -> Self {
        Self::new(name, PropertyPath::predicate(iri))
    }

    pub fn with_min_count(mut self, min: u32) -> Self {
        self.min_count = min;
        self
    }

    pub fn with_max_count(mut self, max: u32) -> Self {
        self.max_count = Some(max);
        self
    }

    pub fn with_datatype(mut self, datatype: impl Into<Iri>) -> Self {
        self.datatype = Some(datatype.into());
        self
    }

    pub fn with_node(mut self, node_shape: impl Into<String>) -> Self {
        self.node = Some(node_shape.into());
        self
    }

    pub fn with_node_kind(mut self, kind: NodeKind) -> Self {
        self.node_kind = Some(kind);
        self
    }

    /// `sh:minCount >= 1`
    pub fn is_required(&self) -> bool {
        self.min_count >= 1
    }

    pub fn is_nullable(&self) -> bool {
        self.min_count == 0
    }

    pub fn is_object(&self) -> bool {
        self.node.is_some()
    }

    /// Operands against this property are IRIs rather than literals.
    pub fn is_resource(&self) -> bool {
        match self.node_kind {
            Some(kind) => kind.is_resource(),
            None => self.is_object() && self.datatype.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_flags() {
        let p = PropertyShape::predicate("name", "urn:name");
        assert!(p.is_nullable());
        assert!(!p.is_required());
        let p = p.with_min_count(1).with_max_count(1);
        assert!(p.is_required());
        assert_eq!(p.max_count, Some(1));
    }

    #[test]
    fn test_resource_detection() {
        assert!(PropertyShape::predicate("beers", "urn:beers").with_node("Beer").is_resource());
        assert!(!PropertyShape::predicate("name", "urn:name").is_resource());
        assert!(
            PropertyShape::predicate("homepage", "urn:homepage")
                .with_node_kind(NodeKind::Iri)
                .is_resource()
        );
    }
}
