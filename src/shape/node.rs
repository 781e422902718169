//! Node shape — an object type with target classes and named property shapes.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::PropertyShape;
use crate::model::Iri;
use crate::{Error, Result};

/// Immutable once built; property names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNodeShape")]
pub struct NodeShape {
    name: String,
    target_classes: SmallVec<[Iri; 2]>,
    properties: Vec<PropertyShape>,
}

impl NodeShape {
    pub fn builder(name: impl Into<String>) -> NodeShapeBuilder {
        NodeShapeBuilder {
            name: name.into(),
            target_classes: SmallVec::new(),
            properties: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_classes(&self) -> &[Iri] {
        &self.target_classes
    }

    /// Property shapes in declaration order.
    pub fn properties(&self) -> &[PropertyShape] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyShape> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Like [`NodeShape::property`], failing with `MissingPropertyShape`.
    pub fn require_property(&self, name: &str) -> Result<&PropertyShape> {
        self.property(name).ok_or_else(|| Error::MissingPropertyShape {
            shape: self.name.clone(),
            field: name.to_owned(),
        })
    }

    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyShape> {
        self.properties.iter().filter(|p| p.is_required())
    }
}

pub struct NodeShapeBuilder {
    name: String,
    target_classes: SmallVec<[Iri; 2]>,
    properties: Vec<PropertyShape>,
}

impl NodeShapeBuilder {
    pub fn target_class(mut self, class: impl Into<Iri>) -> Self {
        let class = class.into();
        if !self.target_classes.contains(&class) {
            self.target_classes.push(class);
        }
        self
    }

    pub fn property(mut self, property: PropertyShape) -> Self {
        self.properties.push(property);
        self
    }

    pub fn build(self) -> Result<NodeShape> {
        if let Some(property) = self.duplicate_property() {
            return Err(Error::DuplicateProperty { shape: self.name, property });
        }
        Ok(NodeShape {
            name: self.name,
            target_classes: self.target_classes,
            properties: self.properties,
        })
    }

    /// First property name declared twice, if any.
    fn duplicate_property(&self) -> Option<String> {
        let mut seen = HashSet::with_capacity(self.properties.len());
        self.properties.iter().find(|p| !seen.insert(p.name.as_str())).map(|p| p.name.clone())
    }
}

#[derive(Deserialize)]
struct RawNodeShape {
    name: String,
    #[serde(default)]
    target_classes: Vec<Iri>,
    #[serde(default)]
    properties: Vec<PropertyShape>,
}

impl TryFrom<RawNodeShape> for NodeShape {
    type Error = Error;

    fn try_from(raw: RawNodeShape) -> Result<Self> {
        let builder = raw.target_classes.into_iter().fold(NodeShape::builder(raw.name), |b, c| b.target_class(c));
        raw.properties.into_iter().fold(builder, |b, p| b.property(p)).build()
    }
}
