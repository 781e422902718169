//! Edge — a predicate-labelled relation from a vertice to a child vertice.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Iri, Subject, Vertice};
use crate::shape::PropertyPath;

/// A directed edge in the compiled graph pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub(crate) predicate: PropertyPath,
    pub(crate) object: Vertice,
    /// Pattern may be absent without eliminating the enclosing row.
    #[serde(default)]
    pub(crate) optional: bool,
    /// Demanded by the shape (cardinality or type), not only by a request.
    #[serde(default)]
    pub(crate) required: bool,
}

impl Edge {
    /// Non-optional, request-driven edge.
    pub fn new(predicate: PropertyPath, object: Vertice) -> Self {
        Self { predicate, object, optional: false, required: false }
    }

    /// Required `rdf:type` edge to a leaf vertice holding `classes`.
    pub fn type_constraint(classes: impl IntoIterator<Item = Iri>) -> Self {
        Self {
            predicate: PropertyPath::rdf_type(),
            object: Vertice::types(classes),
            optional: false,
            required: true,
        }
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn predicate(&self) -> &PropertyPath {
        &self.predicate
    }

    pub fn object(&self) -> &Vertice {
        &self.object
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_type_constraint(&self) -> bool {
        self.predicate.is_rdf_type() && self.object.is_type_constraint()
    }

    pub(crate) fn object_mut(&mut self) -> &mut Vertice {
        &mut self.object
    }
}

/// `<predicate> <object-rendering>`
impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.predicate)?;
        match self.object.subject() {
            Subject::Variable(v) => write!(f, "{v}"),
            Subject::Types(types) => {
                for (i, t) in types.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{t}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Variable;

    #[test]
    fn test_edge_display() {
        let edge = Edge::new(PropertyPath::predicate("urn:Brewery_beers"), Vertice::new(Variable::new("x1")));
        assert_eq!(edge.to_string(), "<urn:Brewery_beers> ?x1");
        assert!(!edge.is_optional());
        assert!(!edge.is_required());
    }

    #[test]
    fn test_type_constraint_display() {
        let edge = Edge::type_constraint([Iri::new("urn:A"), Iri::new("urn:B")]);
        assert!(edge.is_type_constraint());
        assert!(edge.is_required());
        assert_eq!(edge.to_string(), "a <urn:A>, <urn:B>");
    }
}
