//! Vertice — a subject position in the query graph.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Edge, Filter, Iri, Orderable, Variable};

/// What occupies the subject position of a vertice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Subject {
    /// Bound by a query variable.
    Variable(Variable),
    /// Fixed set of candidate classes; only ever the object of an `rdf:type` edge.
    Types(SmallVec<[Iri; 2]>),
}

/// A node of the compiled graph pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertice {
    pub(crate) subject: Subject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) filters: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) orderables: Vec<Orderable>,
}

impl Vertice {
    pub fn new(variable: Variable) -> Self {
        Self {
            subject: Subject::Variable(variable),
            edges: Vec::new(),
            filters: Vec::new(),
            orderables: Vec::new(),
        }
    }

    /// Leaf type-constraint vertice holding candidate classes.
    pub fn types(classes: impl IntoIterator<Item = Iri>) -> Self {
        let mut set: SmallVec<[Iri; 2]> = SmallVec::new();
        for class in classes {
            if !set.contains(&class) {
                set.push(class);
            }
        }
        Self {
            subject: Subject::Types(set),
            edges: Vec::new(),
            filters: Vec::new(),
            orderables: Vec::new(),
        }
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.push_edge(edge);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_orderable(mut self, orderable: Orderable) -> Self {
        self.orderables.push(orderable);
        self
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// Subject variable, `None` for type-constraint vertices.
    pub fn variable(&self) -> Option<&Variable> {
        match &self.subject {
            Subject::Variable(v) => Some(v),
            Subject::Types(_) => None,
        }
    }

    pub fn type_set(&self) -> Option<&[Iri]> {
        match &self.subject {
            Subject::Types(set) => Some(set.as_slice()),
            Subject::Variable(_) => None,
        }
    }

    pub fn is_type_constraint(&self) -> bool {
        matches!(self.subject, Subject::Types(_))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn orderables(&self) -> &[Orderable] {
        &self.orderables
    }

    /// The `rdf:type` edge of this vertice, if it carries one.
    pub fn type_edge(&self) -> Option<&Edge> {
        self.edges.iter().find(|e| e.is_type_constraint())
    }

    pub(crate) fn push_edge(&mut self, edge: Edge) {
        debug_assert!(!self.is_type_constraint(), "type-constraint vertices are leaves");
        self.edges.push(edge);
    }

    pub(crate) fn push_filter(&mut self, filter: Filter) {
        self.filters.push(filter);
    }

    pub(crate) fn push_orderable(&mut self, orderable: Orderable) {
        self.orderables.push(orderable);
    }
}

impl std::fmt::Display for Vertice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render::where_pattern(self))
    }
}
