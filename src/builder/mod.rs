//! Graph builders — transform shapes plus request criteria into a `Vertice` tree.
//!
//! Builders are pure: one call owns its `VariableSource` and returns a
//! complete tree or an error. Nothing is shared between calls except the
//! read-only shape schema.

pub mod helpers;
pub mod select;
pub mod construct;

use serde::{Deserialize, Serialize};

use crate::model::{Edge, Variable, Vertice};
use crate::shape::NodeShape;

pub use helpers::{deep_list, has_equal_target_class, has_same_type, merge_edges};

// ============================================================================
// Build configuration
// ============================================================================

/// Knobs shared by both builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Maximum nesting of structural expansion and construct selections.
    pub max_depth: usize,
    /// Prefix of allocated variable names (`x0`, `x1`, …).
    pub variable_prefix: String,
    /// Treat edges whose type is known on only one side as compatible.
    pub permissive_type_match: bool,
    /// Literal nullable sort keys coalesce to when unbound.
    pub null_sort_fallback: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            max_depth: 8,
            variable_prefix: "x".into(),
            permissive_type_match: true,
            null_sort_fallback: String::new(),
        }
    }
}

// ============================================================================
// Fresh variables
// ============================================================================

/// Allocates unique variables for a single build.
#[derive(Debug, Clone)]
pub struct VariableSource {
    prefix: String,
    next: usize,
}

impl VariableSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: 0 }
    }

    pub fn from_config(config: &BuildConfig) -> Self {
        Self::new(config.variable_prefix.clone())
    }

    pub fn fresh(&mut self) -> Variable {
        let var = Variable::new(format!("{}{}", self.prefix, self.next));
        self.next += 1;
        var
    }

    /// Number of variables handed out so far.
    pub fn allocated(&self) -> usize {
        self.next
    }
}

impl Default for VariableSource {
    fn default() -> Self {
        Self::new("x")
    }
}

/// Fresh vertice for an object of `nested`, carrying its type edge if the
/// shape declares target classes.
pub(crate) fn object_vertice(vars: &mut VariableSource, nested: Option<&NodeShape>) -> Vertice {
    let mut object = Vertice::new(vars.fresh());
    if let Some(shape) = nested {
        if !shape.target_classes().is_empty() {
            object.push_edge(Edge::type_constraint(shape.target_classes().iter().cloned()));
        }
    }
    object
}

/// Root vertice with the shape's `rdf:type` edge.
pub(crate) fn root_vertice(vars: &mut VariableSource, shape: &NodeShape) -> Vertice {
    object_vertice(vars, Some(shape))
}
