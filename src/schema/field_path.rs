//! Field path resolution: `beers.ingredients.name` → ordered field definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{FieldDefinition, TypeRegistry};
use crate::{Error, Result};

/// Ordered field definitions from the root type down to a leaf. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPath {
    steps: SmallVec<[FieldDefinition; 4]>,
}

impl FieldPath {
    /// Resolve a dotted reference against `root_type`.
    ///
    /// Every segment must be a field of the type reached by the previous
    /// segment; the first unresolvable segment fails with `UnknownField`.
    /// A segment below a scalar field fails with `InvalidFieldPath`.
    pub fn resolve(types: &TypeRegistry, root_type: &str, path: &str) -> Result<Self> {
        if path.trim().is_empty() {
            return Err(Error::InvalidFieldPath { path: path.to_owned(), message: "empty path".into() });
        }
        let mut current = types.get(root_type).ok_or_else(|| Error::UnknownType(root_type.to_owned()))?;
        let mut steps = SmallVec::new();
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if segment.is_empty() {
                return Err(Error::InvalidFieldPath { path: path.to_owned(), message: "empty segment".into() });
            }
            let field = current.field(segment).ok_or_else(|| Error::UnknownField {
                type_name: current.name.clone(),
                field: segment.to_owned(),
            })?;
            steps.push(field.clone());

            if let Some(next) = segments.peek() {
                if !types.is_object_type(&field.type_name) {
                    return Err(Error::InvalidFieldPath {
                        path: path.to_owned(),
                        message: format!("cannot select '{next}' below scalar field '{}' of type {}", field.name, field.type_name),
                    });
                }
                current = types.get(&field.type_name).ok_or_else(|| Error::UnknownType(field.type_name.clone()))?;
            }
        }

        tracing::trace!(root = root_type, path, depth = steps.len(), "resolved field path");
        Ok(Self { steps })
    }

    /// Build from already-resolved steps.
    pub fn from_steps(steps: impl IntoIterator<Item = FieldDefinition>) -> Result<Self> {
        let steps: SmallVec<[FieldDefinition; 4]> = steps.into_iter().collect();
        if steps.is_empty() {
            return Err(Error::InvalidFieldPath { path: String::new(), message: "empty path".into() });
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[FieldDefinition] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> &FieldDefinition {
        &self.steps[0]
    }

    pub fn leaf(&self) -> &FieldDefinition {
        &self.steps[self.steps.len() - 1]
    }

    /// Path without its first step, `None` for single-step paths.
    pub fn rest(&self) -> Option<FieldPath> {
        (self.steps.len() > 1).then(|| FieldPath { steps: self.steps[1..].iter().cloned().collect() })
    }

    pub fn is_nested(&self) -> bool {
        self.steps.len() > 1
    }

    /// No step on the path is nullable.
    pub fn is_required(&self) -> bool {
        self.steps.iter().all(|s| !s.nullable)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 { write!(f, ".")?; }
            write!(f, "{}", step.name)?;
        }
        Ok(())
    }
}
