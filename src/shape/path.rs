//! Property path expressions.
//!
//! | Syntax | Variant |
//! |--------|---------|
//! | `<iri>` | `Predicate` |
//! | `^path` | `Inverse` |
//! | `p/q` | `Sequence` |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::Iri;
use crate::vocab::rdf;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyPath {
    Predicate(Iri),
    Inverse(Box<PropertyPath>),
    Sequence(Vec<PropertyPath>),
}

impl PropertyPath {
    pub fn predicate(iri: impl Into<Iri>) -> Self {
        PropertyPath::Predicate(iri.into())
    }

    pub fn inverse(path: PropertyPath) -> Self {
        PropertyPath::Inverse(Box::new(path))
    }

    pub fn sequence(steps: impl IntoIterator<Item = PropertyPath>) -> Self {
        PropertyPath::Sequence(steps.into_iter().collect())
    }

    pub fn rdf_type() -> Self {
        PropertyPath::Predicate(Iri::new(rdf::TYPE))
    }

    pub fn is_rdf_type(&self) -> bool {
        matches!(self, PropertyPath::Predicate(iri) if iri.is_rdf_type())
    }

    fn needs_group(&self) -> bool {
        matches!(self, PropertyPath::Sequence(steps) if steps.len() > 1)
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPath::Predicate(iri) if iri.is_rdf_type() => write!(f, "a"),
            PropertyPath::Predicate(iri) => write!(f, "{iri}"),
            PropertyPath::Inverse(inner) if inner.needs_group() => write!(f, "^({inner})"),
            PropertyPath::Inverse(inner) => write!(f, "^{inner}"),
            PropertyPath::Sequence(steps) => {
                for (i, step) in steps.iter().enumerate() {
                    if i > 0 { write!(f, "/")?; }
                    write!(f, "{step}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_rendering() {
        assert_eq!(PropertyPath::predicate("urn:name").to_string(), "<urn:name>");
        assert_eq!(PropertyPath::rdf_type().to_string(), "a");
        assert_eq!(
            PropertyPath::inverse(PropertyPath::predicate("urn:brewery")).to_string(),
            "^<urn:brewery>"
        );
        let seq = PropertyPath::sequence([
            PropertyPath::predicate("urn:address"),
            PropertyPath::predicate("urn:city"),
        ]);
        assert_eq!(seq.to_string(), "<urn:address>/<urn:city>");
        assert_eq!(PropertyPath::inverse(seq).to_string(), "^(<urn:address>/<urn:city>)");
    }
}
