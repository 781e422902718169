//! Filters attached to vertices.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Term;

/// Comparison operators a filter criterion may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// Membership in the operand list.
    In,
    /// `langMatches(lang(?x), operand)`
    Language,
}

impl FilterOperator {
    /// Whether the operator accepts more than one operand.
    pub fn is_multi_valued(self) -> bool {
        matches!(self, FilterOperator::In)
    }

    /// Infix SPARQL symbol for binary comparisons.
    pub fn symbol(self) -> Option<&'static str> {
        match self {
            FilterOperator::Eq => Some("="),
            FilterOperator::Ne => Some("!="),
            FilterOperator::Gt => Some(">"),
            FilterOperator::Gte => Some(">="),
            FilterOperator::Lt => Some("<"),
            FilterOperator::Lte => Some("<="),
            FilterOperator::In | FilterOperator::Language => None,
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterOperator::Eq => "EQ",
            FilterOperator::Ne => "NE",
            FilterOperator::Gt => "GT",
            FilterOperator::Gte => "GTE",
            FilterOperator::Lt => "LT",
            FilterOperator::Lte => "LTE",
            FilterOperator::In => "IN",
            FilterOperator::Language => "LANGUAGE",
        };
        f.write_str(name)
    }
}

/// Operator plus typed operands; applies to the subject of its vertice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub operator: FilterOperator,
    pub operands: Vec<Term>,
}

impl Filter {
    pub fn new(operator: FilterOperator, operands: impl IntoIterator<Item = Term>) -> Self {
        Self { operator, operands: operands.into_iter().collect() }
    }
}
