//! Sort keys attached to the root vertice.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Literal, Variable};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Expression an orderable sorts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrderExpression {
    /// Non-nullable field: the bound variable itself.
    Variable { variable: Variable },
    /// Nullable field: `COALESCE(?var, fallback)` so unbound rows still sort.
    Coalesce { variable: Variable, fallback: Literal },
}

impl OrderExpression {
    pub fn variable(&self) -> &Variable {
        match self {
            OrderExpression::Variable { variable } | OrderExpression::Coalesce { variable, .. } => variable,
        }
    }

    pub fn is_null_safe(&self) -> bool {
        matches!(self, OrderExpression::Coalesce { .. })
    }
}

impl fmt::Display for OrderExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderExpression::Variable { variable } => write!(f, "{variable}"),
            OrderExpression::Coalesce { variable, fallback } => write!(f, "COALESCE({variable}, {fallback})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Orderable {
    pub direction: SortDirection,
    pub expression: OrderExpression,
}

impl Orderable {
    pub fn new(direction: SortDirection, expression: OrderExpression) -> Self {
        Self { direction, expression }
    }
}

/// `ASC(expr)` / `DESC(expr)`
impl fmt::Display for Orderable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "ASC({})", self.expression),
            SortDirection::Desc => write!(f, "DESC({})", self.expression),
        }
    }
}
