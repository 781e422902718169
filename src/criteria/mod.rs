//! Request inputs: filter criteria, sort criteria and selection trees.
//!
//! These arrive already parsed and resolved; builders only consume them.

use serde::{Deserialize, Serialize};

use crate::model::{FilterOperator, Value};
use crate::schema::FieldPath;

pub use crate::model::SortDirection;

/// `{ field_path, operator, operands }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub field_path: FieldPath,
    pub operator: FilterOperator,
    pub operands: Vec<Value>,
}

impl FilterCriteria {
    pub fn new(field_path: FieldPath, operator: FilterOperator, operand: impl Into<Value>) -> Self {
        Self { field_path, operator, operands: vec![operand.into()] }
    }

    pub fn with_operands(
        field_path: FieldPath,
        operator: FilterOperator,
        operands: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self { field_path, operator, operands: operands.into_iter().collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriteria {
    pub field_path: FieldPath,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortCriteria {
    pub fn asc(field_path: FieldPath) -> Self {
        Self { field_path, direction: SortDirection::Asc }
    }

    pub fn desc(field_path: FieldPath) -> Self {
        Self { field_path, direction: SortDirection::Desc }
    }
}

/// A selected field with its nested selection (empty for leaves).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedField {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selection: Vec<SelectedField>,
}

impl SelectedField {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self { name: name.into(), selection: Vec::new() }
    }

    pub fn nested(name: impl Into<String>, selection: Vec<SelectedField>) -> Self {
        Self { name: name.into(), selection }
    }

    /// Build a selection tree from dotted paths, folding shared prefixes.
    ///
    /// `["name", "beers.name", "beers.abv"]` → `name`, `beers { name abv }`.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a str>) -> Vec<SelectedField> {
        let mut roots: Vec<SelectedField> = Vec::new();
        for path in paths {
            let mut level = &mut roots;
            for segment in path.split('.').filter(|s| !s.is_empty()) {
                let idx = match level.iter().position(|f| f.name == segment) {
                    Some(idx) => idx,
                    None => {
                        level.push(SelectedField::leaf(segment));
                        level.len() - 1
                    }
                };
                level = &mut level[idx].selection;
            }
        }
        roots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paths_folds_prefixes() {
        let selection = SelectedField::from_paths(["name", "beers.name", "beers.abv", "beers.ingredients.name"]);
        assert_eq!(
            selection,
            vec![
                SelectedField::leaf("name"),
                SelectedField::nested(
                    "beers",
                    vec![
                        SelectedField::leaf("name"),
                        SelectedField::leaf("abv"),
                        SelectedField::nested("ingredients", vec![SelectedField::leaf("name")]),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_sort_direction_default() {
        let json = r#"{"field_path": {"steps": [{"name": "name", "type_name": "String"}]}}"#;
        let sort: SortCriteria = serde_json::from_str(json).unwrap();
        assert_eq!(sort.direction, SortDirection::Asc);
        assert!(sort.field_path.leaf().nullable);
    }
}
