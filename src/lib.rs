//! # shape-query — Shape-driven query-graph compiler
//!
//! Translates a requested field selection, with optional filter and sort
//! criteria, into a graph-pattern tree validated against a schema of node
//! and property shapes. The tree is what an outer query assembler wraps in
//! `SELECT … WHERE { … }` or `CONSTRUCT { … } WHERE { … }`.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `ShapeSource` is the contract between the compiler and the shape schema
//! 2. **Clean DTOs**: `Vertice`, `Edge`, `Filter`, `Orderable` cross every boundary
//! 3. **Builders own nothing**: criteria → graph is a pure function of its inputs
//! 4. **No globals**: fresh variables come from a `VariableSource` passed by reference
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_query::{
//!     builder::select, render, BuildConfig, FieldPath, FilterCriteria, FilterOperator,
//!     FieldDefinition, NodeShape, ObjectType, PropertyShape, ShapeRegistry, ShapeSource,
//!     TypeRegistry, Value, VariableSource,
//! };
//!
//! # fn example() -> shape_query::Result<()> {
//! let shapes = ShapeRegistry::new().with_shape(
//!     NodeShape::builder("Beer")
//!         .target_class("https://example.org/Beer")
//!         .property(PropertyShape::predicate("name", "https://example.org/name").with_min_count(1))
//!         .build()?,
//! );
//! let types = TypeRegistry::new().with_type(
//!     ObjectType::new("Beer").with_field(FieldDefinition::scalar("name", "String")),
//! );
//!
//! let path = FieldPath::resolve(&types, "Beer", "name")?;
//! let filters = vec![FilterCriteria::new(path, FilterOperator::Eq, Value::from("Tripel"))];
//!
//! let mut vars = VariableSource::default();
//! let beer = shapes.require("Beer")?;
//! let root = select::create_root(&mut vars, &shapes, &beer, &filters, &[], &BuildConfig::default())?;
//! println!("{}", render::where_pattern(&root));
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod vocab;
pub mod shape;
pub mod schema;
pub mod model;
pub mod criteria;
pub mod builder;
pub mod render;

// ============================================================================
// Re-exports: Shapes and types
// ============================================================================

pub use shape::{NodeShape, NodeShapeBuilder, NodeKind, PropertyPath, PropertyShape, ShapeRegistry, ShapeSource};
pub use schema::{FieldDefinition, FieldPath, ObjectType, TypeRegistry};

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Edge, Filter, FilterOperator, Iri, Literal, OrderExpression, Orderable, Subject, Term,
    Value, Variable, Vertice,
};

// ============================================================================
// Re-exports: Criteria and builders
// ============================================================================

pub use criteria::{FilterCriteria, SelectedField, SortCriteria, SortDirection};
pub use builder::{BuildConfig, VariableSource};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Field not found: '{field}' on type {type_name}")]
    UnknownField { type_name: String, field: String },

    #[error("Invalid field path '{path}': {message}")]
    InvalidFieldPath { path: String, message: String },

    #[error("Unknown node shape: {0}")]
    UnknownShape(String),

    #[error("Node shape {shape} has no property shape for field '{field}'")]
    MissingPropertyShape { shape: String, field: String },

    #[error("Node shape {shape} declares property '{property}' more than once")]
    DuplicateProperty { shape: String, property: String },

    #[error("Invalid operand for {datatype}: {message}")]
    InvalidOperand { datatype: String, message: String },

    #[error("Selection nested deeper than {max_depth} levels at '{field}'")]
    DepthExceeded { max_depth: usize, field: String },
}

pub type Result<T> = std::result::Result<T, Error>;
