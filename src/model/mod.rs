//! # Graph Model
//!
//! Value types describing the query graph under construction.
//! These types cross every boundary: builders ↔ helpers ↔ renderer ↔ caller.
//!
//! Design rule: this module is pure data — no shape lookups, no I/O, no state.

pub mod term;
pub mod value;
pub mod vertice;
pub mod edge;
pub mod filter;
pub mod orderable;

pub use term::{Iri, Literal, Term, Variable};
pub use value::Value;
pub use vertice::{Subject, Vertice};
pub use edge::Edge;
pub use filter::{Filter, FilterOperator};
pub use orderable::{OrderExpression, Orderable, SortDirection};
