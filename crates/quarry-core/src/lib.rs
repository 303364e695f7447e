//! # quarry-core
//!
//! The data model of the quarry query engine:
//!
//! - a typed [`Value`] scalar with well-defined casting, comparison,
//!   arithmetic and NULL tri-state semantics,
//! - ordered, named [`Schema`]s and the [`Row`]s that carry them,
//! - a closed [`Expr`] variant set with structural equality, evaluated
//!   row-at-a-time.
//!
//! NULL is an absent payload inside a typed value, never a type of its own:
//! every value, null or not, has a [`TypeId`].
//!
//! ```rust
//! use quarry_core::{CompareOp, Tristate, TypeId, Value};
//!
//! let price = Value::int(20);
//! assert_eq!(
//!     price.compare(&Value::decimal(19.5), CompareOp::Gt).unwrap(),
//!     Tristate::True
//! );
//!
//! // NULLs stay typed and poison comparisons to NULL, not false.
//! let missing = Value::null(TypeId::Int);
//! assert_eq!(
//!     missing.compare(&price, CompareOp::Eq).unwrap(),
//!     Tristate::Null
//! );
//! ```

pub mod error;
pub mod expr;
pub mod row;
pub mod schema;
pub mod types;

pub use error::CoreError;
pub use expr::Expr;
pub use row::Row;
pub use schema::{Column, Schema};
pub use types::{ArithOp, CompareOp, Tristate, TypeId, Value};
