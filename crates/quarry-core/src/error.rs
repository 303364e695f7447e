//! Error types for the core data model.

use crate::types::TypeId;

/// Errors raised by the value system, schemas, rows and expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A cast between two types that the cast matrix does not permit.
    #[error("cannot cast {from} to {to}")]
    UnsupportedCast {
        /// Source type of the value being cast.
        from: TypeId,
        /// Requested target type.
        to: TypeId,
    },

    /// A textual value that does not parse as the requested type.
    #[error("cannot convert '{text}' to {target}")]
    MalformedLiteral {
        /// The offending text.
        text: String,
        /// The type the text was parsed as.
        target: TypeId,
    },

    /// Comparison between types that share no comparable relation.
    #[error("cannot compare {left} with {right}")]
    NotComparable {
        /// Type of the left operand.
        left: TypeId,
        /// Type of the right operand.
        right: TypeId,
    },

    /// Arithmetic on a non-numeric operand.
    #[error("arithmetic requires numeric operands, got {left} and {right}")]
    NotNumeric {
        /// Type of the left operand.
        left: TypeId,
        /// Type of the right operand.
        right: TypeId,
    },

    /// A column name that does not exist in the schema.
    #[error("column '{0}' not found in schema")]
    UnknownColumn(String),

    /// A row constructed with the wrong number of values for its schema.
    #[error("row width {actual} does not match schema width {expected}")]
    RowWidthMismatch {
        /// Column count of the schema.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// Raw bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in serialized value")]
    InvalidUtf8,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
