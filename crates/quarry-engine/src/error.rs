//! Error types for planning and execution.

use quarry_core::CoreError;
use quarry_storage::StorageError;

/// Errors raised while validating, planning or executing a query.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A SELECT with no FROM table.
    #[error("FROM clause is required")]
    EmptyFrom,

    /// Under GROUP BY, a SELECT expression that is neither a group key nor
    /// an aggregate argument.
    #[error("expression '{0}' in SELECT is not a group key or aggregate")]
    NotGrouped(String),

    /// With aggregates and no GROUP BY, a SELECT expression that is not an
    /// aggregate argument.
    #[error("with aggregates and no GROUP BY, SELECT may only contain aggregate expressions; found '{0}'")]
    BareSelectWithAggregates(String),

    /// `next` called on an executor before `init`.
    #[error("executor not initialized; call init() first")]
    NotInitialized,

    /// Failure in the value system or row access.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Failure resolving a table or reading its rows.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
