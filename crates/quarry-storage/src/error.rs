//! Error types for table sources and the catalog.

use quarry_core::CoreError;

/// Errors raised while resolving tables or reading their rows.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The catalog has no table under the requested name.
    #[error("table '{0}' not found in catalog")]
    UnknownTable(String),

    /// IO error opening or reading a backing file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record whose field count differs from the schema width.
    #[error("record {record} has {actual} fields, schema expects {expected}")]
    RecordWidthMismatch {
        /// 1-based record number within the source.
        record: u64,
        /// Column count of the table schema.
        expected: usize,
        /// Number of fields found.
        actual: usize,
    },

    /// A field that does not decode as its column's type.
    #[error("record {record}, column '{column}': {source}")]
    FieldDecode {
        /// 1-based record number within the source.
        record: u64,
        /// Name of the offending column.
        column: String,
        /// The underlying decode failure.
        source: CoreError,
    },

    /// Malformed catalog config file.
    #[error("catalog config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A type name in the catalog config that is not part of the type system.
    #[error("unknown column type '{0}' in catalog config")]
    UnknownTypeName(String),

    /// Core-level failure surfaced by a row stream.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
