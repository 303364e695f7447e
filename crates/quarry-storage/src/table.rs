//! Table descriptors.
//!
//! A [`Table`] describes where rows come from and what shape they have; it
//! performs no IO itself. The reader factory in [`crate::reader`] dispatches
//! on the descriptor variant to produce an actual row stream.

use std::path::PathBuf;
use std::sync::Arc;

use quarry_core::Schema;

/// A table backed by a delimited text file.
#[derive(Debug, Clone)]
pub struct CsvTable {
    path: PathBuf,
    schema: Arc<Schema>,
    has_header: bool,
}

impl CsvTable {
    /// Describes a CSV file with the given schema.
    ///
    /// When `has_header` is set, the first record is skipped.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, schema: Arc<Schema>, has_header: bool) -> Self {
        Self {
            path: path.into(),
            schema,
            has_header,
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// The table's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Whether the first record is a header to skip.
    #[must_use]
    pub const fn has_header(&self) -> bool {
        self.has_header
    }
}

/// A table held in memory as delimited text, used by tests and demos.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    data: String,
    schema: Arc<Schema>,
}

impl MemoryTable {
    /// Describes an in-memory table; `data` is comma-separated, one record
    /// per line.
    #[must_use]
    pub fn new(data: impl Into<String>, schema: Arc<Schema>) -> Self {
        Self {
            data: data.into(),
            schema,
        }
    }

    /// The raw delimited text.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// The table's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }
}

/// The closed set of table source kinds.
#[derive(Debug, Clone)]
pub enum Table {
    /// Delimited file on disk.
    Csv(CsvTable),
    /// Delimited text in memory.
    Memory(MemoryTable),
}

impl Table {
    /// The table's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        match self {
            Self::Csv(table) => &table.schema,
            Self::Memory(table) => &table.schema,
        }
    }
}

#[cfg(test)]
mod tests {
    use quarry_core::{Column, TypeId};

    use super::*;

    #[test]
    fn test_schema_access() {
        let schema = Arc::new(Schema::new(vec![Column::new("id", TypeId::Int)]));
        let table = Table::Memory(MemoryTable::new("1\n2\n", Arc::clone(&schema)));
        assert_eq!(table.schema().column_count(), 1);

        let table = Table::Csv(CsvTable::new("data/example.csv", schema, true));
        assert!(table.schema().column_by_name("id").is_ok());
    }
}
