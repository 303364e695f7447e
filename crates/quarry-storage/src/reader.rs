//! Row streams over table sources.
//!
//! [`open`] is the reader factory: it dispatches on the [`Table`] descriptor
//! variant and returns a fresh, finite [`RowStream`]. Opening the same table
//! again restarts from the first record, which is what the scan executor
//! relies on when it is re-initialized. The CSV stream owns its file handle,
//! so the handle is released when the stream is dropped, on every exit path.

use std::fs::File;
use std::sync::Arc;

use quarry_core::{Row, Schema, Value};
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::table::{CsvTable, MemoryTable, Table};

/// Opens a fresh row stream for the given table descriptor.
pub fn open(table: &Table) -> Result<RowStream> {
    match table {
        Table::Csv(table) => {
            debug!(path = %table.path().display(), "opening csv table");
            CsvRowStream::open(table).map(RowStream::Csv)
        }
        Table::Memory(table) => Ok(RowStream::Memory(MemoryRowStream::new(table))),
    }
}

/// A finite stream of decoded rows from one table source.
pub enum RowStream {
    /// Rows from a delimited file.
    Csv(CsvRowStream),
    /// Rows from in-memory delimited text.
    Memory(MemoryRowStream),
}

impl Iterator for RowStream {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Csv(stream) => stream.next_row(),
            Self::Memory(stream) => stream.next_row(),
        }
    }
}

/// Streams rows out of a CSV file.
pub struct CsvRowStream {
    records: csv::StringRecordsIntoIter<File>,
    schema: Arc<Schema>,
    record_no: u64,
}

impl CsvRowStream {
    fn open(table: &CsvTable) -> Result<Self> {
        // Width mismatches are reported by this module, with record context,
        // rather than by the csv crate; hence `flexible`.
        let reader = csv::ReaderBuilder::new()
            .has_headers(table.has_header())
            .flexible(true)
            .from_path(table.path())?;
        Ok(Self {
            records: reader.into_records(),
            schema: Arc::clone(table.schema()),
            record_no: 0,
        })
    }

    fn next_row(&mut self) -> Option<Result<Row>> {
        let record = match self.records.next()? {
            Ok(record) => record,
            Err(err) => return Some(Err(err.into())),
        };
        self.record_no += 1;
        Some(decode_fields(
            &self.schema,
            record.iter(),
            record.len(),
            self.record_no,
        ))
    }
}

/// Streams rows out of in-memory delimited text.
pub struct MemoryRowStream {
    lines: std::vec::IntoIter<String>,
    schema: Arc<Schema>,
    record_no: u64,
}

impl MemoryRowStream {
    fn new(table: &MemoryTable) -> Self {
        let lines: Vec<String> = table
            .data()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self {
            lines: lines.into_iter(),
            schema: Arc::clone(table.schema()),
            record_no: 0,
        }
    }

    fn next_row(&mut self) -> Option<Result<Row>> {
        let line = self.lines.next()?;
        self.record_no += 1;
        let fields: Vec<&str> = line.split(',').collect();
        Some(decode_fields(
            &self.schema,
            fields.iter().copied(),
            fields.len(),
            self.record_no,
        ))
    }
}

/// Decodes one delimited record into a row, checking the field count and
/// decoding each field by its column's type. Empty fields become typed NULLs.
fn decode_fields<'a>(
    schema: &Arc<Schema>,
    fields: impl Iterator<Item = &'a str>,
    count: usize,
    record: u64,
) -> Result<Row> {
    if count != schema.column_count() {
        return Err(StorageError::RecordWidthMismatch {
            record,
            expected: schema.column_count(),
            actual: count,
        });
    }
    let mut values = Vec::with_capacity(count);
    for (column, raw) in schema.columns().iter().zip(fields) {
        let value = Value::deserialize(raw.as_bytes(), column.type_id()).map_err(|source| {
            StorageError::FieldDecode {
                record,
                column: column.name().to_string(),
                source,
            }
        })?;
        values.push(value);
    }
    Ok(Row::new(Arc::clone(schema), values)?)
}
