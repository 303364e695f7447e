//! Rows: a value vector paired with its schema.

use std::sync::Arc;

use crate::error::{CoreError, Result};
use crate::schema::Schema;
use crate::types::Value;

/// One record flowing through the executor pipeline.
///
/// Every row of a stream shares its schema via [`Arc`]. Construction enforces
/// that the value count matches the schema width.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Row {
    /// Creates a row, checking the value count against the schema.
    pub fn new(schema: Arc<Schema>, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.column_count() {
            return Err(CoreError::RowWidthMismatch {
                expected: schema.column_count(),
                actual: values.len(),
            });
        }
        Ok(Self { schema, values })
    }

    /// The row's schema.
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// All values, in column order.
    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The value at `index`, if any.
    #[must_use]
    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// The value under the first column named `name`.
    pub fn value_by_name(&self, name: &str) -> Result<&Value> {
        let idx = self.schema.index_of(name)?;
        Ok(&self.values[idx])
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for value in &self.values {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
            first = false;
        }
        Ok(())
    }
}
