//! Table scan executor.

use quarry_core::Row;
use quarry_storage::{reader, RowStream, Table};

use crate::error::{EngineError, Result};
use crate::plan::ScanPlan;

/// Streams rows out of a table source.
///
/// Each `init` opens a fresh stream, so a re-initialized scan restarts from
/// the first record.
pub struct ScanExecutor {
    table: Table,
    stream: Option<RowStream>,
}

impl ScanExecutor {
    pub(crate) fn new(plan: &ScanPlan) -> Self {
        Self {
            table: plan.table.clone(),
            stream: None,
        }
    }

    pub(crate) fn init(&mut self) -> Result<()> {
        self.stream = Some(reader::open(&self.table)?);
        Ok(())
    }

    pub(crate) fn next(&mut self) -> Result<Option<Row>> {
        let stream = self.stream.as_mut().ok_or(EngineError::NotInitialized)?;
        match stream.next() {
            None => Ok(None),
            Some(Ok(row)) => Ok(Some(row)),
            Some(Err(err)) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use quarry_core::Value;

    use super::super::test_support::{drain, products_scan};
    use super::super::{build, Executor};
    use crate::error::EngineError;

    #[test]
    fn test_scan_preserves_file_order() {
        let mut executor = build(&products_scan());
        let rows = drain(&mut executor);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].value_by_name("name").unwrap(), &Value::string("A"));
        assert_eq!(rows[4].value_by_name("name").unwrap(), &Value::string("C"));
        assert!(rows[4].value_by_name("price").unwrap().is_null());
    }

    #[test]
    fn test_next_before_init_fails() {
        let mut executor = build(&products_scan());
        let Executor::Scan(scan) = &mut executor else {
            panic!("expected a scan");
        };
        assert!(matches!(scan.next(), Err(EngineError::NotInitialized)));
    }

    #[test]
    fn test_reinit_restarts() {
        let mut executor = build(&products_scan());
        let first = drain(&mut executor);
        let second = drain(&mut executor);
        assert_eq!(first, second);
    }
}
