//! The query driver.

use quarry_core::Row;
use quarry_storage::Catalog;
use tracing::debug;

use crate::error::Result;
use crate::exec;
use crate::plan::ExecutionPlan;
use crate::planner::QueryPlanner;
use crate::statement::SelectStatement;

/// Plans and executes SELECT statements against a catalog.
pub struct Engine<'a> {
    catalog: &'a Catalog,
}

impl<'a> Engine<'a> {
    /// Creates an engine over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Validates, plans and runs a statement, returning all result rows.
    pub fn execute(&self, statement: &SelectStatement) -> Result<Vec<Row>> {
        let plan = QueryPlanner::new(self.catalog).create_plan(statement)?;
        Self::run(&plan)
    }

    /// Runs an already-built plan: materializes the executor tree,
    /// initializes the root and drains it.
    pub fn run(plan: &ExecutionPlan) -> Result<Vec<Row>> {
        let mut root = exec::build(plan);
        root.init()?;

        let mut rows = Vec::new();
        while let Some(row) = root.next()? {
            rows.push(row);
        }
        debug!(rows = rows.len(), "query drained");
        Ok(rows)
    }
}
