//! Projection executor.

use std::sync::Arc;

use quarry_core::{Expr, Row, Schema};

use crate::error::Result;
use crate::plan::ProjectionPlan;

/// Evaluates one expression per output column for each child row.
pub struct ProjectionExecutor {
    expressions: Vec<Expr>,
    output_schema: Arc<Schema>,
    child: Box<super::Executor>,
}

impl ProjectionExecutor {
    pub(crate) fn new(plan: &ProjectionPlan, child: super::Executor) -> Self {
        Self {
            expressions: plan.expressions.clone(),
            output_schema: Arc::clone(&plan.output_schema),
            child: Box::new(child),
        }
    }

    pub(crate) fn init(&mut self) -> Result<()> {
        self.child.init()
    }

    pub(crate) fn next(&mut self) -> Result<Option<Row>> {
        let Some(row) = self.child.next()? else {
            return Ok(None);
        };
        let values = self
            .expressions
            .iter()
            .map(|expr| expr.evaluate(&row))
            .collect::<quarry_core::error::Result<Vec<_>>>()?;
        Ok(Some(Row::new(Arc::clone(&self.output_schema), values)?))
    }
}
