//! Sort executor.

use std::cmp::Ordering;

use quarry_core::{Expr, Row, Value};

use crate::error::{EngineError, Result};
use crate::plan::SortPlan;

/// Materializes the child's rows and yields them in ascending key order.
///
/// The sort is stable, so rows with equal keys keep their input order. Key
/// tuples are evaluated once per row during `init` and compared with the
/// value system's total order (NULLs first).
pub struct SortExecutor {
    order_by: Vec<Expr>,
    child: Box<super::Executor>,
    sorted: Option<std::vec::IntoIter<Row>>,
}

impl SortExecutor {
    pub(crate) fn new(plan: &SortPlan, child: super::Executor) -> Self {
        Self {
            order_by: plan.order_by.clone(),
            child: Box::new(child),
            sorted: None,
        }
    }

    pub(crate) fn init(&mut self) -> Result<()> {
        self.child.init()?;

        let mut keyed: Vec<(Vec<Value>, Row)> = Vec::new();
        while let Some(row) = self.child.next()? {
            let key = self
                .order_by
                .iter()
                .map(|expr| expr.evaluate(&row))
                .collect::<quarry_core::error::Result<Vec<_>>>()?;
            keyed.push((key, row));
        }

        keyed.sort_by(|(left, _), (right, _)| compare_keys(left, right));
        self.sorted = Some(keyed.into_iter().map(|(_, row)| row).collect::<Vec<_>>().into_iter());
        Ok(())
    }

    pub(crate) fn next(&mut self) -> Result<Option<Row>> {
        let sorted = self.sorted.as_mut().ok_or(EngineError::NotInitialized)?;
        Ok(sorted.next())
    }
}

fn compare_keys(left: &[Value], right: &[Value]) -> Ordering {
    for (l, r) in left.iter().zip(right) {
        match l.ord_cmp(r) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}
