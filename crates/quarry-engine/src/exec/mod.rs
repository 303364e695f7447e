//! Pull-based executors.
//!
//! Every executor follows the same contract: `init` prepares state (and
//! recursively initializes children), `next` returns the next row or `None`
//! for end-of-stream, and end-of-stream is sticky. Calling `next` before
//! `init` is a caller bug reported as [`crate::EngineError::NotInitialized`].
//! Execution is single-threaded; operators pull from their child on demand
//! and the only buffering happens inside aggregation and sort.

mod aggregation;
mod filter;
mod limit;
mod offset;
mod projection;
mod scan;
mod sort;

pub use aggregation::AggregationExecutor;
pub use filter::FilterExecutor;
pub use limit::LimitExecutor;
pub use offset::OffsetExecutor;
pub use projection::ProjectionExecutor;
pub use scan::ScanExecutor;
pub use sort::SortExecutor;

use quarry_core::Row;
use tracing::trace;

use crate::error::Result;
use crate::plan::ExecutionPlan;

/// The closed set of executors, one per plan node kind.
pub enum Executor {
    /// Reads a table source.
    Scan(ScanExecutor),
    /// Applies a predicate.
    Filter(FilterExecutor),
    /// Hash aggregation.
    Aggregation(AggregationExecutor),
    /// Per-row expression projection.
    Projection(ProjectionExecutor),
    /// Buffering stable sort.
    Sort(SortExecutor),
    /// Leading-row skip.
    Offset(OffsetExecutor),
    /// Row-count cap.
    Limit(LimitExecutor),
}

impl Executor {
    /// Prepares this executor and its children for iteration.
    pub fn init(&mut self) -> Result<()> {
        match self {
            Self::Scan(exec) => exec.init(),
            Self::Filter(exec) => exec.init(),
            Self::Aggregation(exec) => exec.init(),
            Self::Projection(exec) => exec.init(),
            Self::Sort(exec) => exec.init(),
            Self::Offset(exec) => exec.init(),
            Self::Limit(exec) => exec.init(),
        }
    }

    /// Produces the next row, or `None` at end of stream.
    pub fn next(&mut self) -> Result<Option<Row>> {
        match self {
            Self::Scan(exec) => exec.next(),
            Self::Filter(exec) => exec.next(),
            Self::Aggregation(exec) => exec.next(),
            Self::Projection(exec) => exec.next(),
            Self::Sort(exec) => exec.next(),
            Self::Offset(exec) => exec.next(),
            Self::Limit(exec) => exec.next(),
        }
    }
}

/// Materializes the executor tree for a plan tree.
///
/// The mapping is one-to-one; children are built recursively. Scans capture
/// their table descriptor and open a fresh row stream on every `init`.
#[must_use]
pub fn build(plan: &ExecutionPlan) -> Executor {
    trace!(node = plan_kind(plan), "building executor");
    match plan {
        ExecutionPlan::Scan(plan) => Executor::Scan(ScanExecutor::new(plan)),
        ExecutionPlan::Filter(plan) => {
            Executor::Filter(FilterExecutor::new(plan, build(&plan.child)))
        }
        ExecutionPlan::Aggregation(plan) => {
            Executor::Aggregation(AggregationExecutor::new(plan, build(&plan.child)))
        }
        ExecutionPlan::Projection(plan) => {
            Executor::Projection(ProjectionExecutor::new(plan, build(&plan.child)))
        }
        ExecutionPlan::Sort(plan) => Executor::Sort(SortExecutor::new(plan, build(&plan.child))),
        ExecutionPlan::Offset(plan) => {
            Executor::Offset(OffsetExecutor::new(plan, build(&plan.child)))
        }
        ExecutionPlan::Limit(plan) => Executor::Limit(LimitExecutor::new(plan, build(&plan.child))),
    }
}

const fn plan_kind(plan: &ExecutionPlan) -> &'static str {
    match plan {
        ExecutionPlan::Scan(_) => "scan",
        ExecutionPlan::Filter(_) => "filter",
        ExecutionPlan::Aggregation(_) => "aggregation",
        ExecutionPlan::Projection(_) => "projection",
        ExecutionPlan::Sort(_) => "sort",
        ExecutionPlan::Offset(_) => "offset",
        ExecutionPlan::Limit(_) => "limit",
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{column_expr, drain, products_scan};
    use super::*;
    use crate::plan::{FilterPlan, LimitPlan, OffsetPlan, ProjectionPlan, SortPlan};
    use quarry_core::{TypeId, Value};

    #[test]
    fn test_factory_maps_each_plan_kind() {
        let plan = products_scan();
        assert!(matches!(build(&plan), Executor::Scan(_)));

        let plan = ExecutionPlan::Filter(FilterPlan {
            predicate: quarry_core::Expr::constant(Value::boolean(true)),
            child: Box::new(products_scan()),
        });
        assert!(matches!(build(&plan), Executor::Filter(_)));

        let plan = ExecutionPlan::Sort(SortPlan {
            order_by: vec![column_expr("name", TypeId::String)],
            child: Box::new(products_scan()),
        });
        assert!(matches!(build(&plan), Executor::Sort(_)));

        let plan = ExecutionPlan::Offset(OffsetPlan {
            offset: 1,
            child: Box::new(products_scan()),
        });
        assert!(matches!(build(&plan), Executor::Offset(_)));

        let plan = ExecutionPlan::Limit(LimitPlan {
            limit: 1,
            child: Box::new(products_scan()),
        });
        assert!(matches!(build(&plan), Executor::Limit(_)));
    }

    #[test]
    fn test_factory_builds_nested_trees() {
        let plan = ExecutionPlan::Limit(LimitPlan {
            limit: 1,
            child: Box::new(ExecutionPlan::Projection(ProjectionPlan {
                expressions: vec![column_expr("name", TypeId::String)],
                output_schema: std::sync::Arc::new(quarry_core::Schema::new(vec![
                    quarry_core::Column::new("name", TypeId::String),
                ])),
                child: Box::new(products_scan()),
            })),
        });

        let mut executor = build(&plan);
        let rows = drain(&mut executor);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value(0).unwrap(), &Value::string("A"));
    }
}
