//! Logical plan nodes.
//!
//! A plan is a tree: the leaf is always a scan, every other node has exactly
//! one child, and each node knows its output schema. The executor factory
//! maps this closed variant set one-to-one onto executors.

use std::sync::Arc;

use quarry_core::{Expr, Schema};
use quarry_storage::Table;

use crate::aggregate::Aggregate;

/// A node of the logical plan tree.
#[derive(Debug, Clone)]
pub enum ExecutionPlan {
    /// Produces the rows of a table source.
    Scan(ScanPlan),
    /// Drops rows whose predicate is not true.
    Filter(FilterPlan),
    /// Hash aggregation over group keys.
    Aggregation(AggregationPlan),
    /// Evaluates one expression per output column.
    Projection(ProjectionPlan),
    /// Stable ascending sort over key expressions.
    Sort(SortPlan),
    /// Skips a fixed number of leading rows.
    Offset(OffsetPlan),
    /// Truncates the stream after a fixed number of rows.
    Limit(LimitPlan),
}

impl ExecutionPlan {
    /// The schema of the rows this node produces.
    #[must_use]
    pub fn output_schema(&self) -> &Arc<Schema> {
        match self {
            Self::Scan(plan) => &plan.schema,
            Self::Filter(plan) => plan.child.output_schema(),
            Self::Aggregation(plan) => &plan.output_schema,
            Self::Projection(plan) => &plan.output_schema,
            Self::Sort(plan) => plan.child.output_schema(),
            Self::Offset(plan) => plan.child.output_schema(),
            Self::Limit(plan) => plan.child.output_schema(),
        }
    }

    /// The input node, absent for scans.
    #[must_use]
    pub fn child(&self) -> Option<&ExecutionPlan> {
        match self {
            Self::Scan(_) => None,
            Self::Filter(plan) => Some(&plan.child),
            Self::Aggregation(plan) => Some(&plan.child),
            Self::Projection(plan) => Some(&plan.child),
            Self::Sort(plan) => Some(&plan.child),
            Self::Offset(plan) => Some(&plan.child),
            Self::Limit(plan) => Some(&plan.child),
        }
    }
}

/// Leaf node over a table source.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    /// The table descriptor to read.
    pub table: Table,
    /// The table's schema.
    pub schema: Arc<Schema>,
}

impl ScanPlan {
    /// Creates a scan over `table`.
    #[must_use]
    pub fn new(table: Table) -> Self {
        let schema = Arc::clone(table.schema());
        Self { table, schema }
    }
}

/// Predicate filter over a child node.
#[derive(Debug, Clone)]
pub struct FilterPlan {
    /// Predicate evaluated per row; NULL and false both drop the row.
    pub predicate: Expr,
    /// Input node.
    pub child: Box<ExecutionPlan>,
}

/// Hash aggregation.
///
/// The output schema lists aggregate columns first (in definition order),
/// then group-by columns; emitted rows follow the same order.
#[derive(Debug, Clone)]
pub struct AggregationPlan {
    /// Group key expressions.
    pub group_bys: Vec<Expr>,
    /// Aggregates computed per group.
    pub aggregates: Vec<Aggregate>,
    /// Schema of emitted rows.
    pub output_schema: Arc<Schema>,
    /// Input node.
    pub child: Box<ExecutionPlan>,
}

/// Column projection.
#[derive(Debug, Clone)]
pub struct ProjectionPlan {
    /// One expression per output column.
    pub expressions: Vec<Expr>,
    /// Schema of emitted rows.
    pub output_schema: Arc<Schema>,
    /// Input node.
    pub child: Box<ExecutionPlan>,
}

/// Stable ascending sort.
#[derive(Debug, Clone)]
pub struct SortPlan {
    /// Key expressions, most significant first.
    pub order_by: Vec<Expr>,
    /// Input node.
    pub child: Box<ExecutionPlan>,
}

/// Leading-row skip.
#[derive(Debug, Clone)]
pub struct OffsetPlan {
    /// Number of rows to drop.
    pub offset: usize,
    /// Input node.
    pub child: Box<ExecutionPlan>,
}

/// Row-count cap.
#[derive(Debug, Clone)]
pub struct LimitPlan {
    /// Maximum rows to emit; zero emits nothing.
    pub limit: usize,
    /// Input node.
    pub child: Box<ExecutionPlan>,
}
