//! The SELECT statement model handed to the validator and planner.

use quarry_core::Expr;

use crate::aggregate::AggregateDef;

/// A constrained SELECT: projection, source table, optional predicate,
/// grouping, aggregation, ordering, offset and limit.
///
/// Statements are plain data; how they are produced (CLI flags, tests) is up
/// to the caller.
#[derive(Debug, Clone, Default)]
pub struct SelectStatement {
    /// Expressions the query selects. Empty means `SELECT *`.
    pub select_exprs: Vec<Expr>,
    /// Name of the source table in the catalog.
    pub from_table: String,
    /// Optional predicate applied to scanned rows.
    pub where_clause: Option<Expr>,
    /// Grouping key expressions.
    pub group_bys: Vec<Expr>,
    /// Aggregates to compute.
    pub aggregates: Vec<AggregateDef>,
    /// Ordering key expressions, ascending.
    pub order_by: Vec<Expr>,
    /// Rows to skip from the start of the result.
    pub offset: Option<usize>,
    /// Maximum number of rows to return.
    pub limit: Option<usize>,
}

impl SelectStatement {
    /// A `SELECT * FROM table` statement to build on.
    #[must_use]
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            from_table: table.into(),
            ..Self::default()
        }
    }
}
