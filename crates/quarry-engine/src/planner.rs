//! Builds a logical plan from a validated statement.

use std::collections::HashSet;
use std::sync::Arc;

use quarry_core::{Column, Expr, Schema, TypeId};
use quarry_storage::Catalog;
use tracing::debug;

use crate::aggregate::{AggregateDef, AggregationType};
use crate::error::Result;
use crate::plan::{
    AggregationPlan, ExecutionPlan, FilterPlan, LimitPlan, OffsetPlan, ProjectionPlan, ScanPlan,
    SortPlan,
};
use crate::statement::SelectStatement;
use crate::validator::StatementValidator;

/// Turns validated SELECT statements into plan trees.
pub struct QueryPlanner<'a> {
    catalog: &'a Catalog,
}

impl<'a> QueryPlanner<'a> {
    /// Creates a planner resolving tables against `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Validates the statement and builds its plan.
    ///
    /// The pipeline is assembled bottom-up: scan, then filter, aggregation,
    /// projection, sort, offset and limit, each only when the statement asks
    /// for it. Projection is always present and pins the output schema.
    pub fn create_plan(&self, statement: &SelectStatement) -> Result<ExecutionPlan> {
        StatementValidator::validate(statement)?;

        let table = self.catalog.resolve(&statement.from_table)?;
        let table_schema = Arc::clone(table.schema());

        let mut plan = ExecutionPlan::Scan(ScanPlan::new(table.clone()));

        if let Some(predicate) = &statement.where_clause {
            plan = ExecutionPlan::Filter(FilterPlan {
                predicate: predicate.clone(),
                child: Box::new(plan),
            });
        }

        let output_schema = Arc::new(output_schema(statement, &table_schema));

        if !statement.group_bys.is_empty() || !statement.aggregates.is_empty() {
            plan = ExecutionPlan::Aggregation(AggregationPlan {
                group_bys: statement.group_bys.clone(),
                aggregates: statement.aggregates.iter().map(AggregateDef::lower).collect(),
                output_schema: Arc::clone(&output_schema),
                child: Box::new(plan),
            });
        }

        let expressions = output_schema
            .columns()
            .iter()
            .cloned()
            .map(Expr::column)
            .collect();
        plan = ExecutionPlan::Projection(ProjectionPlan {
            expressions,
            output_schema,
            child: Box::new(plan),
        });

        if !statement.order_by.is_empty() {
            plan = ExecutionPlan::Sort(SortPlan {
                order_by: statement.order_by.clone(),
                child: Box::new(plan),
            });
        }

        if let Some(offset) = statement.offset {
            plan = ExecutionPlan::Offset(OffsetPlan {
                offset,
                child: Box::new(plan),
            });
        }

        if let Some(limit) = statement.limit {
            plan = ExecutionPlan::Limit(LimitPlan {
                limit,
                child: Box::new(plan),
            });
        }

        debug!(table = %statement.from_table, schema = %plan.output_schema(), "plan built");
        Ok(plan)
    }
}

/// Computes the query's output schema.
///
/// Aggregate columns come first in definition order, then group-by columns,
/// then any selected expressions covered by neither; names are de-duplicated
/// by first occurrence. A statement that adds no columns selects the whole
/// table.
fn output_schema(statement: &SelectStatement, table_schema: &Schema) -> Schema {
    let mut columns: Vec<Column> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for aggregate in &statement.aggregates {
        let type_id = if aggregate.kind == AggregationType::Count {
            TypeId::Int
        } else {
            aggregate.inner_expr().return_type()
        };
        if seen.insert(aggregate.output_name.clone()) {
            columns.push(Column::new(aggregate.output_name.clone(), type_id));
        }
    }

    for group_by in &statement.group_bys {
        let name = group_by.to_string();
        if seen.insert(name.clone()) {
            columns.push(Column::new(name, group_by.return_type()));
        }
    }

    for expr in &statement.select_exprs {
        let covered_by_aggregate = statement
            .aggregates
            .iter()
            .any(|aggregate| aggregate.inner_expr() == *expr);
        if covered_by_aggregate {
            continue;
        }
        let name = expr.to_string();
        if seen.insert(name.clone()) {
            columns.push(Column::new(name, expr.return_type()));
        }
    }

    if columns.is_empty() {
        table_schema.clone()
    } else {
        Schema::new(columns)
    }
}
