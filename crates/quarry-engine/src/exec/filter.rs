//! Filter executor.

use quarry_core::{Expr, Row, TypeId, Value};

use crate::error::Result;
use crate::plan::FilterPlan;

/// Forwards rows whose predicate evaluates to true.
///
/// A NULL predicate result drops the row without being treated as false for
/// any other purpose; any non-null result is cast to boolean.
pub struct FilterExecutor {
    predicate: Expr,
    child: Box<super::Executor>,
}

impl FilterExecutor {
    pub(crate) fn new(plan: &FilterPlan, child: super::Executor) -> Self {
        Self {
            predicate: plan.predicate.clone(),
            child: Box::new(child),
        }
    }

    pub(crate) fn init(&mut self) -> Result<()> {
        self.child.init()
    }

    pub(crate) fn next(&mut self) -> Result<Option<Row>> {
        while let Some(row) = self.child.next()? {
            let verdict = self.predicate.evaluate(&row)?;
            if verdict.is_null() {
                continue;
            }
            if let Value::Boolean(Some(true)) = verdict.cast(TypeId::Boolean)? {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use quarry_core::{CompareOp, Expr, TypeId, Value};

    use super::super::test_support::{column_expr, drain, products_scan};
    use super::super::build;
    use crate::plan::{ExecutionPlan, FilterPlan};

    fn filtered(predicate: Expr) -> ExecutionPlan {
        ExecutionPlan::Filter(FilterPlan {
            predicate,
            child: Box::new(products_scan()),
        })
    }

    #[test]
    fn test_filter_is_a_subsequence_of_input() {
        let plan = filtered(Expr::comparison(
            column_expr("price", TypeId::Int),
            CompareOp::GtEq,
            Expr::constant(Value::int(20)),
        ));
        let rows = drain(&mut build(&plan));
        let names: Vec<_> = rows
            .iter()
            .map(|row| row.value_by_name("name").unwrap().clone())
            .collect();
        assert_eq!(
            names,
            vec![Value::string("A"), Value::string("B"), Value::string("B")]
        );
    }

    #[test]
    fn test_null_predicate_drops_row() {
        // Row C has a NULL price; `price = price` is NULL there, so it is
        // dropped rather than kept.
        let plan = filtered(Expr::comparison(
            column_expr("price", TypeId::Int),
            CompareOp::Eq,
            column_expr("price", TypeId::Int),
        ));
        let rows = drain(&mut build(&plan));
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_constant_false_yields_nothing() {
        let plan = filtered(Expr::constant(Value::boolean(false)));
        assert!(drain(&mut build(&plan)).is_empty());
    }

    #[test]
    fn test_truthy_non_boolean_predicate_is_cast() {
        let plan = filtered(Expr::constant(Value::int(1)));
        assert_eq!(drain(&mut build(&plan)).len(), 5);
    }
}
