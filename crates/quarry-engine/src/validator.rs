//! Statement validation.

use std::collections::HashSet;

use quarry_core::Expr;

use crate::aggregate::AggregateDef;
use crate::error::{EngineError, Result};
use crate::statement::SelectStatement;

/// Checks a [`SelectStatement`] before planning.
///
/// The rules mirror SQL's grouping constraints for this dialect:
///
/// 1. A source table is required.
/// 2. Under GROUP BY, every selected expression must be a group key or an
///    aggregate argument (`COUNT(*)` counts as its constant-1 argument).
/// 3. With aggregates but no GROUP BY, only aggregate arguments may be
///    selected.
/// 4. Otherwise the selection is unconstrained.
#[derive(Debug, Default)]
pub struct StatementValidator;

impl StatementValidator {
    /// Validates `statement`, failing with the offending expression rendered
    /// into the error.
    pub fn validate(statement: &SelectStatement) -> Result<()> {
        if statement.from_table.is_empty() {
            return Err(EngineError::EmptyFrom);
        }

        if !statement.group_bys.is_empty() {
            let mut allowed: HashSet<Expr> = statement.group_bys.iter().cloned().collect();
            allowed.extend(statement.aggregates.iter().map(AggregateDef::inner_expr));
            for expr in &statement.select_exprs {
                if !allowed.contains(expr) {
                    return Err(EngineError::NotGrouped(expr.to_string()));
                }
            }
        } else if !statement.aggregates.is_empty() {
            let allowed: HashSet<Expr> = statement
                .aggregates
                .iter()
                .map(AggregateDef::inner_expr)
                .collect();
            for expr in &statement.select_exprs {
                if !allowed.contains(expr) {
                    return Err(EngineError::BareSelectWithAggregates(expr.to_string()));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quarry_core::{Column, TypeId, Value};

    use super::*;
    use crate::aggregate::{AggregateDef, AggregationType};

    fn col(name: &str) -> Expr {
        Expr::column(Column::new(name, TypeId::Int))
    }

    fn sum_of(name: &str) -> AggregateDef {
        AggregateDef {
            kind: AggregationType::Sum,
            expr: Some(col(name)),
            output_name: format!("sum({name})"),
        }
    }

    #[test]
    fn test_empty_from_rejected() {
        let statement = SelectStatement::default();
        assert!(matches!(
            StatementValidator::validate(&statement),
            Err(EngineError::EmptyFrom)
        ));
    }

    #[test]
    fn test_plain_select_unconstrained() {
        let mut statement = SelectStatement::from_table("products");
        statement.select_exprs = vec![col("price"), Expr::constant(Value::int(3))];
        assert!(StatementValidator::validate(&statement).is_ok());
    }

    #[test]
    fn test_grouped_select_must_use_keys_or_aggregates() {
        let mut statement = SelectStatement::from_table("products");
        statement.group_bys = vec![col("brand")];
        statement.aggregates = vec![sum_of("price")];
        statement.select_exprs = vec![col("brand"), col("price")];
        assert!(StatementValidator::validate(&statement).is_ok());

        statement.select_exprs.push(col("rating"));
        assert!(matches!(
            StatementValidator::validate(&statement),
            Err(EngineError::NotGrouped(text)) if text == "rating"
        ));
    }

    #[test]
    fn test_count_star_is_an_allowed_selection() {
        let mut statement = SelectStatement::from_table("products");
        statement.group_bys = vec![col("name")];
        statement.aggregates = vec![AggregateDef {
            kind: AggregationType::Count,
            expr: None,
            output_name: "count(*)".to_string(),
        }];
        statement.select_exprs = vec![col("name"), Expr::count_star()];
        assert!(StatementValidator::validate(&statement).is_ok());
    }

    #[test]
    fn test_aggregates_without_group_by_forbid_bare_columns() {
        let mut statement = SelectStatement::from_table("products");
        statement.aggregates = vec![sum_of("price")];
        statement.select_exprs = vec![col("price")];
        assert!(StatementValidator::validate(&statement).is_ok());

        statement.select_exprs = vec![col("brand")];
        assert!(matches!(
            StatementValidator::validate(&statement),
            Err(EngineError::BareSelectWithAggregates(text)) if text == "brand"
        ));
    }
}
