//! The expression tree evaluated against rows.
//!
//! Expressions are a closed variant set with structural equality and hashing,
//! so they can key maps and sets (the validator relies on this to match
//! SELECT entries against group keys and aggregate arguments). The rendered
//! form ([`Display`](std::fmt::Display)) names output columns and appears in
//! error messages.

use crate::error::Result;
use crate::row::Row;
use crate::schema::Column;
use crate::types::{CompareOp, TypeId, Value};

/// A scalar expression over a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// Reference to a named column of the input schema.
    Column(Column),
    /// A literal value.
    Constant(Value),
    /// A comparison of two sub-expressions, yielding a tri-state boolean.
    Comparison {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: CompareOp,
        /// Right operand.
        right: Box<Expr>,
    },
}

impl Expr {
    /// Creates a column reference.
    #[must_use]
    pub const fn column(column: Column) -> Self {
        Self::Column(column)
    }

    /// Creates a constant.
    #[must_use]
    pub const fn constant(value: Value) -> Self {
        Self::Constant(value)
    }

    /// Creates a comparison.
    #[must_use]
    pub fn comparison(left: Self, op: CompareOp, right: Self) -> Self {
        Self::Comparison {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// The implicit argument of `COUNT(*)`: the constant integer 1.
    ///
    /// All code paths that stand in for `*` must construct it through this
    /// function so that the forms compare structurally equal.
    #[must_use]
    pub const fn count_star() -> Self {
        Self::Constant(Value::int(1))
    }

    /// Evaluates the expression against a row.
    pub fn evaluate(&self, row: &Row) -> Result<Value> {
        match self {
            Self::Column(column) => row.value_by_name(column.name()).cloned(),
            Self::Constant(value) => Ok(value.clone()),
            Self::Comparison { left, op, right } => {
                let lhs = left.evaluate(row)?;
                let rhs = right.evaluate(row)?;
                Ok(Value::from(lhs.compare(&rhs, *op)?))
            }
        }
    }

    /// The type this expression produces, derivable without a row.
    #[must_use]
    pub const fn return_type(&self) -> TypeId {
        match self {
            Self::Column(column) => column.type_id(),
            Self::Constant(value) => value.type_id(),
            Self::Comparison { .. } => TypeId::Boolean,
        }
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Column(column) => f.write_str(column.name()),
            Self::Constant(value) => write!(f, "{value}"),
            Self::Comparison { left, op, right } => write!(f, "({left} {op} {right})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::schema::Schema;

    fn row() -> Row {
        let schema = Arc::new(Schema::new(vec![
            Column::new("price", TypeId::Int),
            Column::new("name", TypeId::String),
        ]));
        Row::new(schema, vec![Value::int(20), Value::string("A")]).unwrap()
    }

    #[test]
    fn test_column_evaluation() {
        let expr = Expr::column(Column::new("price", TypeId::Int));
        assert_eq!(expr.evaluate(&row()).unwrap(), Value::int(20));
        assert_eq!(expr.return_type(), TypeId::Int);
    }

    #[test]
    fn test_unknown_column_fails() {
        let expr = Expr::column(Column::new("missing", TypeId::Int));
        assert!(expr.evaluate(&row()).is_err());
    }

    #[test]
    fn test_constant_evaluation() {
        let expr = Expr::constant(Value::decimal(1.5));
        assert_eq!(expr.evaluate(&row()).unwrap(), Value::decimal(1.5));
        assert_eq!(expr.return_type(), TypeId::Decimal);
    }

    #[test]
    fn test_comparison_evaluation() {
        let expr = Expr::comparison(
            Expr::column(Column::new("price", TypeId::Int)),
            CompareOp::GtEq,
            Expr::constant(Value::int(20)),
        );
        assert_eq!(expr.return_type(), TypeId::Boolean);
        assert_eq!(expr.evaluate(&row()).unwrap(), Value::boolean(true));
    }

    #[test]
    fn test_comparison_with_null_operand() {
        let expr = Expr::comparison(
            Expr::constant(Value::null(TypeId::Int)),
            CompareOp::Eq,
            Expr::constant(Value::int(1)),
        );
        let out = expr.evaluate(&row()).unwrap();
        assert!(out.is_null());
        assert_eq!(out.type_id(), TypeId::Boolean);
    }

    #[test]
    fn test_structural_equality_keys_sets() {
        let mut set = HashSet::new();
        set.insert(Expr::count_star());
        set.insert(Expr::column(Column::new("price", TypeId::Int)));

        // A fresh constant-1 is the same key as count_star.
        assert!(set.contains(&Expr::constant(Value::int(1))));
        assert!(set.contains(&Expr::column(Column::new("price", TypeId::Int))));
        assert!(!set.contains(&Expr::column(Column::new("price", TypeId::Decimal))));
    }

    #[test]
    fn test_rendering() {
        let expr = Expr::comparison(
            Expr::column(Column::new("price", TypeId::Int)),
            CompareOp::NotEq,
            Expr::constant(Value::int(3)),
        );
        assert_eq!(expr.to_string(), "(price != 3)");
        assert_eq!(Expr::count_star().to_string(), "1");
    }
}
