//! Aggregation kinds and their per-group accumulators.

use quarry_core::error::Result as CoreResult;
use quarry_core::{Expr, TypeId, Value};

/// The supported aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregationType {
    /// Count of non-null inputs.
    Count,
    /// Sum of non-null inputs.
    Sum,
    /// Arithmetic mean of non-null inputs.
    Avg,
    /// Smallest non-null input.
    Min,
    /// Largest non-null input.
    Max,
}

impl AggregationType {
    /// Parses a function token, case-insensitively.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "count" => Some(Self::Count),
            "sum" => Some(Self::Sum),
            "avg" => Some(Self::Avg),
            "min" => Some(Self::Min),
            "max" => Some(Self::Max),
            _ => None,
        }
    }

    /// The lower-case function name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Min => "min",
            Self::Max => "max",
        }
    }
}

impl std::fmt::Display for AggregationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A statement-level aggregate: function, argument (`None` means `*`), and
/// the name of the output column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateDef {
    /// The aggregation function.
    pub kind: AggregationType,
    /// The argument expression; `None` stands for `COUNT(*)`.
    pub expr: Option<Expr>,
    /// Name of the output column.
    pub output_name: String,
}

impl AggregateDef {
    /// Lowers to a plan-level [`Aggregate`], substituting the constant-1
    /// expression for `*`.
    #[must_use]
    pub fn lower(&self) -> Aggregate {
        Aggregate {
            kind: self.kind,
            expr: self.expr.clone().unwrap_or_else(Expr::count_star),
            output_name: self.output_name.clone(),
        }
    }

    /// The argument expression with `*` already lowered.
    #[must_use]
    pub fn inner_expr(&self) -> Expr {
        self.expr.clone().unwrap_or_else(Expr::count_star)
    }
}

/// A plan-level aggregate with its `*` argument lowered away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// The aggregation function.
    pub kind: AggregationType,
    /// The argument expression evaluated per input row.
    pub expr: Expr,
    /// Name of the output column.
    pub output_name: String,
}

/// A mutable per-group accumulator.
///
/// `update` ignores NULL inputs for every kind. An accumulator that never saw
/// a value finalizes to a NULL of type decimal (not of the input type) for
/// SUM/AVG/MIN/MAX; COUNT finalizes to integer zero.
#[derive(Debug, Clone)]
pub enum AggregateState {
    /// Running count.
    Count(i64),
    /// Running sum, absent until the first input.
    Sum(Option<Value>),
    /// Running count and sum.
    Avg {
        /// Number of non-null inputs.
        count: i64,
        /// Sum of inputs, absent until the first one.
        sum: Option<Value>,
    },
    /// Smallest input so far.
    Min(Option<Value>),
    /// Largest input so far.
    Max(Option<Value>),
}

impl AggregateState {
    /// A fresh accumulator for the given kind.
    #[must_use]
    pub const fn new(kind: AggregationType) -> Self {
        match kind {
            AggregationType::Count => Self::Count(0),
            AggregationType::Sum => Self::Sum(None),
            AggregationType::Avg => Self::Avg {
                count: 0,
                sum: None,
            },
            AggregationType::Min => Self::Min(None),
            AggregationType::Max => Self::Max(None),
        }
    }

    /// Folds one input value into the accumulator. NULL inputs are skipped.
    pub fn update(&mut self, value: &Value) -> CoreResult<()> {
        if value.is_null() {
            return Ok(());
        }
        match self {
            Self::Count(count) => *count += 1,
            Self::Sum(sum) => {
                *sum = Some(match sum.take() {
                    None => value.clone(),
                    Some(acc) => acc.add(value)?,
                });
            }
            Self::Avg { count, sum } => {
                *count += 1;
                *sum = Some(match sum.take() {
                    None => value.clone(),
                    Some(acc) => acc.add(value)?,
                });
            }
            Self::Min(min) => {
                *min = Some(match min.take() {
                    None => value.clone(),
                    Some(acc) => acc.min_value(value)?,
                });
            }
            Self::Max(max) => {
                *max = Some(match max.take() {
                    None => value.clone(),
                    Some(acc) => acc.max_value(value)?,
                });
            }
        }
        Ok(())
    }

    /// Produces the value emitted for the group.
    pub fn finalize(&self) -> CoreResult<Value> {
        match self {
            Self::Count(count) => Ok(Value::int(*count)),
            Self::Sum(sum) | Self::Min(sum) | Self::Max(sum) => {
                Ok(sum.clone().unwrap_or_else(|| Value::null(TypeId::Decimal)))
            }
            Self::Avg { count, sum } => match sum {
                None => Ok(Value::null(TypeId::Decimal)),
                Some(sum) => sum.divide(&Value::int(*count)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(kind: AggregationType, inputs: &[Value]) -> Value {
        let mut state = AggregateState::new(kind);
        for input in inputs {
            state.update(input).unwrap();
        }
        state.finalize().unwrap()
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(AggregationType::parse("SUM"), Some(AggregationType::Sum));
        assert_eq!(AggregationType::parse("count"), Some(AggregationType::Count));
        assert_eq!(AggregationType::parse("Median"), None);
    }

    #[test]
    fn test_count_skips_nulls() {
        let out = run(
            AggregationType::Count,
            &[Value::int(1), Value::null(TypeId::Int), Value::int(3)],
        );
        assert_eq!(out, Value::int(2));
    }

    #[test]
    fn test_count_of_nothing_is_zero() {
        assert_eq!(run(AggregationType::Count, &[]), Value::int(0));
    }

    #[test]
    fn test_sum_single_value_is_identity() {
        assert_eq!(run(AggregationType::Sum, &[Value::int(7)]), Value::int(7));
    }

    #[test]
    fn test_sum_accumulates_as_decimal() {
        let out = run(
            AggregationType::Sum,
            &[Value::int(10), Value::int(30), Value::null(TypeId::Int)],
        );
        assert_eq!(out, Value::decimal(40.0));
    }

    #[test]
    fn test_empty_sum_is_null_decimal() {
        let out = run(AggregationType::Sum, &[Value::null(TypeId::Int)]);
        assert!(out.is_null());
        assert_eq!(out.type_id(), TypeId::Decimal);
    }

    #[test]
    fn test_avg_of_constant_input_is_that_constant() {
        let out = run(
            AggregationType::Avg,
            &[Value::decimal(3.5), Value::decimal(3.5), Value::decimal(3.5)],
        );
        assert_eq!(out, Value::decimal(3.5));
    }

    #[test]
    fn test_avg_ignores_nulls() {
        let out = run(
            AggregationType::Avg,
            &[
                Value::int(10),
                Value::int(30),
                Value::int(20),
                Value::int(20),
                Value::null(TypeId::Int),
            ],
        );
        assert_eq!(out, Value::decimal(22.5));
    }

    #[test]
    fn test_empty_avg_is_null_decimal() {
        let out = run(AggregationType::Avg, &[]);
        assert!(out.is_null());
        assert_eq!(out.type_id(), TypeId::Decimal);
    }

    #[test]
    fn test_min_max() {
        let inputs = [Value::int(4), Value::null(TypeId::Int), Value::int(-2), Value::int(9)];
        assert_eq!(run(AggregationType::Min, &inputs), Value::int(-2));
        assert_eq!(run(AggregationType::Max, &inputs), Value::int(9));
    }

    #[test]
    fn test_min_max_identity_on_single_value() {
        assert_eq!(
            run(AggregationType::Min, &[Value::string("x")]),
            Value::string("x")
        );
        assert_eq!(
            run(AggregationType::Max, &[Value::decimal(1.5)]),
            Value::decimal(1.5)
        );
    }

    #[test]
    fn test_empty_min_is_null_decimal_even_for_strings() {
        let out = run(AggregationType::Min, &[Value::null(TypeId::String)]);
        assert!(out.is_null());
        assert_eq!(out.type_id(), TypeId::Decimal);
    }

    #[test]
    fn test_count_star_lowering_is_canonical() {
        let def = AggregateDef {
            kind: AggregationType::Count,
            expr: None,
            output_name: "count(*)".to_string(),
        };
        assert_eq!(def.lower().expr, Expr::count_star());
        assert_eq!(def.inner_expr(), Expr::count_star());
    }
}
