//! Resolves command-line query fragments into a [`SelectStatement`].
//!
//! The surface is deliberately small: a where-condition is a single
//! `COL OP LITERAL` comparison, aggregates are `lhs=FUNC` specs, and
//! group-by/sort name columns. Everything is resolved against the queried
//! table's schema up front so typing errors surface before execution.

use quarry_core::{Column, CompareOp, CoreError, Expr, Schema, TypeId, Value};
use quarry_engine::{AggregateDef, AggregationType, SelectStatement};

/// Errors turning CLI arguments into a statement.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// An aggregate spec without the `column=FUNC` shape.
    #[error("invalid aggregate format: '{0}' (expected column=FUNC)")]
    BadAggregateSpec(String),

    /// An aggregate function token outside COUNT/SUM/AVG/MIN/MAX.
    #[error("unknown aggregate function '{0}'")]
    UnknownFunction(String),

    /// `*` used with a function other than COUNT.
    #[error("'*' is only valid with COUNT")]
    StarRequiresCount,

    /// A where-condition with no recognizable operator.
    #[error("invalid condition: '{0}'")]
    BadCondition(String),

    /// A literal token that parses as neither boolean, string, decimal nor
    /// integer.
    #[error("invalid literal: '{0}'")]
    BadLiteral(String),

    /// A column name missing from the table schema.
    #[error(transparent)]
    Column(#[from] CoreError),
}

/// Comparison operators, longest first so `>=` never splits as `>`.
const OPERATORS: [(&str, CompareOp); 6] = [
    ("!=", CompareOp::NotEq),
    (">=", CompareOp::GtEq),
    ("<=", CompareOp::LtEq),
    ("=", CompareOp::Eq),
    ("<", CompareOp::Lt),
    (">", CompareOp::Gt),
];

/// Resolves names and conditions against one table schema.
pub struct ExpressionResolver<'a> {
    schema: &'a Schema,
}

impl<'a> ExpressionResolver<'a> {
    /// Creates a resolver over the queried table's schema.
    #[must_use]
    pub const fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// A column reference expression for `name`.
    pub fn column_expr(&self, name: &str) -> Result<Expr, ParseError> {
        let column = self.schema.column_by_name(name.trim())?;
        Ok(Expr::column(column.clone()))
    }

    /// Parses a `COL OP LITERAL` condition into a comparison expression.
    pub fn comparison(&self, condition: &str) -> Result<Expr, ParseError> {
        for (token, op) in OPERATORS {
            if let Some((lhs, rhs)) = condition.split_once(token) {
                let left = self.column_expr(lhs)?;
                let right = Expr::constant(parse_literal(rhs.trim())?);
                return Ok(Expr::comparison(left, op, right));
            }
        }
        Err(ParseError::BadCondition(condition.to_string()))
    }

    /// Parses an `lhs=FUNC` aggregate spec.
    ///
    /// `lhs` is a column name, or `*` for `COUNT(*)`. The function token is
    /// case-insensitive; the output column is named `func_lower(lhs)`.
    pub fn aggregate(&self, spec: &str) -> Result<AggregateDef, ParseError> {
        let Some((lhs, func)) = spec.split_once('=') else {
            return Err(ParseError::BadAggregateSpec(spec.to_string()));
        };
        let kind = AggregationType::parse(func.trim())
            .ok_or_else(|| ParseError::UnknownFunction(func.trim().to_string()))?;

        let lhs = lhs.trim();
        let expr = if lhs == "*" {
            if kind != AggregationType::Count {
                return Err(ParseError::StarRequiresCount);
            }
            None
        } else {
            Some(self.column_expr(lhs)?)
        };

        Ok(AggregateDef {
            kind,
            expr,
            output_name: format!("{kind}({lhs})"),
        })
    }
}

/// The raw query fragments collected from the command line.
#[derive(Debug, Default)]
pub struct QueryArgs {
    /// Optional `COL OP LITERAL` condition.
    pub r#where: Option<String>,
    /// `lhs=FUNC` aggregate specs.
    pub aggregates: Vec<String>,
    /// Group-by column names.
    pub group_bys: Vec<String>,
    /// Sort column names.
    pub sort: Vec<String>,
    /// Rows to skip.
    pub offset: Option<usize>,
    /// Maximum rows to return.
    pub limit: Option<usize>,
}

/// Builds the statement executed for `table_name` from raw CLI fragments.
///
/// The selection list is inferred: group keys plus aggregate arguments when
/// either is present, otherwise `SELECT *`. Sort columns resolve against the
/// table schema first and fall back to aggregate output names, so sorting on
/// a computed column like `count(*)` works.
pub fn resolve_statement(
    table_name: &str,
    schema: &Schema,
    args: &QueryArgs,
) -> Result<SelectStatement, ParseError> {
    let resolver = ExpressionResolver::new(schema);

    let where_clause = args
        .r#where
        .as_deref()
        .map(|condition| resolver.comparison(condition))
        .transpose()?;

    let group_bys = args
        .group_bys
        .iter()
        .map(|name| resolver.column_expr(name))
        .collect::<Result<Vec<_>, _>>()?;

    let aggregates = args
        .aggregates
        .iter()
        .map(|spec| resolver.aggregate(spec))
        .collect::<Result<Vec<_>, _>>()?;

    let order_by = args
        .sort
        .iter()
        .map(|name| resolve_sort_column(&resolver, &aggregates, name))
        .collect::<Result<Vec<_>, _>>()?;

    let mut select_exprs: Vec<Expr> = Vec::new();
    if !group_bys.is_empty() || !aggregates.is_empty() {
        select_exprs.extend(group_bys.iter().cloned());
        select_exprs.extend(aggregates.iter().map(AggregateDef::inner_expr));
    }

    Ok(SelectStatement {
        select_exprs,
        from_table: table_name.to_string(),
        where_clause,
        group_bys,
        aggregates,
        order_by,
        offset: args.offset,
        limit: args.limit,
    })
}

fn resolve_sort_column(
    resolver: &ExpressionResolver<'_>,
    aggregates: &[AggregateDef],
    name: &str,
) -> Result<Expr, ParseError> {
    match resolver.column_expr(name) {
        Ok(expr) => Ok(expr),
        Err(err) => {
            let name = name.trim();
            for aggregate in aggregates {
                if aggregate.output_name == name {
                    let type_id = if aggregate.kind == AggregationType::Count {
                        TypeId::Int
                    } else {
                        aggregate.inner_expr().return_type()
                    };
                    return Ok(Expr::column(Column::new(name, type_id)));
                }
            }
            Err(err)
        }
    }
}

/// Infers the type of a bare literal token.
///
/// `true`/`false` (any case) are boolean; quoted or purely alphabetic tokens
/// are strings (quotes stripped); tokens containing `.` are decimal;
/// everything else must parse as an integer.
pub fn parse_literal(raw: &str) -> Result<Value, ParseError> {
    let lower = raw.to_ascii_lowercase();
    if lower == "true" || lower == "false" {
        return Ok(Value::boolean(lower == "true"));
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return Ok(Value::string(&raw[1..raw.len() - 1]));
    }
    if !raw.is_empty() && raw.chars().all(char::is_alphabetic) {
        return Ok(Value::string(raw));
    }
    if raw.contains('.') {
        return raw
            .parse::<f64>()
            .map(Value::decimal)
            .map_err(|_| ParseError::BadLiteral(raw.to_string()));
    }
    raw.parse::<i64>()
        .map(Value::int)
        .map_err(|_| ParseError::BadLiteral(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use quarry_core::TypeId;

    use super::*;

    fn schema() -> Schema {
        Schema::new(vec![
            Column::new("name", TypeId::String),
            Column::new("brand", TypeId::String),
            Column::new("price", TypeId::Int),
            Column::new("rating", TypeId::Decimal),
        ])
    }

    #[test]
    fn test_literal_inference() {
        assert_eq!(parse_literal("TRUE").unwrap(), Value::boolean(true));
        assert_eq!(parse_literal("false").unwrap(), Value::boolean(false));
        assert_eq!(parse_literal("'O k'").unwrap(), Value::string("O k"));
        assert_eq!(parse_literal("Acme").unwrap(), Value::string("Acme"));
        assert_eq!(parse_literal("4.5").unwrap(), Value::decimal(4.5));
        assert_eq!(parse_literal("-12").unwrap(), Value::int(-12));
        assert!(matches!(
            parse_literal("12x"),
            Err(ParseError::BadLiteral(_))
        ));
    }

    #[test]
    fn test_condition_longest_operator_wins() {
        let schema = schema();
        let resolver = ExpressionResolver::new(&schema);
        let expr = resolver.comparison("price>=20").unwrap();
        assert_eq!(expr.to_string(), "(price >= 20)");

        let expr = resolver.comparison("price>20").unwrap();
        assert_eq!(expr.to_string(), "(price > 20)");

        let expr = resolver.comparison("brand!=Acme").unwrap();
        assert_eq!(expr.to_string(), "(brand != Acme)");
    }

    #[test]
    fn test_condition_without_operator_fails() {
        let schema = schema();
        let resolver = ExpressionResolver::new(&schema);
        assert!(matches!(
            resolver.comparison("price is 20"),
            Err(ParseError::BadCondition(_))
        ));
    }

    #[test]
    fn test_condition_unknown_column_fails() {
        let schema = schema();
        let resolver = ExpressionResolver::new(&schema);
        assert!(matches!(
            resolver.comparison("weight>1"),
            Err(ParseError::Column(_))
        ));
    }

    #[test]
    fn test_aggregate_specs() {
        let schema = schema();
        let resolver = ExpressionResolver::new(&schema);

        let agg = resolver.aggregate("price=SUM").unwrap();
        assert_eq!(agg.kind, AggregationType::Sum);
        assert_eq!(agg.output_name, "sum(price)");
        assert!(agg.expr.is_some());

        let agg = resolver.aggregate("*=count").unwrap();
        assert_eq!(agg.kind, AggregationType::Count);
        assert_eq!(agg.output_name, "count(*)");
        assert!(agg.expr.is_none());
    }

    #[test]
    fn test_bad_aggregate_specs() {
        let schema = schema();
        let resolver = ExpressionResolver::new(&schema);
        assert!(matches!(
            resolver.aggregate("price"),
            Err(ParseError::BadAggregateSpec(_))
        ));
        assert!(matches!(
            resolver.aggregate("price=MEDIAN"),
            Err(ParseError::UnknownFunction(_))
        ));
        assert!(matches!(
            resolver.aggregate("*=SUM"),
            Err(ParseError::StarRequiresCount)
        ));
    }

    #[test]
    fn test_statement_inference_for_grouped_query() {
        let schema = schema();
        let args = QueryArgs {
            group_bys: vec!["brand".to_string()],
            aggregates: vec!["price=SUM".to_string()],
            ..QueryArgs::default()
        };
        let statement = resolve_statement("products", &schema, &args).unwrap();
        assert_eq!(statement.from_table, "products");
        assert_eq!(statement.select_exprs.len(), 2);
        assert_eq!(statement.group_bys.len(), 1);
        assert_eq!(statement.aggregates.len(), 1);
    }

    #[test]
    fn test_plain_statement_selects_star() {
        let schema = schema();
        let statement =
            resolve_statement("products", &schema, &QueryArgs::default()).unwrap();
        assert!(statement.select_exprs.is_empty());
        assert!(statement.where_clause.is_none());
    }

    #[test]
    fn test_sort_falls_back_to_aggregate_output() {
        let schema = schema();
        let args = QueryArgs {
            group_bys: vec!["name".to_string()],
            aggregates: vec!["*=COUNT".to_string()],
            sort: vec!["count(*)".to_string()],
            ..QueryArgs::default()
        };
        let statement = resolve_statement("products", &schema, &args).unwrap();
        assert_eq!(statement.order_by.len(), 1);
        assert_eq!(statement.order_by[0].to_string(), "count(*)");
        assert_eq!(statement.order_by[0].return_type(), TypeId::Int);
    }
}
