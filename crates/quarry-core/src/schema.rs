//! Column and schema definitions.

use crate::error::{CoreError, Result};
use crate::types::TypeId;

/// An immutable named, typed column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    type_id: TypeId,
}

impl Column {
    /// Creates a column definition.
    #[must_use]
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        Self {
            name: name.into(),
            type_id,
        }
    }

    /// The column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The column type.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.type_id)
    }
}

/// An ordered sequence of columns.
///
/// Column names are expected to be unique; by-name lookup returns the first
/// match, so the planner must not emit duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Creates a schema from an ordered column list.
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// All columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The column at `index`, if any.
    #[must_use]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Position of the first column named `name`.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name() == name)
            .ok_or_else(|| CoreError::UnknownColumn(name.to_string()))
    }

    /// The first column named `name`.
    pub fn column_by_name(&self, name: &str) -> Result<&Column> {
        self.index_of(name).map(|idx| &self.columns[idx])
    }
}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for column in &self.columns {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{column}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        Schema::new(vec![
            Column::new("id", TypeId::Int),
            Column::new("name", TypeId::String),
            Column::new("price", TypeId::Decimal),
        ])
    }

    #[test]
    fn test_positional_access() {
        let schema = sample();
        assert_eq!(schema.column_count(), 3);
        assert_eq!(schema.column(1).unwrap().name(), "name");
        assert!(schema.column(3).is_none());
    }

    #[test]
    fn test_lookup_by_name() {
        let schema = sample();
        assert_eq!(schema.index_of("price").unwrap(), 2);
        assert_eq!(schema.column_by_name("id").unwrap().type_id(), TypeId::Int);
        assert!(matches!(
            schema.index_of("missing"),
            Err(CoreError::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_first_match_wins() {
        let schema = Schema::new(vec![
            Column::new("x", TypeId::Int),
            Column::new("x", TypeId::String),
        ]);
        assert_eq!(schema.index_of("x").unwrap(), 0);
    }
}
