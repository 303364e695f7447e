//! The catalog: name → table descriptor mapping, with a JSON bootstrap.
//!
//! The engine only needs the mapping; the JSON config layer exists so the CLI
//! can declare tables without recompiling. A config file looks like:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "name": "products",
//!       "path": "data/products.csv",
//!       "header": false,
//!       "columns": [
//!         { "name": "name", "type": "string" },
//!         { "name": "price", "type": "int" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! Relative `path`s resolve against the config file's directory.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use quarry_core::{Column, Schema, TypeId};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::table::{CsvTable, Table};

/// Maps table names to their descriptors.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, Table>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under `name`, replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, table: Table) {
        self.tables.insert(name.into(), table);
    }

    /// Looks up a table, failing with [`StorageError::UnknownTable`].
    pub fn resolve(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| StorageError::UnknownTable(name.to_string()))
    }

    /// Loads a catalog from a JSON config file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&text)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));

        let mut catalog = Self::new();
        for entry in config.tables {
            let columns = entry
                .columns
                .into_iter()
                .map(|c| Ok(Column::new(c.name, parse_type_name(&c.type_name)?)))
                .collect::<Result<Vec<_>>>()?;
            let schema = Arc::new(Schema::new(columns));
            let data_path = if entry.path.is_absolute() {
                entry.path
            } else {
                base.join(entry.path)
            };
            debug!(table = %entry.name, path = %data_path.display(), "registering table");
            catalog.register(
                entry.name,
                Table::Csv(CsvTable::new(data_path, schema, entry.header)),
            );
        }
        Ok(catalog)
    }
}

fn parse_type_name(name: &str) -> Result<TypeId> {
    match name.to_ascii_lowercase().as_str() {
        "int" => Ok(TypeId::Int),
        "decimal" => Ok(TypeId::Decimal),
        "boolean" => Ok(TypeId::Boolean),
        "string" => Ok(TypeId::String),
        _ => Err(StorageError::UnknownTypeName(name.to_string())),
    }
}

#[derive(Debug, Deserialize)]
struct CatalogConfig {
    tables: Vec<TableConfig>,
}

#[derive(Debug, Deserialize)]
struct TableConfig {
    name: String,
    path: std::path::PathBuf,
    #[serde(default)]
    header: bool,
    columns: Vec<ColumnConfig>,
}

#[derive(Debug, Deserialize)]
struct ColumnConfig {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
}
