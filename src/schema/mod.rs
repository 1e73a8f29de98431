//! Schema catalog - table metadata supplied by the data-source layer.
//!
//! The catalog is a JSON document listing tables with their ordered columns:
//!
//! ```json
//! {
//!   "tables": [
//!     {
//!       "id": "customers",
//!       "label": "Customers",
//!       "columns": [
//!         { "name": "id", "type": "Integer" },
//!         { "name": "name", "type": "Text" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

use crate::model::Table;

/// Errors loading a schema catalog.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read schema file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse schema: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("table '{0}' is defined more than once")]
    DuplicateTable(String),

    #[error("column '{column}' is defined more than once on table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("table '{0}' not found in schema")]
    TableNotFound(String),
}

/// Ordered collection of table schemas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaCatalog {
    tables: Vec<Table>,
}

impl SchemaCatalog {
    pub fn new(tables: Vec<Table>) -> Result<Self, SchemaError> {
        let catalog = Self { tables };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let catalog: SchemaCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// A copy of table `id`, ready to add to a query.
    pub fn table(&self, id: &str) -> Result<Table, SchemaError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| SchemaError::TableNotFound(id.to_string()))
    }

    fn validate(&self) -> Result<(), SchemaError> {
        let mut seen_tables = HashSet::new();
        for table in &self.tables {
            if !seen_tables.insert(table.id.as_str()) {
                return Err(SchemaError::DuplicateTable(table.id.clone()));
            }

            let mut seen_columns = HashSet::new();
            for column in &table.columns {
                if !seen_columns.insert(column.name.as_str()) {
                    return Err(SchemaError::DuplicateColumn {
                        table: table.id.clone(),
                        column: column.name.clone(),
                    });
                }
                if column.raw_type.is_unknown() {
                    warn!(
                        table = %table.id,
                        column = %column.name,
                        raw_type = %column.raw_type,
                        "unrecognized column type; column will not be classified"
                    );
                }
            }
        }
        Ok(())
    }
}
