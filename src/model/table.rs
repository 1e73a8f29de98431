// src/model/table.rs
use serde::{Deserialize, Serialize};

use crate::model::types::{RawType, TypeClassSet};
use crate::semantic::classifier::classify;

/// A column of a data-source table.
///
/// Columns are immutable once loaded; the type classes are derived from the
/// raw type and never stored independently of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub raw_type: RawType,
}

impl Column {
    pub fn new(name: impl Into<String>, raw_type: impl Into<RawType>) -> Self {
        Self {
            name: name.into(),
            raw_type: raw_type.into(),
        }
    }

    /// Semantic type classes of this column.
    pub fn type_classes(&self) -> TypeClassSet {
        classify(&self.raw_type)
    }
}

/// A table placed on the query canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Identifier, unique within a query (usually the source table name).
    pub id: String,
    /// Display label
    #[serde(default)]
    pub label: String,
    /// Columns in source order
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            columns: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_column(mut self, name: impl Into<String>, raw_type: impl Into<RawType>) -> Self {
        self.columns.push(Column::new(name, raw_type));
        self
    }

    /// Look up a column by exact name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Label to show for this table, falling back to the id.
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}
