// src/model/join.rs
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::types::JoinKind;

/// One `left.column = right.column` equality of a join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JoinCondition {
    pub left_column: String,
    pub right_column: String,
}

impl JoinCondition {
    pub fn new(left_column: impl Into<String>, right_column: impl Into<String>) -> Self {
        Self {
            left_column: left_column.into(),
            right_column: right_column.into(),
        }
    }

    /// The same equality seen from the other table.
    pub fn reversed(&self) -> Self {
        Self {
            left_column: self.right_column.clone(),
            right_column: self.left_column.clone(),
        }
    }
}

/// A join edge between two tables.
///
/// Direction matters for SQL generation only; the join graph treats the pair
/// as undirected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Join {
    pub left_table: String,
    pub right_table: String,
    pub kind: JoinKind,
    pub conditions: Vec<JoinCondition>,
}

impl Join {
    pub fn new(
        left_table: impl Into<String>,
        right_table: impl Into<String>,
        kind: JoinKind,
        conditions: Vec<JoinCondition>,
    ) -> Self {
        Self {
            left_table: left_table.into(),
            right_table: right_table.into(),
            kind,
            conditions,
        }
    }

    /// Does this edge connect `a` and `b`, in either direction?
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.left_table == a && self.right_table == b)
            || (self.left_table == b && self.right_table == a)
    }

    /// Is `table` one of the endpoints?
    pub fn touches(&self, table: &str) -> bool {
        self.left_table == table || self.right_table == table
    }

    /// The endpoint opposite `table`, if `table` is an endpoint.
    pub fn other(&self, table: &str) -> Option<&str> {
        if self.left_table == table {
            Some(&self.right_table)
        } else if self.right_table == table {
            Some(&self.left_table)
        } else {
            None
        }
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on: Vec<String> = self
            .conditions
            .iter()
            .map(|c| {
                format!(
                    "{}.{} = {}.{}",
                    self.left_table, c.left_column, self.right_table, c.right_column
                )
            })
            .collect();
        write!(
            f,
            "{} {} join {} on {}",
            self.left_table,
            self.kind,
            self.right_table,
            on.join(" and ")
        )
    }
}
