//! Structured errors for join graph operations.
//!
//! Every variant carries the identifiers the presentation layer needs to
//! render a localized message. [`JoinGraphError::kind`] gives a stable key for
//! that lookup, so callers never match on display text.

use serde::Serialize;
use thiserror::Error;

/// Result type for join graph operations.
pub type GraphResult<T> = Result<T, JoinGraphError>;

/// How the presentation layer should surface an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Stable, fieldless key for each error (and warning) kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoRelationshipFound,
    SelfJoin,
    DuplicateJoin,
    DisconnectedJoin,
    CyclicJoin,
    ResetBlocked,
    MainTableRemoval,
    DisconnectingRemoval,
    UnknownTable,
    UnknownColumn,
    DuplicateTable,
    EmptyJoinConditions,
    JoinNotFound,
}

/// Structural violations rejected by the join graph.
///
/// The graph is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JoinGraphError {
    /// A table cannot be joined to itself.
    #[error("cannot join table '{table}' to itself")]
    SelfJoin { table: String },

    /// The two tables are already directly joined.
    #[error("tables '{left}' and '{right}' are already joined; remove the join first")]
    DuplicateJoin { left: String, right: String },

    /// Neither table is reachable from the main table.
    #[error("neither '{left}' nor '{right}' is connected to the main table")]
    DisconnectedJoin { left: String, right: String },

    /// Both tables are already reachable from the main table.
    #[error("joining '{left}' and '{right}' would create a cycle")]
    CyclicJoin { left: String, right: String },

    /// Main table reset while other tables or joins are present.
    #[error("remove all other tables ({tables}) and joins ({joins}) before resetting the main table")]
    ResetBlocked { tables: usize, joins: usize },

    /// Main table removal while other tables are present.
    #[error("cannot remove main table '{table}' while other tables are present; reset it instead")]
    MainTableRemoval { table: String },

    /// Removal would disconnect tables under the reject policy.
    #[error("removing this would disconnect tables from the main table: {}", .tables.join(", "))]
    DisconnectingRemoval { tables: Vec<String> },

    #[error("unknown table '{0}'")]
    UnknownTable(String),

    #[error("unknown column '{column}' on table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("table '{0}' is already in the query")]
    DuplicateTable(String),

    #[error("join between '{left}' and '{right}' needs at least one condition")]
    EmptyJoinConditions { left: String, right: String },

    #[error("no join between '{left}' and '{right}'")]
    JoinNotFound { left: String, right: String },
}

impl JoinGraphError {
    pub fn self_join(table: impl Into<String>) -> Self {
        Self::SelfJoin {
            table: table.into(),
        }
    }

    pub fn duplicate_join(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::DuplicateJoin {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn join_not_found(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::JoinNotFound {
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SelfJoin { .. } => ErrorKind::SelfJoin,
            Self::DuplicateJoin { .. } => ErrorKind::DuplicateJoin,
            Self::DisconnectedJoin { .. } => ErrorKind::DisconnectedJoin,
            Self::CyclicJoin { .. } => ErrorKind::CyclicJoin,
            Self::ResetBlocked { .. } => ErrorKind::ResetBlocked,
            Self::MainTableRemoval { .. } => ErrorKind::MainTableRemoval,
            Self::DisconnectingRemoval { .. } => ErrorKind::DisconnectingRemoval,
            Self::UnknownTable(_) => ErrorKind::UnknownTable,
            Self::UnknownColumn { .. } => ErrorKind::UnknownColumn,
            Self::DuplicateTable(_) => ErrorKind::DuplicateTable,
            Self::EmptyJoinConditions { .. } => ErrorKind::EmptyJoinConditions,
            Self::JoinNotFound { .. } => ErrorKind::JoinNotFound,
        }
    }

    /// Structural violations are always errors.
    pub fn severity(&self) -> Severity {
        Severity::Error
    }
}
