//! Query builder facade.
//!
//! Ties the inferrer and the join graph together for user actions on the
//! canvas: adding a table (and joining it automatically when a relationship
//! can be inferred), editing joins, and resetting the main table.

use serde::Serialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::model::{Join, JoinCondition, JoinKind, Table};
use crate::semantic::error::{ErrorKind, GraphResult, JoinGraphError, Severity};
use crate::semantic::inference::{JoinProposal, MatchKind, RelationshipInferrer};
use crate::semantic::join_graph::{JoinGraph, Placement};

/// Result of adding a table through the facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum JoinOutcome {
    /// The graph was empty and the table became the main table.
    MainTableSet { table: String },
    /// A relationship was inferred and applied.
    Joined { join: Join, match_kind: MatchKind },
    /// No relationship could be inferred; the table is pending.
    ///
    /// `table_a` is the main table, `table_b` the table just added.
    NoRelationshipFound { table_a: String, table_b: String },
}

impl JoinOutcome {
    /// Message key for outcomes the UI should surface.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            JoinOutcome::NoRelationshipFound { .. } => Some(ErrorKind::NoRelationshipFound),
            _ => None,
        }
    }

    pub fn severity(&self) -> Option<Severity> {
        self.kind().map(|_| Severity::Warning)
    }

    pub fn is_joined(&self) -> bool {
        matches!(self, JoinOutcome::Joined { .. })
    }
}

/// One query's builder state.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    graph: JoinGraph,
    inferrer: RelationshipInferrer,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            graph: JoinGraph::with_policy(settings.graph.removal_policy),
            inferrer: RelationshipInferrer::new(settings.inference_config()),
        }
    }

    pub fn graph(&self) -> &JoinGraph {
        &self.graph
    }

    pub fn inferrer(&self) -> &RelationshipInferrer {
        &self.inferrer
    }

    /// Add a table and try to join it to the tables already in the query.
    pub fn add_table_and_auto_join(&mut self, table: Table) -> GraphResult<JoinOutcome> {
        self.add_table_with_kind(table, None)
    }

    /// Like [`add_table_and_auto_join`](Self::add_table_and_auto_join), with an
    /// explicit join kind for the inferred join.
    pub fn add_table_and_auto_join_as(
        &mut self,
        table: Table,
        kind: JoinKind,
    ) -> GraphResult<JoinOutcome> {
        self.add_table_with_kind(table, Some(kind))
    }

    fn add_table_with_kind(
        &mut self,
        table: Table,
        kind: Option<JoinKind>,
    ) -> GraphResult<JoinOutcome> {
        if self.graph.is_main(&table.id) {
            return Err(JoinGraphError::self_join(table.id));
        }

        let id = table.id.clone();
        match self.graph.add_table(table)? {
            Placement::Main => {
                info!(table = %id, "main table set");
                Ok(JoinOutcome::MainTableSet { table: id })
            }
            Placement::PendingRelationship => {
                let outcome = self.join_pending(&id, kind);
                if outcome.is_err() {
                    // Keep the call all-or-nothing.
                    let _ = self.graph.remove_table(&id);
                }
                outcome
            }
        }
    }

    /// Retry inference for a table still waiting for a relationship.
    pub fn auto_join(&mut self, table_id: &str) -> GraphResult<JoinOutcome> {
        if !self.graph.contains_table(table_id) {
            return Err(JoinGraphError::UnknownTable(table_id.to_string()));
        }
        self.join_pending(table_id, None)
    }

    fn join_pending(&mut self, table_id: &str, kind: Option<JoinKind>) -> GraphResult<JoinOutcome> {
        let Some(proposal) = self.first_proposal(table_id, kind) else {
            let main = self.graph.main_table_id().unwrap_or_default().to_string();
            info!(main = %main, table = table_id, "no relationship found");
            return Ok(JoinOutcome::NoRelationshipFound {
                table_a: main,
                table_b: table_id.to_string(),
            });
        };

        let match_kind = proposal.match_kind;
        let join = proposal.into_join();
        self.graph.add_join(
            &join.left_table,
            &join.right_table,
            join.kind,
            join.conditions.clone(),
        )?;
        info!(%join, %match_kind, "auto-joined table");
        Ok(JoinOutcome::Joined { join, match_kind })
    }

    /// First proposal against the connected tables, earliest-added first.
    fn first_proposal(&self, table_id: &str, kind: Option<JoinKind>) -> Option<JoinProposal> {
        let new_table = self.graph.table(table_id)?;
        self.graph
            .reachable_tables()
            .into_iter()
            .filter(|existing| existing.id != table_id)
            .find_map(|existing| {
                let kind = kind.unwrap_or(self.inferrer.config().default_join_kind);
                let proposal = self.inferrer.infer_join_with_kind(existing, new_table, kind);
                if proposal.is_none() {
                    debug!(existing = %existing.id, table = table_id, "no candidate columns");
                }
                proposal
            })
    }

    /// Join two tables manually.
    pub fn add_join(
        &mut self,
        left: &str,
        right: &str,
        kind: JoinKind,
        conditions: Vec<JoinCondition>,
    ) -> GraphResult<()> {
        self.graph.add_join(left, right, kind, conditions)
    }

    pub fn replace_join(
        &mut self,
        left: &str,
        right: &str,
        kind: JoinKind,
        conditions: Vec<JoinCondition>,
    ) -> GraphResult<()> {
        self.graph.replace_join(left, right, kind, conditions)
    }

    pub fn remove_join(&mut self, left: &str, right: &str) -> GraphResult<Vec<String>> {
        self.graph.remove_join(left, right)
    }

    pub fn remove_table(&mut self, table_id: &str) -> GraphResult<Vec<String>> {
        self.graph.remove_table(table_id)
    }

    pub fn reset_main_table(&mut self, table: Table) -> GraphResult<()> {
        self.graph.reset_main_table(table)
    }
}
