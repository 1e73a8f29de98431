//! JoinGraph - the rooted tree of tables and joins behind a query.
//!
//! The first table added becomes the main table. Every other table is either
//! reachable from the main table through exactly one path of joins, or
//! *pending*: added but not yet joined. Joins may only extend the tree, so the
//! graph can never contain a cycle or a second component with joins in it.
//!
//! All mutations validate fully before changing anything. On error the graph
//! is exactly as it was before the call.

mod reachability;


use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    FilterType, GranularityBucket, Join, JoinCondition, JoinKind, Table, TypeClassSet,
};
use crate::semantic::classifier::{filter_type_for, granularity_options_for};

pub use super::error::{GraphResult, JoinGraphError};

use reachability::{detached, reachable_from};

/// What to do when a removal would cut tables off from the main table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemovalPolicy {
    /// Remove the disconnected subtree along with its joins.
    #[default]
    Cascade,
    /// Refuse the removal.
    Reject,
}

/// Lifecycle state of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GraphState {
    Empty,
    Rooted,
}

/// Where a newly added table landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// The graph was empty; the table is now the main table.
    Main,
    /// The table awaits a join to become part of the query.
    PendingRelationship,
}

/// The join graph of one query.
///
/// Tables keep insertion order and the main table is always the first one.
#[derive(Debug, Clone, Default)]
pub struct JoinGraph {
    tables: Vec<Table>,
    joins: Vec<Join>,
    policy: RemovalPolicy,
}

impl JoinGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: RemovalPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> RemovalPolicy {
        self.policy
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn state(&self) -> GraphState {
        if self.tables.is_empty() {
            GraphState::Empty
        } else {
            GraphState::Rooted
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// All tables, in the order they were added.
    pub fn list_tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn list_joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn main_table_id(&self) -> Option<&str> {
        self.main_table().map(|t| t.id.as_str())
    }

    pub fn main_table(&self) -> Option<&Table> {
        self.tables.first()
    }

    pub fn table(&self, id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn contains_table(&self, id: &str) -> bool {
        self.table(id).is_some()
    }

    pub fn is_main(&self, id: &str) -> bool {
        self.main_table_id() == Some(id)
    }

    /// The join directly connecting `a` and `b`, in either direction.
    pub fn join_between(&self, a: &str, b: &str) -> Option<&Join> {
        self.joins.iter().find(|j| j.connects(a, b))
    }

    /// Tables connected to the main table (the main table included), in
    /// insertion order.
    pub fn reachable_tables(&self) -> Vec<&Table> {
        let Some(main) = self.main_table_id() else {
            return Vec::new();
        };
        let reach = reachable_from(main, &self.joins);
        self.tables
            .iter()
            .filter(|t| reach.contains(t.id.as_str()))
            .collect()
    }

    /// Tables added but not yet joined.
    pub fn pending_tables(&self) -> Vec<&Table> {
        let Some(main) = self.main_table_id() else {
            return Vec::new();
        };
        let reach = reachable_from(main, &self.joins);
        self.tables
            .iter()
            .filter(|t| !reach.contains(t.id.as_str()))
            .collect()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending_tables().iter().any(|t| t.id == id)
    }

    /// Type classes of a column.
    pub fn column_type_classes(&self, table_id: &str, column: &str) -> GraphResult<TypeClassSet> {
        let table = self.require_table(table_id)?;
        table
            .column(column)
            .map(|c| c.type_classes())
            .ok_or_else(|| JoinGraphError::UnknownColumn {
                table: table_id.to_string(),
                column: column.to_string(),
            })
    }

    /// Granularity buckets offered for a column (empty unless it is a date).
    pub fn granularity_options(
        &self,
        table_id: &str,
        column: &str,
    ) -> GraphResult<Vec<GranularityBucket>> {
        Ok(granularity_options_for(
            self.column_type_classes(table_id, column)?,
        ))
    }

    /// Filter widget family for a column.
    pub fn filter_type(&self, table_id: &str, column: &str) -> GraphResult<Option<FilterType>> {
        Ok(filter_type_for(self.column_type_classes(table_id, column)?))
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add a table. The first table becomes the main table; later ones are
    /// pending until joined.
    pub fn add_table(&mut self, table: Table) -> GraphResult<Placement> {
        if self.contains_table(&table.id) {
            return Err(JoinGraphError::DuplicateTable(table.id));
        }

        let placement = if self.tables.is_empty() {
            Placement::Main
        } else {
            Placement::PendingRelationship
        };
        debug!(table = %table.id, ?placement, "added table");
        self.tables.push(table);
        Ok(placement)
    }

    /// Join two tables. Exactly one of them must already be connected to
    /// the main table.
    pub fn add_join(
        &mut self,
        left: &str,
        right: &str,
        kind: JoinKind,
        conditions: Vec<JoinCondition>,
    ) -> GraphResult<()> {
        if left == right {
            return Err(JoinGraphError::self_join(left));
        }
        self.require_table(left)?;
        self.require_table(right)?;
        if self.join_between(left, right).is_some() {
            return Err(JoinGraphError::duplicate_join(left, right));
        }
        self.check_conditions(left, right, &conditions)?;

        let main = self.require_main()?;
        let reach = reachable_from(main, &self.joins);
        match (reach.contains(left), reach.contains(right)) {
            (false, false) => {
                return Err(JoinGraphError::DisconnectedJoin {
                    left: left.to_string(),
                    right: right.to_string(),
                })
            }
            (true, true) => {
                return Err(JoinGraphError::CyclicJoin {
                    left: left.to_string(),
                    right: right.to_string(),
                })
            }
            _ => {}
        }

        debug!(left, right, %kind, conditions = conditions.len(), "added join");
        self.joins.push(Join::new(left, right, kind, conditions));
        Ok(())
    }

    /// Swap the kind and conditions of an existing join.
    ///
    /// The new orientation (`left`, `right`) replaces the old one.
    pub fn replace_join(
        &mut self,
        left: &str,
        right: &str,
        kind: JoinKind,
        conditions: Vec<JoinCondition>,
    ) -> GraphResult<()> {
        if left == right {
            return Err(JoinGraphError::self_join(left));
        }
        let idx = self.require_join(left, right)?;
        self.check_conditions(left, right, &conditions)?;

        debug!(left, right, %kind, "replaced join");
        self.joins[idx] = Join::new(left, right, kind, conditions);
        Ok(())
    }

    /// Remove the join between `left` and `right`.
    ///
    /// Returns the tables that were detached from the main table and removed
    /// with it (empty when nothing was cut off).
    pub fn remove_join(&mut self, left: &str, right: &str) -> GraphResult<Vec<String>> {
        let idx = self.require_join(left, right)?;
        let main = self.require_main()?;

        let before = reachable_from(main, &self.joins);
        let after = reachable_from(
            main,
            self.joins
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, j)| j),
        );
        let lost = detached(self.table_ids(), &before, &after);
        self.check_policy(&lost)?;

        debug!(left, right, detached = lost.len(), "removed join");
        self.joins.remove(idx);
        self.drop_tables(&lost);
        Ok(lost)
    }

    /// Remove a table and every join touching it.
    ///
    /// The main table can only be removed when it is the only table. Returns
    /// the ids of all removed tables, `table_id` first.
    pub fn remove_table(&mut self, table_id: &str) -> GraphResult<Vec<String>> {
        self.require_table(table_id)?;
        let main = self.require_main()?;

        if main == table_id {
            if self.tables.len() > 1 {
                return Err(JoinGraphError::MainTableRemoval {
                    table: table_id.to_string(),
                });
            }
            debug!(table = table_id, "removed main table");
            self.tables.clear();
            self.joins.clear();
            return Ok(vec![table_id.to_string()]);
        }

        let before = reachable_from(main, &self.joins);
        let after = reachable_from(main, self.joins.iter().filter(|j| !j.touches(table_id)));
        let lost: Vec<String> = detached(self.table_ids(), &before, &after)
            .into_iter()
            .filter(|t| t != table_id)
            .collect();
        self.check_policy(&lost)?;

        let mut removed = Vec::with_capacity(lost.len() + 1);
        removed.push(table_id.to_string());
        removed.extend(lost);

        debug!(table = table_id, cascaded = removed.len() - 1, "removed table");
        self.drop_tables(&removed);
        Ok(removed)
    }

    /// Replace the main table.
    ///
    /// Only allowed when the main table stands alone (or the graph is empty).
    /// Afterwards `table` is the only table and there are no joins.
    pub fn reset_main_table(&mut self, table: Table) -> GraphResult<()> {
        let tables = self.tables.len().saturating_sub(1);
        let joins = self.joins.len();
        if tables > 0 || joins > 0 {
            return Err(JoinGraphError::ResetBlocked { tables, joins });
        }

        debug!(table = %table.id, "reset main table");
        self.tables.clear();
        self.joins.clear();
        self.tables.push(table);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn table_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.id.as_str())
    }

    fn require_table(&self, id: &str) -> GraphResult<&Table> {
        self.table(id)
            .ok_or_else(|| JoinGraphError::UnknownTable(id.to_string()))
    }

    fn require_main(&self) -> GraphResult<&str> {
        // Only reached after a table lookup succeeded, so the graph is rooted.
        self.main_table_id()
            .ok_or_else(|| JoinGraphError::UnknownTable(String::new()))
    }

    fn require_join(&self, left: &str, right: &str) -> GraphResult<usize> {
        self.joins
            .iter()
            .position(|j| j.connects(left, right))
            .ok_or_else(|| JoinGraphError::join_not_found(left, right))
    }

    fn check_conditions(
        &self,
        left: &str,
        right: &str,
        conditions: &[JoinCondition],
    ) -> GraphResult<()> {
        if conditions.is_empty() {
            return Err(JoinGraphError::EmptyJoinConditions {
                left: left.to_string(),
                right: right.to_string(),
            });
        }

        let left_table = self.require_table(left)?;
        let right_table = self.require_table(right)?;
        for cond in conditions {
            for (table, column) in [
                (left_table, &cond.left_column),
                (right_table, &cond.right_column),
            ] {
                if !table.has_column(column) {
                    return Err(JoinGraphError::UnknownColumn {
                        table: table.id.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn check_policy(&self, lost: &[String]) -> GraphResult<()> {
        if self.policy == RemovalPolicy::Reject && !lost.is_empty() {
            return Err(JoinGraphError::DisconnectingRemoval {
                tables: lost.to_vec(),
            });
        }
        Ok(())
    }

    /// Drop `ids` and every join touching them.
    fn drop_tables(&mut self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        self.tables.retain(|t| !ids.contains(&t.id));
        self.joins
            .retain(|j| !ids.iter().any(|id| j.touches(id)));
    }
}
