//! Relationship inference between two tables.
//!
//! Proposes at most one join for a pair of tables using column names and
//! type classes. Inference never fails and never touches the join graph:
//! "no proposal" is an ordinary answer that the caller turns into a
//! "no relationship found" warning.
//!
//! # Algorithm
//!
//! 1. Every `(a, b)` column pair whose names match under [`rules::match_names`]
//!    and whose raw types share a base type class is a candidate.
//! 2. The candidate with the best [`MatchKind`] wins; ties go to the earliest
//!    column of table A, then the earliest column of table B.
//!
//! # Example
//!
//! ```
//! use joinwise::model::{JoinKind, Table};
//! use joinwise::semantic::inference::infer_join;
//!
//! let orders = Table::new("orders")
//!     .with_column("id", "Integer")
//!     .with_column("customer_id", "Integer");
//! let customers = Table::new("customers")
//!     .with_column("id", "Integer")
//!     .with_column("name", "Text");
//!
//! let proposal = infer_join(&orders, &customers).unwrap();
//! assert_eq!(proposal.kind, JoinKind::Left);
//! assert_eq!(proposal.conditions[0].left_column, "customer_id");
//! assert_eq!(proposal.conditions[0].right_column, "id");
//! ```

mod inflection;
pub mod rules;

pub use inflection::{reference_stems, singularize};
pub use rules::MatchKind;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::model::{Join, JoinCondition, JoinKind, Table};
use crate::semantic::classifier::is_join_compatible;
use rules::{match_names, Side};

/// Tunables for the inferrer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Join kind given to proposals unless the caller asks for another.
    pub default_join_kind: JoinKind,
    /// Match `{table}_id` columns against the other table's `id`.
    pub match_id_columns: bool,
    /// Suffix marking a foreign-key column.
    pub id_suffix: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            default_join_kind: JoinKind::Left,
            match_id_columns: true,
            id_suffix: "_id".to_string(),
        }
    }
}

/// A proposed join from table A (left) to table B (right).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinProposal {
    pub left_table: String,
    pub right_table: String,
    pub kind: JoinKind,
    pub conditions: Vec<JoinCondition>,
    /// The rule that produced the winning pair
    pub match_kind: MatchKind,
}

impl JoinProposal {
    /// Use a different join kind than the default.
    pub fn with_kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Turn the proposal into a join edge.
    pub fn into_join(self) -> Join {
        Join::new(self.left_table, self.right_table, self.kind, self.conditions)
    }
}

/// A candidate column pair, by column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    kind: MatchKind,
    left_pos: usize,
    right_pos: usize,
}

impl Candidate {
    fn sort_key(&self) -> (MatchKind, usize, usize) {
        (self.kind, self.left_pos, self.right_pos)
    }
}

/// Relationship inferrer with explicit configuration.
#[derive(Debug, Clone, Default)]
pub struct RelationshipInferrer {
    config: InferenceConfig,
}

impl RelationshipInferrer {
    pub fn new(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Propose a join between `a` and `b` with the configured default kind.
    pub fn infer_join(&self, a: &Table, b: &Table) -> Option<JoinProposal> {
        self.infer_join_with_kind(a, b, self.config.default_join_kind)
    }

    /// Propose a join between `a` and `b` with an explicit join kind.
    pub fn infer_join_with_kind(&self, a: &Table, b: &Table, kind: JoinKind) -> Option<JoinProposal> {
        let best = self.candidates(a, b).min_by_key(Candidate::sort_key)?;

        let left = &a.columns[best.left_pos];
        let right = &b.columns[best.right_pos];
        trace!(
            left = %a.id,
            right = %b.id,
            left_column = %left.name,
            right_column = %right.name,
            rule = %best.kind,
            "inferred join"
        );

        Some(JoinProposal {
            left_table: a.id.clone(),
            right_table: b.id.clone(),
            kind,
            conditions: vec![JoinCondition::new(&left.name, &right.name)],
            match_kind: best.kind,
        })
    }

    fn candidates<'a>(&'a self, a: &'a Table, b: &'a Table) -> impl Iterator<Item = Candidate> + 'a {
        a.columns.iter().enumerate().flat_map(move |(left_pos, ca)| {
            b.columns.iter().enumerate().filter_map(move |(right_pos, cb)| {
                if !is_join_compatible(&ca.raw_type, &cb.raw_type) {
                    return None;
                }
                let kind = match_names(
                    Side {
                        table: &a.id,
                        column: &ca.name,
                    },
                    Side {
                        table: &b.id,
                        column: &cb.name,
                    },
                    &self.config,
                )?;
                Some(Candidate {
                    kind,
                    left_pos,
                    right_pos,
                })
            })
        })
    }
}

/// Propose a join between `a` and `b` using the default configuration.
pub fn infer_join(a: &Table, b: &Table) -> Option<JoinProposal> {
    RelationshipInferrer::default().infer_join(a, b)
}
