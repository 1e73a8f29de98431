//! Column-pair matching rules for relationship inference.
//!
//! Each rule decides whether a pair of column names looks like a join key. The
//! rule kinds are ranked; the inferrer keeps the best-ranked pair.

use serde::Serialize;
use std::fmt;

use super::inflection::reference_stems;
use super::InferenceConfig;

/// Name of the generic surrogate key column.
pub const GENERIC_KEY: &str = "id";

/// How a column pair matched.
///
/// Variants are declared best-first; the derived ordering is the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Same name (case-insensitive), other than the generic `id`.
    ExactName,
    /// `{table}_id` on one side referencing the other table's `id`.
    IdReference,
    /// Both columns are the generic `id`.
    GenericKey,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::ExactName => "exact_name",
            MatchKind::IdReference => "id_reference",
            MatchKind::GenericKey => "generic_key",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-level view of one side of a candidate pair.
#[derive(Debug, Clone, Copy)]
pub struct Side<'a> {
    pub table: &'a str,
    pub column: &'a str,
}

/// Match two column names. Types are checked separately by the caller.
pub fn match_names(left: Side<'_>, right: Side<'_>, config: &InferenceConfig) -> Option<MatchKind> {
    let l = left.column.to_lowercase();
    let r = right.column.to_lowercase();

    if l == r {
        return Some(if l == GENERIC_KEY {
            MatchKind::GenericKey
        } else {
            MatchKind::ExactName
        });
    }

    if !config.match_id_columns {
        return None;
    }

    let references = |fk: &str, target_table: &str, target_col: &str| {
        target_col == GENERIC_KEY && is_id_shaped(fk, target_table, &config.id_suffix)
    };

    if references(l.as_str(), right.table, r.as_str())
        || references(r.as_str(), left.table, l.as_str())
    {
        Some(MatchKind::IdReference)
    } else {
        None
    }
}

/// Is `column` (lowercase) shaped like `{table stem}{suffix}`?
pub fn is_id_shaped(column: &str, table: &str, suffix: &str) -> bool {
    let Some(stem) = column.strip_suffix(&suffix.to_lowercase()) else {
        return false;
    };
    if stem.is_empty() {
        return false;
    }
    reference_stems(table).iter().any(|s| s == stem)
}
