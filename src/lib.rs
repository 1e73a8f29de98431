//! # joinwise
//!
//! Relationship inference and join-graph engine for visual query builders.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │          Schema Catalog (tables, ordered columns)        │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [classifier]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Type Classes (NUMBER / TEXT / DATE + derived roles)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [inference]
//! ┌─────────────────────────────────────────────────────────┐
//! │              Join Proposal (zero or one)                 │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [join graph]
//! ┌─────────────────────────────────────────────────────────┐
//! │        JoinGraph (rooted tree at the main table)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query builder]
//! ┌─────────────────────────────────────────────────────────┐
//! │       JoinOutcome / JoinGraphError for the UI layer      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is synchronous and holds no global state. One [`QueryBuilder`]
//! (or [`JoinGraph`]) per open query; callers serialize mutations.

pub mod config;
pub mod model;
pub mod schema;
pub mod semantic;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::Settings;
    pub use crate::model::{
        Column, FilterType, GranularityBucket, Join, JoinCondition, JoinKind, RawType, Table,
        TypeClass, TypeClassSet,
    };
    pub use crate::schema::SchemaCatalog;
    pub use crate::semantic::{
        classify, infer_join, ErrorKind, GraphResult, JoinGraph, JoinGraphError, JoinOutcome,
        JoinProposal, QueryBuilder, RemovalPolicy, Severity,
    };
}

// Also export at crate root for convenience
pub use model::{Join, JoinCondition, JoinKind, Table};
pub use semantic::{JoinGraph, JoinGraphError, JoinOutcome, QueryBuilder};
