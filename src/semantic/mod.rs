//! Semantic layer - column classification, relationship inference and the
//! join graph.
//!
//! Data flows one way for inference:
//!
//! 1. **Classify** - raw column types become type classes
//! 2. **Infer** - two table schemas yield zero or one join proposal
//! 3. **Apply** - the proposal is validated and applied to the join graph
//!
//! [`QueryBuilder`] runs these steps for user actions and returns structured
//! outcomes or errors for the presentation layer to render.

pub mod classifier;
pub mod error;
pub mod inference;
pub mod join_graph;
pub mod query_builder;

pub use classifier::{classify, classify_str, filter_type_for, granularity_options_for};
pub use error::{ErrorKind, GraphResult, JoinGraphError, Severity};
pub use inference::{infer_join, InferenceConfig, JoinProposal, MatchKind, RelationshipInferrer};
pub use join_graph::{GraphState, JoinGraph, Placement, RemovalPolicy};
pub use query_builder::{JoinOutcome, QueryBuilder};
