//! Table, column, join and type primitives shared by the engine.

pub mod join;
pub mod table;
pub mod types;

pub use join::{Join, JoinCondition};
pub use table::{Column, Table};
pub use types::{FilterType, GranularityBucket, JoinKind, RawType, TypeClass, TypeClassSet};
