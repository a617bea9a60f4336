//! Sqlscribe Core - a fluent, in-memory SQL text builder
//!
//! This crate assembles SELECT, INSERT, UPDATE and DELETE statement strings
//! from chained method calls, escaping values and composing boolean WHERE
//! clauses along the way. It builds text only: there is no connection
//! handling, no execution and no schema awareness.

pub mod builder;
pub mod comparator;
pub mod condition;
pub mod error;
pub mod registry;
pub mod value;

// Re-export main types
pub use builder::{
    DeleteBuilder, InsertBuilder, SelectBuilder, StatementHandle, StatementKind, UpdateBuilder,
};
pub use comparator::Comparator;
pub use condition::{Connector, WhereClause};
pub use error::BuildError;
pub use registry::{ClearBehavior, SqlBuilder, StmtId};
pub use value::Value;

/// Create a new empty statement builder
pub fn builder() -> SqlBuilder {
    SqlBuilder::new()
}
