//! Statement kinds, their owned state and fluent handles

use std::fmt::{self, Display};

use crate::registry::{SqlBuilder, StmtId};

pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

/// The four statement kinds the builder knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementKind::Select => "select",
            StatementKind::Insert => "insert",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}

/// One SQL statement under construction: an immutable kind and table name
/// plus the kind-specific clause state. A closed sum type, rendered by a
/// `match` rather than virtual dispatch.
#[derive(Debug, Clone)]
pub(crate) struct Statement {
    pub(crate) table: String,
    pub(crate) body: StatementBody,
}

#[derive(Debug, Clone)]
pub(crate) enum StatementBody {
    Select(select::SelectStatement),
    Insert(insert::InsertStatement),
    Update(update::UpdateStatement),
    Delete(delete::DeleteStatement),
}

impl StatementBody {
    pub(crate) fn kind(&self) -> StatementKind {
        match self {
            StatementBody::Select(_) => StatementKind::Select,
            StatementBody::Insert(_) => StatementKind::Insert,
            StatementBody::Update(_) => StatementKind::Update,
            StatementBody::Delete(_) => StatementKind::Delete,
        }
    }
}

impl Statement {
    /// Render this statement's full SQL text.
    pub(crate) fn render(&self) -> String {
        match &self.body {
            StatementBody::Select(select) => select.render(&self.table),
            StatementBody::Insert(insert) => insert.render(&self.table),
            StatementBody::Update(update) => update.render(&self.table),
            StatementBody::Delete(delete) => delete.render(&self.table),
        }
    }
}

/// A fluent handle over one registered statement. Implementors carry a
/// `&mut` borrow of the owning [`SqlBuilder`] plus the statement's stable
/// index, never a reference into the statement vector itself, so registry
/// growth cannot invalidate a handle mid-chain.
pub trait StatementHandle<'a>: Sized {
    #[doc(hidden)]
    fn from_parts(builder: &'a mut SqlBuilder, stmt: StmtId) -> Self;
}
