//! UPDATE statement state and fluent handle

use crate::builder::StatementHandle;
use crate::condition::{ConditionTree, WhereClause};
use crate::registry::{SqlBuilder, StmtId};
use crate::value::Value;

/// Owned state of an UPDATE statement. Assignments are keyed by column but
/// keep their insertion order; re-setting a column overwrites the literal in
/// place.
#[derive(Debug, Clone, Default)]
pub(crate) struct UpdateStatement {
    pub(crate) assignments: Vec<(String, String)>,
    pub(crate) where_clause: Option<ConditionTree>,
}

impl UpdateStatement {
    pub(crate) fn render(&self, table: &str) -> String {
        let mut sql = String::from("UPDATE ");
        sql.push_str(table);
        sql.push_str(" SET ");
        let assignments: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, literal)| format!("{} = {}", column, literal))
            .collect();
        sql.push_str(&assignments.join(", "));
        if let Some(where_clause) = &self.where_clause {
            if !where_clause.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_clause.sql());
            }
        }
        sql
    }
}

/// Fluent handle for an UPDATE statement owned by a [`SqlBuilder`].
#[derive(Debug)]
pub struct UpdateBuilder<'a> {
    builder: &'a mut SqlBuilder,
    stmt: StmtId,
}

impl<'a> StatementHandle<'a> for UpdateBuilder<'a> {
    fn from_parts(builder: &'a mut SqlBuilder, stmt: StmtId) -> Self {
        Self { builder, stmt }
    }
}

impl<'a> UpdateBuilder<'a> {
    /// Set a column's value, rendered as an escaped SQL literal. Setting
    /// the same column again replaces the value while keeping the column's
    /// original position in the SET list.
    pub fn set(self, column: &str, value: impl Into<Value>) -> Self {
        self.builder.update_set(self.stmt, column, value.into());
        self
    }

    /// Start (or continue) the WHERE condition chain.
    pub fn where_(self) -> WhereClause<'a, UpdateBuilder<'a>> {
        let UpdateBuilder { builder, stmt } = self;
        let group = builder.ensure_where(stmt);
        WhereClause::new(builder, stmt, group)
    }

    /// Render just this statement.
    pub fn sql(&self) -> String {
        self.builder.statement_sql(self.stmt)
    }
}
