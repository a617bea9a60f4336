//! DELETE statement state and fluent handle

use crate::builder::StatementHandle;
use crate::condition::{ConditionTree, WhereClause};
use crate::registry::{SqlBuilder, StmtId};

/// Owned state of a DELETE statement: only the optional WHERE tree.
#[derive(Debug, Clone, Default)]
pub(crate) struct DeleteStatement {
    pub(crate) where_clause: Option<ConditionTree>,
}

impl DeleteStatement {
    pub(crate) fn render(&self, table: &str) -> String {
        let mut sql = String::from("DELETE FROM ");
        sql.push_str(table);
        if let Some(where_clause) = &self.where_clause {
            if !where_clause.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&where_clause.sql());
            }
        }
        sql
    }
}

/// Fluent handle for a DELETE statement owned by a [`SqlBuilder`].
#[derive(Debug)]
pub struct DeleteBuilder<'a> {
    builder: &'a mut SqlBuilder,
    stmt: StmtId,
}

impl<'a> StatementHandle<'a> for DeleteBuilder<'a> {
    fn from_parts(builder: &'a mut SqlBuilder, stmt: StmtId) -> Self {
        Self { builder, stmt }
    }
}

impl<'a> DeleteBuilder<'a> {
    /// Start (or continue) the WHERE condition chain.
    pub fn where_(self) -> WhereClause<'a, DeleteBuilder<'a>> {
        let DeleteBuilder { builder, stmt } = self;
        let group = builder.ensure_where(stmt);
        WhereClause::new(builder, stmt, group)
    }

    /// Render just this statement.
    pub fn sql(&self) -> String {
        self.builder.statement_sql(self.stmt)
    }
}

#[cfg(test)]
mod tests {
    use crate::registry::SqlBuilder;

    #[test]
    fn test_delete_without_where() {
        let mut builder = SqlBuilder::new();
        let sql = builder.delete_from("users").sql();
        assert_eq!(sql, "DELETE FROM users");
    }

    #[test]
    fn test_delete_with_where() {
        let mut builder = SqlBuilder::new();
        let sql = builder
            .delete_from("users")
            .where_()
            .less_than("age", 18)
            .or_()
            .equal("status", "inactive")
            .end_where()
            .sql();
        assert_eq!(
            sql,
            "DELETE FROM users WHERE age < \"18\" OR status = \"inactive\""
        );
    }
}
