//! SELECT statement state and fluent handle

use crate::builder::StatementHandle;
use crate::condition::{ConditionTree, WhereClause};
use crate::registry::{SqlBuilder, StmtId};

/// One selected column with an optional alias.
#[derive(Debug, Clone)]
pub(crate) struct SelectColumn {
    pub(crate) column: String,
    pub(crate) alias: Option<String>,
}

impl SelectColumn {
    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.column, alias),
            None => self.column.clone(),
        }
    }
}

/// Owned state of a SELECT statement.
#[derive(Debug, Clone, Default)]
pub(crate) struct SelectStatement {
    pub(crate) columns: Vec<SelectColumn>,
    pub(crate) where_clause: Option<ConditionTree>,
}

impl SelectStatement {
    pub(crate) fn render(&self, table: &str) -> String {
        let mut sql = String::from("SELECT ");
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            let columns: Vec<String> = self.columns.iter().map(SelectColumn::render).collect();
            sql.push_str(&columns.join(", "));
        }
        sql.push_str(" FROM ");
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

/// Fluent handle for a SELECT statement owned by a [`SqlBuilder`].
#[derive(Debug)]
pub struct SelectBuilder<'a> {
    builder: &'a mut SqlBuilder,
    stmt: StmtId,
}

impl<'a> StatementHandle<'a> for SelectBuilder<'a> {
    fn from_parts(builder: &'a mut SqlBuilder, stmt: StmtId) -> Self {
        Self { builder, stmt }
    }
}

impl<'a> SelectBuilder<'a> {
    /// Add a column to the projection. Re-adding an already-present column
    /// name is rejected and recorded as an error.
    pub fn column(self, name: &str) -> Self {
        self.builder.select_column(self.stmt, name, None);
        self
    }

    /// Add a column rendered as `name AS alias`.
    pub fn column_as(self, name: &str, alias: &str) -> Self {
        self.builder.select_column(self.stmt, name, Some(alias));
        self
    }

    /// Add several columns at once.
    pub fn columns<I>(self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.builder.select_column(self.stmt, name.as_ref(), None);
        }
        self
    }

    /// Start (or continue) the WHERE condition chain.
    pub fn where_(self) -> WhereClause<'a, SelectBuilder<'a>> {
        let SelectBuilder { builder, stmt } = self;
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
    fn test_select_without_columns_is_star() {
        let mut builder = SqlBuilder::new();
        let sql = builder.select_from("users").sql();
        assert_eq!(sql, "SELECT * FROM users");
    }

    #[test]
    fn test_select_columns_joined() {
        let mut builder = SqlBuilder::new();
        let sql = builder
            .select_from("users")
            .column("name")
            .column("email")
            .sql();
        assert_eq!(sql, "SELECT name, email FROM users");
    }

    #[test]
    fn test_select_column_alias() {
        let mut builder = SqlBuilder::new();
        let sql = builder
            .select_from("users")
            .column_as("col2", "c3")
            .column("col3")
            .sql();
        assert_eq!(sql, "SELECT col2 AS c3, col3 FROM users");
    }

    #[test]
    fn test_select_columns_batch() {
        let mut builder = SqlBuilder::new();
        let sql = builder
            .select_from("users")
            .column("col1")
            .columns(["col2", "col3"])
            .sql();
        assert_eq!(sql, "SELECT col1, col2, col3 FROM users");
    }

    #[test]
    fn test_duplicate_column_is_rejected() {
        let mut builder = SqlBuilder::new();
        let sql = builder
            .select_from("users")
            .column("name")
            .column_as("name", "alias")
            .sql();
        // the existing column and its (absent) alias are retained
        assert_eq!(sql, "SELECT name FROM users");
        assert!(builder.has_errors());
        assert_eq!(
            builder.errors()[0].to_string(),
            "Column 'name' already added"
        );
    }

    #[test]
    fn test_select_with_where() {
        let mut builder = SqlBuilder::new();
        let sql = builder
            .select_from("users")
            .column("name")
            .where_()
            .equal("pass", "64d878e22cd5046d569bf826869034caf5feab24")
            .end_where()
            .sql();
        assert_eq!(
            sql,
            "SELECT name FROM users WHERE pass = \"64d878e22cd5046d569bf826869034caf5feab24\""
        );
    }

    #[test]
    fn test_empty_where_chain_renders_no_where() {
        let mut builder = SqlBuilder::new();
        let sql = builder.select_from("users").where_().end_where().sql();
        assert_eq!(sql, "SELECT * FROM users");
    }
}
