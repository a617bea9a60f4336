//! INSERT statement state and fluent handle

use crate::builder::StatementHandle;
use crate::registry::{SqlBuilder, StmtId};
use crate::value::Value;

/// Owned state of an INSERT statement. Columns and value literals are
/// paired positionally at render time; keeping the lengths matched is the
/// caller's responsibility.
#[derive(Debug, Clone, Default)]
pub(crate) struct InsertStatement {
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<String>,
}

impl InsertStatement {
    pub(crate) fn render(&self, table: &str) -> String {
        let mut sql = String::from("INSERT INTO ");
        sql.push_str(table);
        sql.push('(');
        sql.push_str(&self.columns.join(", "));
        sql.push_str(") VALUES(");
        sql.push_str(&self.values.join(", "));
        sql.push(')');
        sql
    }
}

/// Fluent handle for an INSERT statement owned by a [`SqlBuilder`].
#[derive(Debug)]
pub struct InsertBuilder<'a> {
    builder: &'a mut SqlBuilder,
    stmt: StmtId,
}

impl<'a> StatementHandle<'a> for InsertBuilder<'a> {
    fn from_parts(builder: &'a mut SqlBuilder, stmt: StmtId) -> Self {
        Self { builder, stmt }
    }
}

impl<'a> InsertBuilder<'a> {
    /// Append a column name.
    pub fn column(self, name: &str) -> Self {
        self.builder.insert_column(self.stmt, name);
        self
    }

    /// Append several column names at once.
    pub fn columns<I>(self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in names {
            self.builder.insert_column(self.stmt, name.as_ref());
        }
        self
    }

    /// Append one value, rendered as an escaped SQL literal.
    pub fn value(self, value: impl Into<Value>) -> Self {
        self.builder.insert_value(self.stmt, value.into());
        self
    }

    /// Discard the accumulated values, keeping the column list. Used with
    /// `find_insert_or_create` to reuse one statement for successive rows.
    pub fn clear_values(self) -> Self {
        self.builder.clear_insert_values(self.stmt);
        self
    }

    /// Render just this statement.
    pub fn sql(&self) -> String {
        self.builder.statement_sql(self.stmt)
    }
}
