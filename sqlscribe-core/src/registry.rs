//! The statement registry and builder façade

use serde::{Deserialize, Serialize};

use crate::builder::{
    DeleteBuilder, InsertBuilder, SelectBuilder, Statement, StatementBody, StatementHandle,
    StatementKind, UpdateBuilder,
};
use crate::builder::delete::DeleteStatement;
use crate::builder::insert::InsertStatement;
use crate::builder::select::{SelectColumn, SelectStatement};
use crate::builder::update::UpdateStatement;
use crate::comparator::Comparator;
use crate::condition::{ConditionTree, Connector, NodeId};
use crate::error::BuildError;
use crate::value::Value;

/// Stable identity of a statement inside one [`SqlBuilder`]. Handles carry
/// this index instead of a reference into the statement vector, so the
/// vector may grow freely while a chain is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StmtId(pub(crate) usize);

/// What `clear()` does to the accumulated error list.
///
/// The historical behavior is to keep the errors while discarding the
/// statements; both variants exist in the wild, so the choice is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClearBehavior {
    /// `clear()` discards statements only (the default)
    #[default]
    RetainErrors,
    /// `clear()` also resets the error list
    ResetErrors,
}

/// The top-level builder: an ordered collection of owned statements plus an
/// append-only error list.
///
/// # Examples
/// ```
/// use sqlscribe_core::SqlBuilder;
///
/// let mut builder = SqlBuilder::new();
/// builder
///     .select_from("users")
///     .column("name")
///     .where_()
///     .equal("active", 1);
/// assert_eq!(builder.sql(), "SELECT name FROM users WHERE active = \"1\"");
/// ```
#[derive(Debug, Default)]
pub struct SqlBuilder {
    statements: Vec<Statement>,
    errors: Vec<BuildError>,
    clear_behavior: ClearBehavior,
}

impl SqlBuilder {
    /// Create an empty builder with the default [`ClearBehavior`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with an explicit [`ClearBehavior`].
    pub fn with_clear_behavior(clear_behavior: ClearBehavior) -> Self {
        Self {
            clear_behavior,
            ..Self::default()
        }
    }

    // ---- factory methods ----

    /// Append a new SELECT statement and return its handle.
    pub fn select_from(&mut self, table: &str) -> SelectBuilder<'_> {
        let stmt = self.push_statement(table, StatementBody::Select(SelectStatement::default()));
        SelectBuilder::from_parts(self, stmt)
    }

    /// Append a new INSERT statement and return its handle.
    pub fn insert_into(&mut self, table: &str) -> InsertBuilder<'_> {
        let stmt = self.push_statement(table, StatementBody::Insert(InsertStatement::default()));
        InsertBuilder::from_parts(self, stmt)
    }

    /// Append a new UPDATE statement and return its handle.
    pub fn update(&mut self, table: &str) -> UpdateBuilder<'_> {
        let stmt = self.push_statement(table, StatementBody::Update(UpdateStatement::default()));
        UpdateBuilder::from_parts(self, stmt)
    }

    /// Append a new DELETE statement and return its handle.
    pub fn delete_from(&mut self, table: &str) -> DeleteBuilder<'_> {
        let stmt = self.push_statement(table, StatementBody::Delete(DeleteStatement::default()));
        DeleteBuilder::from_parts(self, stmt)
    }

    /// Return a handle to the first INSERT on `table`, creating one if none
    /// exists yet.
    pub fn find_insert_or_create(&mut self, table: &str) -> InsertBuilder<'_> {
        match self.find_statement(StatementKind::Insert, table) {
            Some(stmt) => InsertBuilder::from_parts(self, stmt),
            None => self.insert_into(table),
        }
    }

    /// Return a handle to the first UPDATE on `table`, creating one if none
    /// exists yet.
    pub fn find_update_or_create(&mut self, table: &str) -> UpdateBuilder<'_> {
        match self.find_statement(StatementKind::Update, table) {
            Some(stmt) => UpdateBuilder::from_parts(self, stmt),
            None => self.update(table),
        }
    }

    /// Return a handle to the first DELETE on `table`, creating one if none
    /// exists yet.
    pub fn find_delete_or_create(&mut self, table: &str) -> DeleteBuilder<'_> {
        match self.find_statement(StatementKind::Delete, table) {
            Some(stmt) => DeleteBuilder::from_parts(self, stmt),
            None => self.delete_from(table),
        }
    }

    // ---- rendering and state ----

    /// Render every owned statement, joined by newline, in insertion order.
    /// An empty registry renders to the empty string.
    pub fn sql(&self) -> String {
        let statements: Vec<String> = self.statements.iter().map(Statement::render).collect();
        statements.join("\n")
    }

    /// True iff at least one error has been recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The recorded errors, oldest first.
    pub fn errors(&self) -> &[BuildError] {
        &self.errors
    }

    /// Discard all owned statements. Whether the error list is also reset
    /// depends on the configured [`ClearBehavior`].
    pub fn clear(&mut self) {
        self.statements.clear();
        if self.clear_behavior == ClearBehavior::ResetErrors {
            self.errors.clear();
        }
    }

    // ---- internal operations, routed through by the fluent handles ----

    fn push_statement(&mut self, table: &str, body: StatementBody) -> StmtId {
        self.check_identifier(table);
        self.statements.push(Statement {
            table: table.to_string(),
            body,
        });
        StmtId(self.statements.len() - 1)
    }

    fn find_statement(&self, kind: StatementKind, table: &str) -> Option<StmtId> {
        self.statements
            .iter()
            .position(|s| s.body.kind() == kind && s.table == table)
            .map(StmtId)
    }

    /// Minimal identifier check; records an error and returns false for
    /// names shorter than 2 characters.
    fn check_identifier(&mut self, name: &str) -> bool {
        if name.len() < 2 {
            self.errors.push(BuildError::invalid_identifier(name));
            return false;
        }
        true
    }

    pub(crate) fn statement_sql(&self, stmt: StmtId) -> String {
        self.statements[stmt.0].render()
    }

    pub(crate) fn select_column(&mut self, stmt: StmtId, column: &str, alias: Option<&str>) {
        if !self.check_identifier(column) {
            return;
        }
        let error = match &mut self.statements[stmt.0].body {
            StatementBody::Select(select) => {
                if select.columns.iter().any(|c| c.column == column) {
                    Some(BuildError::duplicate_column(column))
                } else {
                    select.columns.push(SelectColumn {
                        column: column.to_string(),
                        alias: alias.map(str::to_string),
                    });
                    None
                }
            }
            other => Some(BuildError::wrong_statement(other.kind(), "column")),
        };
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    pub(crate) fn insert_column(&mut self, stmt: StmtId, column: &str) {
        if !self.check_identifier(column) {
            return;
        }
        let error = match &mut self.statements[stmt.0].body {
            StatementBody::Insert(insert) => {
                insert.columns.push(column.to_string());
                None
            }
            other => Some(BuildError::wrong_statement(other.kind(), "column")),
        };
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    pub(crate) fn insert_value(&mut self, stmt: StmtId, value: Value) {
        let error = match &mut self.statements[stmt.0].body {
            StatementBody::Insert(insert) => {
                insert.values.push(value.to_literal());
                None
            }
            other => Some(BuildError::wrong_statement(other.kind(), "value")),
        };
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    pub(crate) fn clear_insert_values(&mut self, stmt: StmtId) {
        let error = match &mut self.statements[stmt.0].body {
            StatementBody::Insert(insert) => {
                insert.values.clear();
                None
            }
            other => Some(BuildError::wrong_statement(other.kind(), "clear_values")),
        };
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    pub(crate) fn update_set(&mut self, stmt: StmtId, column: &str, value: Value) {
        if !self.check_identifier(column) {
            return;
        }
        let literal = value.to_literal();
        let error = match &mut self.statements[stmt.0].body {
            StatementBody::Update(update) => {
                match update.assignments.iter_mut().find(|(c, _)| c == column) {
                    Some(slot) => slot.1 = literal,
                    None => update.assignments.push((column.to_string(), literal)),
                }
                None
            }
            other => Some(BuildError::wrong_statement(other.kind(), "set")),
        };
        if let Some(error) = error {
            self.errors.push(error);
        }
    }

    /// Get (creating on first use) the statement's WHERE tree and return
    /// its root group.
    pub(crate) fn ensure_where(&mut self, stmt: StmtId) -> NodeId {
        let tree = match &mut self.statements[stmt.0].body {
            StatementBody::Select(select) => {
                Some(select.where_clause.get_or_insert_with(ConditionTree::new))
            }
            StatementBody::Update(update) => {
                Some(update.where_clause.get_or_insert_with(ConditionTree::new))
            }
            StatementBody::Delete(delete) => {
                Some(delete.where_clause.get_or_insert_with(ConditionTree::new))
            }
            StatementBody::Insert(_) => None,
        };
        match tree {
            Some(tree) => tree.root(),
            None => {
                self.errors
                    .push(BuildError::wrong_statement(StatementKind::Insert, "where_"));
                0
            }
        }
    }

    fn where_tree(&self, stmt: StmtId) -> Option<&ConditionTree> {
        match &self.statements[stmt.0].body {
            StatementBody::Select(select) => select.where_clause.as_ref(),
            StatementBody::Update(update) => update.where_clause.as_ref(),
            StatementBody::Delete(delete) => delete.where_clause.as_ref(),
            StatementBody::Insert(_) => None,
        }
    }

    fn where_tree_mut(&mut self, stmt: StmtId) -> Option<&mut ConditionTree> {
        match &mut self.statements[stmt.0].body {
            StatementBody::Select(select) => select.where_clause.as_mut(),
            StatementBody::Update(update) => update.where_clause.as_mut(),
            StatementBody::Delete(delete) => delete.where_clause.as_mut(),
            StatementBody::Insert(_) => None,
        }
    }

    pub(crate) fn push_condition(
        &mut self,
        stmt: StmtId,
        group: NodeId,
        column: &str,
        comparator: Comparator,
        value: Value,
    ) {
        if !self.check_identifier(column) {
            return;
        }
        let literal = value.to_plain();
        if let Some(tree) = self.where_tree_mut(stmt) {
            tree.push_comparison(group, column, comparator, literal);
        }
    }

    pub(crate) fn push_where_connector(&mut self, stmt: StmtId, group: NodeId, connector: Connector) {
        let appended = match self.where_tree_mut(stmt) {
            Some(tree) => tree.push_connector(group, connector),
            None => return,
        };
        if !appended {
            self.errors.push(BuildError::redundant_connector(connector));
        }
    }

    pub(crate) fn open_where_group(&mut self, stmt: StmtId, group: NodeId) -> NodeId {
        match self.where_tree_mut(stmt) {
            Some(tree) => tree.open_group(group),
            None => group,
        }
    }

    pub(crate) fn parent_where_group(&self, stmt: StmtId, group: NodeId) -> NodeId {
        match self.where_tree(stmt) {
            Some(tree) => tree.parent_of(group),
            None => group,
        }
    }

    pub(crate) fn where_sql(&self, stmt: StmtId) -> String {
        match self.where_tree(stmt) {
            Some(tree) => tree.sql(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_renders_empty() {
        let builder = SqlBuilder::new();
        assert_eq!(builder.sql(), "");
        assert!(!builder.has_errors());
    }

    #[test]
    fn test_statements_joined_by_newline() {
        let mut builder = SqlBuilder::new();
        builder.select_from("users").column("name");
        builder.delete_from("sessions");
        assert_eq!(
            builder.sql(),
            "SELECT name FROM users\nDELETE FROM sessions"
        );
    }

    #[test]
    fn test_select_where_grouping() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("table1")
            .column("col1")
            .column_as("col2", "c3")
            .column("col3")
            .column("col4")
            .where_()
            .equal("col1", 1)
            .or_()
            .not_equal("col2", 2)
            .or_()
            .sub_condition()
            .equal("c3", 4)
            .and_()
            .equal("col2", 5)
            .finish_sub_condition()
            .or_()
            .less_than("col4", "...");
        assert!(!builder.has_errors());
        assert_eq!(
            builder.sql(),
            "SELECT col1, col2 AS c3, col3, col4 FROM table1 WHERE col1 = \"1\" OR col2 <> \"2\" OR (c3 = \"4\" AND col2 = \"5\") OR col4 < \"...\""
        );
    }

    #[test]
    fn test_implicit_and_in_chain() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("users")
            .where_()
            .equal("name", "John")
            .more_than("age", 18);
        assert_eq!(
            builder.sql(),
            "SELECT * FROM users WHERE name = \"John\" AND age > \"18\""
        );
    }

    #[test]
    fn test_like_condition() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("users")
            .where_()
            .like("name", "%John%");
        assert_eq!(
            builder.sql(),
            "SELECT * FROM users WHERE name LIKE \"%John%\""
        );
    }

    #[test]
    fn test_consecutive_or_records_single_operator() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("users")
            .where_()
            .equal("name", "John")
            .or_()
            .or_()
            .equal("name", "Jane");
        assert_eq!(
            builder.sql(),
            "SELECT * FROM users WHERE name = \"John\" OR name = \"Jane\""
        );
        assert!(builder.has_errors());
        assert_eq!(
            builder.errors(),
            &[BuildError::redundant_connector(Connector::Or)]
        );
    }

    #[test]
    fn test_leading_connector_rejected() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("users")
            .where_()
            .and_()
            .equal("name", "John");
        assert_eq!(builder.sql(), "SELECT * FROM users WHERE name = \"John\"");
        assert_eq!(
            builder.errors(),
            &[BuildError::redundant_connector(Connector::And)]
        );
    }

    #[test]
    fn test_finish_sub_condition_on_root_is_noop() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("users")
            .where_()
            .finish_sub_condition()
            .equal("name", "John");
        assert!(!builder.has_errors());
        assert_eq!(builder.sql(), "SELECT * FROM users WHERE name = \"John\"");
    }

    #[test]
    fn test_where_sql_accessor() {
        let mut builder = SqlBuilder::new();
        let where_sql = builder
            .select_from("users")
            .where_()
            .equal("name", "John")
            .sql();
        assert_eq!(where_sql, "name = \"John\"");
    }

    #[test]
    fn test_find_insert_or_create_reuses_statement() {
        let mut builder = SqlBuilder::new();
        builder
            .insert_into("table2")
            .column("col1")
            .columns(["col2", "col3"])
            .value("val1")
            .value(1)
            .value(2.0);
        assert_eq!(
            builder.sql(),
            "INSERT INTO table2(col1, col2, col3) VALUES('val1', 1, 2.000000)"
        );

        builder
            .find_insert_or_create("table2")
            .clear_values()
            .value("val2")
            .value(2)
            .value(10.0);
        // same statement, values replaced not appended
        assert_eq!(
            builder.sql(),
            "INSERT INTO table2(col1, col2, col3) VALUES('val2', 2, 10.000000)"
        );
    }

    #[test]
    fn test_find_or_create_matches_kind_and_table() {
        let mut builder = SqlBuilder::new();
        builder.insert_into("users").column("name").value("John");
        // same table, different kind: must create a fresh statement
        builder.find_update_or_create("users").set("name", "Jane");
        builder.find_delete_or_create("logs");
        assert_eq!(
            builder.sql(),
            "INSERT INTO users(name) VALUES('John')\nUPDATE users SET name = 'Jane'\nDELETE FROM logs"
        );
        // and a repeated lookup reuses what it created
        builder.find_update_or_create("users").set("name", "Joan");
        assert_eq!(
            builder.sql(),
            "INSERT INTO users(name) VALUES('John')\nUPDATE users SET name = 'Joan'\nDELETE FROM logs"
        );
    }

    #[test]
    fn test_clear_discards_statements() {
        let mut builder = SqlBuilder::new();
        builder.select_from("users");
        builder.delete_from("sessions");
        builder.clear();
        assert_eq!(builder.sql(), "");
    }

    #[test]
    fn test_clear_retains_errors_by_default() {
        let mut builder = SqlBuilder::new();
        builder.select_from("t");
        assert!(builder.has_errors());
        builder.clear();
        assert!(builder.has_errors());
    }

    #[test]
    fn test_clear_resets_errors_when_configured() {
        let mut builder = SqlBuilder::with_clear_behavior(ClearBehavior::ResetErrors);
        builder.select_from("t");
        assert!(builder.has_errors());
        builder.clear();
        assert!(!builder.has_errors());
        assert_eq!(builder.sql(), "");
    }

    #[test]
    fn test_short_identifier_recorded_not_fatal() {
        let mut builder = SqlBuilder::new();
        builder.select_from("t").column("name");
        // the statement is still created and usable
        assert_eq!(builder.sql(), "SELECT name FROM t");
        assert_eq!(
            builder.errors()[0].to_string(),
            "Parameter 't' must more than 2 characters"
        );
    }

    #[test]
    fn test_short_column_not_added() {
        let mut builder = SqlBuilder::new();
        builder.select_from("users").column("x").column("name");
        assert_eq!(builder.sql(), "SELECT name FROM users");
        assert!(builder.has_errors());
    }

    #[test]
    fn test_two_char_identifier_accepted() {
        let mut builder = SqlBuilder::new();
        builder.select_from("users").column("id");
        assert!(!builder.has_errors());
        assert_eq!(builder.sql(), "SELECT id FROM users");
    }

    #[test]
    fn test_wrong_statement_kind_recorded() {
        let mut builder = SqlBuilder::new();
        builder.select_from("users");
        // the typed handles make this unreachable from public chaining; the
        // registry-level op still enforces it
        builder.insert_value(StmtId(0), Value::from("oops"));
        assert_eq!(
            builder.errors(),
            &[BuildError::wrong_statement(StatementKind::Select, "value")]
        );
    }

    #[test]
    fn test_errors_accumulate_in_order() {
        let mut builder = SqlBuilder::new();
        builder
            .select_from("users")
            .column("name")
            .column("name")
            .where_()
            .equal("name", "John")
            .and_()
            .and_();
        assert_eq!(
            builder.errors(),
            &[
                BuildError::duplicate_column("name"),
                BuildError::redundant_connector(Connector::And),
            ]
        );
    }
}
