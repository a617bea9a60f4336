//! Error types for Sqlscribe

use thiserror::Error;

use crate::builder::StatementKind;
use crate::condition::Connector;

/// A recorded builder error.
///
/// None of these abort a call chain: every mutator keeps returning a usable
/// handle and the error is appended to the owning [`SqlBuilder`]'s list,
/// surfaced through `has_errors()` / `errors()`.
///
/// [`SqlBuilder`]: crate::SqlBuilder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A SELECT column was added twice under the same name
    #[error("Column '{column}' already added")]
    DuplicateColumn { column: String },

    /// A column or table name failed the minimal identifier check
    #[error("Parameter '{name}' must more than 2 characters")]
    InvalidIdentifier { name: String },

    /// A clause was routed to a statement of the wrong kind
    #[error("For {kind} you could not use '{method}'")]
    WrongStatement {
        kind: StatementKind,
        method: &'static str,
    },

    /// Consecutive AND/OR with no condition in between
    #[error("Redundant '{connector}' ignored, condition expected before it")]
    RedundantConnector { connector: Connector },
}

impl BuildError {
    /// Create a new duplicate column error
    pub fn duplicate_column(column: impl Into<String>) -> Self {
        Self::DuplicateColumn {
            column: column.into(),
        }
    }

    /// Create a new invalid identifier error
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Create a new wrong statement kind error
    pub fn wrong_statement(kind: StatementKind, method: &'static str) -> Self {
        Self::WrongStatement { kind, method }
    }

    /// Create a new redundant connector error
    pub fn redundant_connector(connector: Connector) -> Self {
        Self::RedundantConnector { connector }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_column_message() {
        let err = BuildError::duplicate_column("name");
        assert!(matches!(err, BuildError::DuplicateColumn { .. }));
        assert_eq!(err.to_string(), "Column 'name' already added");
    }

    #[test]
    fn test_invalid_identifier_message() {
        let err = BuildError::invalid_identifier("x");
        assert_eq!(err.to_string(), "Parameter 'x' must more than 2 characters");
    }

    #[test]
    fn test_wrong_statement_message() {
        let err = BuildError::wrong_statement(StatementKind::Select, "value");
        assert_eq!(err.to_string(), "For select you could not use 'value'");
    }

    #[test]
    fn test_redundant_connector_message() {
        let err = BuildError::redundant_connector(Connector::Or);
        assert_eq!(
            err.to_string(),
            "Redundant 'OR' ignored, condition expected before it"
        );
    }
}
