//! Persistence error types.

use thiserror::Error;

/// SQLSTATE raised when a unique constraint is violated.
const UNIQUE_VIOLATION: &str = "23505";

/// SQLSTATE raised when a foreign key constraint is violated.
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors returned by the persistence layer.
///
/// Store and serialization failures have already been logged when they reach
/// the caller: store failures by the [`crate::db::Database`] client,
/// serialization failures by the repository that encoded the value.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("query `{name}` failed: {source}")]
    Query {
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("statement {index} (`{name}`) failed: {source}")]
    Statement {
        index: usize,
        name: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("transaction failed: {0}")]
    Transaction(#[source] sqlx::Error),

    #[error("update request contains no fields")]
    EmptyUpdate,

    #[error("failed to serialize value: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistenceError {
    /// The underlying driver error, if the store was reached.
    pub fn sqlx_error(&self) -> Option<&sqlx::Error> {
        match self {
            PersistenceError::Query { source, .. } | PersistenceError::Statement { source, .. } => {
                Some(source)
            }
            PersistenceError::Transaction(source) => Some(source),
            PersistenceError::EmptyUpdate | PersistenceError::Serialization(_) => None,
        }
    }

    /// SQLSTATE code reported by Postgres, if any.
    pub fn sqlstate(&self) -> Option<String> {
        match self.sqlx_error()? {
            sqlx::Error::Database(db_err) => db_err.code().map(|code| code.into_owned()),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(UNIQUE_VIOLATION)
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.sqlstate().as_deref() == Some(FOREIGN_KEY_VIOLATION)
    }

    /// Index of the failing statement within a batch or transaction.
    pub fn failed_statement_index(&self) -> Option<usize> {
        match self {
            PersistenceError::Statement { index, .. } => Some(*index),
            _ => None,
        }
    }
}
