//! Error types for query and store operations.
//!
//! Uses `thiserror` for error definitions with automatic `From` implementations.

use thiserror::Error;

/// Failure while parsing or evaluating a single query.
///
/// Every variant is terminal for the query that raised it and leaves the
/// store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Leading text does not start with a known operator keyword
    #[error("Unrecognized operator at: {0:?}")]
    UnrecognizedOperator(String),

    /// Missing or unbalanced parentheses, wrong field count, unknown property
    #[error("Malformed clause: {0}")]
    MalformedClause(String),

    /// Comparison cannot be applied to the property/literal combination
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

impl QueryError {
    /// Create a malformed clause error with context.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedClause(msg.into())
    }

    /// Create a type mismatch error with context.
    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    /// Check if the error comes from the query text itself.
    ///
    /// # Returns
    ///
    /// `true` for `UnrecognizedOperator` and `MalformedClause`, `false` for
    /// evaluation-side `TypeMismatch`
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::UnrecognizedOperator(_) | Self::MalformedClause(_)
        )
    }
}

/// Error type for request-level operations on the database facade.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Query parsing or evaluation failed
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Record at a given line of a JSONL input could not be decoded
    #[error("Invalid record on line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_classification() {
        assert!(QueryError::UnrecognizedOperator("FOO".into()).is_syntax_error());
        assert!(QueryError::malformed("missing ')'").is_syntax_error());
        assert!(!QueryError::type_mismatch("content is a string").is_syntax_error());
    }

    #[test]
    fn test_query_error_converts_into_database_error() {
        let err: DatabaseError = QueryError::malformed("empty clause").into();
        assert!(matches!(err, DatabaseError::Query(QueryError::MalformedClause(_))));
        assert_eq!(err.to_string(), "Query error: Malformed clause: empty clause");
    }
}
