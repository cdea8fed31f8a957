//! Request instrumentation.
//!
//! Spans follow the database semantic-convention field names so that any
//! `tracing` subscriber (fmt, OpenTelemetry bridge) can consume them:
//!
//! **Span naming**: `{db.operation.name} {target}`, e.g. `upsert records`
//!
//! **Fields**:
//! - `db.system.name`: always `"dataquery"`
//! - `db.operation.name`: operation type
//! - `db.query.text`: raw query string, for queries
//! - `db.response.returned_rows` / `db.response.affected_rows`: recorded
//!   after the operation completes
//!
//! # Example
//!
//! ```rust
//! use dataquery::telemetry::{db_span, record_db_metrics, DbOperation};
//!
//! let span = db_span(DbOperation::Scan, Some("records"));
//! let _guard = span.enter();
//! record_db_metrics(Some(2), None);
//! ```

use tracing::{field, span, Level, Span};

/// Collection name used in span names.
pub const COLLECTION: &str = "records";

/// Store operation types (maps to `db.operation.name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOperation {
    /// Insert or replace one record
    Upsert,
    /// Bulk upsert from JSON Lines
    Load,
    /// Full scan
    Scan,
    /// Parse and evaluate a query
    Query,
}

impl DbOperation {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upsert => "upsert",
            Self::Load => "load",
            Self::Scan => "scan",
            Self::Query => "query",
        }
    }
}

/// Create a store operation span.
///
/// # Arguments
///
/// * `operation` - Operation type
/// * `collection` - Target collection (optional)
///
/// # Returns
///
/// Tracing span with semantic attributes; row counts are left empty for
/// `record_db_metrics`
pub fn db_span(operation: DbOperation, collection: Option<&str>) -> Span {
    let span_name = match collection {
        Some(coll) => format!("{} {}", operation.as_str(), coll),
        None => operation.as_str().to_string(),
    };

    span!(
        Level::INFO,
        "db",
        otel.name = %span_name,
        db.system.name = "dataquery",
        db.operation.name = operation.as_str(),
        db.collection.name = collection,
        db.response.returned_rows = field::Empty,
        db.response.affected_rows = field::Empty,
    )
}

/// Create a query span carrying the raw query text.
pub fn db_query_span(query_text: &str) -> Span {
    span!(
        Level::INFO,
        "db.query",
        otel.name = format!("{} {}", DbOperation::Query.as_str(), COLLECTION),
        db.system.name = "dataquery",
        db.operation.name = DbOperation::Query.as_str(),
        db.collection.name = COLLECTION,
        db.query.text = query_text,
        db.response.returned_rows = field::Empty,
    )
}

/// Record row counts on the current span.
///
/// Fields not declared on the current span are ignored by `tracing`.
pub fn record_db_metrics(rows_returned: Option<usize>, rows_affected: Option<usize>) {
    let span = Span::current();
    if let Some(returned) = rows_returned {
        span.record("db.response.returned_rows", returned);
    }
    if let Some(affected) = rows_affected {
        span.record("db.response.affected_rows", affected);
    }
}
