//! High-level request API over the record store.
//!
//! This is the main entry point: it owns the store, turns raw query
//! strings into results, and logs every request.

use crate::query::{self, Expression};
use crate::storage::RecordStore;
use crate::telemetry::{self, DbOperation, COLLECTION};
use crate::types::{DatabaseError, QueryError, Record, Result};
use std::io::BufRead;

/// In-memory database.
///
/// Writes take `&mut self`; a host sharing one instance across threads
/// must wrap it in its own lock.
#[derive(Debug)]
pub struct Database {
    store: RecordStore,
    pretty: bool,
}

impl Database {
    /// Empty database with pretty-printed JSON output.
    pub fn new() -> Self {
        Self {
            store: RecordStore::new(),
            pretty: true,
        }
    }

    /// Toggle pretty-printed JSON output for `get`.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Insert or replace a record by id.
    ///
    /// # Returns
    ///
    /// `true` once the record is stored
    pub fn upsert(&mut self, record: Record) -> bool {
        let span = telemetry::db_span(DbOperation::Upsert, Some(COLLECTION));
        let _guard = span.enter();

        let id = record.id.clone();
        let replaced = self.store.upsert(record).is_some();
        telemetry::record_db_metrics(None, Some(1));
        tracing::info!(id = %id, replaced, total = self.store.len(), "Upserted record");
        true
    }

    /// Decode a JSON record and upsert it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::JsonError` if `data` is not a valid record;
    /// the store is left unchanged
    ///
    /// # Example
    ///
    /// ```rust
    /// use dataquery::Database;
    ///
    /// let mut db = Database::new();
    /// db.post(r#"{"id":"1","title":"t","content":"c","views":0,"timestamp":0}"#).unwrap();
    /// assert_eq!(db.scan().len(), 1);
    /// ```
    pub fn post(&mut self, data: &str) -> Result<bool> {
        let record: Record = serde_json::from_str(data)?;
        Ok(self.upsert(record))
    }

    /// Upsert every record of a JSON Lines stream. Blank lines are skipped.
    ///
    /// Records before a bad line stay in the store.
    ///
    /// # Returns
    ///
    /// Number of records upserted
    ///
    /// # Errors
    ///
    /// - `DatabaseError::InvalidRecord` with the 1-based line number
    /// - `DatabaseError::IoError` if reading fails
    pub fn load_jsonl<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let span = telemetry::db_span(DbOperation::Load, Some(COLLECTION));
        let _guard = span.enter();

        let mut count = 0;
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: Record = serde_json::from_str(&line)
                .map_err(|source| DatabaseError::InvalidRecord { line: i + 1, source })?;
            self.store.upsert(record);
            count += 1;
        }

        telemetry::record_db_metrics(None, Some(count));
        tracing::info!(count, total = self.store.len(), "Loaded records");
        Ok(count)
    }

    /// Current records in store order.
    pub fn scan(&self) -> &[Record] {
        let span = telemetry::db_span(DbOperation::Scan, Some(COLLECTION));
        let _guard = span.enter();
        telemetry::record_db_metrics(Some(self.store.len()), None);
        self.store.scan()
    }

    /// Parse and evaluate a raw query against the full store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Query` for syntax errors and type mismatches
    pub fn query(&self, raw_query: &str) -> Result<Vec<Record>> {
        let span = telemetry::db_query_span(raw_query);
        let _guard = span.enter();
        tracing::info!("GET [{}]", raw_query);

        let result = query::parse(raw_query).and_then(|expr| {
            tracing::debug!(expression = ?expr, "Parsed query");
            self.evaluate(&expr)
        });

        match result {
            Ok(records) => {
                telemetry::record_db_metrics(Some(records.len()), None);
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected query");
                Err(e.into())
            }
        }
    }

    /// Evaluate an already parsed expression against the full store.
    pub fn evaluate(&self, expr: &Expression) -> std::result::Result<Vec<Record>, QueryError> {
        query::evaluate(expr, self.store.scan())
    }

    /// Query and serialize the matches as a JSON array.
    pub fn get(&self, raw_query: &str) -> Result<String> {
        let records = self.query(raw_query)?;
        let json = if self.pretty {
            serde_json::to_string_pretty(&records)?
        } else {
            serde_json::to_string(&records)?
        };
        Ok(json)
    }
}

impl Default for Database {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn seeded() -> Database {
        let mut db = Database::new();
        db.upsert(Record::new("1", "request", "x", 1, 2));
        db.upsert(Record::new("2", "request", "x", 1, 0));
        db
    }

    #[test]
    fn test_post_decodes_and_upserts() {
        let mut db = Database::new();
        let ok = db
            .post(r#"{"id":"9","title":"t","content":"c","views":3,"timestamp":4}"#)
            .unwrap();
        assert!(ok);
        assert_eq!(db.scan(), &[Record::new("9", "t", "c", 3, 4)]);
    }

    #[test]
    fn test_scan_returns_store_order_after_replace() {
        let mut db = seeded();
        db.upsert(Record::new("1", "offer", "y", 5, 7));
        let ids: Vec<&str> = db.scan().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(db.scan()[1].title, "offer");
    }

    #[test]
    fn test_post_rejects_invalid_record() {
        let mut db = seeded();
        let err = db.post(r#"{"id":"3","title":"t"}"#).unwrap_err();
        assert!(matches!(err, DatabaseError::JsonError(_)));
        assert_eq!(db.scan().len(), 2);
    }

    #[test]
    fn test_query_propagates_error_kind() {
        let db = seeded();
        assert!(matches!(
            db.query("GREATER_THAN(content, 5)"),
            Err(DatabaseError::Query(QueryError::TypeMismatch(_)))
        ));
        assert!(matches!(
            db.query("FIND(id,'1')"),
            Err(DatabaseError::Query(QueryError::UnrecognizedOperator(_)))
        ));
        assert_eq!(db.scan().len(), 2);
    }

    #[test]
    fn test_get_serializes_matches() {
        let db = seeded().with_pretty(false);
        assert_eq!(
            db.get("EQUAL(timestamp,0)").unwrap(),
            r#"[{"id":"2","title":"request","content":"x","views":1,"timestamp":0}]"#
        );
        assert_eq!(db.get("EQUAL(id,'none')").unwrap(), "[]");
    }

    #[test]
    fn test_get_pretty_uses_two_space_indent() {
        let db = seeded();
        let json = db.get("EQUAL(id,'1')").unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"1\""));
    }

    #[test]
    fn test_load_jsonl_skips_blank_lines() {
        let mut db = Database::new();
        let input = concat!(
            r#"{"id":"1","title":"a","content":"x","views":1,"timestamp":1}"#,
            "\n\n",
            r#"{"id":"1","title":"b","content":"x","views":1,"timestamp":1}"#,
            "\n",
        );
        assert_eq!(db.load_jsonl(Cursor::new(input)).unwrap(), 2);
        assert_eq!(db.scan().len(), 1);
        assert_eq!(db.scan()[0].title, "b");
    }

    #[test]
    fn test_load_jsonl_reports_line_number() {
        let mut db = Database::new();
        let input = concat!(
            r#"{"id":"1","title":"a","content":"x","views":1,"timestamp":1}"#,
            "\n",
            "not json\n",
        );
        match db.load_jsonl(Cursor::new(input)) {
            Err(DatabaseError::InvalidRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
        assert_eq!(db.scan().len(), 1);
    }
}
