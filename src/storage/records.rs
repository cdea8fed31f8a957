//! Insert-or-replace record list.
//!
//! Not internally synchronized: callers embedding the store in a
//! multi-threaded host must serialize `upsert` and `scan` themselves.

use crate::types::Record;

/// Ordered list of records, at most one per `id`.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same id.
    ///
    /// The new record is always appended, so the most recently upserted
    /// record appears last.
    ///
    /// # Returns
    ///
    /// The record that was replaced, if any
    ///
    /// # Example
    ///
    /// ```rust
    /// use dataquery::{Record, RecordStore};
    ///
    /// let mut store = RecordStore::new();
    /// store.upsert(Record::new("1", "a", "x", 0, 0));
    /// store.upsert(Record::new("2", "b", "x", 0, 0));
    /// let old = store.upsert(Record::new("1", "c", "x", 0, 0));
    ///
    /// assert_eq!(old.unwrap().title, "a");
    /// assert_eq!(store.scan()[1].title, "c");
    /// ```
    pub fn upsert(&mut self, record: Record) -> Option<Record> {
        let replaced = self
            .records
            .iter()
            .position(|r| r.id == record.id)
            .map(|i| self.records.remove(i));
        self.records.push(record);
        replaced
    }

    /// Current records in store order.
    pub fn scan(&self) -> &[Record] {
        &self.records
    }

    /// Get record by id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
