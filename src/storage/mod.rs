//! In-memory record storage.

mod records;

pub use records::RecordStore;
