//! Core data types for the record store.
//!
//! - `Record`: the stored item with its five fixed attributes
//! - `Property`: attribute names and their string/number partition
//! - `QueryError` / `DatabaseError`: error types for each layer
//! - `Result`: convenient result type alias

pub mod error;
pub mod record;

pub use error::{DatabaseError, QueryError, Result};
pub use record::{FieldValue, Property, PropertyKind, Record};
