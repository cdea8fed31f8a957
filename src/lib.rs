//! Dataquery - in-memory record store with a textual query language
//!
//! Records carry five fixed attributes (`id`, `title`, `content`, `views`,
//! `timestamp`). Clients query them with single-line expressions:
//!
//! ```text
//! EQUAL(title,'request')
//! GREATER_THAN(views,10)
//! NOT(EQUAL(id,'1'))
//! AND(EQUAL(title,'request'),LESS_THAN(timestamp,5))
//! OR(GREATER_THAN(timestamp,1),LESS_THAN(timestamp,1))
//! ```
//!
//! Components:
//! - `query::grammar`: keyword and clause recognition
//! - `query::parser`: recursive-descent parser producing an `Expression`
//! - `query::evaluator`: recursive evaluator over the full record set
//! - `storage`: insert-or-replace record list
//! - `database`: request facade (POST/GET) with logging
//!
//! # Example
//!
//! ```rust
//! use dataquery::{Database, Record};
//!
//! let mut db = Database::new();
//! db.upsert(Record::new("1", "request", "x", 1, 2));
//! db.upsert(Record::new("2", "request", "x", 1, 0));
//!
//! let found = db.query("EQUAL(timestamp,0)").unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, "2");
//! ```

pub mod config;
pub mod query;
pub mod storage;
pub mod telemetry;
pub mod types;

// High-level request API
pub mod database;

pub use config::Config;
pub use database::Database;
pub use query::{evaluate, parse, Condition, Expression, Operator};
pub use storage::RecordStore;
pub use types::{DatabaseError, Property, PropertyKind, QueryError, Record, Result};
