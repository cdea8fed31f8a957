//! Query language: grammar, parser and evaluator.
//!
//! ```rust
//! use dataquery::{evaluate, parse, Record};
//!
//! let records = vec![
//!     Record::new("1", "request", "x", 1, 2),
//!     Record::new("2", "request", "x", 1, 0),
//! ];
//!
//! let expr = parse("NOT(EQUAL(id,'1'))").unwrap();
//! let found = evaluate(&expr, &records).unwrap();
//! assert_eq!(found, vec![records[1].clone()]);
//! ```

pub mod evaluator;
pub mod expression;
pub mod grammar;
pub mod parser;

pub use evaluator::{evaluate, matching};
pub use expression::{Comparison, Condition, Expression, Operator};
pub use parser::parse;
