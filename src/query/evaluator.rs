//! Recursive evaluation of parsed expressions.
//!
//! Composite operators always measure their sub-conditions against the
//! complete record set passed in, never against a subset produced by an
//! enclosing operator. Only AND threads its own accumulator between its
//! conditions. Record identity is the record's position in that set.

use crate::query::{Comparison, Condition, Expression};
use crate::types::{FieldValue, Property, PropertyKind, QueryError, Record};
use std::collections::HashSet;

/// Evaluate an expression against the full record set.
///
/// # Arguments
///
/// * `expr` - Parsed expression
/// * `all_records` - Complete store contents, in store order
///
/// # Returns
///
/// Owned copies of the matching records
///
/// # Errors
///
/// Returns `QueryError::TypeMismatch` if a comparison cannot be applied to
/// its property, or its literal is not an integer for a number property
pub fn evaluate(expr: &Expression, all_records: &[Record]) -> Result<Vec<Record>, QueryError> {
    Ok(matching(expr, all_records)?.into_iter().cloned().collect())
}

/// Evaluate an expression, borrowing the matches from `all_records`.
pub fn matching<'a>(
    expr: &Expression,
    all_records: &'a [Record],
) -> Result<Vec<&'a Record>, QueryError> {
    match expr {
        Expression::Equal(property, literal) => {
            filter_all(Comparison::Equal, *property, literal, all_records)
        }
        Expression::GreaterThan(property, literal) => {
            filter_all(Comparison::GreaterThan, *property, literal, all_records)
        }
        Expression::LessThan(property, literal) => {
            filter_all(Comparison::LessThan, *property, literal, all_records)
        }
        Expression::Not(inner) => {
            let excluded: HashSet<*const Record> = matching(inner, all_records)?
                .into_iter()
                .map(|r| r as *const Record)
                .collect();
            Ok(all_records
                .iter()
                .filter(|r| !excluded.contains(&(*r as *const Record)))
                .collect())
        }
        Expression::And(conditions) => {
            let mut current: Vec<&Record> = all_records.iter().collect();
            for condition in conditions {
                let matcher = Matcher::compile(condition)?;
                current.retain(|r| matcher.matches(r));
            }
            Ok(current)
        }
        Expression::Or(conditions) => {
            let mut seen: HashSet<*const Record> = HashSet::new();
            let mut union = Vec::new();
            for condition in conditions {
                let matcher = Matcher::compile(condition)?;
                for record in all_records {
                    if matcher.matches(record) && seen.insert(record as *const Record) {
                        union.push(record);
                    }
                }
            }
            Ok(union)
        }
    }
}

fn filter_all<'a>(
    comparison: Comparison,
    property: Property,
    literal: &str,
    all_records: &'a [Record],
) -> Result<Vec<&'a Record>, QueryError> {
    let matcher = Matcher::new(comparison, property, literal)?;
    Ok(all_records.iter().filter(|r| matcher.matches(r)).collect())
}

/// A condition with its literal coerced to the property's type.
#[derive(Debug)]
enum Matcher<'q> {
    Text {
        property: Property,
        value: &'q str,
    },
    Number {
        comparison: Comparison,
        property: Property,
        value: i64,
    },
}

impl<'q> Matcher<'q> {
    fn compile(condition: &'q Condition) -> Result<Self, QueryError> {
        Self::new(condition.comparison, condition.property, &condition.literal)
    }

    fn new(comparison: Comparison, property: Property, literal: &'q str) -> Result<Self, QueryError> {
        match (property.kind(), comparison) {
            (PropertyKind::String, Comparison::Equal) => Ok(Self::Text {
                property,
                value: literal,
            }),
            (PropertyKind::String, _) => Err(QueryError::type_mismatch(format!(
                "{} requires a number property, {} is a string",
                comparison, property
            ))),
            (PropertyKind::Number, _) => {
                let value = literal.trim().parse::<i64>().map_err(|_| {
                    QueryError::type_mismatch(format!(
                        "{:?} is not an integer literal for {}",
                        literal, property
                    ))
                })?;
                Ok(Self::Number {
                    comparison,
                    property,
                    value,
                })
            }
        }
    }

    fn matches(&self, record: &Record) -> bool {
        match *self {
            Self::Text { property, value } => record.field(property) == FieldValue::Str(value),
            Self::Number {
                comparison,
                property,
                value,
            } => match record.field(property) {
                FieldValue::Number(field) => match comparison {
                    Comparison::Equal => field == value,
                    Comparison::GreaterThan => field > value,
                    Comparison::LessThan => field < value,
                },
                FieldValue::Str(_) => false,
            },
        }
    }
}
