//! Recursive-descent parser for the query language.
//!
//! ```text
//! Query   := "EQUAL" Clause | "GREATER_THAN" Clause | "LESS_THAN" Clause
//!          | "NOT" "(" Query ")"
//!          | "AND" "(" Triple ("," Triple)* ")"
//!          | "OR"  "(" Triple ("," Triple)* ")"
//! Clause  := "(" Property "," Literal ")"
//! Triple  := ("EQUAL" | "GREATER_THAN" | "LESS_THAN") Clause
//! ```

use crate::query::grammar::{extract_parenthesized, operator_prefix_of, split_pair, unquote};
use crate::query::{Comparison, Condition, Expression, Operator};
use crate::types::{Property, PropertyKind, QueryError};

/// Maximum number of nested `NOT` clauses in one query.
pub const MAX_NESTING: usize = 64;

/// Parse a raw query string.
///
/// Surrounding whitespace is ignored; whitespace inside the query is not.
///
/// # Errors
///
/// - `QueryError::UnrecognizedOperator` if a keyword is not recognized
/// - `QueryError::MalformedClause` for bad parentheses, field counts,
///   unknown properties, trailing input or more than `MAX_NESTING` nested NOTs
/// - `QueryError::TypeMismatch` if GREATER_THAN/LESS_THAN names a string property
///
/// # Example
///
/// ```rust
/// use dataquery::{parse, Expression, Property};
///
/// let expr = parse("EQUAL(title,'request')").unwrap();
/// assert_eq!(expr, Expression::Equal(Property::Title, "request".into()));
/// ```
pub fn parse(raw_query: &str) -> Result<Expression, QueryError> {
    let (expression, rest) = parse_expression(raw_query.trim(), 0)?;
    expect_end(rest)?;
    Ok(expression)
}

fn parse_expression(text: &str, depth: usize) -> Result<(Expression, &str), QueryError> {
    let (operator, rest) = operator_prefix_of(text)?;
    tracing::trace!(operator = %operator, "parsing");

    match operator {
        Operator::Equal => parse_leaf(Comparison::Equal, rest),
        Operator::GreaterThan => parse_leaf(Comparison::GreaterThan, rest),
        Operator::LessThan => parse_leaf(Comparison::LessThan, rest),
        Operator::Not => {
            if depth >= MAX_NESTING {
                return Err(QueryError::malformed(format!(
                    "nesting too deep, at most {} NOT levels",
                    MAX_NESTING
                )));
            }
            let (inner, rest) = extract_parenthesized(rest)?;
            let (expression, leftover) = parse_expression(inner, depth + 1)?;
            expect_end(leftover)?;
            Ok((Expression::not(expression), rest))
        }
        Operator::And => {
            let (conditions, rest) = parse_conditions(rest)?;
            Ok((Expression::And(conditions), rest))
        }
        Operator::Or => {
            let (conditions, rest) = parse_conditions(rest)?;
            Ok((Expression::Or(conditions), rest))
        }
    }
}

fn parse_leaf(comparison: Comparison, text: &str) -> Result<(Expression, &str), QueryError> {
    let (condition, rest) = parse_condition(comparison, text)?;
    Ok((Expression::leaf(condition), rest))
}

/// Parse `(property,value)` following a comparison keyword.
fn parse_condition(comparison: Comparison, text: &str) -> Result<(Condition, &str), QueryError> {
    let (inner, rest) = extract_parenthesized(text)?;
    let (property, value) = split_pair(inner)?;
    let property: Property = property.parse()?;

    let literal = match property.kind() {
        PropertyKind::Number => value,
        PropertyKind::String if comparison != Comparison::Equal => {
            return Err(QueryError::type_mismatch(format!(
                "{} requires a number property, {} is a string",
                comparison, property
            )));
        }
        PropertyKind::String => unquote(value)?,
    };

    Ok((Condition::new(comparison, property, literal), rest))
}

/// Parse the `(Triple,Triple,...)` body of AND/OR.
///
/// An empty body `()` yields no conditions.
fn parse_conditions(text: &str) -> Result<(Vec<Condition>, &str), QueryError> {
    let (mut body, rest) = extract_parenthesized(text)?;
    let mut conditions = Vec::new();

    while !body.is_empty() {
        let (operator, after) = operator_prefix_of(body)?;
        let comparison = operator.as_comparison().ok_or_else(|| {
            QueryError::malformed(format!(
                "{} cannot appear inside AND/OR, expected a comparison",
                operator
            ))
        })?;

        let (condition, after) = parse_condition(comparison, after)?;
        conditions.push(condition);

        body = match after.strip_prefix(',') {
            Some("") => return Err(QueryError::malformed("trailing ',' in condition list")),
            Some(next) => next,
            None if after.is_empty() => after,
            None => {
                return Err(QueryError::malformed(format!(
                    "expected ',' between conditions, got {:?}",
                    after
                )))
            }
        };
    }

    Ok((conditions, rest))
}

fn expect_end(rest: &str) -> Result<(), QueryError> {
    if rest.is_empty() {
        Ok(())
    } else {
        Err(QueryError::malformed(format!(
            "unexpected trailing input {:?}",
            rest
        )))
    }
}
