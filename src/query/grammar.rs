//! Tokenizing helpers for the query grammar.
//!
//! Every helper takes the remaining input slice and returns what it
//! recognized together with the rest, so the cursor is threaded explicitly
//! through the recursive parser.

use crate::query::Operator;
use crate::types::QueryError;

/// Maximum characters of input quoted back in error messages.
const SNIPPET_LEN: usize = 32;

/// Recognize the operator keyword at the start of `text`.
///
/// # Arguments
///
/// * `text` - Remaining query text
///
/// # Returns
///
/// The keyword and the text following it
///
/// # Errors
///
/// Returns `QueryError::UnrecognizedOperator` if no keyword is a prefix of `text`
///
/// # Example
///
/// ```rust
/// use dataquery::query::grammar::operator_prefix_of;
/// use dataquery::Operator;
///
/// let (op, rest) = operator_prefix_of("NOT(EQUAL(id,'1'))").unwrap();
/// assert_eq!(op, Operator::Not);
/// assert_eq!(rest, "(EQUAL(id,'1'))");
/// ```
pub fn operator_prefix_of(text: &str) -> Result<(Operator, &str), QueryError> {
    Operator::SCAN_ORDER
        .into_iter()
        .find_map(|op| text.strip_prefix(op.keyword()).map(|rest| (op, rest)))
        .ok_or_else(|| QueryError::UnrecognizedOperator(snippet(text)))
}

/// Extract the first top-level parenthesized group at the start of `text`.
///
/// Parentheses are matched by depth; quotes are not interpreted.
///
/// # Returns
///
/// `(inner, rest)` where `inner` excludes the outer parentheses and `rest`
/// starts right after the closing `)`
///
/// # Errors
///
/// Returns `QueryError::MalformedClause` if `text` does not start with `(`
/// or the group is never closed
pub fn extract_parenthesized(text: &str) -> Result<(&str, &str), QueryError> {
    if !text.starts_with('(') {
        return Err(QueryError::malformed(format!(
            "expected '(' at {:?}",
            snippet(text)
        )));
    }

    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&text[1..i], &text[i + 1..]));
                }
            }
            _ => {}
        }
    }

    Err(QueryError::malformed(format!(
        "missing ')' for {:?}",
        snippet(text)
    )))
}

/// Split a clause body into its `property` and `value` fields.
///
/// # Errors
///
/// Returns `QueryError::MalformedClause` unless the body holds exactly two
/// comma-separated fields
pub fn split_pair(inner: &str) -> Result<(&str, &str), QueryError> {
    let mut fields = inner.split(',');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(property), Some(value), None) => Ok((property, value)),
        _ => Err(QueryError::malformed(format!(
            "expected (property,value), got ({})",
            inner
        ))),
    }
}

/// Strip one delimiter character from each end of a string literal.
///
/// Escapes and nested quotes are not interpreted: `'it's'` yields `it's`.
pub fn unquote(value: &str) -> Result<&str, QueryError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => Ok(chars.as_str()),
        _ => Err(QueryError::malformed(format!(
            "string literal must be quoted, got {:?}",
            value
        ))),
    }
}

fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_LEN).collect()
}
