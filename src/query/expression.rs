//! Parsed query representation.
//!
//! `Expression` is a closed set of variants; parser and evaluator both
//! dispatch on it with exhaustive `match`.

use crate::types::{Property, PropertyKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator keyword at the head of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Equal,
    And,
    Or,
    Not,
    GreaterThan,
    LessThan,
}

impl Operator {
    /// Deterministic keyword scan order. No keyword is a prefix of another.
    pub const SCAN_ORDER: [Operator; 6] = [
        Operator::Equal,
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    /// Literal keyword text (case-sensitive).
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
        }
    }

    /// Comparison this keyword denotes, `None` for AND/OR/NOT.
    pub fn as_comparison(&self) -> Option<Comparison> {
        match self {
            Self::Equal => Some(Comparison::Equal),
            Self::GreaterThan => Some(Comparison::GreaterThan),
            Self::LessThan => Some(Comparison::LessThan),
            Self::And | Self::Or | Self::Not => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Leaf comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    Equal,
    GreaterThan,
    LessThan,
}

impl Comparison {
    pub fn operator(&self) -> Operator {
        match self {
            Self::Equal => Operator::Equal,
            Self::GreaterThan => Operator::GreaterThan,
            Self::LessThan => Operator::LessThan,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operator().keyword())
    }
}

/// One `(operator, property, literal)` triple.
///
/// `literal` is kept as text; it is coerced to the property's type when
/// the condition is evaluated. String literals are stored unquoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub comparison: Comparison,
    pub property: Property,
    pub literal: String,
}

impl Condition {
    pub fn new(comparison: Comparison, property: Property, literal: impl Into<String>) -> Self {
        Self {
            comparison,
            property,
            literal: literal.into(),
        }
    }

    pub fn equal(property: Property, literal: impl Into<String>) -> Self {
        Self::new(Comparison::Equal, property, literal)
    }

    pub fn greater_than(property: Property, literal: impl Into<String>) -> Self {
        Self::new(Comparison::GreaterThan, property, literal)
    }

    pub fn less_than(property: Property, literal: impl Into<String>) -> Self {
        Self::new(Comparison::LessThan, property, literal)
    }
}

impl fmt::Display for Condition {
    /// Renders back to query text. String literals get single quotes again.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property.kind() {
            PropertyKind::String => {
                write!(f, "{}({},'{}')", self.comparison, self.property, self.literal)
            }
            PropertyKind::Number => {
                write!(f, "{}({},{})", self.comparison, self.property, self.literal)
            }
        }
    }
}

/// Parsed query, one node per grammar variant.
///
/// AND/OR hold flat lists of comparisons; only NOT nests an arbitrary
/// sub-expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// property == literal
    Equal(Property, String),
    /// property > literal (number properties only)
    GreaterThan(Property, String),
    /// property < literal (number properties only)
    LessThan(Property, String),
    /// complement over the full record set
    Not(Box<Expression>),
    /// sequential narrowing, starting from the full record set
    And(Vec<Condition>),
    /// union of per-condition matches over the full record set
    Or(Vec<Condition>),
}

impl Expression {
    /// Wrap a single condition as a leaf expression.
    pub fn leaf(condition: Condition) -> Self {
        let Condition {
            comparison,
            property,
            literal,
        } = condition;
        match comparison {
            Comparison::Equal => Self::Equal(property, literal),
            Comparison::GreaterThan => Self::GreaterThan(property, literal),
            Comparison::LessThan => Self::LessThan(property, literal),
        }
    }

    pub fn not(inner: Expression) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Leaf node as a borrowed triple, `None` for composites.
    pub fn as_condition(&self) -> Option<(Comparison, Property, &str)> {
        match self {
            Self::Equal(p, v) => Some((Comparison::Equal, *p, v.as_str())),
            Self::GreaterThan(p, v) => Some((Comparison::GreaterThan, *p, v.as_str())),
            Self::LessThan(p, v) => Some((Comparison::LessThan, *p, v.as_str())),
            Self::Not(_) | Self::And(_) | Self::Or(_) => None,
        }
    }

    /// Operator keyword at the head of this node.
    pub fn operator(&self) -> Operator {
        match self {
            Self::Equal(..) => Operator::Equal,
            Self::GreaterThan(..) => Operator::GreaterThan,
            Self::LessThan(..) => Operator::LessThan,
            Self::Not(_) => Operator::Not,
            Self::And(_) => Operator::And,
            Self::Or(_) => Operator::Or,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Not(inner) => write!(f, "NOT({})", inner),
            Self::And(conditions) | Self::Or(conditions) => {
                write!(f, "{}(", self.operator())?;
                for (i, condition) in conditions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", condition)?;
                }
                f.write_str(")")
            }
            Self::Equal(property, literal) => {
                write!(f, "{}", Condition::equal(*property, literal.as_str()))
            }
            Self::GreaterThan(property, literal) => {
                write!(f, "{}", Condition::greater_than(*property, literal.as_str()))
            }
            Self::LessThan(property, literal) => {
                write!(f, "{}", Condition::less_than(*property, literal.as_str()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keyword_is_prefix_of_another() {
        for a in Operator::SCAN_ORDER {
            for b in Operator::SCAN_ORDER {
                if a != b {
                    assert!(!b.keyword().starts_with(a.keyword()), "{} prefixes {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_comparison_operator_mapping() {
        for op in Operator::SCAN_ORDER {
            if let Some(cmp) = op.as_comparison() {
                assert_eq!(cmp.operator(), op);
            }
        }
        assert_eq!(Operator::Not.as_comparison(), None);
    }

    #[test]
    fn test_display_quotes_string_literals_only() {
        let expr = Expression::Or(vec![
            Condition::equal(Property::Title, "request"),
            Condition::less_than(Property::Views, "3"),
        ]);
        assert_eq!(expr.to_string(), "OR(EQUAL(title,'request'),LESS_THAN(views,3))");

        let expr = Expression::not(Expression::Equal(Property::Id, "1".into()));
        assert_eq!(expr.to_string(), "NOT(EQUAL(id,'1'))");

        let expr = Expression::GreaterThan(Property::Views, "7".into());
        assert_eq!(expr.to_string(), "GREATER_THAN(views,7)");
        let expr = Expression::LessThan(Property::Timestamp, "-1".into());
        assert_eq!(expr.to_string(), "LESS_THAN(timestamp,-1)");
    }

    #[test]
    fn test_leaf_round_trip() {
        let condition = Condition::greater_than(Property::Timestamp, "10");
        let expr = Expression::leaf(condition.clone());
        assert_eq!(expr, Expression::GreaterThan(Property::Timestamp, "10".into()));
        assert_eq!(
            expr.as_condition(),
            Some((Comparison::GreaterThan, Property::Timestamp, "10"))
        );
        assert_eq!(expr.operator(), Operator::GreaterThan);
    }
}
