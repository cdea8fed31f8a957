//! Record data structure and its fixed attribute set.

use crate::types::QueryError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stored item with five fixed attributes.
///
/// Serializes to `{"id", "title", "content", "views", "timestamp"}` typed
/// `(string, string, string, integer, integer)`.
///
/// # Example
///
/// ```rust
/// use dataquery::Record;
///
/// let record: Record = serde_json::from_str(
///     r#"{"id":"1","title":"request","content":"x","views":1,"timestamp":2}"#,
/// ).unwrap();
/// assert_eq!(record.views, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique key
    pub id: String,
    pub title: String,
    pub content: String,
    pub views: i64,
    pub timestamp: i64,
}

impl Record {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        views: i64,
        timestamp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            views,
            timestamp,
        }
    }

    /// Read one attribute.
    pub fn field(&self, property: Property) -> FieldValue<'_> {
        match property {
            Property::Id => FieldValue::Str(&self.id),
            Property::Title => FieldValue::Str(&self.title),
            Property::Content => FieldValue::Str(&self.content),
            Property::Views => FieldValue::Number(self.views),
            Property::Timestamp => FieldValue::Number(self.timestamp),
        }
    }
}

/// Borrowed attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Number(i64),
}

/// Type partition of the attribute set.
///
/// Drives literal quoting at parse time and comparison semantics at
/// evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Compared by exact string equality; literal is quoted
    String,
    /// Compared as integers; literal is bare
    Number,
}

/// Attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Id,
    Title,
    Content,
    Views,
    Timestamp,
}

impl Property {
    /// All attributes, string-typed first.
    pub const ALL: [Property; 5] = [
        Property::Id,
        Property::Title,
        Property::Content,
        Property::Views,
        Property::Timestamp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Content => "content",
            Self::Views => "views",
            Self::Timestamp => "timestamp",
        }
    }

    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Id | Self::Title | Self::Content => PropertyKind::String,
            Self::Views | Self::Timestamp => PropertyKind::Number,
        }
    }

    pub fn is_number(&self) -> bool {
        self.kind() == PropertyKind::Number
    }
}

impl FromStr for Property {
    type Err = QueryError;

    /// Names are case-sensitive and must match exactly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| QueryError::malformed(format!("unknown property {:?}", s)))
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_partition() {
        let strings: Vec<_> = Property::ALL
            .iter()
            .filter(|p| p.kind() == PropertyKind::String)
            .map(|p| p.as_str())
            .collect();
        assert_eq!(strings, vec!["id", "title", "content"]);
        assert!(Property::Views.is_number());
        assert!(Property::Timestamp.is_number());
    }

    #[test]
    fn test_property_from_str() {
        assert_eq!("views".parse::<Property>().unwrap(), Property::Views);
        assert!(matches!(
            "Views".parse::<Property>(),
            Err(QueryError::MalformedClause(_))
        ));
        assert!(" id".parse::<Property>().is_err());
    }

    #[test]
    fn test_record_field_access() {
        let record = Record::new("7", "t", "c", 3, 42);
        assert_eq!(record.field(Property::Id), FieldValue::Str("7"));
        assert_eq!(record.field(Property::Content), FieldValue::Str("c"));
        assert_eq!(record.field(Property::Timestamp), FieldValue::Number(42));
    }

    #[test]
    fn test_record_json_shape() {
        let record = Record::new("1", "request", "x", 1, 2);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "title": "request",
                "content": "x",
                "views": 1,
                "timestamp": 2
            })
        );
    }

    #[test]
    fn test_record_rejects_wrong_types() {
        let bad = r#"{"id":1,"title":"t","content":"c","views":1,"timestamp":2}"#;
        assert!(serde_json::from_str::<Record>(bad).is_err());
    }
}
