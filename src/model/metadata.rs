//! Creation info, creators, reviews and annotations.

use super::{NOASSERTION, NONE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of creator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatorKind {
    Person,
    Organization,
    Tool,
}

impl CreatorKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Organization => "Organization",
            Self::Tool => "Tool",
        }
    }
}

/// Creator, supplier, originator, reviewer or annotator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Creator {
    pub kind: CreatorKind,
    pub name: String,
    /// Contact, usually an email address
    pub contact: Option<String>,
}

impl Creator {
    pub fn new(kind: CreatorKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            contact: None,
        }
    }

    #[must_use]
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }
}

impl fmt::Display for Creator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.name)?;
        if let Some(contact) = &self.contact {
            write!(f, " ({contact})")?;
        }
        Ok(())
    }
}

/// A value that may instead be one of the SPDX sentinels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpdxValue<T> {
    Value(T),
    NoAssertion,
    None,
}

impl<T> SpdxValue<T> {
    /// The wrapped value, if not a sentinel
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// Recognize a whole-field sentinel
    #[must_use]
    pub fn sentinel(raw: &str) -> Option<Self> {
        match raw.trim() {
            NOASSERTION => Some(Self::NoAssertion),
            NONE => Some(Self::None),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for SpdxValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::NoAssertion => f.write_str(NOASSERTION),
            Self::None => f.write_str(NONE),
        }
    }
}

/// Parse an SPDX timestamp. Only UTC (`Z`) timestamps are accepted.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if !raw.ends_with('Z') {
        return None;
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Document creation information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreationInfo {
    pub creators: Vec<Creator>,
    /// Raw `Created` value; see [`CreationInfo::created_at`]
    pub created: Option<String>,
    pub comment: Option<String>,
    pub license_list_version: Option<String>,
}

impl CreationInfo {
    /// Parsed creation timestamp
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created.as_deref().and_then(parse_timestamp)
    }
}

/// Deprecated review record (SPDX 1.x), superseded by annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub reviewer: Creator,
    pub date: Option<String>,
    pub comment: Option<String>,
}

/// Annotation type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationType {
    Review,
    Other,
    Unknown(String),
}

impl AnnotationType {
    #[must_use]
    pub fn from_spelling(spelling: &str) -> Self {
        match spelling.trim() {
            "REVIEW" => Self::Review,
            "OTHER" => Self::Other,
            other => Self::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Review => "REVIEW",
            Self::Other => "OTHER",
            Self::Unknown(s) => s,
        }
    }
}

/// Annotation on an element, referenced by SPDX id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub annotator: Creator,
    pub date: Option<String>,
    pub annotation_type: Option<AnnotationType>,
    /// Subject of the annotation (`SPDXREF`)
    pub spdx_id: Option<String>,
    pub comment: Option<String>,
    /// Set when `spdx_id` did not resolve
    #[serde(skip)]
    pub dangling: bool,
}

impl Annotation {
    #[must_use]
    pub const fn new(annotator: Creator) -> Self {
        Self {
            annotator,
            date: None,
            annotation_type: None,
            spdx_id: None,
            comment: None,
            dangling: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_display() {
        let bob = Creator::new(CreatorKind::Person, "Bob").with_contact("bob@example.com");
        assert_eq!(bob.to_string(), "Person: Bob (bob@example.com)");
        let tool = Creator::new(CreatorKind::Tool, "spdx-tagvalue-0.1");
        assert_eq!(tool.to_string(), "Tool: spdx-tagvalue-0.1");
    }

    #[test]
    fn test_parse_timestamp_requires_utc() {
        assert!(parse_timestamp("2010-02-03T00:00:00Z").is_some());
        assert!(parse_timestamp("2010-02-03T00:00:00+01:00").is_none());
        assert!(parse_timestamp("2010-02-03").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_sentinel() {
        assert_eq!(SpdxValue::<String>::sentinel("NOASSERTION"), Some(SpdxValue::NoAssertion));
        assert_eq!(SpdxValue::<String>::sentinel(" NONE "), Some(SpdxValue::None));
        assert_eq!(SpdxValue::<String>::sentinel("none"), None);
    }
}
