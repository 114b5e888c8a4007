//! Property access layer.
//!
//! Every entity exposes its properties through a closed enumeration and one
//! exhaustive accessor. Format converters, deduplication and the generic JSON
//! rendering read entities only through this layer, so adding a field means
//! adding a property and the compiler points at every accessor to update.

mod entities;

pub use entities::{
    AnnotationProperty, ChecksumProperty, CreationInfoProperty, CreatorProperty,
    DocumentProperty, ExternalDocumentRefProperty, ExternalRefProperty, ExtractedLicenseProperty,
    FileProperty, PackageProperty, RelationshipProperty, ReviewProperty, SnippetProperty,
    VerificationCodeProperty,
};

use crate::model::Document;
use crate::utils::{json_hash, snake_to_camel};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

// ============================================================================
// Keys and values
// ============================================================================

/// A closed set of property names for one entity kind.
pub trait PropertyKey: Copy + fmt::Debug + 'static {
    /// Every property, in declaration order
    const ALL: &'static [Self];

    /// Internal snake-case name
    fn name(self) -> &'static str;

    /// External camel-case name
    fn wire_name(self) -> String {
        match self.name() {
            "spdx_id" => "SPDXID".to_string(),
            name => snake_to_camel(name),
        }
    }
}

/// A property value, independent of the Rust field type behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Not set; serializes to `null`
    Absent,
    Text(String),
    Bool(bool),
    List(Vec<PropertyValue>),
    /// A nested entity, keyed by wire name
    Record(IndexMap<String, PropertyValue>),
}

impl PropertyValue {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The text, for `Text` values
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Render any displayable value as text.
    pub fn text(value: impl fmt::Display) -> Self {
        Self::Text(value.to_string())
    }

    /// `Text` when present, `Absent` otherwise.
    pub fn optional<T: fmt::Display>(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Self::text)
    }

    /// A list of displayable values; an empty list is `Absent`.
    pub fn list<T: fmt::Display>(values: impl IntoIterator<Item = T>) -> Self {
        Self::non_empty(values.into_iter().map(Self::text).collect())
    }

    /// A list of nested records; an empty list is `Absent`.
    pub fn records<'a, E: PropertyAccess + 'a>(entities: impl IntoIterator<Item = &'a E>) -> Self {
        Self::non_empty(entities.into_iter().map(Self::record).collect())
    }

    /// A nested entity with its absent properties left out.
    pub fn record<E: PropertyAccess>(entity: &E) -> Self {
        Self::Record(present_properties(entity))
    }

    /// Like [`records`](Self::records), reading each entity through
    /// [`PropertyAccess::property_in`].
    pub fn records_in<'a, E: PropertyAccess + 'a>(
        entities: impl IntoIterator<Item = &'a E>,
        document: &Document,
    ) -> Self {
        Self::non_empty(
            entities
                .into_iter()
                .map(|entity| Self::Record(present_properties_in(entity, document)))
                .collect(),
        )
    }

    fn non_empty(values: Vec<Self>) -> Self {
        if values.is_empty() {
            Self::Absent
        } else {
            Self::List(values)
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

// ============================================================================
// Access
// ============================================================================

/// Uniform read access to an entity's properties.
pub trait PropertyAccess {
    type Property: PropertyKey;

    /// Read one property.
    fn property(&self, key: Self::Property) -> PropertyValue;

    /// Read one property with the enclosing document at hand.
    ///
    /// Properties gathered from elsewhere in the document, such as the
    /// annotations on an element, are only present through this call;
    /// [`property`](Self::property) reads them as absent.
    fn property_in(&self, key: Self::Property, _document: &Document) -> PropertyValue {
        self.property(key)
    }

    /// Every property, absent ones included, in declaration order.
    fn properties(&self) -> Vec<(Self::Property, PropertyValue)> {
        Self::Property::ALL
            .iter()
            .map(|key| (*key, self.property(*key)))
            .collect()
    }
}

fn present_properties<E: PropertyAccess + ?Sized>(entity: &E) -> IndexMap<String, PropertyValue> {
    entity
        .properties()
        .into_iter()
        .filter(|(_, value)| !value.is_absent())
        .map(|(key, value)| (key.wire_name(), value))
        .collect()
}

fn present_properties_in<E: PropertyAccess + ?Sized>(
    entity: &E,
    document: &Document,
) -> IndexMap<String, PropertyValue> {
    E::Property::ALL
        .iter()
        .map(|key| (*key, entity.property_in(*key, document)))
        .filter(|(_, value)| !value.is_absent())
        .map(|(key, value)| (key.wire_name(), value))
        .collect()
}

/// Render an entity as a JSON object keyed by wire name, absent properties
/// skipped.
pub fn to_json<E: PropertyAccess + ?Sized>(entity: &E) -> serde_json::Value {
    serde_json::to_value(present_properties(entity)).unwrap_or(serde_json::Value::Null)
}

/// [`to_json`] for an entity of `document`, with its document-derived
/// properties filled in.
pub fn to_json_in<E: PropertyAccess + ?Sized>(
    entity: &E,
    document: &Document,
) -> serde_json::Value {
    serde_json::to_value(present_properties_in(entity, document))
        .unwrap_or(serde_json::Value::Null)
}

/// True when every property of `a` equals the same property of `b`.
pub fn same_properties<E: PropertyAccess + ?Sized>(a: &E, b: &E) -> bool {
    E::Property::ALL
        .iter()
        .all(|key| a.property(*key) == b.property(*key))
}

/// Hash over every property value; equal properties give equal hashes.
pub fn property_hash<E: PropertyAccess + ?Sized>(entity: &E) -> u64 {
    let values: Vec<PropertyValue> = entity.properties().into_iter().map(|(_, v)| v).collect();
    json_hash(&values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Checksum, ChecksumAlgorithm, Package};

    #[test]
    fn test_wire_names() {
        assert_eq!(PackageProperty::SpdxId.wire_name(), "SPDXID");
        assert_eq!(
            PackageProperty::LicenseInfoFromFiles.wire_name(),
            "licenseInfoFromFiles"
        );
        assert_eq!(ChecksumProperty::ChecksumValue.wire_name(), "checksumValue");
    }

    #[test]
    fn test_absent_serializes_to_null() {
        let json = serde_json::to_string(&PropertyValue::Absent).unwrap();
        assert_eq!(json, "null");
        let json = serde_json::to_string(&PropertyValue::list(["a", "b"])).unwrap();
        assert_eq!(json, r#"["a","b"]"#);
    }

    #[test]
    fn test_to_json_skips_absent() {
        let mut package = Package::new("demo");
        package.spdx_id = "SPDXRef-demo".to_string();
        package
            .checksums
            .push(Checksum::new(ChecksumAlgorithm::Sha1, "abc"));

        let json = to_json(&package);
        assert_eq!(json["SPDXID"], "SPDXRef-demo");
        assert_eq!(json["name"], "demo");
        assert_eq!(json["checksums"][0]["algorithm"], "SHA1");
        assert_eq!(json["checksums"][0]["checksumValue"], "abc");
        assert!(json.get("versionInfo").is_none());
    }

    #[test]
    fn test_same_properties_and_hash() {
        let a = Package::new("demo");
        let mut b = Package::new("demo");
        assert!(same_properties(&a, &b));
        assert_eq!(property_hash(&a), property_hash(&b));

        b.version = Some("1.0".to_string());
        assert!(!same_properties(&a, &b));
        assert_ne!(property_hash(&a), property_hash(&b));
    }

    #[test]
    fn test_properties_cover_all_keys() {
        let package = Package::new("demo");
        assert_eq!(package.properties().len(), PackageProperty::ALL.len());
    }
}
