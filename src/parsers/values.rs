//! Parsers for structured tag values.
//!
//! Each returns a short message on failure; the builder turns it into an
//! `InvalidValue` diagnostic.

use crate::model::{
    Checksum, ChecksumAlgorithm, Creator, CreatorKind, ExternalDocumentRef, ExternalPackageRef,
    Range, Relationship, RelationshipType, SpdxValue, VerificationCode,
};
use regex::Regex;
use std::sync::LazyLock;

static CREATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(Person|Organization|Tool):\s*(.*?)\s*(?:\(([^()]*)\))?$").expect("static regex")
});

type ValueResult<T> = std::result::Result<T, String>;

/// `Kind: name (contact)`; the space after the colon is optional.
pub fn parse_creator(raw: &str) -> ValueResult<Creator> {
    let raw = raw.trim();
    let caps = CREATOR_RE
        .captures(raw)
        .ok_or_else(|| format!("'{raw}' is not 'Person|Organization|Tool: name'"))?;
    let kind = match &caps[1] {
        "Person" => CreatorKind::Person,
        "Organization" => CreatorKind::Organization,
        _ => CreatorKind::Tool,
    };
    let name = caps.get(2).map_or("", |m| m.as_str());
    if name.is_empty() {
        return Err(format!("'{raw}' has no name"));
    }
    let creator = Creator::new(kind, name);
    Ok(match caps.get(3).map(|m| m.as_str().trim()) {
        Some(contact) if !contact.is_empty() => creator.with_contact(contact),
        _ => creator,
    })
}

/// A creator, or one of the sentinels
pub fn parse_actor(raw: &str) -> ValueResult<SpdxValue<Creator>> {
    match SpdxValue::sentinel(raw) {
        Some(sentinel) => Ok(sentinel),
        None => parse_creator(raw).map(SpdxValue::Value),
    }
}

/// A free-form value, or one of the sentinels
#[must_use]
pub fn parse_text_value(raw: &str) -> SpdxValue<String> {
    SpdxValue::sentinel(raw).unwrap_or_else(|| SpdxValue::Value(raw.to_string()))
}

/// `ALGO: hexdigest`
pub fn parse_checksum(raw: &str) -> ValueResult<Checksum> {
    let (algorithm, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("'{}' is not 'Algorithm: digest'", raw.trim()))?;
    let (algorithm, value) = (algorithm.trim(), value.trim());
    if algorithm.is_empty() || value.is_empty() {
        return Err(format!("'{}' is not 'Algorithm: digest'", raw.trim()));
    }
    Ok(Checksum::new(ChecksumAlgorithm::from_spelling(algorithm), value))
}

/// `SPDXRef-a TYPE SPDXRef-b`
pub fn parse_relationship(raw: &str) -> ValueResult<Relationship> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    match parts.as_slice() {
        [element, kind, related] => Ok(Relationship::new(
            *element,
            RelationshipType::from_spelling(kind),
            *related,
        )),
        _ => Err(format!(
            "'{}' is not 'element TYPE related-element'",
            raw.trim()
        )),
    }
}

/// `CATEGORY TYPE LOCATOR`
pub fn parse_external_ref(raw: &str) -> ValueResult<ExternalPackageRef> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    match parts.as_slice() {
        [category, ref_type, locator] => Ok(ExternalPackageRef {
            category: (*category).to_string(),
            ref_type: (*ref_type).to_string(),
            locator: (*locator).to_string(),
            comment: None,
        }),
        _ => Err(format!("'{}' is not 'CATEGORY TYPE LOCATOR'", raw.trim())),
    }
}

/// `DocumentRef-x URI ALGO: hex`
pub fn parse_external_document_ref(raw: &str) -> ValueResult<ExternalDocumentRef> {
    let mut parts = raw.trim().splitn(3, char::is_whitespace);
    let (Some(id), Some(uri), Some(checksum)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!(
            "'{}' is not 'DocumentRef-id URI Algorithm: digest'",
            raw.trim()
        ));
    };
    Ok(ExternalDocumentRef {
        document_ref_id: id.to_string(),
        uri: uri.to_string(),
        checksum: parse_checksum(checksum)?,
    })
}

/// `hex` or `hex (excludes: a, b)`; the `excludes:` label is optional.
pub fn parse_verification_code(raw: &str) -> ValueResult<VerificationCode> {
    let raw = raw.trim();
    let (value, excluded) = match raw.split_once('(') {
        Some((value, rest)) => {
            let inner = rest
                .trim_end()
                .strip_suffix(')')
                .ok_or_else(|| format!("'{raw}' has an unclosed exclusion list"))?;
            let inner = inner.trim();
            let inner = inner.strip_prefix("excludes:").unwrap_or(inner);
            (value.trim(), inner)
        }
        None => (raw, ""),
    };
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(format!("'{raw}' does not start with a verification code"));
    }
    Ok(VerificationCode {
        value: value.to_string(),
        excluded_files: excluded
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

/// `start:end`, both non-negative and `start <= end`
pub fn parse_range(raw: &str) -> ValueResult<Range> {
    let raw = raw.trim();
    let parsed = raw
        .split_once(':')
        .and_then(|(s, e)| Some((s.trim().parse::<u64>().ok()?, e.trim().parse::<u64>().ok()?)));
    match parsed {
        Some((start, end)) if start <= end => Ok(Range { start, end }),
        Some(_) => Err(format!("range '{raw}' ends before it starts")),
        None => Err(format!("'{raw}' is not 'start:end'")),
    }
}

/// `true` / `false`, case-insensitive
pub fn parse_bool(raw: &str) -> ValueResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("'{}' is not true or false", raw.trim())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creator_with_contact() {
        let bob = parse_creator("Person: Bob (bob@example.com)").unwrap();
        assert_eq!(bob.kind, CreatorKind::Person);
        assert_eq!(bob.name, "Bob");
        assert_eq!(bob.contact.as_deref(), Some("bob@example.com"));
    }

    #[test]
    fn test_creator_without_space() {
        let acme = parse_creator("Organization:ACME").unwrap();
        assert_eq!(acme.kind, CreatorKind::Organization);
        assert_eq!(acme.name, "ACME");
        assert_eq!(acme.contact, None);

        let apostrophe = parse_creator("Person: Gary O'Neall").unwrap();
        assert_eq!(apostrophe.name, "Gary O'Neall");
    }

    #[test]
    fn test_creator_rejects_bad_kind() {
        assert!(parse_creator("Robot: R2").is_err());
        assert!(parse_creator("Person:").is_err());
    }

    #[test]
    fn test_actor_sentinels() {
        assert_eq!(parse_actor("NOASSERTION").unwrap(), SpdxValue::NoAssertion);
        assert!(matches!(parse_actor("Tool: x").unwrap(), SpdxValue::Value(_)));
    }

    #[test]
    fn test_checksum() {
        let cs = parse_checksum("SHA1: 2fd4e1c67a2d28fced849ee1bb76e7391b93eb12").unwrap();
        assert_eq!(cs.algorithm, ChecksumAlgorithm::Sha1);
        assert_eq!(cs.value, "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12");
        assert!(parse_checksum("SHA1 abc").is_err());
        assert!(parse_checksum("SHA1:").is_err());
    }

    #[test]
    fn test_relationship() {
        let rel = parse_relationship("SPDXRef-DOCUMENT DESCRIBES SPDXRef-pkg").unwrap();
        assert_eq!(rel.relationship_type, RelationshipType::Describes);
        assert_eq!(rel.related_spdx_element, "SPDXRef-pkg");
        assert!(parse_relationship("SPDXRef-a DESCRIBES").is_err());
    }

    #[test]
    fn test_external_document_ref() {
        let r = parse_external_document_ref(
            "DocumentRef-spdx-tool-1.2 http://spdx.org/spdxdocs/tool-1.2 SHA1: d6a770ba38583ed4bb4525bd96e50461655d2759",
        )
        .unwrap();
        assert_eq!(r.document_ref_id, "DocumentRef-spdx-tool-1.2");
        assert_eq!(r.checksum.algorithm, ChecksumAlgorithm::Sha1);
        assert!(parse_external_document_ref("DocumentRef-x http://x").is_err());
    }

    #[test]
    fn test_verification_code_forms() {
        let code = parse_verification_code(
            "4e3211c67a2d28fced849ee1bb76e7391b93feba (something.rdf, something.txt)",
        )
        .unwrap();
        assert_eq!(code.excluded_files, vec!["something.rdf", "something.txt"]);

        let labelled =
            parse_verification_code("d6a770ba38583ed4bb4525bd96e50461655d2758 (excludes: ./p.spdx)")
                .unwrap();
        assert_eq!(labelled.excluded_files, vec!["./p.spdx"]);

        let bare = parse_verification_code("d6a770ba38583ed4bb4525bd96e50461655d2758").unwrap();
        assert!(bare.excluded_files.is_empty());
        assert!(parse_verification_code("abc (unclosed").is_err());
    }

    #[test]
    fn test_range() {
        assert_eq!(parse_range("310:420").unwrap(), Range { start: 310, end: 420 });
        assert!(parse_range("5:1").is_err());
        assert!(parse_range("a:b").is_err());
    }

    #[test]
    fn test_bool() {
        assert!(parse_bool("True").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(parse_bool("yes").is_err());
    }
}
