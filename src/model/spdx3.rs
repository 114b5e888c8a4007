//! SPDX 3 data holders.
//!
//! These are plain closed sum types. Abstract bases in the SPDX 3 model
//! (`IntegrityMethod`, `SpdxCollection`) have no constructor of their own;
//! only their concrete variants can be built.

use super::ChecksumAlgorithm;
use serde::{Deserialize, Serialize};

/// How an element's integrity can be checked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum IntegrityMethod {
    Hash {
        algorithm: ChecksumAlgorithm,
        value: String,
        comment: Option<String>,
    },
    /// Integrity is delegated to a reference in another document
    ExternalReferenceCheck {
        external_spdx_id: String,
        verified_using: Vec<IntegrityMethod>,
        comment: Option<String>,
    },
}

impl IntegrityMethod {
    pub fn hash(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self::Hash {
            algorithm,
            value: value.into(),
            comment: None,
        }
    }

    pub fn external_reference_check(external_spdx_id: impl Into<String>) -> Self {
        Self::ExternalReferenceCheck {
            external_spdx_id: external_spdx_id.into(),
            verified_using: Vec::new(),
            comment: None,
        }
    }

    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        match self {
            Self::Hash { comment, .. } | Self::ExternalReferenceCheck { comment, .. } => {
                comment.as_deref()
            }
        }
    }
}

/// Prefix-to-namespace mapping used for compact ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceMap {
    pub prefix: String,
    pub namespace: String,
}

/// Element imported from another document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMap {
    pub external_id: String,
    pub verified_using: Vec<IntegrityMethod>,
    pub location_hint: Option<String>,
}

/// Fields shared by every collection kind. Elements are referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionData {
    pub spdx_id: String,
    pub name: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub elements: Vec<String>,
    pub root_elements: Vec<String>,
    pub verified_using: Vec<IntegrityMethod>,
    pub namespaces: Vec<NamespaceMap>,
    pub imports: Vec<ExternalMap>,
}

/// A collection of elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "collection")]
pub enum SpdxCollection {
    Bom(CollectionData),
    Bundle {
        data: CollectionData,
        context: Option<String>,
    },
    SpdxDocument(CollectionData),
}

impl SpdxCollection {
    fn data_for(spdx_id: String, elements: Vec<String>, root_elements: Vec<String>) -> CollectionData {
        CollectionData {
            spdx_id,
            elements,
            root_elements,
            ..CollectionData::default()
        }
    }

    pub fn bom(spdx_id: impl Into<String>, elements: Vec<String>, root_elements: Vec<String>) -> Self {
        Self::Bom(Self::data_for(spdx_id.into(), elements, root_elements))
    }

    pub fn bundle(
        spdx_id: impl Into<String>,
        elements: Vec<String>,
        root_elements: Vec<String>,
        context: Option<String>,
    ) -> Self {
        Self::Bundle {
            data: Self::data_for(spdx_id.into(), elements, root_elements),
            context,
        }
    }

    pub fn spdx_document(
        spdx_id: impl Into<String>,
        elements: Vec<String>,
        root_elements: Vec<String>,
    ) -> Self {
        Self::SpdxDocument(Self::data_for(spdx_id.into(), elements, root_elements))
    }

    /// Shared collection fields
    #[must_use]
    pub const fn data(&self) -> &CollectionData {
        match self {
            Self::Bom(data) | Self::SpdxDocument(data) | Self::Bundle { data, .. } => data,
        }
    }

    pub fn data_mut(&mut self) -> &mut CollectionData {
        match self {
            Self::Bom(data) | Self::SpdxDocument(data) | Self::Bundle { data, .. } => data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_constructors_share_data() {
        let bom = SpdxCollection::bom(
            "SPDXRef-Bom",
            vec!["SPDXRef-a".to_string(), "SPDXRef-b".to_string()],
            vec!["SPDXRef-a".to_string()],
        );
        assert_eq!(bom.data().spdx_id, "SPDXRef-Bom");
        assert_eq!(bom.data().elements.len(), 2);

        let mut bundle = SpdxCollection::bundle("SPDXRef-Bundle", vec![], vec![], Some("ctx".into()));
        bundle.data_mut().comment = Some("note".to_string());
        assert_eq!(bundle.data().comment.as_deref(), Some("note"));
    }

    #[test]
    fn test_integrity_method_comment() {
        let hash = IntegrityMethod::hash(ChecksumAlgorithm::Sha256, "ab");
        assert_eq!(hash.comment(), None);
        let check = IntegrityMethod::ExternalReferenceCheck {
            external_spdx_id: "urn:x".to_string(),
            verified_using: vec![hash],
            comment: Some("checked".to_string()),
        };
        assert_eq!(check.comment(), Some("checked"));
    }
}
