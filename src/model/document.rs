//! The SPDX document: owner of every entity in the graph.

use super::{
    Annotation, Checksum, CreationInfo, ExtractedLicense, File, Package, Relationship, Review,
    Snippet,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document id every SPDX 2.x document is expected to use
pub const DOCUMENT_SPDX_ID: &str = "SPDXRef-DOCUMENT";

/// Reference to an external SPDX document (`ExternalDocumentRef`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDocumentRef {
    /// `DocumentRef-…`
    pub document_ref_id: String,
    pub uri: String,
    pub checksum: Checksum,
}

/// An SPDX document.
///
/// Children are stored in flat vectors in declaration order and refer to each
/// other by SPDX id only. Built by [`DocumentBuilder`](crate::parsers::DocumentBuilder)
/// and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// `SPDX-major.minor`
    pub spdx_version: String,
    pub data_license: String,
    pub spdx_id: String,
    pub name: String,
    pub namespace: String,
    pub comment: Option<String>,
    pub external_document_refs: Vec<ExternalDocumentRef>,
    pub creation_info: Option<CreationInfo>,
    pub packages: Vec<Package>,
    pub files: Vec<File>,
    pub snippets: Vec<Snippet>,
    pub relationships: Vec<Relationship>,
    pub annotations: Vec<Annotation>,
    /// Deprecated since SPDX 2.0, still parsed
    pub reviews: Vec<Review>,
    pub extracted_licenses: Vec<ExtractedLicense>,
}

/// Arena handle naming one entity of a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum EntityKey {
    Document,
    CreationInfo,
    Package(usize),
    File(usize),
    Snippet(usize),
    ExtractedLicense(usize),
    Relationship(usize),
    Annotation(usize),
    Review(usize),
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Document => f.write_str("document"),
            Self::CreationInfo => f.write_str("creation_info"),
            Self::Package(i) => write!(f, "packages[{i}]"),
            Self::File(i) => write!(f, "files[{i}]"),
            Self::Snippet(i) => write!(f, "snippets[{i}]"),
            Self::ExtractedLicense(i) => write!(f, "extracted_licenses[{i}]"),
            Self::Relationship(i) => write!(f, "relationships[{i}]"),
            Self::Annotation(i) => write!(f, "annotations[{i}]"),
            Self::Review(i) => write!(f, "reviews[{i}]"),
        }
    }
}

impl Document {
    /// Every declared SPDX id with its owner, in declaration order
    /// (document, packages, files, snippets).
    pub fn declared_ids(&self) -> impl Iterator<Item = (EntityKey, &str)> {
        std::iter::once((EntityKey::Document, self.spdx_id.as_str()))
            .chain(
                self.packages
                    .iter()
                    .enumerate()
                    .map(|(i, p)| (EntityKey::Package(i), p.spdx_id.as_str())),
            )
            .chain(
                self.files
                    .iter()
                    .enumerate()
                    .map(|(i, f)| (EntityKey::File(i), f.spdx_id.as_str())),
            )
            .chain(
                self.snippets
                    .iter()
                    .enumerate()
                    .map(|(i, s)| (EntityKey::Snippet(i), s.spdx_id.as_str())),
            )
            .filter(|(_, id)| !id.is_empty())
    }

    /// Every entity key, in declaration order
    #[must_use]
    pub fn entity_keys(&self) -> Vec<EntityKey> {
        let mut keys = vec![EntityKey::Document];
        if self.creation_info.is_some() {
            keys.push(EntityKey::CreationInfo);
        }
        keys.extend((0..self.packages.len()).map(EntityKey::Package));
        keys.extend((0..self.files.len()).map(EntityKey::File));
        keys.extend((0..self.snippets.len()).map(EntityKey::Snippet));
        keys.extend((0..self.extracted_licenses.len()).map(EntityKey::ExtractedLicense));
        keys.extend((0..self.relationships.len()).map(EntityKey::Relationship));
        keys.extend((0..self.annotations.len()).map(EntityKey::Annotation));
        keys.extend((0..self.reviews.len()).map(EntityKey::Review));
        keys
    }

    /// Look up a package by SPDX id
    #[must_use]
    pub fn package(&self, spdx_id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.spdx_id == spdx_id)
    }

    /// Look up a file by SPDX id
    #[must_use]
    pub fn file(&self, spdx_id: &str) -> Option<&File> {
        self.files.iter().find(|f| f.spdx_id == spdx_id)
    }

    /// Files declared under the given package, in declaration order
    pub fn files_of<'a>(&'a self, package_id: &'a str) -> impl Iterator<Item = &'a File> + 'a {
        self.files
            .iter()
            .filter(move |f| f.owning_package.as_deref() == Some(package_id))
    }

    /// Whether `DocumentRef-x` is declared as an external document reference
    #[must_use]
    pub fn has_external_document(&self, document_ref_id: &str) -> bool {
        self.external_document_refs
            .iter()
            .any(|r| r.document_ref_id == document_ref_id)
    }

    /// Total number of packages, files and snippets
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.packages.len() + self.files.len() + self.snippets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_key_paths() {
        assert_eq!(EntityKey::Document.to_string(), "document");
        assert_eq!(EntityKey::Package(2).to_string(), "packages[2]");
        assert_eq!(EntityKey::Relationship(0).to_string(), "relationships[0]");
    }

    #[test]
    fn test_declared_ids_skip_empty() {
        let mut doc = Document {
            spdx_id: DOCUMENT_SPDX_ID.to_string(),
            ..Document::default()
        };
        let mut pkg = Package::new("a");
        pkg.spdx_id = "SPDXRef-a".to_string();
        doc.packages.push(pkg);
        doc.packages.push(Package::new("unnamed"));

        let ids: Vec<_> = doc.declared_ids().collect();
        assert_eq!(
            ids,
            vec![
                (EntityKey::Document, "SPDXRef-DOCUMENT"),
                (EntityKey::Package(0), "SPDXRef-a"),
            ]
        );
    }

    #[test]
    fn test_files_of_package() {
        let mut doc = Document::default();
        let mut owned = File::new("./a.c");
        owned.owning_package = Some("SPDXRef-pkg".to_string());
        doc.files.push(owned);
        doc.files.push(File::new("./loose.c"));
        assert_eq!(doc.files_of("SPDXRef-pkg").count(), 1);
    }
}
