//! Document builder: token stream to document graph.
//!
//! The tag-value grammar has no nesting. A property belongs to whichever
//! entity was opened most recently, so the builder keeps the current section
//! and an arena handle to the current entity. References between entities
//! are recorded in a deferred table during the pass and resolved once every
//! entity is known.

use super::lexer::{unwrap_text, Token};
use super::license::parse_license_field;
use super::tags::Tag;
use super::values::{
    parse_actor, parse_bool, parse_checksum, parse_creator, parse_external_document_ref,
    parse_external_ref, parse_range, parse_relationship, parse_text_value,
    parse_verification_code,
};
use crate::error::{BuilderError, BuilderErrorKind};
use crate::model::{
    Annotation, AnnotationType, CreationInfo, Document, EntityKey, ExtractedLicense, File,
    FileType, LicenseField, Package, RelationshipType, Relationship, Review, Snippet, SpdxValue,
    NOASSERTION, NONE,
};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Result of building: the best-effort document and every recoverable problem
#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    pub document: Document,
    pub diagnostics: Vec<BuilderError>,
}

impl ParsedDocument {
    /// True when the build produced no diagnostics
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Section of the document the builder is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    DocumentHeader,
    CreationInfo,
    Package,
    File,
    Snippet,
    ExtractedLicense,
    Relationship,
    Annotation,
    Review,
}

impl Section {
    const fn entity_name(self) -> &'static str {
        match self {
            Self::DocumentHeader => "document",
            Self::CreationInfo => "creation info",
            Self::Package => "package",
            Self::File => "file",
            Self::Snippet => "snippet",
            Self::ExtractedLicense => "extracted license",
            Self::Relationship => "relationship",
            Self::Annotation => "annotation",
            Self::Review => "review",
        }
    }
}

/// What a deferred reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReferenceKind {
    RelationshipElement,
    RelationshipTarget,
    OwningPackage,
    SnippetFile,
    AnnotationSubject,
    /// Deprecated `FileDependency`, by file name
    FileDependency,
}

/// A reference recorded during the pass, resolved after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredReference {
    pub source: EntityKey,
    pub target: String,
    pub kind: ReferenceKind,
    pub line: usize,
}

/// Deprecated `ArtifactOfProject*` group on a file
#[derive(Debug, Default)]
struct Artifact {
    file: usize,
    name: Option<String>,
    home_page: Option<String>,
    uri: Option<String>,
}

/// Context-sensitive builder for tag-value token streams.
#[derive(Debug)]
pub struct DocumentBuilder {
    document: Document,
    section: Section,
    current: Option<EntityKey>,
    last_package: Option<usize>,
    deferred: Vec<DeferredReference>,
    diagnostics: Vec<BuilderError>,
    /// (file, package, line of `FileName`)
    file_owners: Vec<(usize, usize, usize)>,
    artifacts: Vec<Artifact>,
    declared_at: HashMap<EntityKey, usize>,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: Document::default(),
            section: Section::DocumentHeader,
            current: None,
            last_package: None,
            deferred: Vec::new(),
            diagnostics: Vec::new(),
            file_owners: Vec::new(),
            artifacts: Vec::new(),
            declared_at: HashMap::new(),
        }
    }

    /// Section the builder is currently in
    #[must_use]
    pub const fn section(&self) -> Section {
        self.section
    }

    /// References recorded so far
    #[must_use]
    pub fn deferred_references(&self) -> &[DeferredReference] {
        &self.deferred
    }

    /// Consume a token stream and resolve references.
    #[must_use]
    pub fn build(mut self, tokens: Vec<Token>) -> ParsedDocument {
        let mut iter = tokens.into_iter().peekable();
        while let Some(token) = iter.next() {
            let Some(tag) = token.tag() else {
                continue;
            };
            let value = iter
                .next_if(|t| t.tag().is_none())
                .map_or_else(String::new, |t| t.value);
            self.feed(tag, &value, token.line);
        }
        self.finish()
    }

    /// Route one tag/value pair.
    pub fn feed(&mut self, tag: Tag, value: &str, line: usize) {
        let text = unwrap_text(value).to_string();
        match tag {
            // Document header
            Tag::SpdxVersion => self.set_header(tag, line, text, |d| &mut d.spdx_version),
            Tag::DataLicense => self.set_header(tag, line, text, |d| &mut d.data_license),
            Tag::DocumentName => self.set_header(tag, line, text, |d| &mut d.name),
            Tag::DocumentNamespace => self.set_header(tag, line, text, |d| &mut d.namespace),
            Tag::DocumentComment => self.set(tag, line, text, |d| &mut d.comment),
            Tag::ExternalDocumentRef => match parse_external_document_ref(&text) {
                Ok(r) => self.document.external_document_refs.push(r),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::SpdxId => self.assign_spdx_id(text, line),

            // Creation info
            Tag::Creator | Tag::Created | Tag::CreatorComment | Tag::LicenseListVersion => {
                self.creation_property(tag, text, line);
            }

            // Openers
            Tag::PackageName => self.open_package(text, line),
            Tag::FileName => self.open_file(text, line),
            Tag::SnippetSpdxId => self.open_snippet(text, line),
            Tag::LicenseId => self.open_extracted_license(text, line),
            Tag::Relationship => self.open_relationship(&text, line),
            Tag::Annotator => self.open_annotation(&text, line),
            Tag::Reviewer => self.open_review(&text, line),

            Tag::PackageVersion
            | Tag::PackageFileName
            | Tag::PackageSupplier
            | Tag::PackageOriginator
            | Tag::PackageDownloadLocation
            | Tag::FilesAnalyzed
            | Tag::PackageVerificationCode
            | Tag::PackageChecksum
            | Tag::PackageHomePage
            | Tag::PackageSourceInfo
            | Tag::PackageLicenseConcluded
            | Tag::PackageLicenseInfoFromFiles
            | Tag::PackageLicenseDeclared
            | Tag::PackageLicenseComments
            | Tag::PackageCopyrightText
            | Tag::PackageSummary
            | Tag::PackageDescription
            | Tag::PackageComment
            | Tag::ExternalRef
            | Tag::ExternalRefComment
            | Tag::PackageAttributionText
            | Tag::PrimaryPackagePurpose
            | Tag::BuiltDate
            | Tag::ReleaseDate
            | Tag::ValidUntilDate => {
                if let Some(i) = self.require(Section::Package, tag, line) {
                    self.package_property(i, tag, text, line);
                }
            }

            Tag::FileType
            | Tag::FileChecksum
            | Tag::LicenseConcluded
            | Tag::LicenseInfoInFile
            | Tag::LicenseComments
            | Tag::FileCopyrightText
            | Tag::FileComment
            | Tag::FileNotice
            | Tag::FileContributor
            | Tag::FileAttributionText
            | Tag::FileDependency
            | Tag::ArtifactOfProjectName
            | Tag::ArtifactOfProjectHomePage
            | Tag::ArtifactOfProjectUri => {
                if let Some(i) = self.require(Section::File, tag, line) {
                    self.file_property(i, tag, text, line);
                }
            }

            Tag::SnippetFromFileSpdxId
            | Tag::SnippetName
            | Tag::SnippetByteRange
            | Tag::SnippetLineRange
            | Tag::SnippetLicenseConcluded
            | Tag::LicenseInfoInSnippet
            | Tag::SnippetLicenseComments
            | Tag::SnippetCopyrightText
            | Tag::SnippetComment
            | Tag::SnippetAttributionText => {
                if let Some(i) = self.require(Section::Snippet, tag, line) {
                    self.snippet_property(i, tag, text, line);
                }
            }

            Tag::ExtractedText | Tag::LicenseName | Tag::LicenseCrossReference | Tag::LicenseComment => {
                if let Some(i) = self.require(Section::ExtractedLicense, tag, line) {
                    match tag {
                        Tag::ExtractedText => {
                            self.set(tag, line, text, |d| &mut d.extracted_licenses[i].extracted_text);
                        }
                        Tag::LicenseName => {
                            self.set(tag, line, text, |d| &mut d.extracted_licenses[i].name);
                        }
                        Tag::LicenseCrossReference => {
                            self.document.extracted_licenses[i].cross_references.push(text);
                        }
                        _ => self.set(tag, line, text, |d| &mut d.extracted_licenses[i].comment),
                    }
                }
            }

            Tag::RelationshipComment => {
                if let Some(i) = self.require(Section::Relationship, tag, line) {
                    self.set(tag, line, text, |d| &mut d.relationships[i].comment);
                }
            }

            Tag::AnnotationDate | Tag::AnnotationType | Tag::SpdxRef | Tag::AnnotationComment => {
                if let Some(i) = self.require(Section::Annotation, tag, line) {
                    self.annotation_property(i, tag, text, line);
                }
            }

            Tag::ReviewDate | Tag::ReviewComment => {
                if let Some(i) = self.require(Section::Review, tag, line) {
                    if tag == Tag::ReviewDate {
                        self.set(tag, line, text, |d| &mut d.reviews[i].date);
                    } else {
                        self.set(tag, line, text, |d| &mut d.reviews[i].comment);
                    }
                }
            }
        }
    }

    // ========================================================================
    // Diagnostics and slot helpers
    // ========================================================================

    fn record(&mut self, line: usize, kind: BuilderErrorKind) {
        let error = BuilderError::new(line, kind);
        warn!("{error}");
        self.diagnostics.push(error);
    }

    fn invalid(&mut self, tag: Tag, line: usize, message: String) {
        self.record(
            line,
            BuilderErrorKind::InvalidValue {
                tag: tag.to_string(),
                message,
            },
        );
    }

    fn duplicate(&mut self, tag: Tag, line: usize) {
        self.record(
            line,
            BuilderErrorKind::DuplicateProperty {
                tag: tag.to_string(),
            },
        );
    }

    /// Set a single-valued property; a second value is dropped.
    fn set<T>(
        &mut self,
        tag: Tag,
        line: usize,
        value: T,
        slot: impl FnOnce(&mut Document) -> &mut Option<T>,
    ) {
        let slot = slot(&mut self.document);
        if slot.is_some() {
            self.duplicate(tag, line);
        } else {
            *slot = Some(value);
        }
    }

    fn set_header(
        &mut self,
        tag: Tag,
        line: usize,
        value: String,
        slot: impl FnOnce(&mut Document) -> &mut String,
    ) {
        let slot = slot(&mut self.document);
        if slot.is_empty() {
            *slot = value;
        } else {
            self.duplicate(tag, line);
        }
    }

    /// Parse a license field, recording a diagnostic when it is unparseable.
    fn license(&mut self, tag: Tag, line: usize, raw: &str) -> LicenseField {
        let field = parse_license_field(raw);
        if let Some(error) = field.parse_error() {
            let error = error.clone();
            self.record(
                line,
                BuilderErrorKind::LicenseExpression {
                    tag: tag.to_string(),
                    error,
                },
            );
        }
        field
    }

    /// Index of the current entity if it is of the required kind.
    fn require(&mut self, section: Section, tag: Tag, line: usize) -> Option<usize> {
        let index = match (section, self.current) {
            (Section::Package, Some(EntityKey::Package(i)))
            | (Section::File, Some(EntityKey::File(i)))
            | (Section::Snippet, Some(EntityKey::Snippet(i)))
            | (Section::ExtractedLicense, Some(EntityKey::ExtractedLicense(i)))
            | (Section::Relationship, Some(EntityKey::Relationship(i)))
            | (Section::Annotation, Some(EntityKey::Annotation(i)))
            | (Section::Review, Some(EntityKey::Review(i))) => Some(i),
            _ => None,
        };
        if index.is_none() {
            self.record(
                line,
                BuilderErrorKind::PropertyWithoutEntity {
                    tag: tag.to_string(),
                    expected: section.entity_name().to_string(),
                },
            );
        }
        index
    }

    fn defer(&mut self, source: EntityKey, target: &str, kind: ReferenceKind, line: usize) {
        self.deferred.push(DeferredReference {
            source,
            target: target.trim().to_string(),
            kind,
            line,
        });
    }

    /// Enter a section with a freshly opened entity (or none, when the
    /// opening value was rejected).
    fn enter(&mut self, section: Section, current: Option<EntityKey>) {
        self.section = section;
        self.current = current;
        if let Some(key) = current {
            debug!(%key, "opened {}", section.entity_name());
        }
    }

    // ========================================================================
    // Document header and creation info
    // ========================================================================

    fn assign_spdx_id(&mut self, id: String, line: usize) {
        match self.current {
            Some(key @ (EntityKey::Package(_) | EntityKey::File(_))) => {
                let slot = match key {
                    EntityKey::Package(i) => &mut self.document.packages[i].spdx_id,
                    EntityKey::File(i) => &mut self.document.files[i].spdx_id,
                    _ => return,
                };
                if slot.is_empty() {
                    *slot = id;
                    self.declared_at.insert(key, line);
                } else {
                    self.duplicate(Tag::SpdxId, line);
                }
            }
            None if matches!(self.section, Section::DocumentHeader | Section::CreationInfo) => {
                if self.document.spdx_id.is_empty() {
                    self.document.spdx_id = id;
                    self.declared_at.insert(EntityKey::Document, line);
                } else {
                    self.duplicate(Tag::SpdxId, line);
                }
            }
            _ => self.record(
                line,
                BuilderErrorKind::PropertyWithoutEntity {
                    tag: Tag::SpdxId.to_string(),
                    expected: "package, file or document header".to_string(),
                },
            ),
        }
    }

    fn creation_property(&mut self, tag: Tag, text: String, line: usize) {
        self.section = Section::CreationInfo;
        if self.document.creation_info.is_none() {
            self.document.creation_info = Some(CreationInfo::default());
            debug!(line, "opened creation info");
        }
        match tag {
            Tag::Creator => match parse_creator(&text) {
                Ok(creator) => {
                    if let Some(info) = self.document.creation_info.as_mut() {
                        info.creators.push(creator);
                    }
                }
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::Created => self.set(tag, line, text, |d| {
                &mut d.creation_info.get_or_insert_with(CreationInfo::default).created
            }),
            Tag::CreatorComment => self.set(tag, line, text, |d| {
                &mut d.creation_info.get_or_insert_with(CreationInfo::default).comment
            }),
            _ => self.set(tag, line, text, |d| {
                &mut d
                    .creation_info
                    .get_or_insert_with(CreationInfo::default)
                    .license_list_version
            }),
        }
    }

    // ========================================================================
    // Openers
    // ========================================================================

    fn open_package(&mut self, name: String, line: usize) {
        let index = self.document.packages.len();
        self.document.packages.push(Package::new(name));
        self.last_package = Some(index);
        self.declared_at.insert(EntityKey::Package(index), line);
        self.enter(Section::Package, Some(EntityKey::Package(index)));
    }

    fn open_file(&mut self, name: String, line: usize) {
        let index = self.document.files.len();
        self.document.files.push(File::new(name));
        if let Some(package) = self.last_package {
            self.file_owners.push((index, package, line));
        }
        self.declared_at.insert(EntityKey::File(index), line);
        self.enter(Section::File, Some(EntityKey::File(index)));
    }

    fn open_snippet(&mut self, id: String, line: usize) {
        let index = self.document.snippets.len();
        self.document.snippets.push(Snippet::new(id));
        self.declared_at.insert(EntityKey::Snippet(index), line);
        self.enter(Section::Snippet, Some(EntityKey::Snippet(index)));
    }

    fn open_extracted_license(&mut self, id: String, line: usize) {
        let index = self.document.extracted_licenses.len();
        self.document.extracted_licenses.push(ExtractedLicense::new(id));
        self.declared_at.insert(EntityKey::ExtractedLicense(index), line);
        self.enter(
            Section::ExtractedLicense,
            Some(EntityKey::ExtractedLicense(index)),
        );
    }

    fn open_relationship(&mut self, text: &str, line: usize) {
        match parse_relationship(text) {
            Ok(relationship) => {
                let index = self.document.relationships.len();
                let key = EntityKey::Relationship(index);
                self.defer(
                    key,
                    &relationship.spdx_element_id,
                    ReferenceKind::RelationshipElement,
                    line,
                );
                self.defer(
                    key,
                    &relationship.related_spdx_element,
                    ReferenceKind::RelationshipTarget,
                    line,
                );
                self.document.relationships.push(relationship);
                self.enter(Section::Relationship, Some(key));
            }
            Err(message) => {
                self.invalid(Tag::Relationship, line, message);
                self.enter(Section::Relationship, None);
            }
        }
    }

    fn open_annotation(&mut self, text: &str, line: usize) {
        match parse_creator(text) {
            Ok(annotator) => {
                let index = self.document.annotations.len();
                self.document.annotations.push(Annotation::new(annotator));
                self.enter(Section::Annotation, Some(EntityKey::Annotation(index)));
            }
            Err(message) => {
                self.invalid(Tag::Annotator, line, message);
                self.enter(Section::Annotation, None);
            }
        }
    }

    fn open_review(&mut self, text: &str, line: usize) {
        match parse_creator(text) {
            Ok(reviewer) => {
                let index = self.document.reviews.len();
                self.document.reviews.push(Review {
                    reviewer,
                    date: None,
                    comment: None,
                });
                self.enter(Section::Review, Some(EntityKey::Review(index)));
            }
            Err(message) => {
                self.invalid(Tag::Reviewer, line, message);
                self.enter(Section::Review, None);
            }
        }
    }

    // ========================================================================
    // Entity properties
    // ========================================================================

    fn package_property(&mut self, i: usize, tag: Tag, text: String, line: usize) {
        match tag {
            Tag::PackageVersion => self.set(tag, line, text, |d| &mut d.packages[i].version),
            Tag::PackageFileName => self.set(tag, line, text, |d| &mut d.packages[i].file_name),
            Tag::PackageSupplier | Tag::PackageOriginator => match parse_actor(&text) {
                Ok(actor) if tag == Tag::PackageSupplier => {
                    self.set(tag, line, actor, |d| &mut d.packages[i].supplier);
                }
                Ok(actor) => self.set(tag, line, actor, |d| &mut d.packages[i].originator),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::PackageDownloadLocation => {
                let value = parse_text_value(&text);
                self.set(tag, line, value, |d| &mut d.packages[i].download_location);
            }
            Tag::FilesAnalyzed => match parse_bool(&text) {
                Ok(flag) => self.set(tag, line, flag, |d| &mut d.packages[i].files_analyzed),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::PackageVerificationCode => match parse_verification_code(&text) {
                Ok(code) => self.set(tag, line, code, |d| &mut d.packages[i].verification_code),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::PackageChecksum => match parse_checksum(&text) {
                Ok(checksum) => self.document.packages[i].checksums.push(checksum),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::PackageHomePage => {
                let value = parse_text_value(&text);
                self.set(tag, line, value, |d| &mut d.packages[i].homepage);
            }
            Tag::PackageSourceInfo => self.set(tag, line, text, |d| &mut d.packages[i].source_info),
            Tag::PackageLicenseConcluded => {
                let field = self.license(tag, line, &text);
                self.set(tag, line, field, |d| &mut d.packages[i].license_concluded);
            }
            Tag::PackageLicenseDeclared => {
                let field = self.license(tag, line, &text);
                self.set(tag, line, field, |d| &mut d.packages[i].license_declared);
            }
            Tag::PackageLicenseInfoFromFiles => {
                let field = self.license(tag, line, &text);
                self.document.packages[i].license_info_from_files.push(field);
            }
            Tag::PackageLicenseComments => {
                self.set(tag, line, text, |d| &mut d.packages[i].license_comment);
            }
            Tag::PackageCopyrightText => {
                let value = parse_text_value(&text);
                self.set(tag, line, value, |d| &mut d.packages[i].copyright_text);
            }
            Tag::PackageSummary => self.set(tag, line, text, |d| &mut d.packages[i].summary),
            Tag::PackageDescription => self.set(tag, line, text, |d| &mut d.packages[i].description),
            Tag::PackageComment => self.set(tag, line, text, |d| &mut d.packages[i].comment),
            Tag::ExternalRef => match parse_external_ref(&text) {
                Ok(r) => self.document.packages[i].external_refs.push(r),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::ExternalRefComment => {
                if self.document.packages[i].external_refs.is_empty() {
                    self.record(
                        line,
                        BuilderErrorKind::PropertyWithoutEntity {
                            tag: tag.to_string(),
                            expected: "external reference".to_string(),
                        },
                    );
                } else {
                    self.set(tag, line, text, |d| {
                        let refs = &mut d.packages[i].external_refs;
                        let last = refs.len() - 1;
                        &mut refs[last].comment
                    });
                }
            }
            Tag::PackageAttributionText => self.document.packages[i].attribution_texts.push(text),
            Tag::PrimaryPackagePurpose => {
                self.set(tag, line, text, |d| &mut d.packages[i].primary_purpose);
            }
            Tag::BuiltDate => self.set(tag, line, text, |d| &mut d.packages[i].built_date),
            Tag::ReleaseDate => self.set(tag, line, text, |d| &mut d.packages[i].release_date),
            _ => self.set(tag, line, text, |d| &mut d.packages[i].valid_until_date),
        }
    }

    fn file_property(&mut self, i: usize, tag: Tag, text: String, line: usize) {
        match tag {
            Tag::FileType => self.document.files[i]
                .file_types
                .push(FileType::from_spelling(&text)),
            Tag::FileChecksum => match parse_checksum(&text) {
                Ok(checksum) => self.document.files[i].checksums.push(checksum),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::LicenseConcluded => {
                let field = self.license(tag, line, &text);
                self.set(tag, line, field, |d| &mut d.files[i].license_concluded);
            }
            Tag::LicenseInfoInFile => {
                let field = self.license(tag, line, &text);
                self.document.files[i].license_info_in_file.push(field);
            }
            Tag::LicenseComments => self.set(tag, line, text, |d| &mut d.files[i].license_comment),
            Tag::FileCopyrightText => {
                let value = parse_text_value(&text);
                self.set(tag, line, value, |d| &mut d.files[i].copyright_text);
            }
            Tag::FileComment => self.set(tag, line, text, |d| &mut d.files[i].comment),
            Tag::FileNotice => self.set(tag, line, text, |d| &mut d.files[i].notice),
            Tag::FileContributor => self.document.files[i].contributors.push(text),
            Tag::FileAttributionText => self.document.files[i].attribution_texts.push(text),
            Tag::FileDependency => {
                self.defer(EntityKey::File(i), &text, ReferenceKind::FileDependency, line);
            }
            Tag::ArtifactOfProjectName => self.artifacts.push(Artifact {
                file: i,
                name: Some(text),
                ..Artifact::default()
            }),
            _ => {
                // Home page / URI attach to the file's latest artifact unless
                // that artifact already has one
                let home_page = tag == Tag::ArtifactOfProjectHomePage;
                let reuse = self.artifacts.last().is_some_and(|a| {
                    a.file == i
                        && if home_page {
                            a.home_page.is_none()
                        } else {
                            a.uri.is_none()
                        }
                });
                if !reuse {
                    self.artifacts.push(Artifact {
                        file: i,
                        ..Artifact::default()
                    });
                }
                if let Some(artifact) = self.artifacts.last_mut() {
                    if home_page {
                        artifact.home_page = Some(text);
                    } else {
                        artifact.uri = Some(text);
                    }
                }
            }
        }
    }

    fn snippet_property(&mut self, i: usize, tag: Tag, text: String, line: usize) {
        match tag {
            Tag::SnippetFromFileSpdxId => {
                if self.document.snippets[i].file_spdx_id.is_none() {
                    self.defer(EntityKey::Snippet(i), &text, ReferenceKind::SnippetFile, line);
                }
                self.set(tag, line, text, |d| &mut d.snippets[i].file_spdx_id);
            }
            Tag::SnippetName => self.set(tag, line, text, |d| &mut d.snippets[i].name),
            Tag::SnippetByteRange | Tag::SnippetLineRange => match parse_range(&text) {
                Ok(range) if tag == Tag::SnippetByteRange => {
                    self.set(tag, line, range, |d| &mut d.snippets[i].byte_range);
                }
                Ok(range) => self.set(tag, line, range, |d| &mut d.snippets[i].line_range),
                Err(message) => self.invalid(tag, line, message),
            },
            Tag::SnippetLicenseConcluded => {
                let field = self.license(tag, line, &text);
                self.set(tag, line, field, |d| &mut d.snippets[i].license_concluded);
            }
            Tag::LicenseInfoInSnippet => {
                let field = self.license(tag, line, &text);
                self.document.snippets[i].license_info_in_snippet.push(field);
            }
            Tag::SnippetLicenseComments => {
                self.set(tag, line, text, |d| &mut d.snippets[i].license_comment);
            }
            Tag::SnippetCopyrightText => {
                let value = parse_text_value(&text);
                self.set(tag, line, value, |d| &mut d.snippets[i].copyright_text);
            }
            Tag::SnippetComment => self.set(tag, line, text, |d| &mut d.snippets[i].comment),
            _ => self.document.snippets[i].attribution_texts.push(text),
        }
    }

    fn annotation_property(&mut self, i: usize, tag: Tag, text: String, line: usize) {
        match tag {
            Tag::AnnotationDate => self.set(tag, line, text, |d| &mut d.annotations[i].date),
            Tag::AnnotationType => {
                let kind = AnnotationType::from_spelling(&text);
                self.set(tag, line, kind, |d| &mut d.annotations[i].annotation_type);
            }
            Tag::SpdxRef => {
                if self.document.annotations[i].spdx_id.is_none() {
                    self.defer(
                        EntityKey::Annotation(i),
                        &text,
                        ReferenceKind::AnnotationSubject,
                        line,
                    );
                }
                self.set(tag, line, text, |d| &mut d.annotations[i].spdx_id);
            }
            _ => self.set(tag, line, text, |d| &mut d.annotations[i].comment),
        }
    }

    // ========================================================================
    // Post-pass
    // ========================================================================

    fn finish(mut self) -> ParsedDocument {
        self.materialize_owners();
        self.synthesize_artifacts();
        let index = self.index_identifiers();
        let unresolved = self.resolve_references(&index);
        debug!(
            packages = self.document.packages.len(),
            files = self.document.files.len(),
            references = self.deferred.len(),
            unresolved,
            diagnostics = self.diagnostics.len(),
            "document built"
        );
        ParsedDocument {
            document: self.document,
            diagnostics: self.diagnostics,
        }
    }

    fn materialize_owners(&mut self) {
        for (file, package, line) in std::mem::take(&mut self.file_owners) {
            let owner = self.document.packages[package].spdx_id.clone();
            if owner.is_empty() {
                continue;
            }
            self.defer(EntityKey::File(file), &owner, ReferenceKind::OwningPackage, line);
            self.document.files[file].owning_package = Some(owner);
        }
    }

    /// Fold deprecated `ArtifactOfProject*` groups into packages plus
    /// `GENERATED_FROM` relationships.
    fn synthesize_artifacts(&mut self) {
        let mut per_file: HashMap<usize, usize> = HashMap::new();
        for artifact in std::mem::take(&mut self.artifacts) {
            let n = per_file.entry(artifact.file).or_insert(0);
            let id = format!("SPDXRef-ArtifactOf-{}-{}", artifact.file, n);
            *n += 1;

            let mut package = Package::new(artifact.name.unwrap_or_else(|| NOASSERTION.to_string()));
            package.spdx_id = id.clone();
            package.download_location = Some(SpdxValue::NoAssertion);
            package.homepage = artifact.home_page.as_deref().map(parse_text_value);
            package.comment = artifact.uri;
            self.document.packages.push(package);

            let file_id = self.document.files[artifact.file].spdx_id.clone();
            if !file_id.is_empty() {
                self.document.relationships.push(Relationship::new(
                    file_id,
                    RelationshipType::GeneratedFrom,
                    id,
                ));
            }
        }
    }

    /// Build the id index, recording one diagnostic per duplicated id.
    fn index_identifiers(&mut self) -> HashMap<String, EntityKey> {
        let declared: Vec<(EntityKey, String)> = self
            .document
            .declared_ids()
            .map(|(key, id)| (key, id.to_string()))
            .collect();

        let mut index = HashMap::with_capacity(declared.len());
        let mut reported = HashSet::new();
        for (key, id) in declared {
            if index.contains_key(&id) {
                if reported.insert(id.clone()) {
                    let line = self.declared_at.get(&key).copied().unwrap_or(0);
                    self.record(line, BuilderErrorKind::DuplicateIdentifier { id });
                }
            } else {
                index.insert(id, key);
            }
        }
        index
    }

    fn resolve_references(&mut self, index: &HashMap<String, EntityKey>) -> usize {
        let mut unresolved = 0;
        for reference in std::mem::take(&mut self.deferred) {
            let resolved = match reference.kind {
                ReferenceKind::FileDependency => self.resolve_file_dependency(&reference),
                ReferenceKind::RelationshipTarget
                    if reference.target == NOASSERTION || reference.target == NONE =>
                {
                    true
                }
                _ => self.resolves(index, &reference.target),
            };
            if !resolved {
                unresolved += 1;
                self.mark_dangling(reference.source);
                self.record(
                    reference.line,
                    BuilderErrorKind::UnresolvedReference {
                        from: reference.source.to_string(),
                        target: reference.target.clone(),
                    },
                );
            }
            self.deferred.push(reference);
        }
        unresolved
    }

    fn resolves(&self, index: &HashMap<String, EntityKey>, target: &str) -> bool {
        if index.contains_key(target) {
            return true;
        }
        match target.split_once(':') {
            Some((document_ref, _)) if document_ref.starts_with("DocumentRef-") => {
                self.document.has_external_document(document_ref)
            }
            _ => false,
        }
    }

    /// `FileDependency` names another file; fold it into `DEPENDS_ON`.
    fn resolve_file_dependency(&mut self, reference: &DeferredReference) -> bool {
        let EntityKey::File(source) = reference.source else {
            return false;
        };
        let target = self
            .document
            .files
            .iter()
            .find(|f| f.name == reference.target && !f.spdx_id.is_empty())
            .map(|f| f.spdx_id.clone());
        let source_id = self.document.files[source].spdx_id.clone();
        match target {
            Some(target) if !source_id.is_empty() => {
                self.document.relationships.push(Relationship::new(
                    source_id,
                    RelationshipType::DependsOn,
                    target,
                ));
                true
            }
            _ => false,
        }
    }

    fn mark_dangling(&mut self, key: EntityKey) {
        match key {
            EntityKey::File(i) => self.document.files[i].dangling = true,
            EntityKey::Snippet(i) => self.document.snippets[i].dangling = true,
            EntityKey::Relationship(i) => self.document.relationships[i].dangling = true,
            EntityKey::Annotation(i) => self.document.annotations[i].dangling = true,
            _ => {}
        }
    }
}
