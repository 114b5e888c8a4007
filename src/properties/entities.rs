//! Property enumerations and accessors for every entity.

use super::{PropertyAccess, PropertyKey, PropertyValue};
use crate::model::{
    Annotation, Checksum, CreationInfo, Creator, Document, ExternalDocumentRef,
    ExternalPackageRef, ExtractedLicense, File, Package, Relationship, Review, Snippet,
    VerificationCode,
};

macro_rules! properties {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl PropertyKey for $name {
            const ALL: &'static [Self] = &[$(Self::$variant,)+];

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $key,)+
                }
            }
        }
    };
}

/// Header strings are empty when unset
fn required(value: &str) -> PropertyValue {
    if value.is_empty() {
        PropertyValue::Absent
    } else {
        PropertyValue::from(value)
    }
}

/// Annotations of `document` whose subject is `spdx_id`
fn annotations_on(document: &Document, spdx_id: &str) -> PropertyValue {
    PropertyValue::records(
        document
            .annotations
            .iter()
            .filter(|annotation| annotation.spdx_id.as_deref() == Some(spdx_id)),
    )
}

// ============================================================================
// Document
// ============================================================================

properties! {
    /// Properties of the document root
    DocumentProperty {
        SpdxVersion => "spdx_version",
        DataLicense => "data_license",
        SpdxId => "spdx_id",
        Name => "name",
        DocumentNamespace => "document_namespace",
        Comment => "comment",
        ExternalDocumentRefs => "external_document_refs",
        CreationInfo => "creation_info",
        Packages => "packages",
        Files => "files",
        Snippets => "snippets",
        Relationships => "relationships",
        Annotations => "annotations",
        Reviews => "reviews",
        HasExtractedLicensingInfos => "has_extracted_licensing_infos",
    }
}

impl PropertyAccess for Document {
    type Property = DocumentProperty;

    fn property(&self, key: DocumentProperty) -> PropertyValue {
        match key {
            DocumentProperty::SpdxVersion => required(&self.spdx_version),
            DocumentProperty::DataLicense => required(&self.data_license),
            DocumentProperty::SpdxId => required(&self.spdx_id),
            DocumentProperty::Name => required(&self.name),
            DocumentProperty::DocumentNamespace => required(&self.namespace),
            DocumentProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
            DocumentProperty::ExternalDocumentRefs => {
                PropertyValue::records(&self.external_document_refs)
            }
            DocumentProperty::CreationInfo => self
                .creation_info
                .as_ref()
                .map_or(PropertyValue::Absent, PropertyValue::record),
            DocumentProperty::Packages => PropertyValue::records_in(&self.packages, self),
            DocumentProperty::Files => PropertyValue::records_in(&self.files, self),
            DocumentProperty::Snippets => PropertyValue::records_in(&self.snippets, self),
            DocumentProperty::Relationships => PropertyValue::records(&self.relationships),
            DocumentProperty::Annotations => PropertyValue::records(&self.annotations),
            DocumentProperty::Reviews => PropertyValue::records(&self.reviews),
            DocumentProperty::HasExtractedLicensingInfos => {
                PropertyValue::records(&self.extracted_licenses)
            }
        }
    }
}

properties! {
    ExternalDocumentRefProperty {
        ExternalDocumentId => "external_document_id",
        SpdxDocument => "spdx_document",
        Checksum => "checksum",
    }
}

impl PropertyAccess for ExternalDocumentRef {
    type Property = ExternalDocumentRefProperty;

    fn property(&self, key: ExternalDocumentRefProperty) -> PropertyValue {
        match key {
            ExternalDocumentRefProperty::ExternalDocumentId => required(&self.document_ref_id),
            ExternalDocumentRefProperty::SpdxDocument => required(&self.uri),
            ExternalDocumentRefProperty::Checksum => PropertyValue::record(&self.checksum),
        }
    }
}

// ============================================================================
// Creation info and actors
// ============================================================================

properties! {
    CreationInfoProperty {
        Creators => "creators",
        Created => "created",
        Comment => "comment",
        LicenseListVersion => "license_list_version",
    }
}

impl PropertyAccess for CreationInfo {
    type Property = CreationInfoProperty;

    fn property(&self, key: CreationInfoProperty) -> PropertyValue {
        match key {
            CreationInfoProperty::Creators => PropertyValue::list(&self.creators),
            CreationInfoProperty::Created => PropertyValue::optional(self.created.as_ref()),
            CreationInfoProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
            CreationInfoProperty::LicenseListVersion => {
                PropertyValue::optional(self.license_list_version.as_ref())
            }
        }
    }
}

properties! {
    CreatorProperty {
        Kind => "kind",
        Name => "name",
        Contact => "contact",
    }
}

impl PropertyAccess for Creator {
    type Property = CreatorProperty;

    fn property(&self, key: CreatorProperty) -> PropertyValue {
        match key {
            CreatorProperty::Kind => PropertyValue::from(self.kind.as_str()),
            CreatorProperty::Name => PropertyValue::text(&self.name),
            CreatorProperty::Contact => PropertyValue::optional(self.contact.as_ref()),
        }
    }
}

properties! {
    ChecksumProperty {
        Algorithm => "algorithm",
        ChecksumValue => "checksum_value",
    }
}

impl PropertyAccess for Checksum {
    type Property = ChecksumProperty;

    fn property(&self, key: ChecksumProperty) -> PropertyValue {
        match key {
            ChecksumProperty::Algorithm => PropertyValue::text(&self.algorithm),
            ChecksumProperty::ChecksumValue => PropertyValue::text(&self.value),
        }
    }
}

// ============================================================================
// Package
// ============================================================================

properties! {
    PackageProperty {
        SpdxId => "spdx_id",
        Name => "name",
        VersionInfo => "version_info",
        PackageFileName => "package_file_name",
        Supplier => "supplier",
        Originator => "originator",
        DownloadLocation => "download_location",
        FilesAnalyzed => "files_analyzed",
        PackageVerificationCode => "package_verification_code",
        Checksums => "checksums",
        Homepage => "homepage",
        SourceInfo => "source_info",
        LicenseConcluded => "license_concluded",
        LicenseInfoFromFiles => "license_info_from_files",
        LicenseDeclared => "license_declared",
        LicenseComments => "license_comments",
        CopyrightText => "copyright_text",
        Summary => "summary",
        Description => "description",
        Comment => "comment",
        ExternalRefs => "external_refs",
        AttributionTexts => "attribution_texts",
        Annotations => "annotations",
        PrimaryPackagePurpose => "primary_package_purpose",
        BuiltDate => "built_date",
        ReleaseDate => "release_date",
        ValidUntilDate => "valid_until_date",
    }
}

impl PropertyAccess for Package {
    type Property = PackageProperty;

    fn property(&self, key: PackageProperty) -> PropertyValue {
        match key {
            PackageProperty::SpdxId => required(&self.spdx_id),
            PackageProperty::Name => required(&self.name),
            PackageProperty::VersionInfo => PropertyValue::optional(self.version.as_ref()),
            PackageProperty::PackageFileName => PropertyValue::optional(self.file_name.as_ref()),
            PackageProperty::Supplier => PropertyValue::optional(self.supplier.as_ref()),
            PackageProperty::Originator => PropertyValue::optional(self.originator.as_ref()),
            PackageProperty::DownloadLocation => {
                PropertyValue::optional(self.download_location.as_ref())
            }
            PackageProperty::FilesAnalyzed => {
                self.files_analyzed.map_or(PropertyValue::Absent, PropertyValue::Bool)
            }
            PackageProperty::PackageVerificationCode => self
                .verification_code
                .as_ref()
                .map_or(PropertyValue::Absent, PropertyValue::record),
            PackageProperty::Checksums => PropertyValue::records(&self.checksums),
            PackageProperty::Homepage => PropertyValue::optional(self.homepage.as_ref()),
            PackageProperty::SourceInfo => PropertyValue::optional(self.source_info.as_ref()),
            PackageProperty::LicenseConcluded => {
                PropertyValue::optional(self.license_concluded.as_ref())
            }
            PackageProperty::LicenseInfoFromFiles => {
                PropertyValue::list(&self.license_info_from_files)
            }
            PackageProperty::LicenseDeclared => {
                PropertyValue::optional(self.license_declared.as_ref())
            }
            PackageProperty::LicenseComments => {
                PropertyValue::optional(self.license_comment.as_ref())
            }
            PackageProperty::CopyrightText => PropertyValue::optional(self.copyright_text.as_ref()),
            PackageProperty::Summary => PropertyValue::optional(self.summary.as_ref()),
            PackageProperty::Description => PropertyValue::optional(self.description.as_ref()),
            PackageProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
            PackageProperty::ExternalRefs => PropertyValue::records(&self.external_refs),
            PackageProperty::AttributionTexts => PropertyValue::list(&self.attribution_texts),
            PackageProperty::Annotations => PropertyValue::Absent,
            PackageProperty::PrimaryPackagePurpose => {
                PropertyValue::optional(self.primary_purpose.as_ref())
            }
            PackageProperty::BuiltDate => PropertyValue::optional(self.built_date.as_ref()),
            PackageProperty::ReleaseDate => PropertyValue::optional(self.release_date.as_ref()),
            PackageProperty::ValidUntilDate => {
                PropertyValue::optional(self.valid_until_date.as_ref())
            }
        }
    }

    fn property_in(&self, key: PackageProperty, document: &Document) -> PropertyValue {
        match key {
            PackageProperty::Annotations => annotations_on(document, &self.spdx_id),
            _ => self.property(key),
        }
    }
}

properties! {
    VerificationCodeProperty {
        PackageVerificationCodeValue => "package_verification_code_value",
        PackageVerificationCodeExcludedFiles => "package_verification_code_excluded_files",
    }
}

impl PropertyAccess for VerificationCode {
    type Property = VerificationCodeProperty;

    fn property(&self, key: VerificationCodeProperty) -> PropertyValue {
        match key {
            VerificationCodeProperty::PackageVerificationCodeValue => required(&self.value),
            VerificationCodeProperty::PackageVerificationCodeExcludedFiles => {
                PropertyValue::list(&self.excluded_files)
            }
        }
    }
}

properties! {
    ExternalRefProperty {
        ReferenceCategory => "reference_category",
        ReferenceType => "reference_type",
        ReferenceLocator => "reference_locator",
        Comment => "comment",
    }
}

impl PropertyAccess for ExternalPackageRef {
    type Property = ExternalRefProperty;

    fn property(&self, key: ExternalRefProperty) -> PropertyValue {
        match key {
            ExternalRefProperty::ReferenceCategory => required(&self.category),
            ExternalRefProperty::ReferenceType => required(&self.ref_type),
            ExternalRefProperty::ReferenceLocator => required(&self.locator),
            ExternalRefProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
        }
    }
}

// ============================================================================
// File and snippet
// ============================================================================

properties! {
    /// Properties of a file. `ArtifactOfs` and `FileDependencies` are folded
    /// into packages and relationships on input and always read as absent.
    /// `Annotations` is only present through `property_in`.
    FileProperty {
        SpdxId => "spdx_id",
        FileName => "file_name",
        FileTypes => "file_types",
        Checksums => "checksums",
        LicenseConcluded => "license_concluded",
        LicenseInfoInFiles => "license_info_in_files",
        LicenseComments => "license_comments",
        CopyrightText => "copyright_text",
        Comment => "comment",
        NoticeText => "notice_text",
        FileContributors => "file_contributors",
        AttributionTexts => "attribution_texts",
        Annotations => "annotations",
        OwningPackage => "owning_package",
        ArtifactOfs => "artifact_ofs",
        FileDependencies => "file_dependencies",
    }
}

impl PropertyAccess for File {
    type Property = FileProperty;

    fn property(&self, key: FileProperty) -> PropertyValue {
        match key {
            FileProperty::SpdxId => required(&self.spdx_id),
            FileProperty::FileName => required(&self.name),
            FileProperty::FileTypes => PropertyValue::list(&self.file_types),
            FileProperty::Checksums => PropertyValue::records(&self.checksums),
            FileProperty::LicenseConcluded => {
                PropertyValue::optional(self.license_concluded.as_ref())
            }
            FileProperty::LicenseInfoInFiles => PropertyValue::list(&self.license_info_in_file),
            FileProperty::LicenseComments => PropertyValue::optional(self.license_comment.as_ref()),
            FileProperty::CopyrightText => PropertyValue::optional(self.copyright_text.as_ref()),
            FileProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
            FileProperty::NoticeText => PropertyValue::optional(self.notice.as_ref()),
            FileProperty::FileContributors => PropertyValue::list(&self.contributors),
            FileProperty::AttributionTexts => PropertyValue::list(&self.attribution_texts),
            FileProperty::OwningPackage => PropertyValue::optional(self.owning_package.as_ref()),
            FileProperty::Annotations
            | FileProperty::ArtifactOfs
            | FileProperty::FileDependencies => PropertyValue::Absent,
        }
    }

    fn property_in(&self, key: FileProperty, document: &Document) -> PropertyValue {
        match key {
            FileProperty::Annotations => annotations_on(document, &self.spdx_id),
            _ => self.property(key),
        }
    }
}

properties! {
    SnippetProperty {
        SpdxId => "spdx_id",
        SnippetFromFile => "snippet_from_file",
        Name => "name",
        ByteRange => "byte_range",
        LineRange => "line_range",
        LicenseConcluded => "license_concluded",
        LicenseInfoInSnippets => "license_info_in_snippets",
        LicenseComments => "license_comments",
        CopyrightText => "copyright_text",
        Comment => "comment",
        AttributionTexts => "attribution_texts",
        Annotations => "annotations",
    }
}

impl PropertyAccess for Snippet {
    type Property = SnippetProperty;

    fn property(&self, key: SnippetProperty) -> PropertyValue {
        match key {
            SnippetProperty::SpdxId => required(&self.spdx_id),
            SnippetProperty::SnippetFromFile => PropertyValue::optional(self.file_spdx_id.as_ref()),
            SnippetProperty::Name => PropertyValue::optional(self.name.as_ref()),
            SnippetProperty::ByteRange => PropertyValue::optional(self.byte_range.as_ref()),
            SnippetProperty::LineRange => PropertyValue::optional(self.line_range.as_ref()),
            SnippetProperty::LicenseConcluded => {
                PropertyValue::optional(self.license_concluded.as_ref())
            }
            SnippetProperty::LicenseInfoInSnippets => {
                PropertyValue::list(&self.license_info_in_snippet)
            }
            SnippetProperty::LicenseComments => {
                PropertyValue::optional(self.license_comment.as_ref())
            }
            SnippetProperty::CopyrightText => PropertyValue::optional(self.copyright_text.as_ref()),
            SnippetProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
            SnippetProperty::AttributionTexts => PropertyValue::list(&self.attribution_texts),
            SnippetProperty::Annotations => PropertyValue::Absent,
        }
    }

    fn property_in(&self, key: SnippetProperty, document: &Document) -> PropertyValue {
        match key {
            SnippetProperty::Annotations => annotations_on(document, &self.spdx_id),
            _ => self.property(key),
        }
    }
}

// ============================================================================
// Licensing info, relationships, annotations, reviews
// ============================================================================

properties! {
    ExtractedLicenseProperty {
        LicenseId => "license_id",
        ExtractedText => "extracted_text",
        Name => "name",
        SeeAlsos => "see_alsos",
        Comment => "comment",
    }
}

impl PropertyAccess for ExtractedLicense {
    type Property = ExtractedLicenseProperty;

    fn property(&self, key: ExtractedLicenseProperty) -> PropertyValue {
        match key {
            ExtractedLicenseProperty::LicenseId => required(&self.license_id),
            ExtractedLicenseProperty::ExtractedText => {
                PropertyValue::optional(self.extracted_text.as_ref())
            }
            ExtractedLicenseProperty::Name => PropertyValue::optional(self.name.as_ref()),
            ExtractedLicenseProperty::SeeAlsos => PropertyValue::list(&self.cross_references),
            ExtractedLicenseProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
        }
    }
}

properties! {
    RelationshipProperty {
        SpdxElementId => "spdx_element_id",
        RelationshipType => "relationship_type",
        RelatedSpdxElement => "related_spdx_element",
        Comment => "comment",
    }
}

impl PropertyAccess for Relationship {
    type Property = RelationshipProperty;

    fn property(&self, key: RelationshipProperty) -> PropertyValue {
        match key {
            RelationshipProperty::SpdxElementId => required(&self.spdx_element_id),
            RelationshipProperty::RelationshipType => PropertyValue::text(&self.relationship_type),
            RelationshipProperty::RelatedSpdxElement => required(&self.related_spdx_element),
            RelationshipProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
        }
    }
}

properties! {
    AnnotationProperty {
        Annotator => "annotator",
        AnnotationDate => "annotation_date",
        AnnotationType => "annotation_type",
        SpdxElementId => "spdx_element_id",
        Comment => "comment",
    }
}

impl PropertyAccess for Annotation {
    type Property = AnnotationProperty;

    fn property(&self, key: AnnotationProperty) -> PropertyValue {
        match key {
            AnnotationProperty::Annotator => PropertyValue::text(&self.annotator),
            AnnotationProperty::AnnotationDate => PropertyValue::optional(self.date.as_ref()),
            AnnotationProperty::AnnotationType => self
                .annotation_type
                .as_ref()
                .map_or(PropertyValue::Absent, |t| PropertyValue::from(t.as_str())),
            AnnotationProperty::SpdxElementId => PropertyValue::optional(self.spdx_id.as_ref()),
            AnnotationProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
        }
    }
}

properties! {
    ReviewProperty {
        Reviewer => "reviewer",
        ReviewDate => "review_date",
        Comment => "comment",
    }
}

impl PropertyAccess for Review {
    type Property = ReviewProperty;

    fn property(&self, key: ReviewProperty) -> PropertyValue {
        match key {
            ReviewProperty::Reviewer => PropertyValue::text(&self.reviewer),
            ReviewProperty::ReviewDate => PropertyValue::optional(self.date.as_ref()),
            ReviewProperty::Comment => PropertyValue::optional(self.comment.as_ref()),
        }
    }
}
