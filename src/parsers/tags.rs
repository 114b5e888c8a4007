//! The SPDX 2.x tag vocabulary.

use std::fmt;

macro_rules! tags {
    ($($variant:ident => $spelling:literal),+ $(,)?) => {
        /// Every tag spelling the tokenizer recognizes.
        ///
        /// Recognition is context-free; which entity a tag belongs to is
        /// decided by the builder.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Tag {
            $($variant,)+
        }

        impl Tag {
            /// All tags, in vocabulary order
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Classify a tag spelling. Case-sensitive.
            #[must_use]
            pub fn from_spelling(spelling: &str) -> Option<Self> {
                match spelling {
                    $($spelling => Some(Self::$variant),)+
                    _ => None,
                }
            }

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $spelling,)+
                }
            }
        }
    };
}

tags! {
    // Document header
    SpdxVersion => "SPDXVersion",
    DataLicense => "DataLicense",
    SpdxId => "SPDXID",
    DocumentName => "DocumentName",
    DocumentNamespace => "DocumentNamespace",
    DocumentComment => "DocumentComment",
    ExternalDocumentRef => "ExternalDocumentRef",
    // Creation info
    Creator => "Creator",
    Created => "Created",
    CreatorComment => "CreatorComment",
    LicenseListVersion => "LicenseListVersion",
    // Package
    PackageName => "PackageName",
    PackageVersion => "PackageVersion",
    PackageFileName => "PackageFileName",
    PackageSupplier => "PackageSupplier",
    PackageOriginator => "PackageOriginator",
    PackageDownloadLocation => "PackageDownloadLocation",
    FilesAnalyzed => "FilesAnalyzed",
    PackageVerificationCode => "PackageVerificationCode",
    PackageChecksum => "PackageChecksum",
    PackageHomePage => "PackageHomePage",
    PackageSourceInfo => "PackageSourceInfo",
    PackageLicenseConcluded => "PackageLicenseConcluded",
    PackageLicenseInfoFromFiles => "PackageLicenseInfoFromFiles",
    PackageLicenseDeclared => "PackageLicenseDeclared",
    PackageLicenseComments => "PackageLicenseComments",
    PackageCopyrightText => "PackageCopyrightText",
    PackageSummary => "PackageSummary",
    PackageDescription => "PackageDescription",
    PackageComment => "PackageComment",
    ExternalRef => "ExternalRef",
    ExternalRefComment => "ExternalRefComment",
    PackageAttributionText => "PackageAttributionText",
    PrimaryPackagePurpose => "PrimaryPackagePurpose",
    BuiltDate => "BuiltDate",
    ReleaseDate => "ReleaseDate",
    ValidUntilDate => "ValidUntilDate",
    // File
    FileName => "FileName",
    FileType => "FileType",
    FileChecksum => "FileChecksum",
    LicenseConcluded => "LicenseConcluded",
    LicenseInfoInFile => "LicenseInfoInFile",
    LicenseComments => "LicenseComments",
    FileCopyrightText => "FileCopyrightText",
    FileComment => "FileComment",
    FileNotice => "FileNotice",
    FileContributor => "FileContributor",
    FileAttributionText => "FileAttributionText",
    FileDependency => "FileDependency",
    ArtifactOfProjectName => "ArtifactOfProjectName",
    ArtifactOfProjectHomePage => "ArtifactOfProjectHomePage",
    ArtifactOfProjectUri => "ArtifactOfProjectURI",
    // Snippet
    SnippetSpdxId => "SnippetSPDXID",
    SnippetFromFileSpdxId => "SnippetFromFileSPDXID",
    SnippetName => "SnippetName",
    SnippetByteRange => "SnippetByteRange",
    SnippetLineRange => "SnippetLineRange",
    SnippetLicenseConcluded => "SnippetLicenseConcluded",
    LicenseInfoInSnippet => "LicenseInfoInSnippet",
    SnippetLicenseComments => "SnippetLicenseComments",
    SnippetCopyrightText => "SnippetCopyrightText",
    SnippetComment => "SnippetComment",
    SnippetAttributionText => "SnippetAttributionText",
    // Extracted licensing info
    LicenseId => "LicenseID",
    ExtractedText => "ExtractedText",
    LicenseName => "LicenseName",
    LicenseCrossReference => "LicenseCrossReference",
    LicenseComment => "LicenseComment",
    // Relationship
    Relationship => "Relationship",
    RelationshipComment => "RelationshipComment",
    // Annotation
    Annotator => "Annotator",
    AnnotationDate => "AnnotationDate",
    AnnotationType => "AnnotationType",
    SpdxRef => "SPDXREF",
    AnnotationComment => "AnnotationComment",
    // Review (deprecated)
    Reviewer => "Reviewer",
    ReviewDate => "ReviewDate",
    ReviewComment => "ReviewComment",
}

impl Tag {
    /// Tags whose value is a license expression
    #[must_use]
    pub const fn is_license_bearing(self) -> bool {
        matches!(
            self,
            Self::PackageLicenseConcluded
                | Self::PackageLicenseInfoFromFiles
                | Self::PackageLicenseDeclared
                | Self::LicenseConcluded
                | Self::LicenseInfoInFile
                | Self::SnippetLicenseConcluded
                | Self::LicenseInfoInSnippet
        )
    }

    /// Tags accepted on input only, folded into modern fields
    #[must_use]
    pub const fn is_deprecated(self) -> bool {
        matches!(
            self,
            Self::FileDependency
                | Self::ArtifactOfProjectName
                | Self::ArtifactOfProjectHomePage
                | Self::ArtifactOfProjectUri
                | Self::Reviewer
                | Self::ReviewDate
                | Self::ReviewComment
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
