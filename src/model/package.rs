//! SPDX packages.

use super::{Checksum, Creator, LicenseField, SpdxValue};
use serde::{Deserialize, Serialize};

/// Package verification code: SHA1 over the package's file checksums,
/// minus the excluded files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    pub value: String,
    pub excluded_files: Vec<String>,
}

/// External reference on a package (purl, cpe, security advisories, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalPackageRef {
    pub category: String,
    pub ref_type: String,
    pub locator: String,
    pub comment: Option<String>,
}

/// An SPDX package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub spdx_id: String,
    pub name: String,
    pub version: Option<String>,
    pub file_name: Option<String>,
    pub supplier: Option<SpdxValue<Creator>>,
    pub originator: Option<SpdxValue<Creator>>,
    pub download_location: Option<SpdxValue<String>>,
    pub files_analyzed: Option<bool>,
    pub verification_code: Option<VerificationCode>,
    pub checksums: Vec<Checksum>,
    pub homepage: Option<SpdxValue<String>>,
    pub source_info: Option<String>,
    pub license_concluded: Option<LicenseField>,
    pub license_info_from_files: Vec<LicenseField>,
    pub license_declared: Option<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub comment: Option<String>,
    pub external_refs: Vec<ExternalPackageRef>,
    pub attribution_texts: Vec<String>,
    pub primary_purpose: Option<String>,
    pub built_date: Option<String>,
    pub release_date: Option<String>,
    pub valid_until_date: Option<String>,
}

impl Package {
    /// Create a package with only a name; the id is filled by a later `SPDXID`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spdx_id: String::new(),
            name: name.into(),
            version: None,
            file_name: None,
            supplier: None,
            originator: None,
            download_location: None,
            files_analyzed: None,
            verification_code: None,
            checksums: Vec::new(),
            homepage: None,
            source_info: None,
            license_concluded: None,
            license_info_from_files: Vec::new(),
            license_declared: None,
            license_comment: None,
            copyright_text: None,
            summary: None,
            description: None,
            comment: None,
            external_refs: Vec::new(),
            attribution_texts: Vec::new(),
            primary_purpose: None,
            built_date: None,
            release_date: None,
            valid_until_date: None,
        }
    }

    /// All license-bearing fields, with the tag each came from
    pub fn license_fields(&self) -> impl Iterator<Item = (&'static str, &LicenseField)> {
        self.license_concluded
            .iter()
            .map(|l| ("PackageLicenseConcluded", l))
            .chain(self.license_declared.iter().map(|l| ("PackageLicenseDeclared", l)))
            .chain(
                self.license_info_from_files
                    .iter()
                    .map(|l| ("PackageLicenseInfoFromFiles", l)),
            )
    }

    /// Timestamps carried by the package, with their tags
    pub fn dates(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("BuiltDate", self.built_date.as_deref()),
            ("ReleaseDate", self.release_date.as_deref()),
            ("ValidUntilDate", self.valid_until_date.as_deref()),
        ]
        .into_iter()
        .filter_map(|(tag, date)| date.map(|d| (tag, d)))
    }
}
