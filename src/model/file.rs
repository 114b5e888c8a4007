//! SPDX files and snippets.

use super::{Checksum, LicenseField, SpdxValue};
use serde::{Deserialize, Serialize};
use std::fmt;

/// File type vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Application,
    Audio,
    Image,
    Text,
    Video,
    Documentation,
    Spdx,
    Other,
    Unknown(String),
}

impl FileType {
    #[must_use]
    pub fn from_spelling(spelling: &str) -> Self {
        match spelling.trim() {
            "SOURCE" => Self::Source,
            "BINARY" => Self::Binary,
            "ARCHIVE" => Self::Archive,
            "APPLICATION" => Self::Application,
            "AUDIO" => Self::Audio,
            "IMAGE" => Self::Image,
            "TEXT" => Self::Text,
            "VIDEO" => Self::Video,
            "DOCUMENTATION" => Self::Documentation,
            "SPDX" => Self::Spdx,
            "OTHER" => Self::Other,
            other => Self::Unknown(other.to_string()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Source => "SOURCE",
            Self::Binary => "BINARY",
            Self::Archive => "ARCHIVE",
            Self::Application => "APPLICATION",
            Self::Audio => "AUDIO",
            Self::Image => "IMAGE",
            Self::Text => "TEXT",
            Self::Video => "VIDEO",
            Self::Documentation => "DOCUMENTATION",
            Self::Spdx => "SPDX",
            Self::Other => "OTHER",
            Self::Unknown(s) => s,
        }
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An SPDX file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    pub spdx_id: String,
    pub name: String,
    pub file_types: Vec<FileType>,
    pub checksums: Vec<Checksum>,
    pub license_concluded: Option<LicenseField>,
    pub license_info_in_file: Vec<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub comment: Option<String>,
    pub notice: Option<String>,
    pub contributors: Vec<String>,
    pub attribution_texts: Vec<String>,
    /// SPDX id of the package this file was declared under
    pub owning_package: Option<String>,
    #[serde(skip)]
    pub dangling: bool,
}

impl File {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spdx_id: String::new(),
            name: name.into(),
            file_types: Vec::new(),
            checksums: Vec::new(),
            license_concluded: None,
            license_info_in_file: Vec::new(),
            license_comment: None,
            copyright_text: None,
            comment: None,
            notice: None,
            contributors: Vec::new(),
            attribution_texts: Vec::new(),
            owning_package: None,
            dangling: false,
        }
    }

    pub fn license_fields(&self) -> impl Iterator<Item = (&'static str, &LicenseField)> {
        self.license_concluded
            .iter()
            .map(|l| ("LicenseConcluded", l))
            .chain(
                self.license_info_in_file
                    .iter()
                    .map(|l| ("LicenseInfoInFile", l)),
            )
    }
}

/// Inclusive `start:end` range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: u64,
    pub end: u64,
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// A snippet of a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub spdx_id: String,
    /// File the snippet is taken from
    pub file_spdx_id: Option<String>,
    pub name: Option<String>,
    pub byte_range: Option<Range>,
    pub line_range: Option<Range>,
    pub license_concluded: Option<LicenseField>,
    pub license_info_in_snippet: Vec<LicenseField>,
    pub license_comment: Option<String>,
    pub copyright_text: Option<SpdxValue<String>>,
    pub comment: Option<String>,
    pub attribution_texts: Vec<String>,
    #[serde(skip)]
    pub dangling: bool,
}

impl Snippet {
    pub fn new(spdx_id: impl Into<String>) -> Self {
        Self {
            spdx_id: spdx_id.into(),
            file_spdx_id: None,
            name: None,
            byte_range: None,
            line_range: None,
            license_concluded: None,
            license_info_in_snippet: Vec::new(),
            license_comment: None,
            copyright_text: None,
            comment: None,
            attribution_texts: Vec::new(),
            dangling: false,
        }
    }

    pub fn license_fields(&self) -> impl Iterator<Item = (&'static str, &LicenseField)> {
        self.license_concluded
            .iter()
            .map(|l| ("SnippetLicenseConcluded", l))
            .chain(
                self.license_info_in_snippet
                    .iter()
                    .map(|l| ("LicenseInfoInSnippet", l)),
            )
    }
}
