//! Tag-value output.
//!
//! [`write_tag_value`] serializes a document as-is. [`write_document`]
//! first runs [`validate_and_deduplicate`] according to [`WriteOptions`].

mod dedup;
mod tagvalue;

pub use dedup::{deduplicate, validate_and_deduplicate};
pub use tagvalue::{write_tag_value, TagValueWriter};

use crate::config::{AppConfig, OutputConfig, ValidationConfig};
use crate::error::Result;
use crate::model::Document;
use std::path::Path;
use tracing::info;

/// Pre-processing applied before writing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Refuse documents with validation errors
    pub validate: bool,
    /// Collapse property-equal entities
    pub drop_duplicates: bool,
    /// Emit `## Section` comment lines
    pub section_comments: bool,
    /// Rules used when `validate` is set
    pub validation: ValidationConfig,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for WriteOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            validate: config.validate,
            drop_duplicates: config.drop_duplicates,
            section_comments: config.section_comments,
            validation: ValidationConfig::default(),
        }
    }
}

impl From<&AppConfig> for WriteOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            validation: config.validation.clone(),
            ..Self::from(&config.output)
        }
    }
}

/// Validate and deduplicate as configured, then serialize.
///
/// # Errors
///
/// Returns [`SpdxError::Validation`](crate::SpdxError::Validation) when
/// `options.validate` is set and the document has error-severity issues.
pub fn write_document(document: &Document, options: &WriteOptions) -> Result<String> {
    let prepared = validate_and_deduplicate(document, options)?;
    Ok(TagValueWriter::new(options.section_comments).write(&prepared))
}

/// [`write_document`] into a file.
///
/// # Errors
///
/// Validation failures as in [`write_document`], and IO errors writing `path`.
pub fn write_file(document: &Document, options: &WriteOptions, path: &Path) -> Result<()> {
    let text = write_document(document, options)?;
    std::fs::write(path, &text).map_err(|e| crate::SpdxError::io(path, e))?;
    info!(path = %path.display(), bytes = text.len(), "wrote tag-value document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigPreset;

    #[test]
    fn test_options_from_config() {
        let lenient = WriteOptions::from(&AppConfig::from_preset(ConfigPreset::Lenient));
        assert!(!lenient.validate);
        assert!(!lenient.drop_duplicates);

        let strict = WriteOptions::from(&AppConfig::from_preset(ConfigPreset::Strict));
        assert!(strict.validate);
        assert!(strict.validation.check_license_list);
    }

    #[test]
    fn test_write_file_rejects_invalid_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.spdx");
        let result = write_file(&Document::default(), &WriteOptions::default(), &path);
        assert!(matches!(result, Err(crate::SpdxError::Validation { .. })));
        assert!(!path.exists());
    }
}
