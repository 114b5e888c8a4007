//! Tag-value reading.
//!
//! Parsing runs in three stages:
//! - [`tokenize`] splits text into tag / value tokens (fatal on lexical errors)
//! - [`DocumentBuilder`] routes tokens to entities, parsing license fields on
//!   the way with [`parse_license_field`]
//! - a resolution pass checks every recorded cross-reference
//!
//! ## Usage
//!
//! ```no_run
//! use spdx_tagvalue::parsers::parse_tag_value;
//!
//! let text = std::fs::read_to_string("doc.spdx").unwrap();
//! let parsed = parse_tag_value(&text).unwrap();
//! for diagnostic in &parsed.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod builder;
mod lexer;
mod license;
mod tags;
mod values;

pub use builder::{
    DeferredReference, DocumentBuilder, ParsedDocument, ReferenceKind, Section,
};
pub use lexer::{classify_value, tokenize, unwrap_text, Token, TokenKind};
pub use license::{parse_license_expression, parse_license_field};
pub use tags::Tag;
pub use values::{
    parse_actor, parse_bool, parse_checksum, parse_creator, parse_external_document_ref,
    parse_external_ref, parse_range, parse_relationship, parse_verification_code,
};

use crate::config::ParserConfig;
use crate::error::{ErrorContext, LexError, Result, SpdxError};
use std::path::Path;
use tracing::info;

/// Parse tag-value text into a document plus builder diagnostics.
///
/// # Errors
///
/// Only lexical errors are fatal; everything else is reported in
/// [`ParsedDocument::diagnostics`].
pub fn parse_tag_value(text: &str) -> std::result::Result<ParsedDocument, LexError> {
    let tokens = tokenize(text)?;
    Ok(DocumentBuilder::new().build(tokens))
}

/// Parse with parser settings applied.
///
/// # Errors
///
/// Returns [`SpdxError::Lex`] on lexical errors, and
/// [`SpdxError::Diagnostics`] when `fail_on_diagnostics` is set and the
/// build recorded any.
pub fn parse_with_config(text: &str, config: &ParserConfig) -> Result<ParsedDocument> {
    let parsed = parse_tag_value(text).context("tokenizing")?;
    if config.fail_on_diagnostics {
        if let Some(first) = parsed.diagnostics.first() {
            return Err(SpdxError::Diagnostics {
                count: parsed.diagnostics.len(),
                first: first.to_string(),
            });
        }
    }
    Ok(parsed)
}

/// Read and parse a tag-value file.
///
/// # Errors
///
/// IO errors carry the path; see [`parse_with_config`] for the rest.
pub fn parse_file(path: &Path, config: &ParserConfig) -> Result<ParsedDocument> {
    let text = std::fs::read_to_string(path).map_err(|e| SpdxError::io(path, e))?;
    let parsed = parse_with_config(&text, config)
        .with_context(|| format!("parsing {}", path.display()))?;
    info!(
        path = %path.display(),
        packages = parsed.document.packages.len(),
        files = parsed.document.files.len(),
        diagnostics = parsed.diagnostics.len(),
        "parsed tag-value document"
    );
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lex_error_is_fatal() {
        let err = parse_tag_value("SPDXVersion: SPDX-2.3\nNope: x").unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_fail_on_diagnostics() {
        let text = "PackageVersion: 1.0\n";
        let lenient = ParserConfig::default();
        assert_eq!(parse_with_config(text, &lenient).unwrap().diagnostics.len(), 1);

        let strict = ParserConfig {
            fail_on_diagnostics: true,
        };
        match parse_with_config(text, &strict) {
            Err(SpdxError::Diagnostics { count, first }) => {
                assert_eq!(count, 1);
                assert!(first.starts_with("line 1:"), "{first}");
            }
            other => panic!("expected Diagnostics, got {other:?}"),
        }
    }

    #[test]
    fn test_lex_error_context() {
        match parse_with_config("Bogus: x", &ParserConfig::default()) {
            Err(SpdxError::Lex { context, source }) => {
                assert_eq!(context, "tokenizing");
                assert_eq!(source.line(), 1);
            }
            other => panic!("expected Lex error, got {other:?}"),
        }
    }
}
