//! **SPDX 2.x tag-value documents: parse, validate, write.**
//!
//! `spdx-tagvalue` reads the line-oriented SPDX tag-value format into a typed
//! document graph, checks that graph against the SPDX structural rules and
//! writes it back out.
//!
//! ## Core Concepts & Modules
//!
//! - **[`parsers`]**: the tokenizer, the context-sensitive [`DocumentBuilder`]
//!   and the embedded license-expression parser. Lexical errors are fatal;
//!   everything else is collected as diagnostics next to a best-effort
//!   [`Document`].
//! - **[`model`]**: the document graph. The [`Document`] owns every entity in
//!   flat vectors; entities refer to each other by SPDX identifier.
//! - **[`validation`]**: the [`Validator`], producing a [`ValidationReport`]
//!   of structural, identifier, format, license and enumeration issues.
//! - **[`properties`]**: uniform, exhaustive read access to every entity's
//!   properties, plus a generic JSON rendering.
//! - **[`writer`]**: tag-value serialization with optional validation and
//!   duplicate removal.
//! - **[`config`]**: YAML configuration, presets and schema.
//!
//! ## Getting Started
//!
//! ```no_run
//! use spdx_tagvalue::{parse_tag_value, validate};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("path/to/document.spdx")?;
//!     let parsed = parse_tag_value(&text)?;
//!     for diagnostic in &parsed.diagnostics {
//!         eprintln!("{diagnostic}");
//!     }
//!
//!     let report = validate(&parsed.document);
//!     println!(
//!         "{} packages, {} errors, {} warnings",
//!         parsed.document.packages.len(),
//!         report.error_count(),
//!         report.warning_count()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ### Rewriting a Document
//!
//! ```no_run
//! use spdx_tagvalue::{parse_tag_value, write_document, WriteOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = std::fs::read_to_string("path/to/document.spdx")?;
//!     let parsed = parse_tag_value(&text)?;
//!     let canonical = write_document(&parsed.document, &WriteOptions::default())?;
//!     print!("{canonical}");
//!     Ok(())
//! }
//! ```
//!
//! ### License Expressions
//!
//! ```
//! use spdx_tagvalue::parsers::parse_license_expression;
//!
//! let expr = parse_license_expression("MIT OR Apache-2.0 WITH LLVM-exception").unwrap();
//! assert_eq!(expr.to_string(), "MIT OR Apache-2.0 WITH LLVM-exception");
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::too_many_lines,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod properties;
pub mod utils;
pub mod validation;
pub mod writer;

pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, OutputConfig, ParserConfig};
pub use config::{ConfigError, ConfigOverrides, Validatable, ValidationConfig};
pub use error::{
    BuilderError, BuilderErrorKind, ErrorContext, LexError, LicenseParseError, Result, SpdxError,
};
pub use model::{Document, EntityKey, LicenseExpression, LicenseField};
pub use parsers::{
    parse_file, parse_tag_value, parse_with_config, DocumentBuilder, ParsedDocument,
};
pub use properties::{to_json, to_json_in, PropertyAccess, PropertyKey, PropertyValue};
pub use validation::{validate, Severity, ValidationIssue, ValidationReport, Validator};
pub use writer::{write_document, write_tag_value, WriteOptions};
