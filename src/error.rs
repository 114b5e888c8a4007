//! Error types for spdx-tagvalue.
//!
//! Only lexical errors stop a parse. Builder diagnostics and license
//! expression errors are collected alongside the best-effort document, and
//! validation issues live in the [`ValidationReport`](crate::validation::ValidationReport).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for spdx-tagvalue operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpdxError {
    /// Fatal tokenizer error
    #[error("Failed to read tag-value document: {context}")]
    Lex {
        context: String,
        #[source]
        source: LexError,
    },

    /// Parse succeeded but left diagnostics the caller asked to reject
    #[error("Document has {count} builder diagnostic(s), first: {first}")]
    Diagnostics { count: usize, first: String },

    /// Validation reported errors and the caller asked to stop on them
    #[error("Validation failed with {errors} error(s), first: {first}")]
    Validation { errors: usize, first: String },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Fatal tokenizer errors. Each one aborts tokenization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("line {line}: <text> block opened here is never closed")]
    UnterminatedText { line: usize },

    #[error("line {line}: unknown tag '{tag}'")]
    UnknownTag { tag: String, line: usize },

    #[error("line {line}: expected 'Tag: value'")]
    MissingSeparator { line: usize },
}

impl LexError {
    /// Line the error was raised on
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnterminatedText { line }
            | Self::UnknownTag { line, .. }
            | Self::MissingSeparator { line } => *line,
        }
    }
}

/// A malformed license expression, attached to the field it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[error("invalid license expression '{expression}' at offset {position}: {message}")]
pub struct LicenseParseError {
    /// Byte offset into `expression`
    pub position: usize,
    pub message: String,
    pub expression: String,
}

impl LicenseParseError {
    pub fn new(expression: &str, position: usize, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
            expression: expression.to_string(),
        }
    }
}

/// A recoverable problem found while assembling the document graph.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("line {line}: {kind}")]
pub struct BuilderError {
    /// Line of the tag that caused the problem (0 for post-pass findings
    /// with no better anchor)
    pub line: usize,
    pub kind: BuilderErrorKind,
}

impl BuilderError {
    pub const fn new(line: usize, kind: BuilderErrorKind) -> Self {
        Self { line, kind }
    }
}

/// Specific builder error kinds
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[non_exhaustive]
pub enum BuilderErrorKind {
    #[error("{tag} requires an open {expected}; value dropped")]
    PropertyWithoutEntity { tag: String, expected: String },

    #[error("{tag} given more than once; later value dropped")]
    DuplicateProperty { tag: String },

    #[error("invalid value for {tag}: {message}")]
    InvalidValue { tag: String, message: String },

    #[error("{tag}: {error}")]
    LicenseExpression {
        tag: String,
        error: LicenseParseError,
    },

    #[error("SPDX identifier '{id}' declared more than once")]
    DuplicateIdentifier { id: String },

    #[error("{from} references undeclared '{target}'")]
    UnresolvedReference { from: String, target: String },
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for spdx-tagvalue operations
pub type Result<T> = std::result::Result<T, SpdxError>;

impl SpdxError {
    /// Wrap a lexical error with context
    pub fn lex(context: impl Into<String>, source: LexError) -> Self {
        Self::Lex {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: Some(path.into()),
            message: source.to_string(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for SpdxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<LexError> for SpdxError {
    fn from(err: LexError) -> Self {
        Self::lex(String::new(), err)
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings chain outermost-first: `"loading config: reading file: ..."`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<SpdxError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: SpdxError, new_ctx: &str) -> SpdxError {
    match err {
        SpdxError::Lex {
            context: existing,
            source,
        } => SpdxError::Lex {
            context: chain_context(new_ctx, &existing),
            source,
        },
        SpdxError::Io {
            path,
            message,
            source,
        } => SpdxError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        SpdxError::Config(msg) => SpdxError::Config(chain_context(new_ctx, &msg)),
        SpdxError::Diagnostics { count, first } => SpdxError::Diagnostics {
            count,
            first: chain_context(new_ctx, &first),
        },
        SpdxError::Validation { errors, first } => SpdxError::Validation {
            errors,
            first: chain_context(new_ctx, &first),
        },
    }
}

/// Join two context strings as "`new`: `existing`", skipping an empty side.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else if new.is_empty() {
        existing.to_string()
    } else {
        format!("{new}: {existing}")
    }
}
