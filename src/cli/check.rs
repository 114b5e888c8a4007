//! Check command handler.
//!
//! Parses a document, validates it and reports builder diagnostics plus
//! validation issues.

use super::{emit, CheckFormat, EXIT_ERRORS, EXIT_OK, EXIT_WARNINGS};
use crate::config::AppConfig;
use crate::error::BuilderError;
use crate::parsers::parse_tag_value;
use crate::validation::{ValidationIssue, ValidationReport, Validator};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Everything `check` found in one document
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub file: String,
    pub diagnostics: Vec<BuilderError>,
    pub issues: Vec<ValidationIssue>,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckSummary {
    fn new(file: &Path, diagnostics: Vec<BuilderError>, report: ValidationReport) -> Self {
        Self {
            file: file.display().to_string(),
            errors: report.error_count(),
            warnings: report.warning_count(),
            diagnostics,
            issues: report.issues,
        }
    }

    /// Exit code under the given configuration
    #[must_use]
    pub fn exit_code(&self, config: &AppConfig) -> i32 {
        if self.errors > 0 || (config.parser.fail_on_diagnostics && !self.diagnostics.is_empty()) {
            EXIT_ERRORS
        } else if config.validation.fail_on_warnings
            && (self.warnings > 0 || !self.diagnostics.is_empty())
        {
            EXIT_WARNINGS
        } else {
            EXIT_OK
        }
    }

    fn to_text(&self) -> String {
        let mut out = String::new();
        for diagnostic in &self.diagnostics {
            let _ = writeln!(out, "{}: parse: {diagnostic}", self.file);
        }
        for issue in &self.issues {
            let _ = writeln!(out, "{}: {issue}", self.file);
        }
        let _ = writeln!(
            out,
            "{}: {} diagnostic(s), {} error(s), {} warning(s)",
            self.file,
            self.diagnostics.len(),
            self.errors,
            self.warnings
        );
        out
    }
}

/// Run the check command
pub fn run_check(
    path: &Path,
    config: &AppConfig,
    format: CheckFormat,
    output: Option<&Path>,
) -> Result<i32> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parsed = parse_tag_value(&text).with_context(|| format!("parsing {}", path.display()))?;
    let report = Validator::new(config.validation.clone()).validate(&parsed.document);
    let summary = CheckSummary::new(path, parsed.diagnostics, report);

    let rendered = match format {
        CheckFormat::Text => summary.to_text(),
        CheckFormat::Json => serde_json::to_string_pretty(&summary)? + "\n",
    };
    emit(&rendered, output)?;
    Ok(summary.exit_code(config))
}
