//! Document validation.
//!
//! Walks a frozen [`Document`] and reports every rule violation as a
//! [`ValidationIssue`]. Validation never fails; callers decide what to do
//! with errors.
//!
//! Rules run in three groups:
//! - structural checks on the document header and creation info
//! - identifier checks over the whole id set (uniqueness, syntax, references)
//! - entity-local checks (format, license, enumeration), run per entity and
//!   optionally in parallel
//!
//! The report lists structural issues first, then identifier issues, then
//! entity-local issues in entity declaration order.

mod rules;

use crate::config::ValidationConfig;
use crate::model::Document;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Violates the SPDX structural rules
    Error,
    /// Legal but suspicious
    Warning,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Rule group an issue belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleCategory {
    Structural,
    Identifier,
    Format,
    License,
    Enumeration,
}

impl RuleCategory {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Identifier => "identifier",
            Self::Format => "format",
            Self::License => "license",
            Self::Enumeration => "enumeration",
        }
    }
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Entity path, e.g. `packages[0]`
    pub path: String,
    pub severity: Severity,
    pub rule: RuleCategory,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl fmt::Display, rule: RuleCategory, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            severity: Severity::Error,
            rule,
            message: message.into(),
        }
    }

    pub fn warning(path: impl fmt::Display, rule: RuleCategory, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            severity: Severity::Warning,
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}: {}",
            self.severity.as_str(),
            self.rule.name(),
            self.path,
            self.message
        )
    }
}

/// Result of validating a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// No error-severity issues
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Issues raised by one rule group
    #[must_use]
    pub fn issues_for(&self, rule: RuleCategory) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.rule == rule).collect()
    }

    /// Issues raised against one entity path
    #[must_use]
    pub fn issues_at(&self, path: &str) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.path == path).collect()
    }

    /// First error, if any
    #[must_use]
    pub fn first_error(&self) -> Option<&ValidationIssue> {
        self.issues.iter().find(|i| i.severity == Severity::Error)
    }
}

/// Validation engine
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    #[must_use]
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a document.
    #[must_use]
    pub fn validate(&self, document: &Document) -> ValidationReport {
        let keys = document.entity_keys();
        let run_parallel = || -> Vec<Vec<ValidationIssue>> {
            keys.par_iter()
                .map(|key| rules::entity_issues(document, *key, &self.config))
                .collect()
        };
        let local: Vec<Vec<ValidationIssue>> = if self.config.parallel {
            debug!(entities = keys.len(), "running entity rules in parallel");
            match self.config.threads.map(|n| {
                rayon::ThreadPoolBuilder::new().num_threads(n).build()
            }) {
                Some(Ok(pool)) => pool.install(run_parallel),
                Some(Err(e)) => {
                    warn!(error = %e, "could not build validation pool, using the global pool");
                    run_parallel()
                }
                None => run_parallel(),
            }
        } else {
            keys.iter()
                .map(|key| rules::entity_issues(document, *key, &self.config))
                .collect()
        };

        let mut issues = Vec::new();
        rules::structural(document, &mut issues);
        rules::identifiers(document, &mut issues);
        issues.extend(local.into_iter().flatten());

        let report = ValidationReport { issues };
        info!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            "validation finished"
        );
        report
    }
}

/// Validate with the default configuration
#[must_use]
pub fn validate(document: &Document) -> ValidationReport {
    Validator::default().validate(document)
}
