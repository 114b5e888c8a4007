//! Configuration types for spdx-tagvalue.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loadable from `.spdx-tagvalue.yaml`.
///
/// Every section is optional in the file; missing sections take their
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Tag-value reading
    pub parser: ParserConfig,
    /// Document validation
    pub validation: ValidationConfig,
    /// Tag-value writing
    pub output: OutputConfig,
}

impl AppConfig {
    /// Create an `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Fluent builder for [`AppConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Reject documents that produced builder diagnostics.
    pub const fn fail_on_diagnostics(mut self, enabled: bool) -> Self {
        self.config.parser.fail_on_diagnostics = enabled;
        self
    }

    /// Run entity rules on the rayon pool.
    pub const fn parallel(mut self, enabled: bool) -> Self {
        self.config.validation.parallel = enabled;
        self
    }

    /// Size of a dedicated validation thread pool.
    pub const fn threads(mut self, threads: usize) -> Self {
        self.config.validation.threads = Some(threads);
        self
    }

    /// Warn about ids missing from the SPDX license list.
    pub const fn check_license_list(mut self, enabled: bool) -> Self {
        self.config.validation.check_license_list = enabled;
        self
    }

    /// Treat warnings as failures in `check`.
    pub const fn fail_on_warnings(mut self, enabled: bool) -> Self {
        self.config.validation.fail_on_warnings = enabled;
        self
    }

    /// Validate before writing.
    pub const fn validate_output(mut self, enabled: bool) -> Self {
        self.config.output.validate = enabled;
        self
    }

    /// Collapse property-equal duplicates before writing.
    pub const fn drop_duplicates(mut self, enabled: bool) -> Self {
        self.config.output.drop_duplicates = enabled;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Section configs
// ============================================================================

/// Tag-value reading options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParserConfig {
    /// Fail the parse when the builder recorded any diagnostic
    pub fail_on_diagnostics: bool,
}

/// Validation options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ValidationConfig {
    /// Run entity-local rules in parallel
    pub parallel: bool,
    /// Dedicated thread count for parallel validation (global pool when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Warn about license and exception ids not on the SPDX license list
    pub check_license_list: bool,
    /// Treat warnings as failures in the `check` command
    pub fail_on_warnings: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
            check_license_list: false,
            fail_on_warnings: false,
        }
    }
}

/// Tag-value writing options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Validate the document first and refuse to write one with errors
    pub validate: bool,
    /// Collapse entities with the same id and equal properties
    pub drop_duplicates: bool,
    /// Emit `## Section` comment lines between sections
    pub section_comments: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            validate: true,
            drop_duplicates: true,
            section_comments: true,
        }
    }
}

// ============================================================================
// Overrides
// ============================================================================

/// A partial configuration layered over an [`AppConfig`].
///
/// Config files and CLI flags are read into this shape, so a value that is
/// spelled out (even `false`) wins over the layer below it and a value left
/// out keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConfigOverrides {
    pub parser: ParserOverrides,
    pub validation: ValidationOverrides,
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ParserOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_diagnostics: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ValidationOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_license_list: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fail_on_warnings: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_duplicates: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_comments: Option<bool>,
}

impl ConfigOverrides {
    /// True when nothing is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl AppConfig {
    /// Layer `overrides` over this config; only values that are set apply.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        fn set<T: Copy>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        set(
            &mut self.parser.fail_on_diagnostics,
            overrides.parser.fail_on_diagnostics,
        );

        let validation = &overrides.validation;
        set(&mut self.validation.parallel, validation.parallel);
        if validation.threads.is_some() {
            self.validation.threads = validation.threads;
        }
        set(
            &mut self.validation.check_license_list,
            validation.check_license_list,
        );
        set(&mut self.validation.fail_on_warnings, validation.fail_on_warnings);

        let output = &overrides.output;
        set(&mut self.output.validate, output.validate);
        set(&mut self.output.drop_duplicates, output.drop_duplicates);
        set(&mut self.output.section_comments, output.section_comments);
    }

    /// This config with `overrides` layered on top.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        self.apply(overrides);
        self
    }
}

impl From<&AppConfig> for ConfigOverrides {
    /// Every value set, so applying it reproduces `config` exactly.
    fn from(config: &AppConfig) -> Self {
        Self {
            parser: ParserOverrides {
                fail_on_diagnostics: Some(config.parser.fail_on_diagnostics),
            },
            validation: ValidationOverrides {
                parallel: Some(config.validation.parallel),
                threads: config.validation.threads,
                check_license_list: Some(config.validation.check_license_list),
                fail_on_warnings: Some(config.validation.fail_on_warnings),
            },
            output: OutputOverrides {
                validate: Some(config.output.validate),
                drop_duplicates: Some(config.output.drop_duplicates),
                section_comments: Some(config.output.section_comments),
            },
        }
    }
}
