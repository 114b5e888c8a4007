//! Named configuration presets.

use super::types::{AppConfig, OutputConfig, ParserConfig, ValidationConfig};

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets for common use cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Report everything, reject nothing at parse time
    Default,
    /// Reject any diagnostic or warning, check the license list
    Strict,
    /// Write documents as-is, without validation or deduplication
    Lenient,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" => Some(Self::Default),
            "strict" | "pedantic" => Some(Self::Strict),
            "lenient" | "permissive" => Some(Self::Lenient),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => "Report all problems; validate and deduplicate before writing",
            Self::Strict => "Fail on builder diagnostics and warnings; check the SPDX license list",
            Self::Lenient => "Write documents without validating or deduplicating them",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Strict, Self::Lenient]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Strict => Self {
                parser: ParserConfig {
                    fail_on_diagnostics: true,
                },
                validation: ValidationConfig {
                    check_license_list: true,
                    fail_on_warnings: true,
                    ..ValidationConfig::default()
                },
                output: OutputConfig::default(),
            },
            ConfigPreset::Lenient => Self {
                parser: ParserConfig::default(),
                validation: ValidationConfig::default(),
                output: OutputConfig {
                    validate: false,
                    drop_duplicates: false,
                    ..OutputConfig::default()
                },
            },
        }
    }
}
