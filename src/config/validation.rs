//! Configuration validation.

use super::types::{AppConfig, OutputConfig, ParserConfig, ValidationConfig};

/// Upper bound for a dedicated validation pool
const MAX_THREADS: usize = 1024;

// ============================================================================
// Configuration Error
// ============================================================================

/// A configuration value that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.parser.validate());
        errors.extend(self.validation.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ParserConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

impl Validatable for ValidationConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(threads) = self.threads {
            if threads == 0 || threads > MAX_THREADS {
                errors.push(ConfigError {
                    field: "validation.threads".to_string(),
                    message: format!("must be between 1 and {MAX_THREADS}, got {threads}"),
                });
            }
            if !self.parallel {
                errors.push(ConfigError {
                    field: "validation.threads".to_string(),
                    message: "has no effect unless validation.parallel is enabled".to_string(),
                });
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = AppConfig::builder().threads(0).build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "validation.threads");
    }

    #[test]
    fn test_threads_without_parallel_rejected() {
        let config = AppConfig::builder().parallel(false).threads(4).build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("parallel"));
    }
}
