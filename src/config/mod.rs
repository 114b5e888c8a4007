//! Configuration module for spdx-tagvalue.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for common use cases
//! - YAML config file loading and discovery
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use spdx_tagvalue::config::{AppConfig, ConfigPreset};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Strict);
//!
//! let config = AppConfig::builder()
//!     .parallel(false)
//!     .drop_duplicates(false)
//!     .build();
//!
//! use spdx_tagvalue::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.spdx-tagvalue.yaml` file in your project root or
//! `~/.config/spdx-tagvalue/`. Keys it sets override the preset; keys it
//! leaves out keep the preset's value.
//!
//! ```yaml
//! parser:
//!   fail_on_diagnostics: true
//! validation:
//!   check_license_list: true
//! output:
//!   drop_duplicates: false
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::ConfigPreset;
pub use types::{
    AppConfig, AppConfigBuilder, ConfigOverrides, OutputConfig, OutputOverrides, ParserConfig,
    ParserOverrides, ValidationConfig, ValidationOverrides,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    load_overrides_file, load_overrides_or_empty, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete `.spdx-tagvalue.yaml` files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
