//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::ConfigPreset;
use super::types::{AppConfig, ConfigOverrides};
use crate::error::SpdxError;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".spdx-tagvalue.yaml",
    ".spdx-tagvalue.yml",
    "spdx-tagvalue.yaml",
    "spdx-tagvalue.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/spdx-tagvalue/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let cwd = std::env::current_dir().ok();
    let candidates = cwd
        .iter()
        .cloned()
        .chain(cwd.as_deref().and_then(find_git_root))
        .chain(dirs::config_dir().map(|dir| dir.join("spdx-tagvalue")))
        .chain(dirs::home_dir());

    for dir in candidates {
        if let Some(path) = find_config_in_dir(&dir) {
            return Some(path);
        }
    }
    None
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Walk up from `start` to the nearest directory holding `.git`.
fn find_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<ConfigFileError> for SpdxError {
    fn from(err: ConfigFileError) -> Self {
        Self::config(err.to_string())
    }
}

/// Read a YAML file as an override layer; keys it leaves out stay unset.
pub fn load_overrides_file(path: &Path) -> Result<ConfigOverrides, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file overrides nothing
    if content.trim().is_empty() {
        return Ok(ConfigOverrides::default());
    }
    let overrides: ConfigOverrides = serde_yaml::from_str(&content)?;
    Ok(overrides)
}

/// Load an `AppConfig` from a YAML file, over the defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    load_overrides_file(path).map(|overrides| AppConfig::default().with_overrides(&overrides))
}

/// Overrides from the discovered file, or none.
#[must_use]
pub fn load_overrides_or_empty(
    explicit_path: Option<&Path>,
) -> (ConfigOverrides, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (ConfigOverrides::default(), None),
        |path| match load_overrides_file(&path) {
            Ok(overrides) => {
                tracing::debug!("Loaded config from {}", path.display());
                (overrides, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (ConfigOverrides::default(), None)
            }
        },
    )
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    let (overrides, loaded_from) = load_overrides_or_empty(explicit_path);
    (AppConfig::default().with_overrides(&overrides), loaded_from)
}

// ============================================================================
// Configuration Layering
// ============================================================================

impl AppConfig {
    /// Preset, then the discovered config file, then CLI overrides; each
    /// layer wins over the one before for the values it sets.
    #[must_use]
    pub fn from_file_with_overrides(
        preset: ConfigPreset,
        config_path: Option<&Path>,
        cli_overrides: &ConfigOverrides,
    ) -> (Self, Option<PathBuf>) {
        let (file_overrides, loaded_from) = load_overrides_or_empty(config_path);
        let config = Self::from_preset(preset)
            .with_overrides(&file_overrides)
            .with_overrides(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# spdx-tagvalue configuration
# Place this file at .spdx-tagvalue.yaml in your project root or ~/.config/spdx-tagvalue/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".spdx-tagvalue.yaml");
        std::fs::write(&config_path, "parser:\n  fail_on_diagnostics: true\n").unwrap();

        let found = find_config_in_dir(tmp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_find_git_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_git_root(&nested), Some(tmp.path().to_path_buf()));
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");

        let yaml = r"
validation:
  parallel: false
  check_license_list: true
output:
  drop_duplicates: false
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert!(!config.validation.parallel);
        assert!(config.validation.check_license_list);
        assert!(!config.output.drop_duplicates);
        assert!(config.output.validate);
    }

    #[test]
    fn test_load_empty_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("empty.yaml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(load_config_file(&config_path).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("bad.yaml");
        std::fs::write(&config_path, "validation:\n  parallel: [1, 2\n").unwrap();

        let err = load_config_file(&config_path).unwrap_err();
        assert!(matches!(err, ConfigFileError::Parse(_)));
        let spdx: SpdxError = err.into();
        assert!(matches!(spdx, SpdxError::Config(_)));
    }

    #[test]
    fn test_overrides_file_keeps_explicit_false() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "parser:\n  fail_on_diagnostics: false\nvalidation:\n  check_license_list: false\n",
        )
        .unwrap();

        let overrides = load_overrides_file(&config_path).unwrap();
        assert_eq!(overrides.parser.fail_on_diagnostics, Some(false));
        assert_eq!(overrides.validation.check_license_list, Some(false));
        assert_eq!(overrides.validation.fail_on_warnings, None);
        assert_eq!(overrides.output.validate, None);
    }

    #[test]
    fn test_file_switches_off_preset_values() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(
            &config_path,
            "parser:\n  fail_on_diagnostics: false\nvalidation:\n  check_license_list: false\n  fail_on_warnings: false\n",
        )
        .unwrap();

        let (config, loaded_from) = AppConfig::from_file_with_overrides(
            ConfigPreset::Strict,
            Some(&config_path),
            &ConfigOverrides::default(),
        );

        assert_eq!(loaded_from, Some(config_path));
        assert!(!config.parser.fail_on_diagnostics);
        assert!(!config.validation.check_license_list);
        assert!(!config.validation.fail_on_warnings);
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "output:\n  validate: false\n  drop_duplicates: false\n")
            .unwrap();

        let mut cli = ConfigOverrides::default();
        cli.output.validate = Some(true);
        let (config, _) =
            AppConfig::from_file_with_overrides(ConfigPreset::Default, Some(&config_path), &cli);

        assert!(config.output.validate);
        assert!(!config.output.drop_duplicates);
        assert!(config.output.section_comments);
    }

    #[test]
    fn test_generate_example_config() {
        let example = generate_example_config();
        assert!(example.contains("validation:"));
        assert!(example.contains("drop_duplicates"));

        let body: String = example
            .lines()
            .filter(|line| !line.starts_with('#'))
            .collect::<Vec<_>>()
            .join("\n");
        let parsed: AppConfig = serde_yaml::from_str(&body).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "output:\n  validate: false").unwrap();

        let discovered = discover_config_file(Some(&config_path));
        assert_eq!(discovered, Some(config_path));
    }
}
