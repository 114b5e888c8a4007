//! Format and dump command handlers.

use super::{emit, EXIT_OK};
use crate::config::AppConfig;
use crate::parsers::parse_file;
use crate::properties::to_json;
use crate::writer::{write_document, WriteOptions};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the fmt command: parse, then write canonical tag-value.
pub fn run_fmt(input: &Path, config: &AppConfig, output: Option<&Path>) -> Result<i32> {
    let parsed = parse_file(input, &config.parser)?;
    let text = write_document(&parsed.document, &WriteOptions::from(config))
        .with_context(|| format!("writing {}", input.display()))?;
    emit(&text, output)?;
    Ok(EXIT_OK)
}

/// Run the dump command: parse, then print the property-layer JSON.
pub fn run_dump(input: &Path, config: &AppConfig, output: Option<&Path>) -> Result<i32> {
    let parsed = parse_file(input, &config.parser)?;
    let json = serde_json::to_string_pretty(&to_json(&parsed.document))?;
    emit(&(json + "\n"), output)?;
    Ok(EXIT_OK)
}
