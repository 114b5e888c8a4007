//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod check;
mod convert;

pub use check::{run_check, CheckSummary};
pub use convert::{run_dump, run_fmt};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Exit code for a clean run
pub const EXIT_OK: i32 = 0;
/// Exit code when the document has errors
pub const EXIT_ERRORS: i32 = 1;
/// Exit code when only warnings were found and warnings are fatal
pub const EXIT_WARNINGS: i32 = 2;

/// Output format for `check`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum CheckFormat {
    /// One line per problem
    #[default]
    Text,
    /// Structured JSON
    Json,
}

impl std::fmt::Display for CheckFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Write to a file, or to stdout when no path is given.
fn emit(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    use anyhow::Context as _;
    use std::io::Write as _;

    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("writing {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
