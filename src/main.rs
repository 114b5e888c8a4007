//! spdx-tagvalue: check, reformat and inspect SPDX tag-value documents.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use spdx_tagvalue::{
    cli::{run_check, run_dump, run_fmt, CheckFormat, EXIT_OK},
    config::{generate_example_config, generate_json_schema},
    AppConfig, ConfigOverrides, ConfigPreset, Validatable,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spdx-tagvalue")]
#[command(version)]
#[command(about = "Parse, validate and write SPDX tag-value documents", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Document is valid
    1  Validation errors (or builder diagnostics with fail_on_diagnostics)
    2  Warnings only, with fail_on_warnings
    3  Error occurred

EXAMPLES:
    # Validate a document
    spdx-tagvalue check sbom.spdx

    # Rewrite in canonical form, rejecting invalid documents
    spdx-tagvalue fmt sbom.spdx -o sbom.canonical.spdx

    # Inspect the parsed document as JSON
    spdx-tagvalue dump sbom.spdx")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Configuration preset (default, strict, lenient)
    #[arg(long, global = true)]
    preset: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a document
    Check {
        /// Tag-value document
        input: PathBuf,

        /// Report format
        #[arg(short, long, default_value = "text")]
        format: CheckFormat,

        /// Report file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Warn about ids not on the SPDX license list
        #[arg(long)]
        check_license_list: bool,

        /// Exit with code 2 on warnings
        #[arg(long)]
        fail_on_warnings: bool,

        /// Validate entities sequentially
        #[arg(long)]
        sequential: bool,
    },

    /// Rewrite a document as canonical tag-value
    Fmt {
        /// Tag-value document
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write without validating first
        #[arg(long)]
        no_validate: bool,

        /// Keep property-equal duplicates
        #[arg(long)]
        keep_duplicates: bool,
    },

    /// Print the parsed document as JSON
    Dump {
        /// Tag-value document
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the configuration file JSON schema
    ConfigSchema,

    /// Print an example configuration file
    ConfigExample,
}

fn main() {
    let code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            3
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let overrides = command_overrides(&cli.command);
    let config = load_config(&cli, &overrides)?;

    match cli.command {
        Commands::Check {
            input,
            format,
            output,
            ..
        } => run_check(&input, &config, format, output.as_deref()),
        Commands::Fmt { input, output, .. } => run_fmt(&input, &config, output.as_deref()),
        Commands::Dump { input, output } => run_dump(&input, &config, output.as_deref()),
        Commands::ConfigSchema => {
            println!("{}", generate_json_schema());
            Ok(EXIT_OK)
        }
        Commands::ConfigExample => {
            print!("{}", generate_example_config());
            Ok(EXIT_OK)
        }
    }
}

/// Flags given on the command line; flags left off override nothing.
fn command_overrides(command: &Commands) -> ConfigOverrides {
    let mut overrides = ConfigOverrides::default();
    match command {
        Commands::Check {
            check_license_list,
            fail_on_warnings,
            sequential,
            ..
        } => {
            let validation = &mut overrides.validation;
            validation.check_license_list = check_license_list.then_some(true);
            validation.fail_on_warnings = fail_on_warnings.then_some(true);
            validation.parallel = sequential.then_some(false);
        }
        Commands::Fmt {
            no_validate,
            keep_duplicates,
            ..
        } => {
            overrides.output.validate = no_validate.then_some(false);
            overrides.output.drop_duplicates = keep_duplicates.then_some(false);
        }
        _ => {}
    }
    overrides
}

/// Preset, then config file, then command-line flags, checked for invalid
/// values.
fn load_config(cli: &Cli, overrides: &ConfigOverrides) -> Result<AppConfig> {
    let preset = match &cli.preset {
        Some(name) => {
            let Some(preset) = ConfigPreset::from_name(name) else {
                let known: Vec<&str> = ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                bail!("unknown preset '{name}'; expected one of: {}", known.join(", "));
            };
            preset
        }
        None => ConfigPreset::Default,
    };

    let (config, loaded_from) =
        AppConfig::from_file_with_overrides(preset, cli.config.as_deref(), overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("using config {}", path.display());
    }

    let errors = config.validate();
    if let Some(first) = errors.first() {
        bail!("invalid configuration ({} problem(s)): {first}", errors.len());
    }
    Ok(config)
}
