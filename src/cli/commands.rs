use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::info;

use crate::generator::{generate_from_config, write_starter_config, GenerateOptions};
use crate::logging::{init_logging, LogConfig};
use crate::model::{load_project, ProjectKind};
use crate::validate::{print_report, validate_project};

/// Command-line interface for validagen
///
/// Generates validator source code from a declarative rule configuration.
#[derive(Parser)]
#[command(name = "validagen", version)]
#[command(about = "Generate validators from a declarative rule file", long_about = None)]
pub struct Cli {
    /// Output log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub loglevel: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available validagen commands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate validators from a configuration file
    Generate {
        /// Path to the validator configuration (TOML, YAML or JSON)
        config: PathBuf,

        /// Filepath of a template to generate validators with
        #[arg(short, long)]
        template: Option<String>,

        /// Show what would be written without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Validate a configuration file without generating anything
    Check {
        /// Path to the validator configuration (TOML, YAML or JSON)
        config: PathBuf,
    },
    /// Write a starter configuration file
    Init {
        /// Package the starter validator belongs to
        #[arg(short, long)]
        package: String,

        /// Where to write the configuration
        #[arg(short, long, default_value = "validators.toml")]
        output: PathBuf,

        /// Project type of the starter configuration
        #[arg(long, value_enum, default_value_t = KindArg::Struct)]
        kind: KindArg,

        /// Overwrite an existing file
        #[arg(short, long, default_value_t = false)]
        force: bool,
    },
}

/// Project type accepted by `init --kind`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Struct,
    Map,
}

impl From<KindArg> for ProjectKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Struct => ProjectKind::Struct,
            KindArg::Map => ProjectKind::Map,
        }
    }
}

/// Parse arguments, set up logging and run the selected command.
///
/// # Errors
///
/// Returns an error if logging cannot be initialized or the command fails.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_env(&cli.loglevel))?;
    run_command(&cli.command)
}

/// Execute one command.
///
/// # Errors
///
/// - `generate`: any decode, validation, template, render or IO failure
/// - `check`: the configuration cannot be decoded or has error-level issues
/// - `init`: the package name is invalid or the file cannot be written
pub fn run_command(command: &Commands) -> anyhow::Result<()> {
    match command {
        Commands::Generate {
            config,
            template,
            dry_run,
        } => {
            let options = GenerateOptions {
                template: template.clone(),
                dry_run: *dry_run,
            };
            let files = generate_from_config(config, &options)
                .with_context(|| format!("generate failed for {}", config.display()))?;
            info!(count = files.len(), dry_run = *dry_run, "generation finished");
            Ok(())
        }
        Commands::Check { config } => {
            let project = load_project(config)?;
            let report = validate_project(&project);
            print_report(&report);
            if report.has_errors() {
                anyhow::bail!(
                    "{} has {} error(s)",
                    config.display(),
                    report.errors().count()
                );
            }
            Ok(())
        }
        Commands::Init {
            package,
            output,
            kind,
            force,
        } => {
            if !write_starter_config(output, package, (*kind).into(), *force)? {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                );
            }
            Ok(())
        }
    }
}
