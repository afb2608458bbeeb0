//! Config command implementation.
//!
//! Shows and creates the pipeline configuration file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::{default_path, PipelineConfig};
use crate::error::CliError;
use crate::output::{print_header, print_info, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(ctx),
        ConfigCommand::Path => execute_path(ctx),
        ConfigCommand::Init(init_args) => execute_init(init_args, ctx),
    }
}

fn config_file(ctx: &Context) -> Result<PathBuf> {
    ctx.config_path
        .clone()
        .or_else(default_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(|| "-".to_string(), |p| p.display().to_string())
}

fn config_rows(config: &PipelineConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("input", display_path(config.input.as_ref())),
        KeyValue::new("output", display_path(config.output.as_ref())),
        KeyValue::new("weighting", config.weighting.code()),
        KeyValue::new("maturity_unit", config.maturity_unit.as_str()),
        KeyValue::new("layout", config.layout.as_str()),
        KeyValue::new("compression", config.compression.as_str()),
        KeyValue::new("parallel", config.parallel.to_string()),
        KeyValue::new("parallel_threshold", config.parallel_threshold.to_string()),
        KeyValue::new("notes_and_bonds_only", config.notes_and_bonds_only.to_string()),
    ]
}

/// Show current configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    let config = ctx.pipeline_config()?;

    match ctx.format {
        OutputFormat::Table => {
            if ctx.decorate() {
                print_header("Current Configuration");
            }
            print_output(&config_rows(&config), ctx.format)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Csv => {
            print_output(&config_rows(&config), ctx.format)?;
        }
        OutputFormat::Minimal => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(ctx: &Context) -> Result<()> {
    let path = config_file(ctx)?;
    if ctx.quiet || ctx.format != OutputFormat::Table {
        println!("{}", path.display());
        return Ok(());
    }

    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write a default configuration file.
fn execute_init(args: InitArgs, ctx: &Context) -> Result<()> {
    let path = config_file(ctx)?;
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path).into());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(CliError::from)?;
    }
    std::fs::write(&path, PipelineConfig::default().to_toml()?).map_err(CliError::from)?;
    tracing::debug!(path = %path.display(), "wrote default configuration");

    if !ctx.quiet {
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}
