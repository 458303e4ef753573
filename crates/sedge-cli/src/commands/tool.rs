//! Translation tool commands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use sedge_converter::{ToolDiscovery, ToolInstallation};
use sedge_core::config::AppConfig;
use sedge_core::result::AppResult;

/// Arguments for tool commands
#[derive(Debug, Args)]
pub struct ToolArgs {
    /// Tool subcommand
    #[command(subcommand)]
    pub command: ToolCommand,
}

/// Tool subcommands
#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// Locate SolidEdgeTranslationServices.exe
    Locate {
        /// Executable or install directory to check instead of the configured one
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

/// Execute tool commands
pub fn execute(args: &ToolArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        ToolCommand::Locate { path } => {
            let installation = match path {
                Some(path) => ToolDiscovery::from_explicit_path(path)?,
                None => ToolDiscovery::resolve(&config.converter.tool_path)?,
            };
            print_installation(&installation, format);
        }
    }

    Ok(())
}

fn print_installation(installation: &ToolInstallation, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Found {}", ToolDiscovery::executable_name()));
            output::print_kv("Executable", &installation.executable.display().to_string());
            output::print_kv("Found Via", &format!("{:?}", installation.discovery_method));
        }
        OutputFormat::Json => output::print_json(installation, "{}"),
    }
}
