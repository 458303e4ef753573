//! CLI command definitions and dispatch.

pub mod config;
pub mod convert;
pub mod probe;
pub mod tool;

use std::path::Path;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use sedge_core::config::AppConfig;
use sedge_core::result::AppResult;

/// Environment variable naming an optional overlay profile.
pub const PROFILE_ENV: &str = "SEDGE_ENV";

/// Sedge: convert Solid Edge drafts to JPEG images or PDF documents
#[derive(Debug, Parser)]
#[command(name = "sedge", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a draft to JPEG or PDF
    Convert(convert::ConvertArgs),
    /// Report the filesystem checks applied to paths
    Probe(probe::ProbeArgs),
    /// Translation tool management
    Tool(tool::ToolArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, app_config: AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Convert(args) => convert::execute(args, &app_config, self.format).await,
            Commands::Probe(args) => probe::execute(args, self.format),
            Commands::Tool(args) => tool::execute(args, &app_config, self.format),
            Commands::Config(args) => {
                config::execute(args, &app_config, &self.config, self.format).await
            }
        }
    }
}

/// Load configuration from `config_path`, then overlay `config/<profile>.toml`
/// when `SEDGE_ENV` names a profile whose file exists.
pub fn load_config(config_path: &str) -> AppResult<AppConfig> {
    let mut config = AppConfig::load(config_path)?;

    if let Ok(profile) = std::env::var(PROFILE_ENV) {
        let profile_path = format!("config/{profile}.toml");
        if Path::new(&profile_path).exists() {
            let profile_config = AppConfig::load(&profile_path)?;
            config.merge(profile_config);
        }
    }

    Ok(config)
}
