//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use sedge_core::config::AppConfig;
use sedge_core::error::AppError;
use sedge_core::result::AppResult;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate configuration
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Table => {
                let rendered = render_dotted(config);
                println!("{rendered}");
            }
            OutputFormat::Json => output::print_json(config, "{}"),
        },
        ConfigCommand::Validate => {
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            let tool = if config.converter.has_tool_path() {
                config.converter.tool_path.display().to_string()
            } else {
                "(auto-discover)".to_string()
            };
            output::print_kv("Tool", &tool);
            output::print_kv("Diagnostic Encoding", &config.converter.diagnostic_encoding);
            output::print_kv(
                "Logging",
                &format!("{} ({})", config.logging.level, config.logging.format),
            );
        }
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::internal(format!("Failed to create dir: {e}"))
                    })?;
                }
            }

            tokio::fs::write(out_path, default_config)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write config: {e}")))?;

            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}

/// Key/value listing of the effective configuration.
fn render_dotted(config: &AppConfig) -> String {
    let value = serde_json::to_value(config).unwrap_or_default();
    let mut lines = Vec::new();
    flatten("", &value, &mut lines);
    lines.join("\n")
}

fn flatten(prefix: &str, value: &serde_json::Value, lines: &mut Vec<String>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, lines);
            }
        }
        serde_json::Value::Null => lines.push(format!("{prefix} = (unset)")),
        other => lines.push(format!("{prefix} = {other}")),
    }
}
