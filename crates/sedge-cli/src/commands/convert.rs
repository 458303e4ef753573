//! Draft conversion command.

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::output::{self, OutputFormat};
use sedge_converter::{
    ColorDepth, ConversionError, ConversionOptions, ConversionReport, DraftConverter, Quality,
    Resolution, ToolDiscovery,
};
use sedge_core::config::{AppConfig, ConverterConfig};
use sedge_core::error::AppError;
use sedge_core::result::AppResult;

/// Arguments for the convert command
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Draft file to convert (.dft)
    pub input: PathBuf,

    /// File to write (.jpg or .pdf)
    pub output: PathBuf,

    /// Translation tool executable or install directory
    #[arg(long)]
    pub tool: Option<PathBuf>,

    /// Output width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Resolution in dpi (100, 200, 300, 600, 1200)
    #[arg(short, long)]
    pub resolution: Option<Resolution>,

    /// Color depth in bits (1, 8, 24)
    #[arg(long)]
    pub color_depth: Option<ColorDepth>,

    /// Image quality (low, medium, high)
    #[arg(short, long)]
    pub quality: Option<Quality>,

    /// Export every sheet
    #[arg(long, value_name = "BOOL")]
    pub multi_sheet: Option<bool>,

    /// Show the Solid Edge window while converting
    #[arg(long, value_name = "BOOL")]
    pub visible: Option<bool>,

    /// Print the command line instead of running it
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub yes: bool,
}

impl ConvertArgs {
    /// Options given on the command line.
    pub fn options(&self) -> ConversionOptions {
        ConversionOptions {
            tool_visible: self.visible,
            width: self.width,
            height: self.height,
            resolution: self.resolution,
            color_depth: self.color_depth,
            quality: self.quality,
            multi_sheet: self.multi_sheet,
        }
    }
}

/// Execute the convert command
pub async fn execute(
    args: &ConvertArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> AppResult<()> {
    let converter_config = resolve_tool(args.tool.as_deref(), &config.converter)?;

    let input = std::path::absolute(&args.input)?;
    let output = std::path::absolute(&args.output)?;

    let mut converter = DraftConverter::from_config(&converter_config)?;
    converter
        .from(&input)?
        .to(&output)?
        .options(&args.options());

    if args.dry_run {
        let command = converter.command_line()?;
        match format {
            OutputFormat::Table => println!("{command}"),
            OutputFormat::Json => output::print_json(command.tokens(), "[]"),
        }
        return Ok(());
    }

    if output.exists() && !args.yes && !confirm_overwrite(&output)? {
        println!("Cancelled.");
        return Ok(());
    }

    match converter.try_convert().await {
        Ok(report) => {
            print_report(&report, format);
            Ok(())
        }
        Err(ConversionError::ExternalToolReported { exit_code, lines }) => {
            for line in &lines {
                output::print_error(line);
            }
            Err(ConversionError::ExternalToolReported { exit_code, lines }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Settings with `tool_path` pointing at a located executable.
fn resolve_tool(
    explicit: Option<&Path>,
    converter: &ConverterConfig,
) -> AppResult<ConverterConfig> {
    let installation = match explicit {
        Some(path) => ToolDiscovery::from_explicit_path(path)?,
        None => ToolDiscovery::resolve(&converter.tool_path)?,
    };
    info!(
        tool = %installation.executable.display(),
        method = ?installation.discovery_method,
        "Using translation tool"
    );

    let mut resolved = converter.clone();
    resolved.tool_path = installation.executable;
    Ok(resolved)
}

fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!("'{}' already exists. Overwrite?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn print_report(report: &ConversionReport, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_success(&format!(
                "Converted to {}",
                report.output_path.display()
            ));
            output::print_kv("Format", report.output_format.as_str());
            output::print_kv("Exit Code", &report.exit_code.to_string());
            output::print_kv("Duration", &format!("{} ms", report.duration_ms));
            if report.exit_code != 0 {
                output::print_warning("The tool exited with a non-zero code but reported no error");
            }
            for line in &report.lines {
                println!("  | {line}");
            }
        }
        OutputFormat::Json => output::print_json(report, "{}"),
    }
}
