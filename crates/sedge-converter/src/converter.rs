//! Fluent builder that validates a draft conversion and runs it.
//!
//! Every setter that touches the filesystem validates eagerly and fails
//! at the call that detects the problem. Option setters only record a
//! value. `convert` re-checks the tool path, assembles the command line,
//! runs it and scans the output for error lines.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::field::{Empty, display};
use tracing::{debug, error, info, instrument, warn};

use sedge_core::config::ConverterConfig;

use crate::classifier::OutputClassifier;
use crate::command::CommandLine;
use crate::error::ConversionError;
use crate::filesystem::FsProbe;
use crate::options::{
    ColorDepth, ConversionOptions, INPUT_EXTENSIONS, OutputFormat, Quality, Resolution,
    TOOL_EXTENSION, is_input_extension,
};
use crate::process::{ProcessRunner, ShellRunner};

/// Outcome of a conversion the tool did not flag as failed.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Path the tool was asked to write.
    pub output_path: PathBuf,
    /// Target format.
    pub output_format: OutputFormat,
    /// Tool exit code. Text scanning decides success, not this value.
    pub exit_code: i32,
    /// Decoded standard output lines.
    pub lines: Vec<String>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Builder for one Solid Edge draft conversion.
#[derive(Debug)]
pub struct DraftConverter<R = ShellRunner> {
    runner: R,
    classifier: OutputClassifier,
    tool_path: Option<PathBuf>,
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    output_format: Option<OutputFormat>,
    options: ConversionOptions,
    errors: Vec<String>,
    last_exit_code: Option<i32>,
}

impl DraftConverter<ShellRunner> {
    /// Converter that runs the tool through the platform shell.
    pub fn new() -> Self {
        Self::with_runner(ShellRunner::new())
    }

    /// Converter configured from settings: classifier encoding, default
    /// options and, when set, the tool path.
    pub fn from_config(config: &ConverterConfig) -> Result<Self, ConversionError> {
        let mut converter = Self::new()
            .with_classifier(OutputClassifier::from_label(&config.diagnostic_encoding)?);
        converter.options(&ConversionOptions::from_defaults(&config.defaults)?);
        if config.has_tool_path() {
            converter.set_tool_path(&config.tool_path)?;
        }
        Ok(converter)
    }
}

impl Default for DraftConverter<ShellRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> DraftConverter<R> {
    /// Converter that runs the tool through `runner`.
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            classifier: OutputClassifier::default(),
            tool_path: None,
            input_path: None,
            output_path: None,
            output_format: None,
            options: ConversionOptions::default(),
            errors: Vec::new(),
            last_exit_code: None,
        }
    }

    /// Replace the output classifier.
    pub fn with_classifier(mut self, classifier: OutputClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Set the translation tool executable.
    ///
    /// Fails with [`ConversionError::InvalidToolPath`] unless the file
    /// exists and has the `.exe` extension.
    pub fn set_tool_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ConversionError> {
        let path = path.as_ref();
        if !Self::is_valid_tool(path) {
            warn!(path = %path.display(), "Rejected translation tool path");
            return Err(ConversionError::InvalidToolPath {
                path: path.to_path_buf(),
            });
        }
        self.tool_path = Some(path.to_path_buf());
        Ok(self)
    }

    /// Set the draft to convert.
    pub fn from(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ConversionError> {
        let path = path.as_ref();
        if !FsProbe::file_exists(path) {
            return Err(ConversionError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let allowed = FsProbe::extension(path).is_some_and(|ext| is_input_extension(&ext));
        if !allowed {
            return Err(ConversionError::UnsupportedInputType {
                path: path.to_path_buf(),
                allowed: INPUT_EXTENSIONS.join(", "),
            });
        }
        debug!(path = %path.display(), "Input accepted");
        self.input_path = Some(path.to_path_buf());
        Ok(self)
    }

    /// Set the file to produce. The output format follows its extension.
    ///
    /// The extension must name a supported format. The file and its
    /// directory need not exist yet, but some ancestor directory below the
    /// filesystem root must be writable.
    pub fn to(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ConversionError> {
        let path = path.as_ref();
        let format = FsProbe::extension(path)
            .and_then(|ext| OutputFormat::from_extension(&ext))
            .ok_or_else(|| ConversionError::UnsupportedOutputType {
                path: path.to_path_buf(),
                allowed: OutputFormat::allowed(),
            })?;
        if !FsProbe::is_writable_any_dir(path) {
            return Err(ConversionError::OutputPathNotWritable {
                path: path.to_path_buf(),
            });
        }
        debug!(path = %path.display(), %format, "Output accepted");
        self.output_path = Some(path.to_path_buf());
        self.output_format = Some(format);
        Ok(self)
    }

    /// Output width in pixels.
    pub fn width(&mut self, width: u32) -> &mut Self {
        self.options.width = Some(width);
        self
    }

    /// Output height in pixels.
    pub fn height(&mut self, height: u32) -> &mut Self {
        self.options.height = Some(height);
        self
    }

    /// Output resolution.
    pub fn resolution(&mut self, resolution: Resolution) -> &mut Self {
        self.options.resolution = Some(resolution);
        self
    }

    /// Output color depth.
    pub fn color_depth(&mut self, depth: ColorDepth) -> &mut Self {
        self.options.color_depth = Some(depth);
        self
    }

    /// Image quality.
    pub fn quality(&mut self, quality: Quality) -> &mut Self {
        self.options.quality = Some(quality);
        self
    }

    /// Export every sheet of the draft rather than only the active one.
    pub fn multi_sheet(&mut self, multi: bool) -> &mut Self {
        self.options.multi_sheet = Some(multi);
        self
    }

    /// Show the Solid Edge window while converting.
    pub fn tool_visible(&mut self, visible: bool) -> &mut Self {
        self.options.tool_visible = Some(visible);
        self
    }

    /// Apply every option set in `options`, keeping the others.
    pub fn options(&mut self, options: &ConversionOptions) -> &mut Self {
        self.options.overlay(options);
        self
    }

    /// The configured tool path.
    pub fn tool_path(&self) -> Option<&Path> {
        self.tool_path.as_deref()
    }

    /// The accepted input path.
    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    /// The accepted output path.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// The format derived from the output path.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output_format
    }

    /// Options recorded so far.
    pub fn current_options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Decoded error lines from the most recent conversion.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Exit code of the most recent conversion, if the tool ran.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit_code
    }

    /// Assemble the command line without running it.
    pub fn command_line(&self) -> Result<CommandLine, ConversionError> {
        let tool = self.tool_path.as_deref().ok_or(ConversionError::ToolPathNotSet)?;
        let input = self.input_path.as_deref().ok_or(ConversionError::MissingInput)?;
        let (output, format) = match (self.output_path.as_deref(), self.output_format) {
            (Some(output), Some(format)) => (output, format),
            _ => return Err(ConversionError::MissingOutput),
        };

        let command = CommandLine::build(tool, input, output, format, &self.options);
        debug!(tokens = command.len(), command = %command, "Assembled command line");
        Ok(command)
    }

    /// Run the conversion and report whether the tool flagged an error.
    ///
    /// Returns `Ok(false)` when the output contained error lines; they are
    /// available from [`errors`](Self::errors). Validation and process
    /// failures are returned as `Err`.
    pub async fn convert(&mut self) -> Result<bool, ConversionError> {
        match self.try_convert().await {
            Ok(_) => Ok(true),
            Err(ConversionError::ExternalToolReported { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Run the conversion, returning a report or
    /// [`ConversionError::ExternalToolReported`] with every error line.
    #[instrument(skip(self), fields(input = Empty, output = Empty))]
    pub async fn try_convert(&mut self) -> Result<ConversionReport, ConversionError> {
        self.errors.clear();
        self.last_exit_code = None;

        let tool = self.tool_path.as_deref().ok_or(ConversionError::ToolPathNotSet)?;
        if !FsProbe::file_exists(tool) {
            return Err(ConversionError::InvalidToolPath {
                path: tool.to_path_buf(),
            });
        }

        let command = self.command_line()?;
        let span = tracing::Span::current();
        if let Some(input) = &self.input_path {
            span.record("input", display(input.display()));
        }
        if let Some(output) = &self.output_path {
            span.record("output", display(output.display()));
        }

        info!("Starting draft conversion");
        let result = self.runner.run(&command).await?;
        self.last_exit_code = Some(result.exit_code);

        self.errors = self.classifier.error_lines(&result.stdout);

        if !self.errors.is_empty() {
            error!(
                exit_code = result.exit_code,
                errors = ?self.errors,
                "Translation tool reported errors"
            );
            return Err(ConversionError::ExternalToolReported {
                exit_code: result.exit_code,
                lines: self.errors.clone(),
            });
        }

        if !result.is_successful() {
            warn!(
                exit_code = result.exit_code,
                "Translation tool exited with non-zero code but reported no error lines"
            );
        }

        info!(
            exit_code = result.exit_code,
            duration_ms = result.duration_ms,
            "Draft conversion completed"
        );

        Ok(ConversionReport {
            output_path: self.output_path.clone().ok_or(ConversionError::MissingOutput)?,
            output_format: self.output_format.ok_or(ConversionError::MissingOutput)?,
            exit_code: result.exit_code,
            lines: self.classifier.decode_all(&result.stdout),
            duration_ms: result.duration_ms,
        })
    }

    fn is_valid_tool(path: &Path) -> bool {
        FsProbe::file_exists(path)
            && FsProbe::extension(path).as_deref() == Some(TOOL_EXTENSION)
    }
}
