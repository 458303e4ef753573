//! Unified error type for the draft converter.
//!
//! Validation failures are raised by the setter that detects them. The
//! tool's own failures are detected after it exits by scanning its output.

use sedge_core::error::AppError;
use std::path::PathBuf;
use thiserror::Error;

use crate::process::ProcessError;

/// Error type for all conversion operations.
#[derive(Debug, Error)]
pub enum ConversionError {
    // --- Tool errors ---
    /// The tool path does not exist or is not an executable.
    #[error("Invalid translation tool path: \"{}\"", .path.display())]
    InvalidToolPath {
        /// The rejected path.
        path: PathBuf,
    },

    /// `convert` was called before a tool path was set.
    #[error("Translation tool path has not been set")]
    ToolPathNotSet,

    // --- Input errors ---
    /// The input file does not exist.
    #[error("Input file not found: {}", .path.display())]
    InputNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The input extension is not a recognized draft type.
    #[error("Input file must be one of the following types: {allowed}")]
    UnsupportedInputType {
        /// The rejected path.
        path: PathBuf,
        /// Comma-separated list of accepted extensions.
        allowed: String,
    },

    /// `convert` was called before an input file was set.
    #[error("Input file has not been set")]
    MissingInput,

    // --- Output errors ---
    /// No ancestor directory of the output path is writable.
    #[error("No writable directory for output path: {}", .path.display())]
    OutputPathNotWritable {
        /// The rejected path.
        path: PathBuf,
    },

    /// The output extension is not a supported target format.
    #[error("Output file must be one of the following types: {allowed}")]
    UnsupportedOutputType {
        /// The rejected path.
        path: PathBuf,
        /// Comma-separated list of accepted extensions.
        allowed: String,
    },

    /// `convert` was called before an output file was set.
    #[error("Output file has not been set")]
    MissingOutput,

    // --- Option errors ---
    /// A value outside an enumerated option set.
    #[error("Unsupported {option} value '{value}', expected one of: {allowed}")]
    UnsupportedOption {
        /// Option name.
        option: &'static str,
        /// The rejected value.
        value: String,
        /// Comma-separated list of accepted values.
        allowed: String,
    },

    /// The diagnostic encoding label is unknown.
    #[error("Unknown diagnostic encoding: {label}")]
    UnknownEncoding {
        /// The rejected label.
        label: String,
    },

    // --- Execution errors ---
    /// The tool printed one or more error lines.
    #[error(
        "Translation tool reported {} error(s) (exit code {exit_code}): {}",
        .lines.len(),
        .lines.join("; ")
    )]
    ExternalToolReported {
        /// Exit code of the tool process.
        exit_code: i32,
        /// Every decoded error line, in output order.
        lines: Vec<String>,
    },

    /// The tool process could not be run.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl ConversionError {
    /// Decoded error lines, if the tool reported any.
    pub fn tool_errors(&self) -> &[String] {
        match self {
            ConversionError::ExternalToolReported { lines, .. } => lines,
            _ => &[],
        }
    }
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match &err {
            ConversionError::InvalidToolPath { .. } | ConversionError::ToolPathNotSet => {
                AppError::configuration(err.to_string())
            }
            ConversionError::InputNotFound { .. } => AppError::not_found(err.to_string()),
            ConversionError::OutputPathNotWritable { .. } => {
                AppError::permission_denied(err.to_string())
            }
            ConversionError::UnsupportedInputType { .. }
            | ConversionError::UnsupportedOutputType { .. }
            | ConversionError::UnsupportedOption { .. }
            | ConversionError::MissingInput
            | ConversionError::MissingOutput => AppError::validation(err.to_string()),
            ConversionError::UnknownEncoding { .. } => AppError::configuration(err.to_string()),
            ConversionError::ExternalToolReported { .. } => {
                AppError::external_service(err.to_string())
            }
            ConversionError::Process(_) => AppError::internal(err.to_string()),
        }
    }
}
