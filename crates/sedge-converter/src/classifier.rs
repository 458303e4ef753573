//! Classification of the translation tool's output.
//!
//! The tool reports failures on standard output, in a legacy single-byte
//! codepage, and its exit code is not reliable. Any line containing
//! `error` (ASCII case-insensitive) marks the conversion as failed. Error
//! lines are decoded from the configured codepage before they are stored.

use encoding_rs::{Encoding, WINDOWS_1250};

use crate::error::ConversionError;

/// Marker that flags an output line as an error.
pub const ERROR_MARKER: &[u8] = b"error";

/// Detects and decodes error lines in captured tool output.
#[derive(Debug, Clone, Copy)]
pub struct OutputClassifier {
    encoding: &'static Encoding,
}

impl Default for OutputClassifier {
    fn default() -> Self {
        Self::new(WINDOWS_1250)
    }
}

impl OutputClassifier {
    /// Classifier decoding diagnostics from `encoding`.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// Classifier for a WHATWG encoding label such as `windows-1250`.
    pub fn from_label(label: &str) -> Result<Self, ConversionError> {
        Encoding::for_label(label.as_bytes())
            .map(Self::new)
            .ok_or_else(|| ConversionError::UnknownEncoding {
                label: label.to_string(),
            })
    }

    /// The source encoding of the tool's output.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Whether `line` contains the error marker.
    pub fn is_error_line(line: &[u8]) -> bool {
        line.windows(ERROR_MARKER.len())
            .any(|window| window.eq_ignore_ascii_case(ERROR_MARKER))
    }

    /// Decode one raw line into UTF-8.
    pub fn decode(&self, line: &[u8]) -> String {
        let (text, _) = self.encoding.decode_without_bom_handling(line);
        text.into_owned()
    }

    /// Decode every raw line.
    pub fn decode_all(&self, lines: &[Vec<u8>]) -> Vec<String> {
        lines.iter().map(|line| self.decode(line)).collect()
    }

    /// Decoded error lines, in output order.
    pub fn error_lines(&self, lines: &[Vec<u8>]) -> Vec<String> {
        lines
            .iter()
            .filter(|line| Self::is_error_line(line))
            .map(|line| self.decode(line))
            .collect()
    }
}
