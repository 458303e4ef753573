//! Command line assembled for the translation tool.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::options::{ConversionOptions, OutputFormat};

/// Ordered tokens of a translation tool invocation.
///
/// Tokens are pre-quoted and joined with single spaces when executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    /// Assemble `"tool" -i="in" -o="out" -t=fmt` followed by every set option.
    pub fn build(
        tool: &Path,
        input: &Path,
        output: &Path,
        format: OutputFormat,
        options: &ConversionOptions,
    ) -> Self {
        let mut tokens = vec![
            format!("\"{}\"", tool.display()),
            format!("-i=\"{}\"", input.display()),
            format!("-o=\"{}\"", output.display()),
            format!("-t={format}"),
        ];
        tokens.extend(options.flags());
        Self { tokens }
    }

    /// Wrap tokens that were assembled elsewhere.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// All tokens, executable first.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether there are no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Quality, Resolution};

    fn build(options: &ConversionOptions) -> CommandLine {
        CommandLine::build(
            Path::new("C:/SE/SolidEdgeTranslationServices.exe"),
            Path::new("C:/drafts/bracket.dft"),
            Path::new("C:/out/bracket.pdf"),
            OutputFormat::Pdf,
            options,
        )
    }

    #[test]
    fn test_required_tokens_only() {
        let command = build(&ConversionOptions::default());
        assert_eq!(
            command.tokens(),
            &[
                "\"C:/SE/SolidEdgeTranslationServices.exe\"",
                "-i=\"C:/drafts/bracket.dft\"",
                "-o=\"C:/out/bracket.pdf\"",
                "-t=pdf",
            ]
        );
    }

    #[test]
    fn test_display_joins_with_single_spaces() {
        let command = build(&ConversionOptions {
            resolution: Some(Resolution::Dpi300),
            quality: Some(Quality::High),
            ..Default::default()
        });
        assert_eq!(
            command.to_string(),
            "\"C:/SE/SolidEdgeTranslationServices.exe\" -i=\"C:/drafts/bracket.dft\" \
             -o=\"C:/out/bracket.pdf\" -t=pdf -r=300 -q=HIGH"
        );
        assert_eq!(command.len(), 6);
    }
}
