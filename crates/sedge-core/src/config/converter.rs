//! Translation tool and default conversion option settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::{Validate, ValidationError};

/// Resolutions (dpi) accepted by the translation tool.
pub const ALLOWED_RESOLUTIONS: &[u32] = &[100, 200, 300, 600, 1200];
/// Color depths (bits) accepted by the translation tool.
pub const ALLOWED_COLOR_DEPTHS: &[u32] = &[1, 8, 24];
/// Image quality tiers accepted by the translation tool, matched
/// case-insensitively.
pub const ALLOWED_QUALITIES: &[&str] = &["LOW", "MEDIUM", "HIGH"];

/// Configuration for invoking the Solid Edge translation tool.
///
/// If `tool_path` is empty, the CLI attempts to locate
/// `SolidEdgeTranslationServices.exe` in the usual installation
/// directories and on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// Path to `SolidEdgeTranslationServices.exe`. Empty = auto-discover.
    pub tool_path: PathBuf,

    /// WHATWG label of the codepage the tool writes diagnostics in.
    #[validate(custom(function = "validate_encoding_label"))]
    pub diagnostic_encoding: String,

    /// Options applied to every conversion unless overridden.
    #[validate(nested)]
    pub defaults: ConversionDefaults,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            tool_path: PathBuf::new(),
            diagnostic_encoding: default_diagnostic_encoding(),
            defaults: ConversionDefaults::default(),
        }
    }
}

impl ConverterConfig {
    /// Whether a tool path has been configured explicitly.
    pub fn has_tool_path(&self) -> bool {
        !self.tool_path.as_os_str().is_empty()
    }
}

/// Default conversion options. Unset fields are not passed to the tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionDefaults {
    /// Output width in pixels.
    #[validate(range(min = 1))]
    pub width: Option<u32>,
    /// Output height in pixels.
    #[validate(range(min = 1))]
    pub height: Option<u32>,
    /// Output resolution in dpi.
    #[validate(custom(function = "validate_resolution"))]
    pub resolution: Option<u32>,
    /// Output color depth in bits.
    #[validate(custom(function = "validate_color_depth"))]
    pub color_depth: Option<u32>,
    /// Image quality tier.
    #[validate(custom(function = "validate_quality"))]
    pub quality: Option<String>,
    /// Export every sheet of the draft.
    pub multi_sheet: Option<bool>,
    /// Show the Solid Edge window while converting.
    pub tool_visible: Option<bool>,
}

fn default_diagnostic_encoding() -> String {
    "windows-1250".to_string()
}

fn validate_encoding_label(label: &str) -> Result<(), ValidationError> {
    match encoding_rs::Encoding::for_label(label.as_bytes()) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("unknown_encoding")),
    }
}

fn validate_resolution(value: u32) -> Result<(), ValidationError> {
    if ALLOWED_RESOLUTIONS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_resolution"))
    }
}

fn validate_color_depth(value: u32) -> Result<(), ValidationError> {
    if ALLOWED_COLOR_DEPTHS.contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_color_depth"))
    }
}

fn validate_quality(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if ALLOWED_QUALITIES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(value))
    {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_quality"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert!(!config.has_tool_path());
        assert_eq!(config.diagnostic_encoding, "windows-1250");
        assert_eq!(config.defaults, ConversionDefaults::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let config = ConverterConfig {
            diagnostic_encoding: "klingon-1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_defaults_outside_enumerated_sets_rejected() {
        let defaults = ConversionDefaults {
            resolution: Some(150),
            ..Default::default()
        };
        assert!(defaults.validate().is_err());

        let defaults = ConversionDefaults {
            color_depth: Some(16),
            ..Default::default()
        };
        assert!(defaults.validate().is_err());

        let defaults = ConversionDefaults {
            quality: Some("ULTRA".to_string()),
            ..Default::default()
        };
        assert!(defaults.validate().is_err());
    }

    #[test]
    fn test_defaults_inside_enumerated_sets_accepted() {
        let defaults = ConversionDefaults {
            width: Some(1920),
            height: Some(1080),
            resolution: Some(600),
            color_depth: Some(24),
            quality: Some("HIGH".to_string()),
            multi_sheet: Some(true),
            tool_visible: Some(false),
        };
        assert!(defaults.validate().is_ok());
    }

    #[test]
    fn test_quality_accepts_any_case() {
        for quality in ["high", "Medium", " LOW "] {
            let defaults = ConversionDefaults {
                quality: Some(quality.to_string()),
                ..Default::default()
            };
            assert!(defaults.validate().is_ok(), "{quality:?} should be accepted");
        }
    }

    #[test]
    fn test_toml_deserialization_partial() {
        let toml_str = "tool_path = 'C:/Tools/SolidEdgeTranslationServices.exe'\n\n[defaults]\nresolution = 300\n";
        let config: ConverterConfig = toml::from_str(toml_str).expect("parse toml");
        assert!(config.has_tool_path());
        assert_eq!(config.diagnostic_encoding, "windows-1250");
        assert_eq!(config.defaults.resolution, Some(300));
        assert_eq!(config.defaults.width, None);
    }
}
