//! Conversion options and the recognized input/output file types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use sedge_core::config::ConversionDefaults;

use crate::error::ConversionError;

/// Extensions accepted for input files (Solid Edge drafts).
pub const INPUT_EXTENSIONS: &[&str] = &["dft"];

/// Extension the translation tool executable must carry.
pub const TOOL_EXTENSION: &str = "exe";

// ---------------------------------------------------------------------------
// Enumerated option macro
// ---------------------------------------------------------------------------

macro_rules! enumerated_option {
    ($name:ident, $label:literal { $($variant:ident => $wire:literal),* $(,)? }) => {
        impl $name {
            /// Every accepted value, in ascending order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)*];

            /// Value as passed on the tool's command line.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)*
                }
            }

            fn allowed() -> String {
                [$($wire,)*].join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($wire) {
                        return Ok($name::$variant);
                    }
                )*
                Err(ConversionError::UnsupportedOption {
                    option: $label,
                    value: s.to_string(),
                    allowed: Self::allowed(),
                })
            }
        }
    };
}

/// Output resolution in dots per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Resolution {
    /// 100 dpi
    Dpi100,
    /// 200 dpi
    Dpi200,
    /// 300 dpi
    Dpi300,
    /// 600 dpi
    Dpi600,
    /// 1200 dpi
    Dpi1200,
}

enumerated_option!(Resolution, "resolution" {
    Dpi100 => "100",
    Dpi200 => "200",
    Dpi300 => "300",
    Dpi600 => "600",
    Dpi1200 => "1200",
});

/// Output color depth in bits per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ColorDepth {
    /// 1-bit black and white
    Monochrome,
    /// 8-bit palette
    EightBit,
    /// 24-bit true color
    TrueColor,
}

enumerated_option!(ColorDepth, "color depth" {
    Monochrome => "1",
    EightBit => "8",
    TrueColor => "24",
});

/// Image quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quality {
    /// `LOW`
    Low,
    /// `MEDIUM`
    Medium,
    /// `HIGH`
    High,
}

enumerated_option!(Quality, "quality" {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

macro_rules! numeric_option {
    ($name:ident) => {
        impl $name {
            /// Numeric value of the option.
            pub fn value(&self) -> u32 {
                // Wire values are decimal literals.
                self.as_str().parse().unwrap_or_default()
            }
        }

        impl TryFrom<u32> for $name {
            type Error = ConversionError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                value.to_string().parse()
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value.value()
            }
        }
    };
}

numeric_option!(Resolution);
numeric_option!(ColorDepth);

/// Target format, derived from the output file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG image (`.jpg`)
    Jpg,
    /// PDF document (`.pdf`)
    Pdf,
}

impl OutputFormat {
    /// Every supported output format.
    pub const ALL: &'static [OutputFormat] = &[OutputFormat::Jpg, OutputFormat::Pdf];

    /// Match an extension exactly (case-sensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|format| format.as_str() == ext)
    }

    /// Extension and `-t` value for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// Comma-separated list of supported extensions.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(|format| format.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `ext` is an accepted input extension (case-sensitive).
pub fn is_input_extension(ext: &str) -> bool {
    INPUT_EXTENSIONS.contains(&ext)
}

/// Optional flags passed to the translation tool.
///
/// Each field is `None` until set. Only set fields are emitted, so an
/// explicitly chosen value is passed through even if it matches the
/// tool's own default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    /// Show the Solid Edge window while converting (`-v`).
    pub tool_visible: Option<bool>,
    /// Output width in pixels (`-w`).
    pub width: Option<u32>,
    /// Output height in pixels (`-h`).
    pub height: Option<u32>,
    /// Output resolution (`-r`).
    pub resolution: Option<Resolution>,
    /// Output color depth (`-c`).
    pub color_depth: Option<ColorDepth>,
    /// Image quality (`-q`).
    pub quality: Option<Quality>,
    /// Export every sheet (`-m`).
    pub multi_sheet: Option<bool>,
}

impl ConversionOptions {
    /// Build options from configured defaults, checking enumerated values.
    pub fn from_defaults(defaults: &ConversionDefaults) -> Result<Self, ConversionError> {
        Ok(Self {
            tool_visible: defaults.tool_visible,
            width: defaults.width,
            height: defaults.height,
            resolution: defaults.resolution.map(Resolution::try_from).transpose()?,
            color_depth: defaults.color_depth.map(ColorDepth::try_from).transpose()?,
            quality: defaults.quality.as_deref().map(str::parse::<Quality>).transpose()?,
            multi_sheet: defaults.multi_sheet,
        })
    }

    /// Replace fields with those set in `other`.
    pub fn overlay(&mut self, other: &ConversionOptions) {
        self.tool_visible = other.tool_visible.or(self.tool_visible);
        self.width = other.width.or(self.width);
        self.height = other.height.or(self.height);
        self.resolution = other.resolution.or(self.resolution);
        self.color_depth = other.color_depth.or(self.color_depth);
        self.quality = other.quality.or(self.quality);
        self.multi_sheet = other.multi_sheet.or(self.multi_sheet);
    }

    /// Whether no option has been set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Command-line flags for every set option, in the tool's flag order:
    /// `-v -w -h -r -c -q -m`.
    pub fn flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        if let Some(visible) = self.tool_visible {
            flags.push(format!("-v={}", bool_flag(visible)));
        }
        if let Some(width) = self.width {
            flags.push(format!("-w={width}"));
        }
        if let Some(height) = self.height {
            flags.push(format!("-h={height}"));
        }
        if let Some(resolution) = self.resolution {
            flags.push(format!("-r={resolution}"));
        }
        if let Some(depth) = self.color_depth {
            flags.push(format!("-c={depth}"));
        }
        if let Some(quality) = self.quality {
            flags.push(format!("-q={quality}"));
        }
        if let Some(multi) = self.multi_sheet {
            flags.push(format!("-m={}", bool_flag(multi)));
        }

        flags
    }
}

fn bool_flag(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_values() {
        let values: Vec<u32> = Resolution::ALL.iter().map(Resolution::value).collect();
        assert_eq!(values, vec![100, 200, 300, 600, 1200]);
        assert_eq!(Resolution::try_from(600).expect("600"), Resolution::Dpi600);
        assert!(matches!(
            Resolution::try_from(150),
            Err(ConversionError::UnsupportedOption {
                option: "resolution",
                ..
            })
        ));
    }

    #[test]
    fn test_color_depth_values() {
        assert_eq!(ColorDepth::Monochrome.value(), 1);
        assert_eq!(ColorDepth::EightBit.value(), 8);
        assert_eq!(ColorDepth::TrueColor.value(), 24);
        assert!(ColorDepth::try_from(16).is_err());
    }

    #[test]
    fn test_quality_parse() {
        assert_eq!("HIGH".parse::<Quality>().expect("HIGH"), Quality::High);
        assert_eq!("medium".parse::<Quality>().expect("medium"), Quality::Medium);
        let err = "ULTRA".parse::<Quality>().expect_err("ULTRA");
        assert!(err.to_string().contains("LOW, MEDIUM, HIGH"));
    }

    #[test]
    fn test_output_format_is_case_sensitive() {
        assert_eq!(OutputFormat::from_extension("jpg"), Some(OutputFormat::Jpg));
        assert_eq!(OutputFormat::from_extension("pdf"), Some(OutputFormat::Pdf));
        assert_eq!(OutputFormat::from_extension("PDF"), None);
        assert_eq!(OutputFormat::from_extension("png"), None);
    }

    #[test]
    fn test_input_extension_is_case_sensitive() {
        assert!(is_input_extension("dft"));
        assert!(!is_input_extension("DFT"));
        assert!(!is_input_extension("par"));
    }

    #[test]
    fn test_no_flags_when_nothing_set() {
        let options = ConversionOptions::default();
        assert!(options.is_empty());
        assert!(options.flags().is_empty());
    }

    #[test]
    fn test_flags_follow_fixed_order() {
        let options = ConversionOptions {
            multi_sheet: Some(true),
            quality: Some(Quality::Low),
            width: Some(640),
            tool_visible: Some(false),
            color_depth: Some(ColorDepth::EightBit),
            height: Some(480),
            resolution: Some(Resolution::Dpi1200),
        };
        assert_eq!(
            options.flags(),
            vec!["-v=FALSE", "-w=640", "-h=480", "-r=1200", "-c=8", "-q=LOW", "-m=TRUE"]
        );
    }

    #[test]
    fn test_explicit_zero_and_false_are_emitted() {
        let options = ConversionOptions {
            width: Some(0),
            multi_sheet: Some(false),
            ..Default::default()
        };
        assert_eq!(options.flags(), vec!["-w=0", "-m=FALSE"]);
    }

    #[test]
    fn test_from_defaults_and_overlay() {
        let defaults = ConversionDefaults {
            width: Some(800),
            resolution: Some(300),
            quality: Some("MEDIUM".to_string()),
            ..Default::default()
        };
        let mut options = ConversionOptions::from_defaults(&defaults).expect("defaults");
        assert_eq!(options.resolution, Some(Resolution::Dpi300));
        assert_eq!(options.quality, Some(Quality::Medium));

        options.overlay(&ConversionOptions {
            quality: Some(Quality::High),
            ..Default::default()
        });
        assert_eq!(options.width, Some(800));
        assert_eq!(options.quality, Some(Quality::High));
    }

    #[test]
    fn test_configured_sets_match_option_values() {
        use sedge_core::config::converter::{
            ALLOWED_COLOR_DEPTHS, ALLOWED_QUALITIES, ALLOWED_RESOLUTIONS,
        };

        let resolutions: Vec<u32> = Resolution::ALL.iter().map(Resolution::value).collect();
        assert_eq!(resolutions, ALLOWED_RESOLUTIONS);
        let depths: Vec<u32> = ColorDepth::ALL.iter().map(ColorDepth::value).collect();
        assert_eq!(depths, ALLOWED_COLOR_DEPTHS);
        let qualities: Vec<&str> = Quality::ALL.iter().map(Quality::as_str).collect();
        assert_eq!(qualities, ALLOWED_QUALITIES);
    }

    #[test]
    fn test_from_defaults_accepts_lowercase_quality() {
        let defaults = ConversionDefaults {
            quality: Some("high".to_string()),
            ..Default::default()
        };
        let options = ConversionOptions::from_defaults(&defaults).expect("defaults");
        assert_eq!(options.quality, Some(Quality::High));
    }

    #[test]
    fn test_from_defaults_rejects_unknown_depth() {
        let defaults = ConversionDefaults {
            color_depth: Some(32),
            ..Default::default()
        };
        assert!(ConversionOptions::from_defaults(&defaults).is_err());
    }

    #[test]
    fn test_serde_wire_values() {
        let json = serde_json::to_string(&ConversionOptions {
            resolution: Some(Resolution::Dpi200),
            quality: Some(Quality::High),
            ..Default::default()
        })
        .expect("serialize");
        assert!(json.contains("\"resolution\":200"));
        assert!(json.contains("\"quality\":\"HIGH\""));
    }
}
