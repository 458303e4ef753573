//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file overlaid with
//! `SEDGE__`-prefixed environment variables via the `config` crate.

pub mod converter;
pub mod logging;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::converter::{ConversionDefaults, ConverterConfig};
pub use self::logging::LoggingConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SEDGE";

/// Root application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Translation tool settings.
    #[validate(nested)]
    pub converter: ConverterConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// A missing file is not an error; every field has a default. Variables
    /// such as `SEDGE__CONVERTER__TOOL_PATH` override file values.
    pub fn load(path: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        tracing::debug!(path, tool_path = %config.converter.tool_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Overlay the explicitly set values of `other` onto `self`.
    pub fn merge(&mut self, other: AppConfig) {
        let AppConfig { converter, logging } = other;

        if converter.has_tool_path() {
            self.converter.tool_path = converter.tool_path;
        }
        if converter.diagnostic_encoding != ConverterConfig::default().diagnostic_encoding {
            self.converter.diagnostic_encoding = converter.diagnostic_encoding;
        }

        let defaults = converter.defaults;
        let target = &mut self.converter.defaults;
        target.width = defaults.width.or(target.width);
        target.height = defaults.height.or(target.height);
        target.resolution = defaults.resolution.or(target.resolution);
        target.color_depth = defaults.color_depth.or(target.color_depth);
        target.quality = defaults.quality.or(target.quality.take());
        target.multi_sheet = defaults.multi_sheet.or(target.multi_sheet);
        target.tool_visible = defaults.tool_visible.or(target.tool_visible);

        if logging != LoggingConfig::default() {
            self.logging = logging;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("absent");
        let config = AppConfig::load(path.to_str().expect("utf8")).expect("load");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.converter.diagnostic_encoding, "windows-1250");
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("sedge.toml");
        std::fs::write(
            &path,
            "[converter]\ntool_path = 'C:/SE/SolidEdgeTranslationServices.exe'\n\n[converter.defaults]\nquality = 'HIGH'\n\n[logging]\nformat = 'json'\n",
        )
        .expect("write");

        let config = AppConfig::load(path.to_str().expect("utf8")).expect("load");
        assert_eq!(
            config.converter.tool_path,
            PathBuf::from("C:/SE/SolidEdgeTranslationServices.exe")
        );
        assert_eq!(config.converter.defaults.quality.as_deref(), Some("HIGH"));
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_accepts_lowercase_quality() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("lower.toml");
        std::fs::write(&path, "[converter.defaults]\nquality = 'high'\n").expect("write");

        let config = AppConfig::load(path.to_str().expect("utf8")).expect("load");
        assert_eq!(config.converter.defaults.quality.as_deref(), Some("high"));
    }

    #[test]
    fn test_load_rejects_invalid_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[converter.defaults]\ncolor_depth = 32\n").expect("write");

        let err = AppConfig::load(path.to_str().expect("utf8")).expect_err("should fail");
        assert_eq!(err.kind, crate::error::ErrorKind::Configuration);
    }

    #[test]
    fn test_merge_overlays_only_set_values() {
        let mut base = AppConfig::default();
        base.converter.tool_path = PathBuf::from("base.exe");
        base.converter.defaults.width = Some(800);
        base.converter.defaults.quality = Some("LOW".to_string());

        let mut overlay = AppConfig::default();
        overlay.converter.defaults.quality = Some("HIGH".to_string());
        overlay.converter.defaults.resolution = Some(300);

        base.merge(overlay);

        assert_eq!(base.converter.tool_path, PathBuf::from("base.exe"));
        assert_eq!(base.converter.defaults.width, Some(800));
        assert_eq!(base.converter.defaults.quality.as_deref(), Some("HIGH"));
        assert_eq!(base.converter.defaults.resolution, Some(300));
        assert_eq!(base.logging, LoggingConfig::default());
    }
}
