//! Configuration types for the logo loader.

use crate::errors::LoadError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the boot logo image.
pub const DEFAULT_IMAGE_PATH: &str = "/initlogo.rle";

/// Largest surface accepted by [`LogoConfig::validate`], in pixels (8192 x 8192).
pub const MAX_SURFACE_PIXELS: u64 = 8192 * 8192;

/// Complete loader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Image source settings.
    #[serde(default)]
    pub image: ImageConfig,
    /// Surface settings used by host tools that allocate their own surface.
    #[serde(default)]
    pub surface: SurfaceConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Image source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Path of the RLE565 image.
    #[serde(default = "default_image_path")]
    pub path: PathBuf,
    /// Reserved capability flag. Accepted and passed through, no effect on decoding.
    #[serde(default)]
    pub capability_flag: bool,
}

fn default_image_path() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_PATH)
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            path: default_image_path(),
            capability_flag: false,
        }
    }
}

/// Surface dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    320
}

fn default_height() -> u32 {
    480
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"info"` or `"rle565_codec=debug"`.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            surface: SurfaceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LogoConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> LogoConfigBuilder {
        LogoConfigBuilder::default()
    }

    /// Parses a TOML document. Missing sections and keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML for this schema, or the
    /// resulting configuration fails validation.
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        let config: Self = toml::from_str(s)
            .map_err(|e| LoadError::Config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            LoadError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, LoadError> {
        toml::to_string(self).map_err(|e| LoadError::Config(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.image.path.as_os_str().is_empty() {
            return Err(LoadError::Config(
                "Image path cannot be empty".to_string(),
            ));
        }

        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(LoadError::Config(format!(
                "Surface must have a non-zero area, got {}x{}",
                self.surface.width, self.surface.height
            )));
        }

        let pixels = u64::from(self.surface.width) * u64::from(self.surface.height);
        if pixels > MAX_SURFACE_PIXELS {
            return Err(LoadError::Config(format!(
                "Surface {}x{} exceeds the {} pixel limit",
                self.surface.width, self.surface.height, MAX_SURFACE_PIXELS
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(LoadError::Config(
                "Log filter cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for creating a `LogoConfig`.
#[derive(Default)]
pub struct LogoConfigBuilder {
    config: LogoConfig,
}

impl LogoConfigBuilder {
    /// Sets the image path.
    #[must_use]
    pub fn image_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.image.path = path.into();
        self
    }

    /// Sets the reserved capability flag.
    #[must_use]
    pub fn capability_flag(mut self, flag: bool) -> Self {
        self.config.image.capability_flag = flag;
        self
    }

    /// Sets the surface dimensions.
    #[must_use]
    pub fn surface(mut self, width: u32, height: u32) -> Self {
        self.config.surface = SurfaceConfig { width, height };
        self
    }

    /// Sets the log filter directive.
    #[must_use]
    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.logging.filter = filter.into();
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> Result<LogoConfig, LoadError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = LogoConfig::default();
        assert_eq!(config.image.path, PathBuf::from("/initlogo.rle"));
        assert!(!config.image.capability_flag);
        assert_eq!(config.surface, SurfaceConfig { width: 320, height: 480 });
        assert_eq!(config.logging.filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = LogoConfig::builder()
            .image_path("/data/logo.rle")
            .capability_flag(true)
            .surface(480, 800)
            .build()
            .unwrap();

        assert_eq!(config.image.path, PathBuf::from("/data/logo.rle"));
        assert!(config.image.capability_flag);
        assert_eq!(config.surface.width, 480);
        assert_eq!(config.surface.height, 800);
    }

    #[test]
    fn test_config_validation_empty_path() {
        assert!(LogoConfig::builder().image_path("").build().is_err());
    }

    #[test]
    fn test_config_validation_zero_area() {
        let err = LogoConfig::builder().surface(0, 480).build().unwrap_err();
        assert!(err.to_string().contains("non-zero area"));
        assert_eq!(err.errno(), -22);
    }

    #[test]
    fn test_config_validation_oversized_surface() {
        let err = LogoConfig::builder()
            .surface(u32::MAX, u32::MAX)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("pixel limit"));
        assert_eq!(err.errno(), -22);

        assert!(LogoConfig::builder().surface(8192, 8192).build().is_ok());
        assert!(LogoConfig::builder().surface(8192, 8193).build().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = LogoConfig::from_toml_str(
            r#"
            [image]
            path = "/boot/logo.rle"

            [surface]
            width = 720
            "#,
        )
        .unwrap();

        assert_eq!(config.image.path, PathBuf::from("/boot/logo.rle"));
        assert!(!config.image.capability_flag);
        assert_eq!(config.surface.width, 720);
        assert_eq!(config.surface.height, 480);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(LogoConfig::from_toml_str("").unwrap(), LogoConfig::default());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(LogoConfig::from_toml_str("[surface]\nwidth = \"wide\"").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = LogoConfig::builder().capability_flag(true).build().unwrap();
        let text = config.to_toml_string().unwrap();
        assert_eq!(LogoConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.toml");
        std::fs::write(&path, "[logging]\nfilter = \"debug\"\n").unwrap();

        let config = LogoConfig::load(&path).unwrap();
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LogoConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
