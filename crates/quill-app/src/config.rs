//! Composer configuration and font catalog.
//!
//! Both are plain JSON documents. Every field of [`ComposerConfig`] has a
//! default, so an empty object is a valid config.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use quill_core::{AnimationConfig, Easing};
use quill_proto::FontDescriptor;
use serde::Deserialize;
use thiserror::Error;

/// Errors loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// File is not valid JSON for the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
}

/// Easing curve names accepted in config files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingSetting {
    /// Constant speed.
    Linear,
    /// Fast start, slow finish.
    EaseOut,
    /// Slow start and finish.
    #[default]
    EaseInOut,
}

impl From<EasingSetting> for Easing {
    fn from(setting: EasingSetting) -> Self {
        match setting {
            EasingSetting::Linear => Self::Linear,
            EasingSetting::EaseOut => Self::EaseOut,
            EasingSetting::EaseInOut => Self::EaseInOut,
        }
    }
}

/// Panel and composer tween settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    /// Tween length in milliseconds.
    pub duration_ms: u64,
    /// Curve.
    pub easing: EasingSetting,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: AnimationConfig::DEFAULT_DURATION.as_millis() as u64,
            easing: EasingSetting::default(),
        }
    }
}

impl From<AnimationSettings> for AnimationConfig {
    fn from(settings: AnimationSettings) -> Self {
        Self {
            duration: Duration::from_millis(settings.duration_ms),
            easing: settings.easing.into(),
        }
    }
}

/// Composer screen configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ComposerConfig {
    /// Tween settings shared by both panels and the composer offset.
    pub animation: AnimationSettings,
    /// Global font selected when the screen mounts.
    pub initial_font: Option<String>,
    /// Value injected as the surface's native-host flag.
    pub environment_flag: bool,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            animation: AnimationSettings::default(),
            initial_font: None,
            environment_flag: true,
        }
    }
}

impl ComposerConfig {
    /// Parse a config document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = read(path)?;
        Self::from_json_str(&raw)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }
}

/// Ordered font catalog.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct FontCatalog {
    fonts: Vec<FontDescriptor>,
}

impl FontCatalog {
    /// Catalog from descriptors, order preserved.
    pub fn new(fonts: Vec<FontDescriptor>) -> Self {
        Self { fonts }
    }

    /// Parse a JSON array of descriptors.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Load a catalog file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = read(path)?;
        Self::from_json_str(&raw)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    /// First entry whose `scriptName` equals `name` exactly.
    pub fn find(&self, name: &str) -> Option<&FontDescriptor> {
        self.fonts.iter().find(|font| font.script_name == name)
    }

    /// All entries.
    pub fn fonts(&self) -> &[FontDescriptor] {
        &self.fonts
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_owned(), source })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_object_is_default_config() {
        let config = ComposerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ComposerConfig::default());
        assert!(config.environment_flag);
        assert_eq!(config.animation.duration_ms, 250);
    }

    #[test]
    fn partial_animation_settings_fill_defaults() {
        let config =
            ComposerConfig::from_json_str(r#"{"animation":{"easing":"linear"},"initial_font":"LXGW"}"#)
                .unwrap();

        let animation: AnimationConfig = config.animation.into();
        assert_eq!(animation.easing, Easing::Linear);
        assert_eq!(animation.duration, Duration::from_millis(250));
        assert_eq!(config.initial_font.as_deref(), Some("LXGW"));
    }

    #[test]
    fn catalog_lookup_is_exact() {
        let catalog =
            FontCatalog::from_json_str(r#"[{"scriptName":"LXGW"},{"scriptName":"Noto"}]"#).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("Noto").map(|f| f.script_name.as_str()), Some("Noto"));
        assert!(catalog.find("noto").is_none());
        assert!(catalog.find("").is_none());
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"url\":\"x\"}}]").unwrap();

        let err = FontCatalog::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if path == file.path()));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ComposerConfig::load(Path::new("/nonexistent/quill.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
