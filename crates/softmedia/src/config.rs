//! Platform configuration
//!
//! Plain serializable settings for the video and audio backends, loadable
//! from TOML or RON files. Defaults match the shipped platform: a 640x480
//! window and the `/dev/audio` sink.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Window and display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSettings {
    /// Title for windows created from this configuration
    pub title: String,
    /// Default window width in pixels
    pub width: u32,
    /// Default window height in pixels
    pub height: u32,
    /// Whether windows start fullscreen
    pub fullscreen: bool,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            title: "softmedia".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
        }
    }
}

/// Audio sink settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Path of the character device the mix buffer is written to
    pub device: PathBuf,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/audio"),
        }
    }
}

/// Top-level configuration for the platform layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Window and display settings
    pub video: VideoSettings,
    /// Audio sink settings
    pub audio: AudioSettings,
}

impl PlatformConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.video.title = title.into();
        self
    }

    /// Set the default window size
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.video.width = width;
        self.video.height = height;
        self
    }

    /// Set the audio sink path
    #[must_use]
    pub fn with_audio_device(mut self, device: impl Into<PathBuf>) -> Self {
        self.audio.device = device.into();
        self
    }
}

impl Config for PlatformConfig {}

/// Configuration trait with file loading support
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a TOML or RON file
    ///
    /// # Errors
    /// Fails when the file cannot be read, does not parse, or has an
    /// extension other than `.toml` or `.ron`.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        match extension(path) {
            Some("toml") => {
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Some("ron") => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }

    /// Save configuration to a TOML or RON file
    ///
    /// # Errors
    /// Fails when serialization or the write fails, or on an unsupported
    /// extension.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlatformConfig::default();
        assert_eq!(config.video.width, 640);
        assert_eq!(config.video.height, 480);
        assert!(!config.video.fullscreen);
        assert_eq!(config.audio.device, PathBuf::from("/dev/audio"));
    }

    #[test]
    fn test_toml_round_trip() {
        let path = std::env::temp_dir().join(format!("softmedia_config_{}.toml", std::process::id()));
        let config = PlatformConfig::new()
            .with_title("editor")
            .with_window_size(800, 600)
            .with_audio_device("/tmp/audio_sink");

        config.save_to_file(&path).unwrap();
        let loaded = PlatformConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.video.title, "editor");
        assert_eq!(loaded.video.width, 800);
        assert_eq!(loaded.video.height, 600);
        assert_eq!(loaded.audio.device, PathBuf::from("/tmp/audio_sink"));
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let err = PlatformConfig::default()
            .save_to_file("/tmp/softmedia_settings.yaml")
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
