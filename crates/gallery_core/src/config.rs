//! Gallery configuration

use crate::error::{GalleryError, Result};
use crate::navigation::DEFAULT_PAGE_SIZE;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main gallery configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub gallery: LibraryConfig,
    pub logging: LoggingConfig,
}

/// Where photos come from and how they are paged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Photos per page
    pub page_size: usize,
    /// Directory to index instead of the bundled samples
    pub library_dir: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            library_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is unset
    pub level: String,
    /// Rotated log files older than this are removed at startup
    pub retention_days: u32,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            retention_days: 7,
        }
    }
}

impl GalleryConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GalleryError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!("Configuration loaded from {:?}", path);
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.gallery.page_size == 0 {
            return Err(GalleryError::Config("page_size must be at least 1".into()));
        }
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "PhotoGallery", "PhotoGallery")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.gallery.page_size, 20);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.retention_days, 7);
        assert!(config.gallery.library_dir.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = GalleryConfig::default();
        config.gallery.page_size = 12;
        config.gallery.library_dir = Some(PathBuf::from("/photos"));
        config.save_to(&path).unwrap();

        let loaded = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gallery]\npage_size = 5\n").unwrap();

        let loaded = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(loaded.gallery.page_size, 5);
        assert_eq!(loaded.logging, LoggingConfig::default());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gallery]\npage_size = 0\n").unwrap();

        assert!(matches!(GalleryConfig::load_from(&path), Err(GalleryError::Config(_))));
    }

    #[test]
    fn test_malformed_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gallery\n").unwrap();

        assert!(matches!(GalleryConfig::load_from(&path), Err(GalleryError::Config(_))));
    }

    #[test]
    fn test_written_file_has_only_read_keys() {
        let content = toml::to_string_pretty(&GalleryConfig::default()).unwrap();
        assert!(content.contains("page_size"));
        assert!(content.contains("retention_days"));
        assert!(!content.contains("[general]"));
        assert!(!content.contains("language"));
        assert!(!content.contains("capture_dir"));
    }

    #[test]
    fn test_retired_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[general]\nlanguage = \"ja\"\n\n[gallery]\npage_size = 8\ncapture_dir = \"/tmp/caps\"\n",
        )
        .unwrap();

        let loaded = GalleryConfig::load_from(&path).unwrap();
        assert_eq!(loaded.gallery.page_size, 8);
    }
}
