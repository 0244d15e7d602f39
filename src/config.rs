/// Application settings
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/mahdiyya-frame/settings.json
/// - macOS: ~/Library/Application Support/mahdiyya-frame/settings.json
/// - Windows: %APPDATA%\mahdiyya-frame\settings.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::compose::Layering;
use crate::error::Result;
use crate::state::data::FrameId;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Frame selected at startup and after "Clear".
    /// `None` means the user has to pick one before exporting.
    pub default_frame: Option<FrameId>,
    /// Stacking of photo and frame
    pub layering: Layering,
    /// Reset scale and offsets whenever a new photo is chosen
    pub reset_adjustments_on_upload: bool,
    /// Initial folder of the save dialog
    pub export_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_frame: Some(FrameId::default()),
            layering: Layering::default(),
            reset_adjustments_on_upload: false,
            export_dir: dirs::picture_dir().or_else(dirs::home_dir),
        }
    }
}

impl Settings {
    /// Default location of the settings file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("mahdiyya-frame").join("settings.json"))
    }

    /// Load settings from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("⚙️  Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` or from the default location
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Like `load`, but writes the defaults out when no file exists yet
    /// so the user has something to edit
    pub fn load_or_create(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        if path.exists() {
            return Self::load_from(&path);
        }

        let settings = Self::default();
        match settings.save_to(&path) {
            Ok(()) => log::info!("⚙️  Wrote default settings to {}", path.display()),
            Err(e) => log::warn!("Could not write default settings to {}: {}", path.display(), e),
        }
        Ok(settings)
    }

    /// Write settings as pretty JSON, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.default_frame, Some(FrameId::Mahdiyya));
        assert_eq!(settings.layering, Layering::Underlay);
        assert!(!settings.reset_adjustments_on_upload);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf").join("settings.json");
        let settings = Settings {
            default_frame: None,
            layering: Layering::ClippedOverlay,
            reset_adjustments_on_upload: true,
            export_dir: Some(PathBuf::from("/tmp/exports")),
        };

        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_or_create_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mahdiyya-frame").join("settings.json");

        let settings = Settings::load_or_create(Some(&path)).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());
        assert_eq!(Settings::load_from(&path).unwrap(), settings);

        // An existing file is read, never replaced
        std::fs::write(&path, r#"{ "reset_adjustments_on_upload": true }"#).unwrap();
        let settings = Settings::load_or_create(Some(&path)).unwrap();
        assert!(settings.reset_adjustments_on_upload);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "layering": "clipped_overlay" }"#).unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.layering, Layering::ClippedOverlay);
        assert_eq!(settings.default_frame, Some(FrameId::Mahdiyya));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(FrameError::Settings(_))));
    }
}
