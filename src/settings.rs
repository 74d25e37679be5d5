//! # Print Settings
//!
//! The last-used print parameters, persisted as a small JSON file:
//!
//! ```json
//! {
//!   "gamma_progress": 100,
//!   "threshold": 128,
//!   "dither_mode": 0,
//!   "invert": false,
//!   "sharpen": false
//! }
//! ```
//!
//! `gamma_progress` is gamma × 100. `dither_mode` is the
//! [`DitheringAlgorithm::index`]. Every field is optional and clamped on load.
//!
//! Files written before `dither_mode` existed carry a boolean `fs_dither`
//! instead; `true` (also the default) maps to Atkinson and `false` to no
//! dithering.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TintaError;
use crate::render::dither::{DEFAULT_THRESHOLD, DitherConfig, DitheringAlgorithm};

/// Slider range for `gamma_progress`.
pub const GAMMA_PROGRESS_MIN: u8 = 10;
pub const GAMMA_PROGRESS_MAX: u8 = 150;
pub const GAMMA_PROGRESS_DEFAULT: u8 = 100;

/// File name used under the config directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Normalized print settings. Every field is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub gamma_progress: u8,
    pub threshold: u8,
    pub dither_mode: DitheringAlgorithm,
    pub invert: bool,
    pub sharpen: bool,
}

/// On-disk shape; anything may be missing or out of range.
#[derive(Debug, Default, Deserialize)]
struct StoredSettings {
    gamma_progress: Option<i64>,
    threshold: Option<i64>,
    dither_mode: Option<i64>,
    fs_dither: Option<bool>,
    invert: Option<bool>,
    sharpen: Option<bool>,
}

#[derive(Serialize)]
struct SettingsOut {
    gamma_progress: u8,
    threshold: u8,
    dither_mode: u8,
    invert: bool,
    sharpen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gamma_progress: GAMMA_PROGRESS_DEFAULT,
            threshold: DEFAULT_THRESHOLD,
            dither_mode: DitheringAlgorithm::Atkinson,
            invert: false,
            sharpen: false,
        }
    }
}

impl From<StoredSettings> for Settings {
    fn from(stored: StoredSettings) -> Self {
        let dither_mode = match stored.dither_mode {
            Some(index) => DitheringAlgorithm::from_index(index).unwrap_or_else(|| {
                warn!(index, "Unknown dither mode index, using Atkinson");
                DitheringAlgorithm::Atkinson
            }),
            None => {
                let fs_dither = stored.fs_dither.unwrap_or(true);
                if stored.fs_dither.is_some() {
                    warn!(fs_dither, "Migrating legacy fs_dither setting");
                }
                if fs_dither {
                    DitheringAlgorithm::Atkinson
                } else {
                    DitheringAlgorithm::None
                }
            }
        };

        Self {
            gamma_progress: stored
                .gamma_progress
                .unwrap_or(GAMMA_PROGRESS_DEFAULT as i64)
                .clamp(GAMMA_PROGRESS_MIN as i64, GAMMA_PROGRESS_MAX as i64) as u8,
            threshold: stored
                .threshold
                .unwrap_or(DEFAULT_THRESHOLD as i64)
                .clamp(0, 255) as u8,
            dither_mode,
            invert: stored.invert.unwrap_or(false),
            sharpen: stored.sharpen.unwrap_or(false),
        }
    }
}

impl Settings {
    /// Gamma value, `gamma_progress / 100`.
    pub fn gamma(&self) -> f32 {
        self.gamma_progress as f32 / 100.0
    }

    /// Set gamma, clamped to the slider range.
    pub fn set_gamma(&mut self, gamma: f32) {
        let progress = (gamma * 100.0).round();
        self.gamma_progress = if progress.is_nan() {
            GAMMA_PROGRESS_DEFAULT
        } else {
            progress.clamp(GAMMA_PROGRESS_MIN as f32, GAMMA_PROGRESS_MAX as f32) as u8
        };
    }

    pub fn to_dither_config(&self) -> DitherConfig {
        DitherConfig::new(
            self.dither_mode,
            self.gamma(),
            self.threshold as i32,
            self.invert,
            self.sharpen,
        )
    }

    /// Parse settings JSON, clamping every field.
    pub fn from_json(json: &str) -> Result<Self, TintaError> {
        let stored: StoredSettings =
            serde_json::from_str(json).map_err(|e| TintaError::Settings(format!("Invalid settings: {}", e)))?;
        Ok(stored.into())
    }

    pub fn to_json(&self) -> Result<String, TintaError> {
        let out = SettingsOut {
            gamma_progress: self.gamma_progress,
            threshold: self.threshold,
            dither_mode: self.dither_mode.index(),
            invert: self.invert,
            sharpen: self.sharpen,
        };
        serde_json::to_string_pretty(&out).map_err(|e| TintaError::Settings(e.to_string()))
    }

    /// Load settings from `path`.
    ///
    /// A missing, unreadable or malformed file yields the defaults.
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Cannot read settings, using defaults");
                return Self::default();
            }
        };

        Self::from_json(&json).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Bad settings file, using defaults");
            Self::default()
        })
    }

    /// Write settings to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), TintaError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }
}

/// Default settings location.
///
/// `$XDG_CONFIG_HOME/tinta/settings.json`, else `$HOME/.config/tinta/settings.json`,
/// else `settings.json` in the working directory.
pub fn default_path() -> PathBuf {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")));

    match base {
        Some(dir) => dir.join("tinta").join(SETTINGS_FILE),
        None => PathBuf::from(SETTINGS_FILE),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tinta-settings-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.gamma(), 1.0);
        assert_eq!(s.threshold, 128);
        assert_eq!(s.dither_mode, DitheringAlgorithm::Atkinson);
        assert_eq!(s.to_dither_config(), DitherConfig::default());
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn test_fields_are_clamped() {
        let s = Settings::from_json(r#"{"gamma_progress": 900, "threshold": -4}"#).unwrap();
        assert_eq!(s.gamma_progress, 150);
        assert_eq!(s.threshold, 0);

        let s = Settings::from_json(r#"{"gamma_progress": 0, "threshold": 300}"#).unwrap();
        assert_eq!(s.gamma_progress, 10);
        assert_eq!(s.threshold, 255);
    }

    #[test]
    fn test_unknown_mode_index_falls_back_to_atkinson() {
        let s = Settings::from_json(r#"{"dither_mode": 7}"#).unwrap();
        assert_eq!(s.dither_mode, DitheringAlgorithm::Atkinson);
        let s = Settings::from_json(r#"{"dither_mode": -1}"#).unwrap();
        assert_eq!(s.dither_mode, DitheringAlgorithm::Atkinson);
    }

    #[test]
    fn test_legacy_fs_dither_migration() {
        let s = Settings::from_json(r#"{"fs_dither": false}"#).unwrap();
        assert_eq!(s.dither_mode, DitheringAlgorithm::None);
        let s = Settings::from_json(r#"{"fs_dither": true}"#).unwrap();
        assert_eq!(s.dither_mode, DitheringAlgorithm::Atkinson);
    }

    #[test]
    fn test_dither_mode_wins_over_legacy_flag() {
        let s = Settings::from_json(r#"{"dither_mode": 2, "fs_dither": false}"#).unwrap();
        assert_eq!(s.dither_mode, DitheringAlgorithm::Ordered8x8);
    }

    #[test]
    fn test_malformed_json_is_settings_error() {
        let err = Settings::from_json("{not json").unwrap_err();
        assert!(matches!(err, TintaError::Settings(_)));
    }

    #[test]
    fn test_set_gamma_clamps() {
        let mut s = Settings::default();
        s.set_gamma(0.55);
        assert_eq!(s.gamma_progress, 55);
        s.set_gamma(3.0);
        assert_eq!(s.gamma_progress, 150);
        s.set_gamma(f32::NAN);
        assert_eq!(s.gamma_progress, 100);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("roundtrip");
        let s = Settings {
            gamma_progress: 80,
            threshold: 140,
            dither_mode: DitheringAlgorithm::FloydSteinberg,
            invert: true,
            sharpen: true,
        };
        s.save(&path).unwrap();

        let json = fs::read_to_string(&path).unwrap();
        assert!(json.contains("\"dither_mode\": 1"));
        assert!(!json.contains("fs_dither"));
        assert_eq!(Settings::load(&path), s);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_or_bad_file_gives_defaults() {
        assert_eq!(Settings::load(&scratch("missing")), Settings::default());

        let path = scratch("bad");
        fs::write(&path, "\"not an object\"").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
        fs::remove_file(&path).unwrap();
    }
}
