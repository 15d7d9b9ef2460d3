use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// All tunable movement parameters, loaded from tuning.ron.
#[derive(Debug, Clone, Resource, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed physics tick in seconds.
    pub dt: f32,
    /// Player speed in world units per second.
    pub move_speed: f32,
    /// Radial deadzone applied to the gamepad left stick.
    pub stick_deadzone: f32,
    /// Normalize diagonal keyboard input to unit length.
    pub normalize_keyboard: bool,
    pub ground_size: f32,
    pub player_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            dt: 1.0 / 50.0,
            move_speed: 5.0,
            stick_deadzone: 0.15,
            normalize_keyboard: true,
            ground_size: 20.0,
            player_size: 1.0,
        }
    }
}

impl Tuning {
    /// Get the data directory for tuning files.
    pub fn data_dir() -> PathBuf {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("rolling_player")
    }

    /// Path to the tuning file.
    pub fn file_path() -> PathBuf {
        Self::data_dir().join("tuning.ron")
    }

    /// Load from file, or create default if not found.
    pub fn load_or_default() -> Self {
        Self::load_from(&Self::file_path())
    }

    /// Load from `path`. A missing file is created with defaults; an
    /// unreadable or invalid file is left untouched and defaults are used.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let tuning = Self::default();
            tuning.save_to(path);
            return tuning;
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(tuning) => tuning,
                Err(e) => {
                    warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Parse a tuning document. Missing fields take their default value;
    /// a non-positive `dt` or a non-finite `move_speed` is rejected.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let tuning: Self = ron::from_str(contents).map_err(|e| e.to_string())?;
        if !(tuning.dt.is_finite() && tuning.dt > 0.0) {
            return Err(format!("dt must be a positive number of seconds, got {}", tuning.dt));
        }
        if !tuning.move_speed.is_finite() {
            return Err(format!("move_speed must be finite, got {}", tuning.move_speed));
        }
        Ok(tuning)
    }

    /// Save current tuning to file.
    pub fn save(&self) {
        self.save_to(&Self::file_path());
    }

    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let pretty = ron::ser::PrettyConfig::default();
        match ron::ser::to_string_pretty(self, pretty) {
            Ok(s) => {
                if let Err(e) = std::fs::write(path, s) {
                    warn!("Failed to write {}: {e}", path.display());
                }
            }
            Err(e) => {
                warn!("Failed to serialize tuning: {e}");
            }
        }
    }

    /// Reload from file (called by key press).
    pub fn reload(&mut self) {
        *self = Self::load_or_default();
        info!("Tuning reloaded: move_speed={:.2} dt={:.4}", self.move_speed, self.dt);
    }
}
