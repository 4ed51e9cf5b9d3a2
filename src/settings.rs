//! Player settings and preferences
//!
//! Stored as a JSON file next to the host. Unknown or missing fields fall back to
//! defaults so older files keep loading.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_FEEDBACK_MS, MAX_FEEDBACK_MS, MIN_FEEDBACK_MS};
use crate::games::GameKind;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
    /// Stop sounds when the window loses focus
    pub mute_on_blur: bool,
    /// Pause the running game when the window loses focus
    pub pause_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (hosts skip bubble drift animation)
    pub reduced_motion: bool,
    /// Outline shapes and label colors
    pub colorblind_mode: bool,
    /// Dyslexia-friendly font in word games
    pub dyslexic_font: bool,
    pub high_contrast: bool,

    // === Gameplay ===
    /// How long feedback messages stay visible
    pub feedback_ms: u32,
    /// Starting difficulty per game (games not listed start at their minimum)
    pub difficulty: BTreeMap<GameKind, u8>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            pause_on_blur: true,

            reduced_motion: false,
            colorblind_mode: false,
            dyslexic_font: false,
            high_contrast: false,

            feedback_ms: DEFAULT_FEEDBACK_MS,
            difficulty: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Feedback lifetime, kept within 1-2 seconds
    pub fn feedback_duration_ms(&self) -> u32 {
        self.feedback_ms.clamp(MIN_FEEDBACK_MS, MAX_FEEDBACK_MS)
    }

    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }

    pub fn starting_difficulty(&self, kind: GameKind) -> Option<u8> {
        self.difficulty.get(&kind).copied()
    }

    /// Remember the difficulty a game adapted to
    pub fn remember_difficulty(&mut self, kind: GameKind, difficulty: u8) {
        self.difficulty.insert(kind, difficulty);
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
