//! User motion preferences
//!
//! Persisted separately from tuning overrides in LocalStorage.

use serde::{Deserialize, Serialize};

use crate::tuning::{MotionConfig, TuningPreset};

/// Card motion settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Motion feel preset
    pub preset: TuningPreset,

    // === Accessibility ===
    /// Reduced motion (skip the entry animation)
    pub reduced_motion: bool,

    // === Behaviour ===
    /// Settle onto the front/back face after a flick
    pub snap_to_faces: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: TuningPreset::Classic,
            reduced_motion: false,
            snap_to_faces: true,
        }
    }
}

impl Settings {
    /// Create settings from a tuning preset
    pub fn from_preset(preset: TuningPreset) -> Self {
        Self {
            preset,
            // Free spin never snaps, whatever the toggle says
            snap_to_faces: preset != TuningPreset::FreeSpin,
            ..Self::default()
        }
    }

    /// Resolved controller config
    pub fn motion_config(&self) -> MotionConfig {
        let mut config = self.preset.config();
        config.snap_enabled = config.snap_enabled && self.snap_to_faces;
        config
    }

    /// Whether the card should appear already at rest
    pub fn start_settled(&self) -> bool {
        self.reduced_motion
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "card_motion_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
