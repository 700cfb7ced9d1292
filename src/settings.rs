//! Player preferences
//!
//! Persisted to LocalStorage on wasm32; native builds just use defaults.
//! Scores are deliberately not persisted - only the input preferences.

use serde::{Deserialize, Serialize};

use crate::sim::state::ControlScheme;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Preferred control scheme for the next session
    pub control_scheme: ControlScheme,
    /// Multiplier applied to raw tilt readings (> 0)
    pub tilt_sensitivity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            control_scheme: ControlScheme::default(),
            tilt_sensitivity: 1.0,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "moonlander_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str::<Settings>(&json) {
                    if settings.tilt_sensitivity.is_finite() && settings.tilt_sensitivity > 0.0 {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
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
            if let Ok(json) = serde_json::to_string(self) {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.control_scheme, ControlScheme::Keyboard);
        assert_eq!(settings.tilt_sensitivity, 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            control_scheme: ControlScheme::Tilt,
            tilt_sensitivity: 1.5,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
