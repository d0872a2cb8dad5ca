//! Browser/webview bindings
//!
//! Exposes a [`CardDriver`] to a JS host. The host forwards its touch
//! callbacks and calls `frame` from `requestAnimationFrame`, then copies
//! `position_y`/`rotation_y` onto its scene object.
//!
//! Touch timestamps are taken in milliseconds (`event.timeStamp`,
//! `nativeEvent.timestamp`); frame deltas are in seconds.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::motion::CardTransform;
use crate::platform::{CardDriver, TouchEvent};
use crate::settings::Settings;
use crate::tuning::{MotionConfig, TuningPreset};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"card-motion logger already initialized".into());
    }
}

/// One card's motion loop, owned by the JS screen component
#[wasm_bindgen]
pub struct CardMotion {
    driver: CardDriver,
    settings: Settings,
    transform: CardTransform,
}

#[wasm_bindgen]
impl CardMotion {
    /// Create from a preset name; unknown names fall back to stored settings
    #[wasm_bindgen(constructor)]
    pub fn new(preset: Option<String>) -> CardMotion {
        let mut settings = Settings::load();
        if let Some(name) = preset {
            match TuningPreset::from_str(&name) {
                Some(preset) => settings.preset = preset,
                None => log::warn!("Unknown preset '{}', using {}", name, settings.preset.as_str()),
            }
        }
        let driver = CardDriver::from_settings(&settings);
        let transform = driver.controller().transform();
        CardMotion {
            driver,
            settings,
            transform,
        }
    }

    /// Create from a JSON tuning override
    pub fn with_tuning(json: &str) -> Result<CardMotion, JsValue> {
        let config = MotionConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let driver = CardDriver::new(config);
        let transform = driver.controller().transform();
        Ok(CardMotion {
            driver,
            settings: Settings::load(),
            transform,
        })
    }

    /// Finger down at view-local `(x, y)`, `timestamp_ms` in milliseconds
    pub fn grant(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        self.driver
            .push(TouchEvent::grant_at_millis(Vec2::new(x, y), timestamp_ms));
    }

    /// Finger moved, `timestamp_ms` in milliseconds
    pub fn move_to(&mut self, x: f32, y: f32, timestamp_ms: f64) {
        self.driver
            .push(TouchEvent::move_at_millis(Vec2::new(x, y), timestamp_ms));
    }

    pub fn release(&mut self) {
        self.driver.push(TouchEvent::Release);
    }

    /// Advance by a display frame of `dt` seconds
    pub fn frame(&mut self, dt: f32) {
        self.transform = self.driver.frame(dt, &mut |_: CardTransform| {});
    }

    /// Switch preset by name and remember it; returns false for unknown names
    pub fn set_preset(&mut self, name: &str) -> bool {
        match TuningPreset::from_str(name) {
            Some(preset) => {
                self.settings.preset = preset;
                self.store_settings();
                true
            }
            None => {
                log::warn!("Unknown preset '{}'", name);
                false
            }
        }
    }

    /// Takes effect the next time a card is created
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.settings.reduced_motion = enabled;
        self.store_settings();
    }

    pub fn set_snap_to_faces(&mut self, enabled: bool) {
        self.settings.snap_to_faces = enabled;
        self.store_settings();
    }

    pub fn position_y(&self) -> f32 {
        self.transform.position_y
    }

    pub fn rotation_y(&self) -> f32 {
        self.transform.rotation_y
    }

    pub fn is_dragging(&self) -> bool {
        self.driver.is_dragging()
    }

    pub fn phase(&self) -> String {
        self.driver.phase().as_str().to_string()
    }
}

impl CardMotion {
    fn store_settings(&mut self) {
        self.settings.save();
        self.driver.apply_settings(&self.settings);
    }
}
