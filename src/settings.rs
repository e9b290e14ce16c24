//! Game construction parameters
//!
//! Loaded from a JSON file on native builds; every field has a default so a
//! partial file is enough.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// Arena settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Seconds between frames; also the simulation dt
    pub time_between_frame: f32,

    // === Coordinate system ===
    /// Screen position (pixels) of the normalized origin
    pub origin: Vec2,
    /// Pixels per normalized unit
    pub unit_size: f32,
    /// Background asset handle (drawn as-is, never loaded here)
    pub background: Option<String>,

    // === Mechanisms ===
    /// Collision radius of a block (normalized units)
    pub block_radius: f32,
    /// Directional move speed (units/second)
    pub core_speed: f32,
    /// Fraction of velocity kept after one second of drift
    pub damping: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            time_between_frame: SIM_DT,

            origin: Vec2::new(640.0, 360.0),
            unit_size: 32.0,
            background: None,

            block_radius: BLOCK_RADIUS,
            core_speed: CORE_SPEED,
            damping: DAMPING,
        }
    }
}

impl Settings {
    /// Target tick rate implied by the frame duration
    pub fn tick_rate(&self) -> f32 {
        1.0 / self.time_between_frame
    }

    /// Check ranges. Called by `Game::new`, so a bad file fails before the loop
    pub fn validate(&self) -> Result<()> {
        if !(self.time_between_frame.is_finite() && self.time_between_frame > 0.0) {
            return Err(GameError::InvalidSettings(format!(
                "time_between_frame must be positive, got {}",
                self.time_between_frame
            )));
        }
        if !(self.unit_size.is_finite() && self.unit_size > 0.0) {
            return Err(GameError::InvalidSettings(format!(
                "unit_size must be positive, got {}",
                self.unit_size
            )));
        }
        if !(self.block_radius.is_finite() && self.block_radius > 0.0) {
            return Err(GameError::InvalidSettings(format!(
                "block_radius must be positive, got {}",
                self.block_radius
            )));
        }
        if !(self.core_speed.is_finite() && self.core_speed >= 0.0) {
            return Err(GameError::InvalidSettings(format!(
                "core_speed must be non-negative, got {}",
                self.core_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(GameError::InvalidSettings(format!(
                "damping must be within 0..=1, got {}",
                self.damping
            )));
        }
        if !self.origin.is_finite() {
            return Err(GameError::InvalidSettings("origin must be finite".into()));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
