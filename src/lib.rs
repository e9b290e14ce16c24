//! Mech Arena - a two-player block mechanism arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (mechanisms, collisions, game loop)
//! - `renderer`: Rendering seam and a headless recording surface
//! - `platform`: Input and frame pacing seams
//! - `settings`: Construction parameters

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{GameError, Result};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Block collision radius (normalized units)
    pub const BLOCK_RADIUS: f32 = 0.5;
    /// Directional move speed (units/second)
    pub const CORE_SPEED: f32 = 4.0;
    /// Velocity kept after one second of drift
    pub const DAMPING: f32 = 0.25;
    /// Drift slower than this snaps to zero
    pub const MIN_DRIFT_SPEED: f32 = 0.001;
}

/// Convert a normalized coordinate to screen pixels
#[inline]
pub fn to_screen(origin: Vec2, unit_size: f32, normalized: Vec2) -> Vec2 {
    origin + normalized * unit_size
}
