//! Dice Defense - roll the die, fire the volley, hold the line
//!
//! Core modules:
//! - `sim`: Deterministic simulation (waves, volleys, collisions, economy)
//! - `renderer`: 2D draw lists for enemies and projectiles
//! - `platform`: Presentation collaborator ports (die, viewport)
//! - `hud`: Read-only HUD snapshot for the UI layer
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::{InitError, TuningError};
pub use hud::HudSnapshot;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const SIM_HZ: u32 = 120;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f32 = 1000.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame gaps longer than this are clamped (tab switch, debugger pause)
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Die faces
    pub const FACE_COUNT: usize = 6;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 25.0;
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    pub const ENEMY_SPAWN_MARGIN: f32 = 60.0;
    /// Upper bound on a single wave's size
    pub const MAX_ENEMIES_PER_WAVE: u32 = 500;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 300.0; // pixels per second
    pub const PROJECTILE_DAMAGE: i32 = 2;
    /// Random spawn offset around the aim anchor (+/- half of this)
    pub const PROJECTILE_JITTER: f32 = 20.0;

    /// Extra reach added to both radii so hits stay forgiving on small screens
    pub const COLLISION_MARGIN: f32 = 10.0;
    /// Projectiles are culled this far outside the viewport
    pub const OFFSCREEN_MARGIN: f32 = 50.0;

    /// Reserved HUD strip at the bottom of the viewport
    pub const UI_STRIP_HEIGHT: f32 = 120.0;
}

/// Convert a millisecond duration to whole simulation ticks (rounded)
#[inline]
pub fn ms_to_ticks(ms: f32) -> u64 {
    (ms.max(0.0) * consts::SIM_HZ as f32 / 1000.0).round() as u64
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_ticks() {
        assert_eq!(ms_to_ticks(0.0), 0);
        assert_eq!(ms_to_ticks(100.0), 12);
        assert_eq!(ms_to_ticks(2100.0), 252);
        assert_eq!(ms_to_ticks(3000.0), 360);
        assert_eq!(ms_to_ticks(-5.0), 0);
    }
}
