//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a page can
//! override it with an inline JSON block. Missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Die / volley ===
    /// Time between automatic rolls (ms)
    pub roll_interval_ms: f32,
    /// Roll animation length; the volley fires when it elapses (ms)
    pub roll_duration_ms: f32,
    /// Delay between consecutive projectiles of one volley (ms)
    pub volley_stagger_ms: f32,

    // === Enemies ===
    /// Inclusive HP range of a freshly spawned enemy
    pub enemy_hp_min: i32,
    pub enemy_hp_max: i32,
    /// Descent speed range (pixels per second, max exclusive)
    pub enemy_speed_min: f32,
    pub enemy_speed_max: f32,
    pub enemy_radius: f32,
    /// Horizontal inset keeping spawns away from the viewport edges
    pub spawn_margin: f32,
    /// Spawn height (negative = above the visible area)
    pub spawn_y: f32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub projectile_damage: i32,
    pub collision_margin: f32,
    pub offscreen_margin: f32,

    // === Waves ===
    /// Enemies-per-wave before the first wave's increment is applied
    pub initial_enemies_per_wave: u32,
    pub enemies_per_wave_step: u32,

    // === Economy ===
    pub player_max_hp: i32,
    pub initial_xp_to_next: u32,
    /// Threshold multiplier per level (result is floored)
    pub xp_growth: f32,

    // === Layout ===
    pub ui_strip_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            roll_interval_ms: 3000.0,
            roll_duration_ms: 2100.0,
            volley_stagger_ms: 100.0,

            enemy_hp_min: 4,
            enemy_hp_max: 7,
            enemy_speed_min: 5.0,
            enemy_speed_max: 10.0,
            enemy_radius: ENEMY_RADIUS,
            spawn_margin: ENEMY_SPAWN_MARGIN,
            spawn_y: ENEMY_SPAWN_Y,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_damage: PROJECTILE_DAMAGE,
            collision_margin: COLLISION_MARGIN,
            offscreen_margin: OFFSCREEN_MARGIN,

            // First call to next_wave adds the step, so wave 1 spawns 5
            initial_enemies_per_wave: 3,
            enemies_per_wave_step: 2,

            player_max_hp: 100,
            initial_xp_to_next: 10,
            xp_growth: 1.5,

            ui_strip_height: UI_STRIP_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    ///
    /// Every float must be finite; wave sizes are capped at
    /// `MAX_ENEMIES_PER_WAVE`.
    pub fn validate(&self) -> Result<(), TuningError> {
        fn out_of_range(field: &'static str, value: f64) -> TuningError {
            TuningError::OutOfRange { field, value }
        }
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(out_of_range(field, value as f64))
            }
        }
        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(out_of_range(field, value as f64))
            }
        }
        fn finite(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(out_of_range(field, value as f64))
            }
        }

        positive("roll_interval_ms", self.roll_interval_ms)?;
        positive("roll_duration_ms", self.roll_duration_ms)?;
        non_negative("volley_stagger_ms", self.volley_stagger_ms)?;

        if self.enemy_hp_min < 1 || self.enemy_hp_max < self.enemy_hp_min {
            return Err(out_of_range("enemy_hp_min", self.enemy_hp_min as f64));
        }
        positive("enemy_speed_min", self.enemy_speed_min)?;
        positive("enemy_speed_max", self.enemy_speed_max)?;
        if self.enemy_speed_max <= self.enemy_speed_min {
            return Err(out_of_range("enemy_speed_max", self.enemy_speed_max as f64));
        }
        positive("enemy_radius", self.enemy_radius)?;
        non_negative("spawn_margin", self.spawn_margin)?;
        finite("spawn_y", self.spawn_y)?;

        positive("projectile_speed", self.projectile_speed)?;
        positive("projectile_radius", self.projectile_radius)?;
        if self.projectile_damage < 1 {
            return Err(out_of_range("projectile_damage", self.projectile_damage as f64));
        }
        non_negative("collision_margin", self.collision_margin)?;
        non_negative("offscreen_margin", self.offscreen_margin)?;

        if self.initial_enemies_per_wave > MAX_ENEMIES_PER_WAVE {
            return Err(out_of_range(
                "initial_enemies_per_wave",
                self.initial_enemies_per_wave as f64,
            ));
        }
        if self.enemies_per_wave_step > MAX_ENEMIES_PER_WAVE {
            return Err(out_of_range(
                "enemies_per_wave_step",
                self.enemies_per_wave_step as f64,
            ));
        }

        if self.player_max_hp < 1 {
            return Err(out_of_range("player_max_hp", self.player_max_hp as f64));
        }
        if self.initial_xp_to_next == 0 {
            return Err(out_of_range("initial_xp_to_next", 0.0));
        }
        if !self.xp_growth.is_finite() || self.xp_growth < 1.0 {
            return Err(out_of_range("xp_growth", self.xp_growth as f64));
        }

        non_negative("ui_strip_height", self.ui_strip_height)?;
        Ok(())
    }

    /// Load overrides from the page's `<script id="tuning">` block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, TuningError> {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => {
                let tuning = Self::from_json(&json)?;
                log::info!("Loaded tuning overrides");
                Ok(tuning)
            }
            _ => {
                log::info!("Using default tuning");
                Ok(Self::default())
            }
        }
    }

    /// Native: defaults only
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, TuningError> {
        Ok(Self::default())
    }

    /// DOM id of the inline JSON override
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "tuning";
}
