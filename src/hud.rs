//! Read-only view of the game for the HUD
//!
//! The shell renders these values into the DOM; nothing here mutates state.

use crate::sim::{DieFaces, GamePhase, GameState};

/// Everything the HUD strip and dialogs display
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub wave: u32,
    pub enemies: usize,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,
    /// Seconds until the next automatic roll
    pub next_roll_secs: f32,
    pub paused: bool,
    pub phase: GamePhase,
    pub faces: DieFaces,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            wave: state.wave,
            enemies: state.enemies.len(),
            hp: state.hp,
            max_hp: state.max_hp,
            level: state.level,
            xp: state.xp,
            xp_to_next: state.xp_to_next,
            next_roll_secs: state.time_to_next_roll_ms() / 1000.0,
            paused: state.is_paused(),
            phase: state.phase,
            faces: state.faces,
        }
    }

    /// HP bar fill in [0, 1]
    pub fn hp_ratio(&self) -> f32 {
        ratio(self.hp.max(0) as f32, self.max_hp as f32)
    }

    /// XP bar fill in [0, 1]
    pub fn xp_ratio(&self) -> f32 {
        ratio(self.xp as f32, self.xp_to_next as f32)
    }

    pub fn hp_text(&self) -> String {
        format!("{}/{}", self.hp.max(0), self.max_hp)
    }

    pub fn xp_text(&self) -> String {
        format!("{}/{}", self.xp, self.xp_to_next)
    }

    /// Countdown with one decimal, e.g. "2.4s"
    pub fn countdown_text(&self) -> String {
        format!("{:.1}s", self.next_roll_secs)
    }

    pub fn pause_label(&self) -> &'static str {
        if self.phase == GamePhase::Paused {
            "Resume"
        } else {
            "Pause"
        }
    }
}

fn ratio(value: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}
