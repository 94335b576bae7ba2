//! Game state and core simulation types
//!
//! One `GameState` per session. It owns every live entity, the die, the
//! economy counters and the pending event queue. Nothing in here touches the
//! DOM; the shell reads it and drains `events` after each frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::die::{DieFaces, Upgrade};
use super::volley::{EventQueue, RollPhase};
use crate::consts::SIM_DT_MS;
use crate::ms_to_ticks;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Paused by the player
    Paused,
    /// Level-up pending: paused until an upgrade is picked, XP gain suspended
    ChoosingUpgrade,
    /// Die HP ran out. Terminal.
    GameOver,
}

/// Health band used for enemy tinting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Wounded,
    Critical,
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub hp: i32,
    /// HP at spawn; also the XP reward
    pub max_hp: i32,
    /// HP taken from the die when this enemy breaches the bottom edge
    pub damage: i32,
    /// Downward speed (pixels per second)
    pub speed: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, radius: f32, hp: i32, speed: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            hp,
            max_hp: hp,
            damage: hp,
            speed,
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f32) {
        self.pos.y += self.speed * dt_ms / 1000.0;
    }

    /// Apply damage; HP never goes below zero
    pub fn take_damage(&mut self, amount: i32) {
        self.hp = (self.hp - amount).max(0);
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Fraction of starting health left
    pub fn health_ratio(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        self.hp as f32 / self.max_hp as f32
    }

    pub fn health_band(&self) -> HealthBand {
        let ratio = self.health_ratio();
        if ratio > 0.6 {
            HealthBand::Healthy
        } else if ratio > 0.3 {
            HealthBand::Wounded
        } else {
            HealthBand::Critical
        }
    }
}

/// A projectile flying in a straight line
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Enemy this was aimed at. Informational only: hits are resolved against
    /// whatever live enemy the projectile overlaps.
    pub target_id: u32,
}

impl Projectile {
    /// Aim once at `target`; the direction is never updated afterwards
    pub fn aimed_at(id: u32, pos: Vec2, target: &Enemy, speed: f32, radius: f32) -> Self {
        let dir = (target.pos - pos).normalize_or_zero();
        Self {
            id,
            pos,
            vel: dir * speed,
            radius,
            target_id: target.id,
        }
    }

    /// Advance by `dt_ms` milliseconds
    pub fn update(&mut self, dt_ms: f32) {
        self.pos += self.vel * dt_ms / 1000.0;
    }
}

/// Playable region: the viewport minus the reserved HUD strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub ui_strip_height: f32,
}

impl PlayArea {
    pub fn new(viewport_width: f32, viewport_height: f32, ui_strip_height: f32) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ui_strip_height,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.viewport_width
    }

    /// Bottom boundary enemies must not cross
    #[inline]
    pub fn height(&self) -> f32 {
        (self.viewport_height - self.ui_strip_height).max(0.0)
    }

    /// Whether a point lies outside the viewport by more than `margin`
    pub fn is_far_outside(&self, pos: Vec2, margin: f32) -> bool {
        pos.x < -margin
            || pos.x > self.viewport_width + margin
            || pos.y < -margin
            || pos.y > self.viewport_height + margin
    }
}

/// Things the presentation side needs to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A roll started: animate the die to land on `value` within `duration_ms`
    RollRequested { value: u32, duration_ms: f32 },
    /// A volley of `count` projectiles was released
    VolleyFired { count: u32 },
    /// New wave spawned
    WaveStarted { wave: u32, enemies: u32 },
    EnemyKilled { xp: u32 },
    /// An enemy reached the bottom edge
    BoundaryBreached { damage: i32 },
    /// Level up: show the upgrade choice
    LevelUp { level: u32, options: [Upgrade; 3] },
    /// Die face values changed; redraw face textures
    FacesChanged { faces: DieFaces },
    GameOver { wave: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub area: PlayArea,
    pub phase: GamePhase,

    // === Waves ===
    /// Current wave number (0 before the first wave starts)
    pub wave: u32,
    pub enemies_per_wave: u32,

    // === Economy ===
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub xp: u32,
    pub xp_to_next: u32,

    // === Die ===
    pub faces: DieFaces,
    pub roll: RollPhase,
    /// Ticks since the last automatic roll
    pub roll_timer_ticks: u64,

    // === Entities ===
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,

    /// Deferred volley resolutions and projectile spawns
    pub schedule: EventQueue,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Outbound notifications, drained by the shell
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a fresh session. No enemies yet; call `next_wave` to start.
    pub fn new(seed: u64, tuning: Tuning, area: PlayArea) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            area,
            phase: GamePhase::Playing,
            wave: 0,
            enemies_per_wave: tuning.initial_enemies_per_wave,
            hp: tuning.player_max_hp,
            max_hp: tuning.player_max_hp,
            level: 1,
            xp: 0,
            xp_to_next: tuning.initial_xp_to_next,
            faces: DieFaces::default(),
            roll: RollPhase::Idle,
            roll_timer_ticks: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            schedule: EventQueue::default(),
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// New session with the first wave already spawned
    pub fn start(seed: u64, tuning: Tuning, area: PlayArea) -> Self {
        let mut state = Self::new(seed, tuning, area);
        super::wave::next_wave(&mut state);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform sample in `[lo, hi)`; `lo` when the range is empty
    pub fn random_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo { self.rng.random_range(lo..hi) } else { lo }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.phase, GamePhase::Paused | GamePhase::ChoosingUpgrade)
    }

    /// Level-up resolution pending (XP gain suspended)
    pub fn is_leveling_up(&self) -> bool {
        self.phase == GamePhase::ChoosingUpgrade
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Milliseconds until the next automatic roll
    pub fn time_to_next_roll_ms(&self) -> f32 {
        self.roll_interval_ticks().saturating_sub(self.roll_timer_ticks) as f32 * SIM_DT_MS
    }

    /// Automatic roll period in ticks
    pub fn roll_interval_ticks(&self) -> u64 {
        ms_to_ticks(self.tuning.roll_interval_ms).max(1)
    }

    /// Viewport changed: recompute the play area
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        self.area = PlayArea::new(viewport_width, viewport_height, self.tuning.ui_strip_height);
        log::debug!(
            "Play area resized to {}x{}",
            self.area.width(),
            self.area.height()
        );
    }

    /// Take all pending outbound events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
