//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Deferred work as tick-keyed events, never timers
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod die;
pub mod economy;
pub mod state;
pub mod tick;
pub mod volley;
pub mod wave;

pub use clock::FixedClock;
pub use collision::{aim_anchor, check_collision, find_nearest_enemies, find_nearest_enemy};
pub use die::{DieFaces, FaceId, Upgrade, apply_upgrade};
pub use economy::{choose_upgrade, gain_xp};
pub use state::{Enemy, GameEvent, GamePhase, GameState, HealthBand, PlayArea, Projectile};
pub use tick::{TickInput, tick};
pub use volley::{EventQueue, RollPhase, ScheduledEvent};
pub use wave::next_wave;
