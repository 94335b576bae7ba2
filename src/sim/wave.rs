//! Wave progression
//!
//! A wave is spawned all at once. The next one starts only when the field is
//! empty, whether the enemies died or broke through.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, GameEvent, GameState};
use crate::consts::MAX_ENEMIES_PER_WAVE;

/// Start the next wave: bump the counters and spawn the whole cohort
pub fn next_wave(state: &mut GameState) {
    state.wave += 1;
    state.enemies_per_wave = state
        .enemies_per_wave
        .saturating_add(state.tuning.enemies_per_wave_step)
        .min(MAX_ENEMIES_PER_WAVE);

    let count = state.enemies_per_wave;
    state.enemies.reserve(count as usize);
    for _ in 0..count {
        spawn_enemy(state);
    }

    log::info!("Wave {} started with {} enemies", state.wave, count);
    state.events.push(GameEvent::WaveStarted {
        wave: state.wave,
        enemies: count,
    });
}

/// Start the next wave only if the field is clear and a wave already ran
///
/// Returns true when a wave was spawned.
pub fn advance_if_cleared(state: &mut GameState) -> bool {
    if wave_cleared(state) {
        next_wave(state);
        true
    } else {
        false
    }
}

/// No live enemies left after at least one wave started
#[inline]
pub fn wave_cleared(state: &GameState) -> bool {
    state.wave >= 1 && state.enemies.is_empty()
}

/// Spawn a single enemy above the play area at a random x inside the margins
pub fn spawn_enemy(state: &mut GameState) {
    let t = &state.tuning;
    let (margin, spawn_y, radius) = (t.spawn_margin, t.spawn_y, t.enemy_radius);
    let (hp_min, hp_max) = (t.enemy_hp_min, t.enemy_hp_max);
    let (speed_min, speed_max) = (t.enemy_speed_min, t.enemy_speed_max);

    // Narrow viewports collapse the range to its center
    let width = state.area.width();
    let (lo, hi) = if width > 2.0 * margin {
        (margin, width - margin)
    } else {
        (width / 2.0, width / 2.0)
    };
    let x = state.random_f32(lo, hi);
    let hp = state.rng.random_range(hp_min..=hp_max);
    let speed = state.random_f32(speed_min, speed_max);

    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, Vec2::new(x, spawn_y), radius, hp, speed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlayArea;
    use crate::tuning::Tuning;

    fn fresh(seed: u64) -> GameState {
        GameState::new(seed, Tuning::default(), PlayArea::new(800.0, 720.0, 120.0))
    }

    #[test]
    fn test_first_wave_spawns_five() {
        let mut state = fresh(1);
        assert!(!wave_cleared(&state), "no wave before the first start");
        next_wave(&mut state);
        assert_eq!(state.wave, 1);
        assert_eq!(state.enemies.len(), 5);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::WaveStarted { wave: 1, enemies: 5 })
        ));
    }

    #[test]
    fn test_wave_counts_grow_by_two() {
        let mut state = fresh(2);
        for n in 1..=6u32 {
            state.enemies.clear();
            next_wave(&mut state);
            assert_eq!(state.wave, n);
            assert_eq!(state.enemies.len() as u32, 5 + 2 * (n - 1));
        }
    }

    #[test]
    fn test_spawned_enemies_in_range() {
        let mut state = fresh(3);
        for _ in 0..5 {
            state.enemies.clear();
            next_wave(&mut state);
        }
        for e in &state.enemies {
            assert!(e.pos.x >= 60.0 && e.pos.x < 740.0, "x={}", e.pos.x);
            assert_eq!(e.pos.y, -50.0);
            assert!((4..=7).contains(&e.hp));
            assert_eq!(e.max_hp, e.hp);
            assert_eq!(e.damage, e.hp);
            assert!(e.speed >= 5.0 && e.speed < 10.0);
        }
    }

    #[test]
    fn test_advance_guarded_by_live_enemies() {
        let mut state = fresh(4);
        next_wave(&mut state);
        assert!(!advance_if_cleared(&mut state));
        assert_eq!(state.wave, 1);

        state.enemies.clear();
        assert!(advance_if_cleared(&mut state));
        assert_eq!(state.wave, 2);
        assert_eq!(state.enemies.len(), 7);
    }

    #[test]
    fn test_narrow_viewport_spawns_centered() {
        let mut state = GameState::new(5, Tuning::default(), PlayArea::new(100.0, 600.0, 120.0));
        spawn_enemy(&mut state);
        assert_eq!(state.enemies[0].pos.x, 50.0);
    }

    #[test]
    fn test_unique_ids() {
        let mut state = fresh(6);
        next_wave(&mut state);
        let mut ids: Vec<u32> = state.enemies.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_wave_size_is_capped() {
        let tuning = Tuning {
            initial_enemies_per_wave: MAX_ENEMIES_PER_WAVE - 1,
            enemies_per_wave_step: MAX_ENEMIES_PER_WAVE,
            ..Tuning::default()
        };
        let mut state = GameState::new(7, tuning, PlayArea::new(800.0, 720.0, 120.0));
        next_wave(&mut state);
        assert_eq!(state.enemies.len() as u32, MAX_ENEMIES_PER_WAVE);
        state.enemies.clear();
        next_wave(&mut state);
        assert_eq!(state.enemies_per_wave, MAX_ENEMIES_PER_WAVE);
    }
}
