//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::check_collision;
use super::die::Upgrade;
use super::economy::{choose_upgrade, damage_player, gain_xp};
use super::state::{GameEvent, GamePhase, GameState};
use super::volley::{process_due_events, start_roll};
use super::wave::advance_if_cleared;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
    /// Upgrade picked in the level-up dialog
    pub upgrade: Option<Upgrade>,
}

/// Advance the game state by one fixed timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.is_game_over() {
        return;
    }

    // Resolve a pending level-up
    if let Some(upgrade) = input.upgrade {
        choose_upgrade(state, upgrade);
    }

    // Handle pause toggle (ignored while the upgrade dialog is up)
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused");
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    // Paused: time stands still, scheduled shots wait
    if state.is_paused() {
        return;
    }

    state.time_ticks += 1;

    // Automatic roll
    state.roll_timer_ticks += 1;
    if state.roll_timer_ticks >= state.roll_interval_ticks() {
        start_roll(state);
        state.roll_timer_ticks = 0;
    }

    // Volley resolutions and staggered shots due this tick
    process_due_events(state);

    update_enemies(state, dt_ms);
    if state.is_game_over() {
        return;
    }

    update_projectiles(state, dt_ms);

    advance_if_cleared(state);
}

/// Move enemies, collect kills and resolve breaches
///
/// Removal keeps the index in place so the successor is not skipped. Stops
/// as soon as the die runs out of HP.
fn update_enemies(state: &mut GameState, dt_ms: f32) {
    let bottom = state.area.height();
    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.update(dt_ms);

        if enemy.is_dead() {
            let xp = enemy.max_hp.max(0) as u32;
            state.enemies.remove(i);
            state.events.push(GameEvent::EnemyKilled { xp });
            gain_xp(state, xp);
            continue;
        }

        if enemy.pos.y + enemy.radius >= bottom {
            let damage = enemy.damage;
            state.enemies.remove(i);
            log::debug!("Enemy breached the line for {} damage", damage);
            damage_player(state, damage);
            if state.is_game_over() {
                return;
            }
            continue;
        }

        i += 1;
    }
}

/// Move projectiles, apply hits and cull strays
///
/// Each projectile can hit at most one enemy per tick: the first live enemy
/// it overlaps, whatever it was originally aimed at.
fn update_projectiles(state: &mut GameState, dt_ms: f32) {
    let GameState {
        projectiles,
        enemies,
        area,
        tuning,
        ..
    } = state;
    let margin = tuning.collision_margin;
    let damage = tuning.projectile_damage;
    let offscreen = tuning.offscreen_margin;

    projectiles.retain_mut(|p| {
        p.update(dt_ms);

        if let Some(j) = enemies.iter().position(|e| check_collision(&*p, e, margin)) {
            enemies[j].take_damage(damage);
            return false;
        }

        !area.is_far_outside(p.pos, offscreen)
    });
}
