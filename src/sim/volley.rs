//! Roll-and-shoot orchestration
//!
//! A roll picks a face value, asks the presenter to animate it, and after
//! `roll_duration_ms` releases a volley of that many projectiles, one every
//! `volley_stagger_ms`. Deferred work is kept as explicit events keyed by
//! simulation tick so ordering is deterministic and pausing simply holds it.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use glam::Vec2;

use super::collision::{aim_anchor, find_nearest_enemy};
use super::die::FaceId;
use super::state::{GameEvent, GameState, Projectile};
use crate::consts::PROJECTILE_JITTER;
use crate::ms_to_ticks;

/// Roll orchestrator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollPhase {
    /// No roll has happened yet (or the game ended)
    Idle,
    /// Die is animating; the volley fires at `resolve_at`
    Rolling { value: u32, resolve_at: u64 },
    /// Volley released
    Resolved { value: u32 },
}

/// Deferred simulation work
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScheduledEvent {
    /// Release a volley of `value` projectiles
    ResolveVolley { value: u32 },
    /// One shot of a volley; re-targets at fire time
    SpawnProjectile { shot: u32, of: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    at_tick: u64,
    seq: u64,
    event: ScheduledEvent,
}

/// Min-heap of events by (fire tick, insertion order)
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl EventQueue {
    pub fn schedule(&mut self, at_tick: u64, event: ScheduledEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Entry { at_tick, seq, event }));
    }

    /// Pop the earliest event due at or before `now`
    pub fn pop_due(&mut self, now: u64) -> Option<ScheduledEvent> {
        match self.heap.peek() {
            Some(Reverse(entry)) if entry.at_tick <= now => {
                self.heap.pop().map(|Reverse(entry)| entry.event)
            }
            _ => None,
        }
    }

    /// Tick of the earliest pending event
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.at_tick)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Number of pending projectile spawns
    pub fn pending_shots(&self) -> usize {
        self.heap
            .iter()
            .filter(|Reverse(e)| matches!(e.event, ScheduledEvent::SpawnProjectile { .. }))
            .count()
    }
}

/// Idle/Resolved -> Rolling: pick a face, request the animation, schedule the volley
///
/// The face is chosen uniformly from the six, independent of how the die
/// currently looks. Returns the rolled value.
pub fn start_roll(state: &mut GameState) -> u32 {
    let face = FaceId::random(&mut state.rng);
    let value = state.faces.get(face);
    let duration_ms = state.tuning.roll_duration_ms;
    let resolve_at = state.time_ticks + ms_to_ticks(duration_ms);

    state
        .schedule
        .schedule(resolve_at, ScheduledEvent::ResolveVolley { value });
    state.roll = RollPhase::Rolling { value, resolve_at };
    state
        .events
        .push(GameEvent::RollRequested { value, duration_ms });

    log::debug!("Rolled {:?} = {} (volley at tick {})", face, value, resolve_at);
    value
}

/// Rolling -> Resolved: schedule `value` staggered projectile spawns
///
/// Shot 0 fires on this tick; shot `i` fires `i * stagger` later.
pub fn resolve_volley(state: &mut GameState, value: u32) {
    let stagger = state.tuning.volley_stagger_ms;
    let now = state.time_ticks;
    for shot in 0..value {
        let at = now + ms_to_ticks(shot as f32 * stagger);
        state
            .schedule
            .schedule(at, ScheduledEvent::SpawnProjectile { shot, of: value });
    }
    state.roll = RollPhase::Resolved { value };
    state.events.push(GameEvent::VolleyFired { count: value });
    log::debug!("Volley of {} scheduled", value);
}

/// Fire one shot at the enemy nearest the aim anchor right now
///
/// With no enemy on the field the shot is dropped. Returns true if a
/// projectile was created.
pub fn fire_projectile(state: &mut GameState) -> bool {
    let anchor = aim_anchor(&state.area);
    let Some(target) = find_nearest_enemy(&state.enemies, anchor).cloned() else {
        log::debug!("Shot dropped: no enemy to aim at");
        return false;
    };

    let half = PROJECTILE_JITTER / 2.0;
    let offset = Vec2::new(state.random_f32(-half, half), state.random_f32(-half, half));
    let id = state.next_entity_id();
    let projectile = Projectile::aimed_at(
        id,
        anchor + offset,
        &target,
        state.tuning.projectile_speed,
        state.tuning.projectile_radius,
    );
    state.projectiles.push(projectile);
    true
}

/// Run every scheduled event due on the current tick, in order
///
/// Events scheduled for "now" while draining (shot 0 of a volley) run in the
/// same pass.
pub fn process_due_events(state: &mut GameState) {
    while let Some(event) = state.schedule.pop_due(state.time_ticks) {
        match event {
            ScheduledEvent::ResolveVolley { value } => resolve_volley(state, value),
            ScheduledEvent::SpawnProjectile { shot, of } => {
                if fire_projectile(state) {
                    log::debug!("Shot {}/{} fired", shot + 1, of);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::die::DieFaces;
    use crate::sim::state::{Enemy, PlayArea};
    use crate::tuning::Tuning;

    fn fresh() -> GameState {
        GameState::new(9, Tuning::default(), PlayArea::new(800.0, 720.0, 120.0))
    }

    fn add_enemy(state: &mut GameState, x: f32, y: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, Vec2::new(x, y), 25.0, 5, 5.0));
        id
    }

    #[test]
    fn test_queue_orders_by_tick_then_insertion() {
        let mut q = EventQueue::default();
        q.schedule(5, ScheduledEvent::SpawnProjectile { shot: 1, of: 2 });
        q.schedule(3, ScheduledEvent::ResolveVolley { value: 2 });
        q.schedule(5, ScheduledEvent::SpawnProjectile { shot: 0, of: 2 });

        assert_eq!(q.next_due(), Some(3));
        assert_eq!(q.pop_due(2), None);
        assert_eq!(q.pop_due(3), Some(ScheduledEvent::ResolveVolley { value: 2 }));
        assert_eq!(q.pop_due(10), Some(ScheduledEvent::SpawnProjectile { shot: 1, of: 2 }));
        assert_eq!(q.pop_due(10), Some(ScheduledEvent::SpawnProjectile { shot: 0, of: 2 }));
        assert!(q.is_empty());
    }

    #[test]
    fn test_start_roll_schedules_resolution() {
        let mut state = fresh();
        state.faces = DieFaces::new([3; 6]);
        let value = start_roll(&mut state);
        assert_eq!(value, 3);
        assert_eq!(state.roll, RollPhase::Rolling { value: 3, resolve_at: 252 });
        assert_eq!(state.schedule.next_due(), Some(252));
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::RollRequested { value: 3, duration_ms, .. }) if *duration_ms == 2100.0
        ));
    }

    #[test]
    fn test_volley_of_four_schedules_four_spawns() {
        let mut state = fresh();
        resolve_volley(&mut state, 4);
        assert_eq!(state.schedule.pending_shots(), 4);
        assert_eq!(state.roll, RollPhase::Resolved { value: 4 });
    }

    #[test]
    fn test_shots_are_staggered() {
        let mut state = fresh();
        add_enemy(&mut state, 400.0, 100.0);
        resolve_volley(&mut state, 3);

        // Shot 0 is due immediately
        process_due_events(&mut state);
        assert_eq!(state.projectiles.len(), 1);

        // 100 ms = 12 ticks later
        state.time_ticks += 11;
        process_due_events(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        state.time_ticks += 1;
        process_due_events(&mut state);
        assert_eq!(state.projectiles.len(), 2);
        state.time_ticks += 12;
        process_due_events(&mut state);
        assert_eq!(state.projectiles.len(), 3);
        assert!(state.schedule.is_empty());
    }

    #[test]
    fn test_shot_without_target_is_dropped() {
        let mut state = fresh();
        resolve_volley(&mut state, 2);
        state.time_ticks += 100;
        process_due_events(&mut state);
        assert!(state.projectiles.is_empty());
        assert!(state.schedule.is_empty());
    }

    #[test]
    fn test_each_shot_retargets() {
        let mut state = fresh();
        // Anchor is (400, 450)
        let far = add_enemy(&mut state, 400.0, 0.0);
        resolve_volley(&mut state, 2);
        process_due_events(&mut state);
        assert_eq!(state.projectiles[0].target_id, far);

        let near = add_enemy(&mut state, 400.0, 300.0);
        state.time_ticks += 12;
        process_due_events(&mut state);
        assert_eq!(state.projectiles[1].target_id, near);
    }

    #[test]
    fn test_projectile_spawns_near_anchor() {
        let mut state = fresh();
        add_enemy(&mut state, 100.0, 100.0);
        for _ in 0..20 {
            assert!(fire_projectile(&mut state));
        }
        let anchor = aim_anchor(&state.area);
        for p in &state.projectiles {
            let d = p.pos - anchor;
            assert!(d.x.abs() <= 10.0 && d.y.abs() <= 10.0);
            assert!((p.vel.length() - 300.0).abs() < 1e-2);
        }
    }
}
