//! Die HP, XP and leveling

use super::die::{Upgrade, apply_upgrade};
use super::state::{GameEvent, GamePhase, GameState};

/// Award XP for a kill. Ignored while an upgrade choice is pending.
///
/// Returns true if this gain triggered a level-up.
pub fn gain_xp(state: &mut GameState, amount: u32) -> bool {
    if state.is_leveling_up() {
        log::debug!("XP +{} dropped: level-up pending", amount);
        return false;
    }

    state.xp = state.xp.saturating_add(amount);
    log::debug!("XP +{} -> {}/{}", amount, state.xp, state.xp_to_next);

    if state.xp >= state.xp_to_next {
        level_up(state);
        true
    } else {
        false
    }
}

/// Consume one threshold of XP, grow the next threshold and pause for the
/// upgrade choice. Surplus XP carries over.
pub fn level_up(state: &mut GameState) {
    state.level += 1;
    state.xp -= state.xp_to_next;
    state.xp_to_next = next_threshold(state.xp_to_next, state.tuning.xp_growth);
    state.phase = GamePhase::ChoosingUpgrade;

    log::info!(
        "Level up! Level {} (xp {}/{})",
        state.level,
        state.xp,
        state.xp_to_next
    );
    state.events.push(GameEvent::LevelUp {
        level: state.level,
        options: Upgrade::ALL,
    });
}

/// `floor(current * growth)`, never less than `current`
pub fn next_threshold(current: u32, growth: f32) -> u32 {
    ((current as f64 * growth as f64).floor() as u32).max(current)
}

/// Resolve a pending level-up with the chosen upgrade and resume play
///
/// Returns false (and changes nothing) when no level-up is pending.
pub fn choose_upgrade(state: &mut GameState, upgrade: Upgrade) -> bool {
    if !state.is_leveling_up() {
        log::warn!("Upgrade {:?} chosen with no level-up pending", upgrade);
        return false;
    }

    apply_upgrade(&mut state.faces, upgrade, &mut state.rng);
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::FacesChanged { faces: state.faces });
    log::info!("Applied {}: faces now {:?}", upgrade.label(), state.faces.values());
    true
}

/// Subtract breach damage from the die. Ends the game at zero.
pub fn damage_player(state: &mut GameState, amount: i32) {
    state.hp -= amount;
    state.events.push(GameEvent::BoundaryBreached { damage: amount });
    if state.hp <= 0 {
        game_over(state);
    }
}

/// Terminal transition: stop everything and drop pending work
pub fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.schedule.clear();
    state.roll = super::volley::RollPhase::Idle;
    log::info!("Game over! Survived until wave {}", state.wave);
    state.events.push(GameEvent::GameOver { wave: state.wave });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::PlayArea;
    use crate::tuning::Tuning;

    fn fresh() -> GameState {
        GameState::new(42, Tuning::default(), PlayArea::new(800.0, 720.0, 120.0))
    }

    #[test]
    fn test_level_up_carries_remainder() {
        let mut state = fresh();
        state.xp = 9;
        assert!(gain_xp(&mut state, 5));
        assert_eq!(state.level, 2);
        assert_eq!(state.xp, 4);
        assert_eq!(state.xp_to_next, 15);
        assert_eq!(state.phase, GamePhase::ChoosingUpgrade);
        assert!(state.is_paused());
    }

    #[test]
    fn test_xp_suspended_while_leveling() {
        let mut state = fresh();
        assert!(gain_xp(&mut state, 10));
        assert_eq!(state.xp, 0);
        assert!(!gain_xp(&mut state, 100));
        assert_eq!(state.xp, 0);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_single_level_per_gain() {
        // A huge gain still levels only once; surplus waits for the next kill
        let mut state = fresh();
        gain_xp(&mut state, 40);
        assert_eq!(state.level, 2);
        assert_eq!(state.xp, 30);
        choose_upgrade(&mut state, Upgrade::Single);
        gain_xp(&mut state, 0);
        assert_eq!(state.level, 3);
        assert_eq!(state.xp, 15);
        assert_eq!(state.xp_to_next, 22);
    }

    #[test]
    fn test_threshold_floor() {
        assert_eq!(next_threshold(10, 1.5), 15);
        assert_eq!(next_threshold(15, 1.5), 22);
        assert_eq!(next_threshold(22, 1.5), 33);
        assert_eq!(next_threshold(1, 1.0), 1);
    }

    #[test]
    fn test_choose_upgrade_resumes() {
        let mut state = fresh();
        gain_xp(&mut state, 10);
        let before = state.faces.total();
        assert!(choose_upgrade(&mut state, Upgrade::Pair));
        assert_eq!(state.faces.total(), before + 4);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.is_leveling_up());
        assert!(matches!(state.events.last(), Some(GameEvent::FacesChanged { .. })));
    }

    #[test]
    fn test_choose_upgrade_without_level_up() {
        let mut state = fresh();
        let before = state.faces;
        assert!(!choose_upgrade(&mut state, Upgrade::Triple));
        assert_eq!(state.faces, before);
    }

    #[test]
    fn test_damage_to_game_over() {
        let mut state = fresh();
        damage_player(&mut state, 60);
        assert_eq!(state.hp, 40);
        assert_eq!(state.phase, GamePhase::Playing);
        damage_player(&mut state, 40);
        assert_eq!(state.hp, 0);
        assert!(state.is_game_over());
        assert!(state.schedule.is_empty());
    }
}
