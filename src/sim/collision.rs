//! Collision detection and targeting
//!
//! Everything is circles. Hits get a fixed extra margin so small screens
//! stay forgiving; targeting is plain distance from the aim anchor.

use glam::Vec2;

use super::state::{Enemy, PlayArea};
use crate::distance;

/// Anything with a circular hitbox
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

impl Circle for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Circle for super::state::Projectile {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// True iff the centers are closer than both radii plus `margin`
#[inline]
pub fn check_collision(a: &impl Circle, b: &impl Circle, margin: f32) -> bool {
    distance(a.center(), b.center()) < a.radius() + b.radius() + margin
}

/// Point volleys are fired from: horizontal center, 75% down the play area
#[inline]
pub fn aim_anchor(area: &PlayArea) -> Vec2 {
    Vec2::new(area.width() / 2.0, area.height() * 0.75)
}

/// Closest live enemy to `anchor`; ties go to the earliest in iteration order
pub fn find_nearest_enemy<'a>(enemies: &'a [Enemy], anchor: Vec2) -> Option<&'a Enemy> {
    let mut best: Option<(&Enemy, f32)> = None;
    for enemy in enemies {
        let d = distance(anchor, enemy.pos);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((enemy, d)),
        }
    }
    best.map(|(e, _)| e)
}

/// Up to `count` enemies closest to `anchor`, nearest first
///
/// Stable sort, so equal distances keep iteration order.
pub fn find_nearest_enemies(enemies: &[Enemy], anchor: Vec2, count: usize) -> Vec<&Enemy> {
    let mut by_distance: Vec<(&Enemy, f32)> = enemies
        .iter()
        .map(|e| (e, distance(anchor, e.pos)))
        .collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
    by_distance.into_iter().take(count).map(|(e, _)| e).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Projectile;

    fn enemy_at(id: u32, x: f32, y: f32) -> Enemy {
        Enemy::new(id, Vec2::new(x, y), 25.0, 4, 5.0)
    }

    #[test]
    fn test_collision_with_margin() {
        let e = enemy_at(1, 0.0, 0.0);
        let target = enemy_at(2, 0.0, -100.0);
        let mut p = Projectile::aimed_at(1, Vec2::new(39.0, 0.0), &target, 300.0, 5.0);

        // 25 + 5 + 10 = 40
        assert!(check_collision(&p, &e, 10.0));
        p.pos.x = 40.0;
        assert!(!check_collision(&p, &e, 10.0));
        // Without the margin it's a clear miss
        p.pos.x = 35.0;
        assert!(!check_collision(&p, &e, 0.0));
    }

    #[test]
    fn test_nearest_enemy_empty() {
        assert!(find_nearest_enemy(&[], Vec2::ZERO).is_none());
        assert!(find_nearest_enemies(&[], Vec2::ZERO, 3).is_empty());
    }

    #[test]
    fn test_nearest_enemy() {
        let enemies = vec![
            enemy_at(1, 0.0, 100.0),
            enemy_at(2, 0.0, 20.0),
            enemy_at(3, 0.0, 50.0),
        ];
        assert_eq!(find_nearest_enemy(&enemies, Vec2::ZERO).map(|e| e.id), Some(2));
    }

    #[test]
    fn test_nearest_enemy_tie_first_wins() {
        let enemies = vec![enemy_at(1, -10.0, 0.0), enemy_at(2, 10.0, 0.0)];
        assert_eq!(find_nearest_enemy(&enemies, Vec2::ZERO).map(|e| e.id), Some(1));
        let two = find_nearest_enemies(&enemies, Vec2::ZERO, 1);
        assert_eq!(two[0].id, 1);
    }

    #[test]
    fn test_nearest_enemies_sorted_and_capped() {
        let enemies = vec![
            enemy_at(1, 0.0, 100.0),
            enemy_at(2, 0.0, 20.0),
            enemy_at(3, 0.0, 50.0),
        ];
        let ids: Vec<u32> = find_nearest_enemies(&enemies, Vec2::ZERO, 2)
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(find_nearest_enemies(&enemies, Vec2::ZERO, 10).len(), 3);
    }

    #[test]
    fn test_aim_anchor() {
        let area = PlayArea::new(800.0, 520.0, 120.0);
        assert_eq!(aim_anchor(&area), Vec2::new(400.0, 300.0));
    }
}
