//! Draw list generation for 2D primitives
//!
//! Turns the game state into a flat list of shapes. The list is backend
//! agnostic; `canvas.rs` paints it into a 2D context in the browser.

use glam::Vec2;

use crate::sim::state::{Enemy, Projectile};
use crate::sim::{GameState, HealthBand};

/// Colors for game elements
pub mod colors {
    pub const ENEMY_HEALTHY: [f32; 4] = [0.298, 0.686, 0.314, 1.0]; // #4CAF50
    pub const ENEMY_WOUNDED: [f32; 4] = [1.0, 0.596, 0.0, 1.0]; // #FF9800
    pub const ENEMY_CRITICAL: [f32; 4] = [0.957, 0.263, 0.212, 1.0]; // #F44336
    pub const PROJECTILE: [f32; 4] = [1.0, 0.843, 0.0, 1.0]; // #FFD700
    pub const BOUNDARY: [f32; 4] = [1.0, 1.0, 1.0, 0.3];
    pub const LABEL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Convert an RGBA color to a CSS `rgba()` string
pub fn css_color(color: [f32; 4]) -> String {
    let [r, g, b, a] = color;
    let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgba({}, {}, {}, {})", byte(r), byte(g), byte(b), a.clamp(0.0, 1.0))
}

pub fn health_color(band: HealthBand) -> [f32; 4] {
    match band {
        HealthBand::Healthy => colors::ENEMY_HEALTHY,
        HealthBand::Wounded => colors::ENEMY_WOUNDED,
        HealthBand::Critical => colors::ENEMY_CRITICAL,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Filled circle with an optional centered text label
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
        label: Option<String>,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: [f32; 4],
        width: f32,
    },
}

/// Shapes for one frame, in paint order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub shapes: Vec<Shape>,
}

impl DrawList {
    /// Build the frame: boundary first, then enemies, then projectiles on top
    pub fn from_state(state: &GameState) -> Self {
        let mut list = Self {
            shapes: Vec::with_capacity(1 + state.enemies.len() + state.projectiles.len()),
        };
        list.shapes.push(boundary(state.area.width(), state.area.height()));
        list.shapes.extend(state.enemies.iter().map(enemy));
        list.shapes.extend(state.projectiles.iter().map(projectile));
        list
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Line marking the bottom of the play area
pub fn boundary(width: f32, height: f32) -> Shape {
    Shape::Line {
        from: Vec2::new(0.0, height),
        to: Vec2::new(width, height),
        color: colors::BOUNDARY,
        width: 2.0,
    }
}

/// Enemy body tinted by remaining health, current HP in the middle
pub fn enemy(enemy: &Enemy) -> Shape {
    Shape::Circle {
        center: enemy.pos,
        radius: enemy.radius,
        color: health_color(enemy.health_band()),
        label: Some(enemy.hp.to_string()),
    }
}

pub fn projectile(projectile: &Projectile) -> Shape {
    Shape::Circle {
        center: projectile.pos,
        radius: projectile.radius,
        color: colors::PROJECTILE,
        label: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayArea;
    use crate::tuning::Tuning;

    #[test]
    fn test_css_color() {
        assert_eq!(css_color(colors::PROJECTILE), "rgba(255, 215, 0, 1)");
        assert_eq!(css_color(colors::ENEMY_HEALTHY), "rgba(76, 175, 80, 1)");
    }

    #[test]
    fn test_enemy_tint_tracks_health() {
        let mut e = Enemy::new(1, Vec2::new(10.0, 20.0), 25.0, 5, 5.0);
        match enemy(&e) {
            Shape::Circle { color, label, .. } => {
                assert_eq!(color, colors::ENEMY_HEALTHY);
                assert_eq!(label.as_deref(), Some("5"));
            }
            other => panic!("unexpected shape {other:?}"),
        }

        e.take_damage(4);
        match enemy(&e) {
            Shape::Circle { color, label, .. } => {
                assert_eq!(color, colors::ENEMY_CRITICAL);
                assert_eq!(label.as_deref(), Some("1"));
            }
            other => panic!("unexpected shape {other:?}"),
        }
    }

    #[test]
    fn test_draw_list_order() {
        let state = GameState::start(5, Tuning::default(), PlayArea::new(800.0, 720.0, 120.0));
        let list = DrawList::from_state(&state);
        assert_eq!(list.len(), 1 + state.enemies.len());
        assert_eq!(
            list.shapes[0],
            Shape::Line {
                from: Vec2::new(0.0, 600.0),
                to: Vec2::new(800.0, 600.0),
                color: colors::BOUNDARY,
                width: 2.0,
            }
        );
    }
}
