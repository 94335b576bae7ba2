//! Platform abstraction layer
//!
//! Ports the simulation talks to without knowing what sits behind them:
//! - The 3D die presenter (animation, face textures)
//! - The viewport (size of the page, HUD strip)
//!
//! The browser implementations live in the binary; `NullDie` and
//! `FixedViewport` keep headless runs and tests free of a DOM.

use crate::sim::{DieFaces, GameEvent, GameState, PlayArea};

/// The 3D die shown above the play area
pub trait DiePresenter {
    /// Face values currently painted on the die
    fn current_face_values(&self) -> DieFaces;

    /// Start a roll animation lasting `duration_ms` that lands on a face
    /// showing `target` (any face when `None`). Fire-and-forget.
    fn request_roll(&mut self, target: Option<u32>, duration_ms: f32);

    /// Repaint face textures with new values
    fn apply_face_value_update(&mut self, faces: DieFaces);

    /// The page was resized; refit the die's view
    fn resize(&mut self) {}
}

/// Something that knows how big the page is
pub trait Viewport {
    /// (width, height) in CSS pixels
    fn size(&self) -> (f32, f32);

    /// Playable region above the HUD strip
    fn play_area(&self, ui_strip_height: f32) -> PlayArea {
        let (w, h) = self.size();
        PlayArea::new(w, h, ui_strip_height)
    }
}

/// Viewport with a fixed size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedViewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport for FixedViewport {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}

/// Headless die: remembers what it was asked to do
#[derive(Debug, Clone, Default)]
pub struct NullDie {
    pub faces: DieFaces,
    pub rolls: Vec<Option<u32>>,
    pub face_updates: u32,
    pub resizes: u32,
}

impl DiePresenter for NullDie {
    fn current_face_values(&self) -> DieFaces {
        self.faces
    }

    fn request_roll(&mut self, target: Option<u32>, _duration_ms: f32) {
        self.rolls.push(target);
    }

    fn apply_face_value_update(&mut self, faces: DieFaces) {
        self.faces = faces;
        self.face_updates += 1;
    }

    fn resize(&mut self) {
        self.resizes += 1;
    }
}

/// Forward die-related events to the presenter
///
/// Everything else (HUD, dialogs) is the UI's business; events are not
/// consumed so the caller can keep inspecting them.
pub fn dispatch_events(events: &[GameEvent], die: &mut dyn DiePresenter) {
    for event in events {
        match event {
            GameEvent::RollRequested { value, duration_ms } => {
                die.request_roll(Some(*value), *duration_ms);
            }
            GameEvent::FacesChanged { faces } => die.apply_face_value_update(*faces),
            _ => {}
        }
    }
}

/// Recompute the play area and refit the die after the page was resized
pub fn handle_resize(state: &mut GameState, viewport: &dyn Viewport, die: &mut dyn DiePresenter) {
    let (w, h) = viewport.size();
    state.resize(w, h);
    die.resize();
}
