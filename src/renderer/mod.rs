//! 2D rendering module
//!
//! Builds a draw list from the simulation; the browser backend paints it
//! with a canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use shapes::{DrawList, Shape};
