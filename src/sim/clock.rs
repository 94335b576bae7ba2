//! Fixed timestep accumulator
//!
//! Turns jittery frame deltas into a whole number of fixed sim ticks.

use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_DT_MS};

#[derive(Debug, Clone, Default)]
pub struct FixedClock {
    accumulator_ms: f32,
    last_time_ms: Option<f64>,
}

impl FixedClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed an absolute frame timestamp (e.g. from requestAnimationFrame)
    ///
    /// Returns how many fixed ticks to run this frame. The first call only
    /// primes the clock and runs a single tick.
    pub fn advance_to(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => (now_ms - last) as f32,
            None => SIM_DT_MS,
        };
        self.last_time_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Feed a frame delta in milliseconds
    ///
    /// Huge gaps are clamped and at most `MAX_SUBSTEPS` ticks are returned;
    /// any remainder carries to the next frame.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        self.accumulator_ms += dt_ms.clamp(0.0, MAX_FRAME_MS);

        let mut steps = 0;
        while self.accumulator_ms >= SIM_DT_MS && steps < MAX_SUBSTEPS {
            self.accumulator_ms -= SIM_DT_MS;
            steps += 1;
        }
        steps
    }

    /// Leftover time not yet simulated
    pub fn pending_ms(&self) -> f32 {
        self.accumulator_ms
    }
}
