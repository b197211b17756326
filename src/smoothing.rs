//! Frame-rate independent smoothing of the expansion signal.

use crate::gesture::GestureSignal;

/// Expansion used when no hands are visible; gives a gentle breathing pulse.
pub const IDLE_EXPANSION: f32 = 0.2;

/// Default convergence rate, per second.
pub const DEFAULT_SMOOTHING_RATE: f32 = 3.0;

/// Eases the animated expansion toward the detector's target.
///
/// Each frame moves `clamp(delta * rate, 0, 1)` of the remaining distance,
/// so the response depends on elapsed time rather than on frame count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ExpansionSmoother {
    /// Target while no hands are present.
    pub idle_target: f32,
    /// Fraction of the gap closed per second (before clamping).
    pub rate: f32,
}

impl Default for ExpansionSmoother {
    fn default() -> Self {
        Self {
            idle_target: IDLE_EXPANSION,
            rate: DEFAULT_SMOOTHING_RATE,
        }
    }
}

impl ExpansionSmoother {
    /// The value being eased toward for `signal`.
    #[inline]
    pub fn target(&self, signal: GestureSignal) -> f32 {
        if signal.hands_present {
            signal.expansion
        } else {
            self.idle_target
        }
    }

    /// Advance `current` by one frame of `delta` seconds.
    pub fn step(&self, current: f32, signal: GestureSignal, delta: f32) -> f32 {
        let t = (delta * self.rate).clamp(0.0, 1.0);
        let target = self.target(signal);
        current + (target - current) * t
    }
}
