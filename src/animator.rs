//! Per-frame deformation of the generated cloud.
//!
//! The same expansion value drives both outward scale and spin speed, so
//! spreading hands pushes particles out and spins them faster.

use crate::buffer::PositionBuffer;
use glam::Vec3;

/// Constants for the idle wobble, scale, and spin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeformationAnimator {
    /// Scale added per unit of expansion.
    pub expansion_scale: f32,
    /// Base spin rate about y, radians per second.
    pub base_spin: f32,
    /// Extra spin per unit of expansion.
    pub expansion_spin: f32,
    /// Amplitude of the per-particle wobble.
    pub noise_amplitude: f32,
    /// Wobble frequency over time.
    pub noise_time_rate: f32,
    /// Wobble phase offset between consecutive particles.
    pub noise_phase_step: f32,
}

impl Default for DeformationAnimator {
    fn default() -> Self {
        Self {
            expansion_scale: 1.5,
            base_spin: 0.1,
            expansion_spin: 0.5,
            noise_amplitude: 0.1,
            noise_time_rate: 0.5,
            noise_phase_step: 0.1,
        }
    }
}

impl DeformationAnimator {
    /// Spin angle about y at time `t`.
    #[inline]
    pub fn angle(&self, expansion: f32, t: f32) -> f32 {
        t * (self.base_spin + expansion * self.expansion_spin)
    }

    /// Uniform scale for particle `index` at time `t`.
    #[inline]
    pub fn scale(&self, index: usize, expansion: f32, t: f32) -> f32 {
        let phase = t * self.noise_time_rate + index as f32 * self.noise_phase_step;
        let noise = phase.sin() * self.noise_amplitude;
        1.0 + expansion * self.expansion_scale + noise
    }

    /// Recompute every point of `current` from `original`.
    ///
    /// `current` is resized to match `original`.
    pub fn deform(
        &self,
        original: &PositionBuffer,
        current: &mut PositionBuffer,
        expansion: f32,
        t: f32,
    ) {
        let (sin, cos) = self.angle(expansion, t).sin_cos();

        current.overwrite_from(original, |i, o| {
            let rotated = Vec3::new(o.x * cos - o.z * sin, o.y, o.x * sin + o.z * cos);
            rotated * self.scale(i, expansion, t)
        });
    }
}
