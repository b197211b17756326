//! The animated particle system: generated shape plus per-frame output.

use crate::animator::DeformationAnimator;
use crate::buffer::PositionBuffer;
use crate::config::{ConfigUpdate, ParticleConfig};
use crate::error::SessionError;
use crate::shapes;
use crate::smoothing::ExpansionSmoother;
use crate::state::GestureState;
use crate::time::FrameTime;

/// Owns the original and current positions for one particle cloud.
///
/// `original` is regenerated whenever the shape or count changes and is
/// otherwise left alone; `current` is rebuilt from it every frame, so the
/// two always have `config.count` points.
#[derive(Debug)]
pub struct ParticleSystem {
    config: ParticleConfig,
    original: PositionBuffer,
    current: PositionBuffer,
    smoother: ExpansionSmoother,
    animator: DeformationAnimator,
}

impl ParticleSystem {
    /// Validate `config` and sample its shape.
    pub fn new(config: ParticleConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let original = shapes::generate(config.shape, config.count)?;
        log::debug!("Generated {} {} particles", original.len(), config.shape);

        Ok(Self {
            current: original.clone(),
            original,
            config,
            smoother: ExpansionSmoother::default(),
            animator: DeformationAnimator::default(),
        })
    }

    /// Replace the smoothing constants.
    pub fn with_smoother(mut self, smoother: ExpansionSmoother) -> Self {
        self.smoother = smoother;
        self
    }

    /// Replace the deformation constants.
    pub fn with_animator(mut self, animator: DeformationAnimator) -> Self {
        self.animator = animator;
        self
    }

    #[inline]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// The undeformed generated shape.
    #[inline]
    pub fn original(&self) -> &PositionBuffer {
        &self.original
    }

    /// Positions to draw this frame.
    #[inline]
    pub fn positions(&self) -> &PositionBuffer {
        &self.current
    }

    /// Switch to a new config, resampling only if shape or count changed.
    ///
    /// On error the previous config and cloud are kept. Returns whether the
    /// cloud was regenerated.
    pub fn set_config(&mut self, config: ParticleConfig) -> Result<bool, SessionError> {
        config.validate()?;

        let regenerate = self.config.needs_regeneration(&config);
        if regenerate {
            let original = shapes::generate(config.shape, config.count)?;
            log::debug!(
                "Regenerated cloud: {} x{} -> {} x{}",
                self.config.shape,
                self.config.count,
                config.shape,
                config.count
            );
            self.current = original.clone();
            self.original = original;
        }
        self.config = config;
        Ok(regenerate)
    }

    /// Merge a partial change into the current config.
    pub fn apply(&mut self, update: &ConfigUpdate) -> Result<bool, SessionError> {
        self.set_config(self.config.merged(update))
    }

    /// Smooth the expansion toward the latest gesture and redraw `current`.
    ///
    /// Returns the smoothed expansion used for this frame.
    pub fn advance(&mut self, gestures: &GestureState, time: FrameTime) -> f32 {
        let expansion = self
            .smoother
            .step(gestures.current_expansion(), gestures.signal(), time.delta);
        gestures.set_current_expansion(expansion);

        self.animator
            .deform(&self.original, &mut self.current, expansion, time.elapsed);
        expansion
    }

    /// Largest distance of any drawn particle from the origin.
    pub fn extent(&self) -> f32 {
        self.current
            .points()
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}
