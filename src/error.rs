//! Error types for particle-genesis.
//!
//! Each concern gets its own enum so callers can match on exactly what
//! went wrong: configuration, shape sampling, landmark input, the hand
//! detector, and the session that ties them together.

use crate::config::ShapeKind;

/// Errors raised while building or loading a [`ParticleConfig`](crate::ParticleConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A particle system needs at least one particle.
    #[error("particle count must be positive")]
    ZeroCount,
    /// Particle size must be a finite positive number.
    #[error("particle size must be finite and positive, got {0}")]
    InvalidSize(f32),
    /// Shape name did not match any known shape.
    #[error("unknown shape '{0}' (expected one of Sphere, Heart, Saturn, Flower, Torus)")]
    UnknownShape(String),
    /// Color string was not `#rrggbb`.
    #[error("invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    /// Failed to read a config file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Config file contents were not valid JSON for a config.
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the shape sampler.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    /// Rejection sampling hit its per-point attempt cap.
    #[error("{shape:?} rejection sampling gave up after {attempts} attempts for one point")]
    RejectionExhausted { shape: ShapeKind, attempts: u32 },
}

/// Errors raised when assembling landmark data.
#[derive(Debug, thiserror::Error)]
pub enum LandmarkError {
    /// A hand must carry exactly 21 landmarks.
    #[error("hand has {found} landmarks, expected {expected}")]
    WrongPointCount { expected: usize, found: usize },
}

/// Errors raised by a hand-landmark detector.
#[derive(Debug, thiserror::Error)]
pub enum DetectorError {
    /// Camera could not be opened or permission was denied.
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
    /// The detector model failed to initialise or to run.
    #[error("detector failed: {0}")]
    Inference(String),
    /// The producer feeding frames went away.
    #[error("detector frame source disconnected")]
    Disconnected,
}

/// Errors raised while starting or driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sampling(#[from] SamplingError),
    /// The detection thread could not be spawned.
    #[error("failed to spawn detection thread: {0}")]
    Spawn(std::io::Error),
}
