//! # particle-genesis
//!
//! Gesture-driven particle clouds. Sample a point cloud on a procedural
//! surface, then let hand gestures spread it out and spin it.
//!
//! The crate does the math and the plumbing; drawing the points and
//! running the hand-tracking model are left to the host application.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_genesis::prelude::*;
//!
//! fn main() -> Result<(), SessionError> {
//!     let config = ParticleConfig::new(ShapeKind::Saturn, 10_000);
//!     let hands = Ok(SimulatedHands::default());
//!     let mut session = Session::start(config, hands, SessionSettings::default())?;
//!
//!     session.run(None, |_, session| {
//!         renderer.upload(session.positions().as_flat());
//!         status.set_tracking(session.hands_present());
//!         ControlFlow::Continue(())
//!     });
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Runs | Module |
//! |---|---|---|
//! | Shape sampling | on shape/count change | [`shapes`] |
//! | Gesture interpretation | per detector frame (>= 30 ms apart) | [`gesture`] |
//! | Expansion smoothing | per render frame | [`smoothing`] |
//! | Deformation | per render frame | [`animator`] |
//!
//! ## Gestures
//!
//! - **Two hands**: the farther apart the wrists, the wider the cloud.
//! - **One hand**: pinch thumb and index finger to contract, open to expand.
//! - **No hands**: the cloud eases back to a gentle idle breathing.
//!
//! ## Shapes
//!
//! | Shape | Sampling |
//! |---|---|
//! | [`ShapeKind::Sphere`] | thin shell, radius 4-4.5 |
//! | [`ShapeKind::Heart`] | rejection sampling inside an implicit heart |
//! | [`ShapeKind::Saturn`] | ring + planet, tilted 30 degrees |
//! | [`ShapeKind::Flower`] | five-petal rose surface |
//! | [`ShapeKind::Torus`] | major radius 5, minor radius 1.5 |

pub mod animator;
pub mod buffer;
pub mod config;
pub mod detector;
pub mod error;
pub mod gesture;
pub mod landmarks;
pub mod session;
pub mod shapes;
pub mod smoothing;
pub mod state;
pub mod system;
pub mod time;

pub use animator::DeformationAnimator;
pub use buffer::PositionBuffer;
pub use config::{Color, ConfigUpdate, ParticleConfig, ShapeKind};
pub use detector::{ChannelDetector, LandmarkDetector, SimulatedHands};
pub use error::{ConfigError, DetectorError, LandmarkError, SamplingError, SessionError};
pub use gesture::{GestureSignal, GestureSignalProcessor, GestureTuning};
pub use glam::{Vec2, Vec3};
pub use landmarks::{HandLandmarks, LandmarkFrame};
pub use session::{Session, SessionSettings};
pub use smoothing::ExpansionSmoother;
pub use state::GestureState;
pub use system::ParticleSystem;
pub use time::{FrameClock, FrameTime};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use particle_genesis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Color, ConfigUpdate, ParticleConfig, ShapeKind};
    pub use crate::detector::{ChannelDetector, LandmarkDetector, SimulatedHands};
    pub use crate::error::{DetectorError, SessionError};
    pub use crate::landmarks::{HandLandmarks, LandmarkFrame};
    pub use crate::session::{Session, SessionSettings};
    pub use crate::time::{FrameClock, FrameTime};
    pub use crate::{Vec2, Vec3};
    pub use std::ops::ControlFlow;
}
