//! Hand-landmark detector collaborators.
//!
//! The session only needs something that yields a [`LandmarkFrame`] when
//! asked. Real webcam + model pipelines live outside this crate and plug in
//! through [`LandmarkDetector`], either by implementing it directly or by
//! pushing frames into a [`ChannelDetector`]. [`SimulatedHands`] stands in
//! for a camera when none is available.

use crate::error::DetectorError;
use crate::landmarks::{HandLandmarks, LandmarkFrame, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};
use glam::Vec2;
use std::f32::consts::TAU;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

/// Anything that can report the hands currently in view.
///
/// Called from the detection thread, at most once per detection interval.
pub trait LandmarkDetector: Send + 'static {
    /// Run detection for the frame at `at` (time since session start).
    fn detect(&mut self, at: Duration) -> Result<LandmarkFrame, DetectorError>;

    /// Release the camera or model. Called once when the session stops.
    fn release(&mut self) {}

    /// Short name for logs.
    fn name(&self) -> &str {
        "detector"
    }
}

impl LandmarkDetector for Box<dyn LandmarkDetector> {
    fn detect(&mut self, at: Duration) -> Result<LandmarkFrame, DetectorError> {
        (**self).detect(at)
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ============================================================================
// SimulatedHands
// ============================================================================

/// Scripted hands cycling through every gesture vocabulary.
///
/// Each cycle spends half its time with two hands sweeping apart and
/// together, a quarter with one hand opening and closing a pinch, and the
/// last quarter with no hands in view.
#[derive(Debug)]
pub struct SimulatedHands {
    period: Duration,
    released: bool,
}

impl SimulatedHands {
    /// Simulate with the given cycle length.
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            released: false,
        }
    }

    /// Whether [`LandmarkDetector::release`] has run.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The scripted frame at time `at`.
    pub fn frame_at(&self, at: Duration) -> LandmarkFrame {
        let phase = (at.as_secs_f32() / self.period.as_secs_f32()).fract();

        if phase < 0.5 {
            // Wrist distance swings between 0.15 and 0.95.
            let sweep = phase / 0.5;
            let distance = 0.55 - 0.4 * (sweep * TAU).cos();
            let left = Vec2::new(0.5 - distance / 2.0, 0.6);
            let right = Vec2::new(0.5 + distance / 2.0, 0.6);
            LandmarkFrame::two(synthetic_hand(left, 0.1), synthetic_hand(right, 0.1))
        } else if phase < 0.75 {
            // Pinch opens from 0.02 to 0.38 and closes again.
            let sweep = (phase - 0.5) / 0.25;
            let pinch = 0.2 - 0.18 * (sweep * TAU).cos();
            LandmarkFrame::one(synthetic_hand(Vec2::new(0.5, 0.7), pinch))
        } else {
            LandmarkFrame::empty()
        }
    }
}

impl Default for SimulatedHands {
    fn default() -> Self {
        Self::new(Duration::from_secs(12))
    }
}

impl LandmarkDetector for SimulatedHands {
    fn detect(&mut self, at: Duration) -> Result<LandmarkFrame, DetectorError> {
        Ok(self.frame_at(at))
    }

    fn release(&mut self) {
        self.released = true;
    }

    fn name(&self) -> &str {
        "simulated hands"
    }
}

/// A plausible open hand: fingers fanned upward from `wrist`, with the thumb
/// tip `pinch` away from the index tip.
fn synthetic_hand(wrist: Vec2, pinch: f32) -> HandLandmarks {
    let mut points = [wrist; LANDMARK_COUNT];

    // Five fingers of four joints each, indices 1..=20.
    for finger in 0..5 {
        let spread = (finger as f32 - 2.0) * 0.35;
        let direction = Vec2::new(spread.sin(), -spread.cos());
        for joint in 0..4 {
            points[1 + finger * 4 + joint] = wrist + direction * 0.05 * (joint + 1) as f32;
        }
    }

    let index_tip = points[INDEX_TIP];
    points[THUMB_TIP] = index_tip + Vec2::new(-pinch, 0.0);
    HandLandmarks::new(points)
}

// ============================================================================
// ChannelDetector
// ============================================================================

/// Detector fed by an external producer over a channel.
///
/// Each `detect` call drains the channel and reports the newest frame. When
/// nothing new arrived the previous frame is repeated.
#[derive(Debug)]
pub struct ChannelDetector {
    rx: Receiver<LandmarkFrame>,
    latest: LandmarkFrame,
}

impl ChannelDetector {
    /// Create a detector and the sender that feeds it.
    pub fn new() -> (Sender<LandmarkFrame>, Self) {
        let (tx, rx) = mpsc::channel();
        (
            tx,
            Self {
                rx,
                latest: LandmarkFrame::empty(),
            },
        )
    }
}

impl LandmarkDetector for ChannelDetector {
    fn detect(&mut self, _at: Duration) -> Result<LandmarkFrame, DetectorError> {
        let mut received = false;
        loop {
            match self.rx.try_recv() {
                Ok(frame) => {
                    self.latest = frame;
                    received = true;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) if received => break,
                Err(TryRecvError::Disconnected) => return Err(DetectorError::Disconnected),
            }
        }
        Ok(self.latest.clone())
    }

    fn name(&self) -> &str {
        "channel"
    }
}
