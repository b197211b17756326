//! A running gesture-driven particle session.
//!
//! Two loops share one [`GestureState`]:
//!
//! - the **detection task** runs on its own thread, polling the
//!   [`LandmarkDetector`] at most once per detection interval and publishing
//!   the interpreted signal;
//! - the **render loop** runs on the caller's thread via [`Session::frame`]
//!   or [`Session::run`], smoothing the signal and deforming the cloud. It
//!   never waits on detection.
//!
//! Dropping the session (or calling [`Session::stop`]) stops the detection
//! thread, releases the detector, and ends the render loop.

use crate::buffer::PositionBuffer;
use crate::config::{ConfigUpdate, ParticleConfig};
use crate::detector::LandmarkDetector;
use crate::error::{DetectorError, SessionError};
use crate::gesture::{
    DetectionThrottle, GestureSignal, GestureSignalProcessor, GestureTuning,
    DEFAULT_DETECT_INTERVAL,
};
use crate::landmarks::LandmarkFrame;
use crate::state::GestureState;
use crate::system::ParticleSystem;
use crate::time::{FrameClock, FrameTime};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Timing and tuning for a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSettings {
    /// Render loop pacing used by [`Session::run`].
    pub target_fps: f32,
    /// Minimum spacing between detector calls.
    pub detect_interval: Duration,
    /// Distance-to-expansion mapping.
    pub tuning: GestureTuning,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            target_fps: 60.0,
            detect_interval: DEFAULT_DETECT_INTERVAL,
            tuning: GestureTuning::default(),
        }
    }
}

// ============================================================================
// Detection task
// ============================================================================

/// Handle to the detection thread. Stops and joins it on drop.
struct DetectionTask {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl DetectionTask {
    fn spawn<D: LandmarkDetector>(
        detector: D,
        gestures: Arc<GestureState>,
        settings: &SessionSettings,
    ) -> Result<Self, SessionError> {
        let stop = Arc::new(AtomicBool::new(false));
        let interval = settings.detect_interval;
        let tuning = settings.tuning;

        let handle = thread::Builder::new()
            .name("gesture-detection".into())
            .spawn({
                let stop = Arc::clone(&stop);
                move || run_detection(detector, &gestures, &stop, interval, tuning)
            })
            .map_err(SessionError::Spawn)?;

        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    fn stop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Detection thread panicked");
            }
        }
    }

    fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map_or(false, |handle| !handle.is_finished())
    }
}

impl Drop for DetectionTask {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Releases the detector and clears the shared signal when the detection
/// thread exits, including by unwinding out of a panicking `detect`.
struct DetectorGuard<'a, D: LandmarkDetector> {
    detector: D,
    gestures: &'a GestureState,
}

impl<D: LandmarkDetector> Drop for DetectorGuard<'_, D> {
    fn drop(&mut self) {
        self.detector.release();
        self.gestures.publish(GestureSignal::NONE);
        log::info!("Gesture detection stopped");
    }
}

/// Body of the detection thread.
fn run_detection<D: LandmarkDetector>(
    detector: D,
    gestures: &GestureState,
    stop: &AtomicBool,
    interval: Duration,
    tuning: GestureTuning,
) {
    log::info!(
        "Gesture detection started ({}, every {:?})",
        detector.name(),
        interval
    );

    let mut guard = DetectorGuard { detector, gestures };
    let detector = &mut guard.detector;

    let start = Instant::now();
    let mut throttle = DetectionThrottle::new(interval);
    let mut processor = GestureSignalProcessor::new(tuning);
    let mut failing = false;

    while !stop.load(Ordering::Acquire) {
        let now = Instant::now();
        if !throttle.ready(now) {
            thread::sleep(throttle.remaining(now));
            continue;
        }

        let frame = match detector.detect(now.duration_since(start)) {
            Ok(frame) => {
                if failing {
                    log::info!("{} recovered", detector.name());
                    failing = false;
                }
                frame
            }
            Err(DetectorError::Disconnected) => {
                log::warn!("{} disconnected, stopping gesture detection", detector.name());
                break;
            }
            Err(e) => {
                if !failing {
                    log::warn!("{} failed: {}; treating as no hands", detector.name(), e);
                    failing = true;
                }
                LandmarkFrame::empty()
            }
        };

        gestures.publish(processor.process(&frame));
    }
}

// ============================================================================
// Session
// ============================================================================

/// A particle system wired to a gesture detector.
pub struct Session {
    gestures: Arc<GestureState>,
    system: ParticleSystem,
    clock: FrameClock,
    settings: SessionSettings,
    detection: Option<DetectionTask>,
}

impl Session {
    /// Generate the cloud and start detection.
    ///
    /// If the detector could not be created (camera denied, model failed to
    /// load) the session still starts, animating the idle breathing only.
    pub fn start<D: LandmarkDetector>(
        config: ParticleConfig,
        detector: Result<D, DetectorError>,
        settings: SessionSettings,
    ) -> Result<Self, SessionError> {
        let system = ParticleSystem::new(config)?;
        let gestures = Arc::new(GestureState::new());

        let detection = match detector {
            Ok(detector) => Some(DetectionTask::spawn(
                detector,
                Arc::clone(&gestures),
                &settings,
            )?),
            Err(e) => {
                log::warn!("Gesture input unavailable ({}); running idle animation only", e);
                None
            }
        };

        log::info!(
            "Session started: {} x{}",
            system.config().shape,
            system.config().count
        );

        Ok(Self {
            gestures,
            system,
            clock: FrameClock::new(),
            settings,
            detection,
        })
    }

    /// Start with no gesture input at all.
    pub fn idle(config: ParticleConfig, settings: SessionSettings) -> Result<Self, SessionError> {
        let none: Result<Box<dyn LandmarkDetector>, _> =
            Err(DetectorError::CameraUnavailable("no detector configured".into()));
        Self::start(config, none, settings)
    }

    /// Replace the frame clock, e.g. with [`FrameClock::fixed`].
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Render one frame: smooth the expansion and deform the cloud.
    pub fn frame(&mut self) -> FrameTime {
        let time = self.clock.tick();
        self.system.advance(&self.gestures, time);
        time
    }

    /// Render frames paced at the target FPS until `on_frame` breaks or
    /// `max_frames` have been drawn. Returns the number of frames drawn.
    pub fn run<F>(&mut self, max_frames: Option<u64>, mut on_frame: F) -> u64
    where
        F: FnMut(FrameTime, &mut Session) -> ControlFlow<()>,
    {
        let frame_budget = Duration::from_secs_f32(1.0 / self.settings.target_fps.max(1.0));
        let mut drawn = 0;

        while max_frames.map_or(true, |max| drawn < max) {
            let started = Instant::now();
            let time = self.frame();
            drawn += 1;

            if on_frame(time, self).is_break() {
                break;
            }
            thread::sleep(frame_budget.saturating_sub(started.elapsed()));
        }
        drawn
    }

    /// Apply a partial config change. Returns whether the cloud was resampled.
    pub fn apply(&mut self, update: &ConfigUpdate) -> Result<bool, SessionError> {
        self.system.apply(update)
    }

    /// Replace the whole config. Returns whether the cloud was resampled.
    pub fn set_config(&mut self, config: ParticleConfig) -> Result<bool, SessionError> {
        self.system.set_config(config)
    }

    #[inline]
    pub fn config(&self) -> &ParticleConfig {
        self.system.config()
    }

    /// Positions for the renderer, refreshed by every frame.
    #[inline]
    pub fn positions(&self) -> &PositionBuffer {
        self.system.positions()
    }

    #[inline]
    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Shared gesture values.
    #[inline]
    pub fn gestures(&self) -> &Arc<GestureState> {
        &self.gestures
    }

    /// Whether hands are in view, for status display.
    #[inline]
    pub fn hands_present(&self) -> bool {
        self.gestures.hands_present()
    }

    /// Whether the detection thread is alive.
    pub fn is_detecting(&self) -> bool {
        self.detection.as_ref().map_or(false, DetectionTask::is_running)
    }

    /// Measured render FPS.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    #[inline]
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// End the session, releasing the detector.
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(mut detection) = self.detection.take() {
            detection.stop();
        }
        log::info!("Session ended after {} frames", self.clock.current().frame);
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", self.system.config())
            .field("detecting", &self.is_detecting())
            .field("gestures", &self.gestures)
            .finish()
    }
}
