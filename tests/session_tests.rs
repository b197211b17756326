//! Integration tests for a running session.
//!
//! These drive the real detection thread, so they poll the shared gesture
//! state with a timeout instead of assuming exact scheduling.

use particle_genesis::prelude::*;
use particle_genesis::GestureSignal;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn hand_at(wrist: Vec2) -> HandLandmarks {
    HandLandmarks::uniform(wrist)
}

/// Poll `condition` until it holds or two seconds pass.
fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

/// Detector that records calls and whether it was released.
struct RecordingDetector {
    calls: Arc<AtomicUsize>,
    released: Arc<AtomicBool>,
    fail: bool,
}

impl LandmarkDetector for RecordingDetector {
    fn detect(&mut self, _at: Duration) -> Result<LandmarkFrame, DetectorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(DetectorError::Inference("model crashed".into()))
        } else {
            Ok(LandmarkFrame::one(hand_at(Vec2::splat(0.5))))
        }
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

fn recording(fail: bool) -> (RecordingDetector, Arc<AtomicUsize>, Arc<AtomicBool>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicBool::new(false));
    let detector = RecordingDetector {
        calls: Arc::clone(&calls),
        released: Arc::clone(&released),
        fail,
    };
    (detector, calls, released)
}

#[test]
fn test_camera_denied_runs_idle() {
    let denied: Result<SimulatedHands, _> =
        Err(DetectorError::CameraUnavailable("permission denied".into()));
    let mut session = Session::start(
        ParticleConfig::new(ShapeKind::Sphere, 500),
        denied,
        SessionSettings::default(),
    )
    .unwrap()
    .with_clock(FrameClock::fixed(1.0 / 30.0));

    assert!(!session.is_detecting());
    for _ in 0..150 {
        session.frame();
    }

    assert!(!session.hands_present());
    assert!((session.gestures().current_expansion() - 0.2).abs() < 1e-3);
    assert_eq!(session.positions().len(), 500);
}

#[test]
fn test_channel_detector_drives_expansion() {
    let (tx, detector) = ChannelDetector::new();
    let mut session = Session::start(
        ParticleConfig::new(ShapeKind::Torus, 200),
        Ok(detector),
        SessionSettings::default(),
    )
    .unwrap()
    .with_clock(FrameClock::fixed(1.0 / 30.0));

    tx.send(LandmarkFrame::two(
        hand_at(Vec2::new(0.1, 0.5)),
        hand_at(Vec2::new(0.9, 0.5)),
    ))
    .unwrap();

    assert!(wait_for(|| session.hands_present()));
    assert!((session.gestures().expansion() - 1.625).abs() < 1e-5);

    for _ in 0..150 {
        session.frame();
    }
    assert!((session.gestures().current_expansion() - 1.625).abs() < 1e-3);

    tx.send(LandmarkFrame::empty()).unwrap();
    assert!(wait_for(|| !session.hands_present()));
}

#[test]
fn test_failing_detector_degrades_to_no_hands() {
    let (detector, calls, _released) = recording(true);
    let session = Session::start(
        ParticleConfig::default(),
        Ok(detector),
        SessionSettings::default(),
    )
    .unwrap();

    assert!(wait_for(|| calls.load(Ordering::SeqCst) >= 2));
    assert!(session.is_detecting());
    assert_eq!(session.gestures().signal(), GestureSignal::NONE);
}

#[test]
fn test_stop_releases_detector() {
    let (detector, calls, released) = recording(false);
    let session = Session::start(
        ParticleConfig::new(ShapeKind::Flower, 100),
        Ok(detector),
        SessionSettings::default(),
    )
    .unwrap();

    assert!(wait_for(|| session.hands_present()));
    let gestures = Arc::clone(session.gestures());
    session.stop();

    assert!(released.load(Ordering::SeqCst));
    assert!(!gestures.hands_present());

    // No more detector calls once stopped.
    let after_stop = calls.load(Ordering::SeqCst);
    thread::sleep(Duration::from_millis(100));
    assert_eq!(calls.load(Ordering::SeqCst), after_stop);
}

/// Detector that reports one hand once, then panics on the next call.
struct PanickingDetector {
    calls: usize,
    released: Arc<AtomicBool>,
}

impl LandmarkDetector for PanickingDetector {
    fn detect(&mut self, _at: Duration) -> Result<LandmarkFrame, DetectorError> {
        self.calls += 1;
        if self.calls > 1 {
            panic!("detector crashed");
        }
        Ok(LandmarkFrame::one(hand_at(Vec2::splat(0.5))))
    }

    fn release(&mut self) {
        self.released.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_panicking_detector_is_released() {
    let released = Arc::new(AtomicBool::new(false));
    let detector = PanickingDetector {
        calls: 0,
        released: Arc::clone(&released),
    };
    let settings = SessionSettings {
        detect_interval: Duration::from_millis(100),
        ..Default::default()
    };
    let session = Session::start(ParticleConfig::default(), Ok(detector), settings).unwrap();

    assert!(wait_for(|| !session.is_detecting()));
    assert!(released.load(Ordering::SeqCst));
    assert!(!session.hands_present());

    let gestures = Arc::clone(session.gestures());
    session.stop();
    assert!(!gestures.hands_present());
}

#[test]
fn test_detection_is_throttled() {
    let (detector, calls, _released) = recording(false);
    let settings = SessionSettings {
        detect_interval: Duration::from_millis(50),
        ..Default::default()
    };
    let session = Session::start(ParticleConfig::default(), Ok(detector), settings).unwrap();

    thread::sleep(Duration::from_millis(260));
    session.stop();

    // At most one call per 50 ms window, plus the first immediate call.
    assert!(calls.load(Ordering::SeqCst) <= 7);
}

#[test]
fn test_disconnected_channel_stops_detection() {
    let (tx, detector) = ChannelDetector::new();
    drop(tx);
    let session = Session::start(
        ParticleConfig::default(),
        Ok(detector),
        SessionSettings::default(),
    )
    .unwrap();

    assert!(wait_for(|| !session.is_detecting()));
    assert!(!session.hands_present());
}

#[test]
fn test_config_change_mid_session() {
    let mut session = Session::idle(
        ParticleConfig::new(ShapeKind::Heart, 6000),
        SessionSettings::default(),
    )
    .unwrap();
    session.frame();
    assert_eq!(session.positions().as_flat().len(), 18_000);

    assert!(session.apply(&ConfigUpdate::count(3000)).unwrap());
    session.frame();
    assert_eq!(session.positions().as_flat().len(), 9000);

    assert!(!session.apply(&ConfigUpdate::size(0.3)).unwrap());
    assert!(session.apply(&ConfigUpdate::count(0)).is_err());
    assert_eq!(session.config().count, 3000);
}

#[test]
fn test_run_stops_on_break() {
    let mut session = Session::idle(
        ParticleConfig::new(ShapeKind::Saturn, 100),
        SessionSettings {
            target_fps: 240.0,
            ..Default::default()
        },
    )
    .unwrap();

    let drawn = session.run(None, |time, _| {
        if time.frame >= 5 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    assert_eq!(drawn, 5);

    let drawn = session.run(Some(3), |_, _| ControlFlow::Continue(()));
    assert_eq!(drawn, 3);
}
