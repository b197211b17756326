//! Gesture interpretation: landmark frames to a scalar expansion signal.
//!
//! There are exactly two gesture vocabularies, both continuous:
//!
//! | Hands | Measurement | Mapping |
//! |---|---|---|
//! | 2 | wrist-to-wrist distance | `clamp((d - 0.15) * 2.5, 0, 2.5)` |
//! | 1 | thumb tip to index tip (pinch) | `clamp((d - 0.05) * 5, 0, 1.5)` |
//! | otherwise | - | expansion 0, no hands |
//!
//! Spreading hands apart (or opening a pinch) pushes the cloud outward.

use crate::landmarks::LandmarkFrame;
use std::time::{Duration, Instant};

/// Minimum spacing between detector invocations.
pub const DEFAULT_DETECT_INTERVAL: Duration = Duration::from_millis(30);

/// Output of one interpreted detector frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GestureSignal {
    /// How "open" the gesture is.
    pub expansion: f32,
    /// Whether any hand was seen.
    pub hands_present: bool,
}

impl GestureSignal {
    /// No hands in view.
    pub const NONE: GestureSignal = GestureSignal {
        expansion: 0.0,
        hands_present: false,
    };
}

/// A linear distance-to-expansion ramp, clamped to `[0, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceRamp {
    /// Distance at which expansion starts rising.
    pub dead_zone: f32,
    /// Expansion per unit of distance past the dead zone.
    pub gain: f32,
    /// Upper clamp.
    pub max: f32,
}

impl DistanceRamp {
    #[inline]
    pub fn map(&self, distance: f32) -> f32 {
        ((distance - self.dead_zone) * self.gain).clamp(0.0, self.max)
    }
}

/// Tunable constants for both gesture vocabularies.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureTuning {
    /// Wrist-to-wrist distance, used when two hands are visible.
    pub two_hands: DistanceRamp,
    /// Thumb-to-index distance, used when one hand is visible.
    pub pinch: DistanceRamp,
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self {
            two_hands: DistanceRamp {
                dead_zone: 0.15,
                gain: 2.5,
                max: 2.5,
            },
            pinch: DistanceRamp {
                dead_zone: 0.05,
                gain: 5.0,
                max: 1.5,
            },
        }
    }
}

/// Turns detector frames into [`GestureSignal`]s.
#[derive(Debug, Default)]
pub struct GestureSignalProcessor {
    tuning: GestureTuning,
    last_present: bool,
}

impl GestureSignalProcessor {
    pub fn new(tuning: GestureTuning) -> Self {
        Self {
            tuning,
            last_present: false,
        }
    }

    pub fn tuning(&self) -> &GestureTuning {
        &self.tuning
    }

    /// Map a frame to a signal. Pure; does not touch processor state.
    pub fn interpret(&self, frame: &LandmarkFrame) -> GestureSignal {
        match frame.hands.as_slice() {
            [first, second] => GestureSignal {
                expansion: self
                    .tuning
                    .two_hands
                    .map(first.wrist().distance(second.wrist())),
                hands_present: true,
            },
            [hand] => GestureSignal {
                expansion: self.tuning.pinch.map(hand.pinch_distance()),
                hands_present: true,
            },
            _ => GestureSignal::NONE,
        }
    }

    /// Interpret a frame and log when hands appear or disappear.
    pub fn process(&mut self, frame: &LandmarkFrame) -> GestureSignal {
        let signal = self.interpret(frame);
        if signal.hands_present != self.last_present {
            self.last_present = signal.hands_present;
            if signal.hands_present {
                log::info!("Hands detected ({})", frame.hand_count());
            } else {
                log::info!("Hands lost, falling back to idle animation");
            }
        }
        signal
    }
}

/// Rate limiter for detector calls.
#[derive(Debug)]
pub struct DetectionThrottle {
    interval: Duration,
    last: Option<Instant>,
}

impl DetectionThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` and records `now` if enough time has passed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// How long to wait from `now` until the next call is allowed.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }
}

impl Default for DetectionThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_DETECT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{HandLandmarks, INDEX_TIP, THUMB_TIP};
    use glam::Vec2;

    fn hand_at(wrist: Vec2) -> HandLandmarks {
        HandLandmarks::uniform(wrist)
    }

    #[test]
    fn test_two_hands_wrist_distance() {
        let processor = GestureSignalProcessor::default();
        let frame = LandmarkFrame::two(
            hand_at(Vec2::new(0.1, 0.5)),
            hand_at(Vec2::new(0.9, 0.5)),
        );
        let signal = processor.interpret(&frame);
        assert!((signal.expansion - 1.625).abs() < 1e-5);
        assert!(signal.hands_present);
    }

    #[test]
    fn test_two_hands_clamped() {
        let processor = GestureSignalProcessor::default();
        let together = LandmarkFrame::two(hand_at(Vec2::splat(0.5)), hand_at(Vec2::splat(0.5)));
        assert_eq!(processor.interpret(&together).expansion, 0.0);

        let far = LandmarkFrame::two(hand_at(Vec2::ZERO), hand_at(Vec2::ONE));
        assert_eq!(processor.interpret(&far).expansion, 2.5);
    }

    #[test]
    fn test_closed_pinch_is_zero() {
        let processor = GestureSignalProcessor::default();
        let frame = LandmarkFrame::one(HandLandmarks::uniform(Vec2::new(0.3, 0.3)));
        let signal = processor.interpret(&frame);
        assert_eq!(signal.expansion, 0.0);
        assert!(signal.hands_present);
    }

    #[test]
    fn test_open_pinch() {
        let processor = GestureSignalProcessor::default();
        let hand = HandLandmarks::uniform(Vec2::splat(0.5))
            .with_point(THUMB_TIP, Vec2::new(0.5, 0.5))
            .with_point(INDEX_TIP, Vec2::new(0.5, 0.75));
        let signal = processor.interpret(&LandmarkFrame::one(hand));
        assert!((signal.expansion - 1.0).abs() < 1e-5);

        let wide = hand.with_point(INDEX_TIP, Vec2::new(0.5, 1.0));
        assert_eq!(processor.interpret(&LandmarkFrame::one(wide)).expansion, 1.5);
    }

    #[test]
    fn test_no_hands() {
        let processor = GestureSignalProcessor::default();
        assert_eq!(processor.interpret(&LandmarkFrame::empty()), GestureSignal::NONE);
    }

    #[test]
    fn test_more_than_two_hands_is_ignored() {
        let processor = GestureSignalProcessor::default();
        let frame = LandmarkFrame {
            hands: vec![hand_at(Vec2::ZERO); 3],
        };
        assert_eq!(processor.interpret(&frame), GestureSignal::NONE);
    }

    #[test]
    fn test_throttle() {
        let start = Instant::now();
        let mut throttle = DetectionThrottle::new(Duration::from_millis(30));

        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + Duration::from_millis(10)));
        assert_eq!(
            throttle.remaining(start + Duration::from_millis(10)),
            Duration::from_millis(20)
        );
        assert!(throttle.ready(start + Duration::from_millis(30)));
        assert!(!throttle.ready(start + Duration::from_millis(45)));
    }
}
