//! Gesture state shared between the detection task and the render loop.
//!
//! Writes are split by owner: the detection task writes `expansion` and
//! `hands_present`, the render loop writes `current_expansion`. Every field
//! is an independent atomic, so neither side ever waits on the other. A
//! reader may see a value that is one detector frame old, which the
//! smoother absorbs anyway.

use crate::gesture::GestureSignal;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// An `f32` stored as its bit pattern.
#[derive(Debug, Default)]
struct AtomicF32(AtomicU32);

impl AtomicF32 {
    fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Process-wide gesture values.
///
/// Starts at `(0, 0, false)` and lives for the whole session. Share it
/// with `Arc<GestureState>`.
#[derive(Debug)]
pub struct GestureState {
    expansion: AtomicF32,
    current_expansion: AtomicF32,
    hands_present: AtomicBool,
}

impl GestureState {
    pub fn new() -> Self {
        Self {
            expansion: AtomicF32::new(0.0),
            current_expansion: AtomicF32::new(0.0),
            hands_present: AtomicBool::new(false),
        }
    }

    /// Record the latest interpreted detector frame. Detection task only.
    pub fn publish(&self, signal: GestureSignal) {
        self.expansion.store(signal.expansion);
        self.hands_present
            .store(signal.hands_present, Ordering::Relaxed);
    }

    /// Latest published detector signal.
    pub fn signal(&self) -> GestureSignal {
        GestureSignal {
            expansion: self.expansion.load(),
            hands_present: self.hands_present.load(Ordering::Relaxed),
        }
    }

    /// Raw target expansion from the detector.
    #[inline]
    pub fn expansion(&self) -> f32 {
        self.expansion.load()
    }

    /// Whether hands are currently in view, for status display.
    #[inline]
    pub fn hands_present(&self) -> bool {
        self.hands_present.load(Ordering::Relaxed)
    }

    /// Smoothed expansion driving the animation.
    #[inline]
    pub fn current_expansion(&self) -> f32 {
        self.current_expansion.load()
    }

    /// Store the smoothed expansion. Render loop only.
    #[inline]
    pub fn set_current_expansion(&self, value: f32) {
        self.current_expansion.store(value);
    }
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_initial_state() {
        let state = GestureState::new();
        assert_eq!(state.expansion(), 0.0);
        assert_eq!(state.current_expansion(), 0.0);
        assert!(!state.hands_present());
    }

    #[test]
    fn test_publish_and_read() {
        let state = GestureState::new();
        state.publish(GestureSignal {
            expansion: 1.25,
            hands_present: true,
        });
        assert_eq!(
            state.signal(),
            GestureSignal {
                expansion: 1.25,
                hands_present: true
            }
        );

        state.set_current_expansion(0.7);
        assert_eq!(state.current_expansion(), 0.7);
        assert_eq!(state.expansion(), 1.25);
    }

    #[test]
    fn test_cross_thread_publish() {
        let state = Arc::new(GestureState::new());
        let writer = Arc::clone(&state);
        thread::spawn(move || {
            writer.publish(GestureSignal {
                expansion: 2.0,
                hands_present: true,
            })
        })
        .join()
        .unwrap();

        assert!(state.hands_present());
        assert_eq!(state.expansion(), 2.0);
    }
}
