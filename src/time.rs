//! Frame timing for the render loop.
//!
//! The animation needs two clocks: elapsed time (drives spin and wobble)
//! and per-frame delta (drives smoothing). [`FrameClock`] provides both,
//! plus a rolling FPS estimate for logging.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! loop {
//!     let frame = clock.tick();
//!     system.advance(&gestures, frame);
//! }
//! ```

use std::time::{Duration, Instant};

/// Timing snapshot for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Frames ticked so far, including this one.
    pub frame: u64,
}

/// Wall-clock (or fixed-step) frame timer.
#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
    current: FrameTime,
    /// When set, every tick advances by exactly this many seconds.
    fixed_delta: Option<f32>,
    fps: f32,
    fps_window_start: Instant,
    fps_window_frames: u64,
}

/// How often the FPS estimate is refreshed.
const FPS_WINDOW: Duration = Duration::from_millis(500);

impl FrameClock {
    /// Start a real-time clock now.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_frame: now,
            current: FrameTime::default(),
            fixed_delta: None,
            fps: 0.0,
            fps_window_start: now,
            fps_window_frames: 0,
        }
    }

    /// A clock that ignores wall time and steps by `delta` seconds per tick.
    ///
    /// Useful for deterministic runs and tests.
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta.max(0.0)),
            ..Self::new()
        }
    }

    /// Advance to the next frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();

        let delta = match self.fixed_delta {
            Some(step) => step,
            None => now.duration_since(self.last_frame).as_secs_f32(),
        };
        self.last_frame = now;

        self.current = FrameTime {
            elapsed: match self.fixed_delta {
                Some(_) => self.current.elapsed + delta,
                None => now.duration_since(self.start).as_secs_f32(),
            },
            delta,
            frame: self.current.frame + 1,
        };

        self.fps_window_frames += 1;
        let window = now.duration_since(self.fps_window_start);
        if window >= FPS_WINDOW {
            self.fps = self.fps_window_frames as f32 / window.as_secs_f32();
            self.fps_window_start = now;
            self.fps_window_frames = 0;
        }

        self.current
    }

    /// The most recent tick.
    #[inline]
    pub fn current(&self) -> FrameTime {
        self.current
    }

    /// Frames per second over the last measurement window.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Wall time since the clock started.
    #[inline]
    pub fn wall_elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
