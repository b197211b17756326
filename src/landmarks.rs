//! Hand landmark data as produced by a hand-tracking detector.
//!
//! Each detected hand is 21 keypoints in the standard hand topology,
//! with coordinates normalized to the camera frame (`[0, 1]²`).
//!
//! ```text
//!            8   12  16  20
//!            |   |   |   |
//!        4   7   11  15  19
//!         \  |   |   |   |
//!          3 6   10  14  18
//!           \|   |   |   |
//!            2   5---9---13--17
//!             \  |         /
//!              1 |       /
//!               \|     /
//!                0 (wrist)
//! ```

use crate::error::LandmarkError;
use glam::Vec2;

/// Landmarks per hand.
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Bone connections of the hand skeleton, for drawing overlays.
#[rustfmt::skip]
pub const HAND_CONNECTIONS: [(usize, usize); 24] = [
    // Thumb
    (0, 1), (1, 2), (2, 3), (3, 4),
    // Index
    (0, 5), (5, 6), (6, 7), (7, 8),
    // Middle
    (0, 9), (9, 10), (10, 11), (11, 12),
    // Ring
    (0, 13), (13, 14), (14, 15), (15, 16),
    // Pinky
    (0, 17), (17, 18), (18, 19), (19, 20),
    // Palm
    (5, 9), (9, 13), (13, 17), (0, 17),
];

/// One detected hand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec2; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Build from exactly 21 points.
    pub fn new(points: [Vec2; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a slice, which must hold exactly 21 points.
    pub fn from_slice(points: &[Vec2]) -> Result<Self, LandmarkError> {
        let points: [Vec2; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongPointCount {
                expected: LANDMARK_COUNT,
                found: points.len(),
            })?;
        Ok(Self { points })
    }

    /// A hand with every landmark at the same spot.
    ///
    /// Mostly useful as a starting point for synthetic hands.
    pub fn uniform(at: Vec2) -> Self {
        Self {
            points: [at; LANDMARK_COUNT],
        }
    }

    /// Set a single landmark.
    pub fn with_point(mut self, index: usize, at: Vec2) -> Self {
        self.points[index] = at;
        self
    }

    /// Landmark by index (see the constants in this module).
    #[inline]
    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index]
    }

    #[inline]
    pub fn points(&self) -> &[Vec2; LANDMARK_COUNT] {
        &self.points
    }

    #[inline]
    pub fn wrist(&self) -> Vec2 {
        self.points[WRIST]
    }

    /// Distance between thumb tip and index tip.
    #[inline]
    pub fn pinch_distance(&self) -> f32 {
        self.points[THUMB_TIP].distance(self.points[INDEX_TIP])
    }
}

/// All hands reported by the detector for one video frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LandmarkFrame {
    pub hands: Vec<HandLandmarks>,
}

impl LandmarkFrame {
    /// A frame with no hands.
    pub fn empty() -> Self {
        Self { hands: Vec::new() }
    }

    pub fn one(hand: HandLandmarks) -> Self {
        Self { hands: vec![hand] }
    }

    pub fn two(first: HandLandmarks, second: HandLandmarks) -> Self {
        Self {
            hands: vec![first, second],
        }
    }

    #[inline]
    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }
}
