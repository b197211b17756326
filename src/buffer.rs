//! Particle position storage.

use glam::Vec3;

/// An ordered list of particle positions.
///
/// Positions are kept as [`Vec3`] for math, and exposed as a flat
/// `[x0, y0, z0, x1, ...]` slice for upload to a vertex buffer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionBuffer {
    points: Vec<Vec3>,
}

impl PositionBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Empty buffer with room for `count` points.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            points: Vec::with_capacity(count),
        }
    }

    /// Number of points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions as vectors.
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Positions as flat `f32` triplets, `3 * len()` long.
    #[inline]
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Raw bytes for a GPU upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Replace every point with the output of `f(index, point)` applied to `source`.
    ///
    /// After the call this buffer has exactly `source.len()` points.
    pub fn overwrite_from<F>(&mut self, source: &PositionBuffer, mut f: F)
    where
        F: FnMut(usize, Vec3) -> Vec3,
    {
        self.points.clear();
        self.points
            .extend(source.points.iter().enumerate().map(|(i, &p)| f(i, p)));
    }

    pub(crate) fn push(&mut self, point: Vec3) {
        self.points.push(point);
    }
}

impl From<Vec<Vec3>> for PositionBuffer {
    fn from(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_view_layout() {
        let buffer = PositionBuffer::from(vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(buffer.as_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(buffer.as_bytes().len(), 24);
    }

    #[test]
    fn test_overwrite_matches_source_length() {
        let source = PositionBuffer::from(vec![Vec3::X; 3]);
        let mut target = PositionBuffer::from(vec![Vec3::ZERO; 10]);

        target.overwrite_from(&source, |_, p| p * 2.0);
        assert_eq!(target.len(), 3);
        assert!(target.points().iter().all(|&p| p == Vec3::new(2.0, 0.0, 0.0)));
    }
}
