//! Procedural point sampling on parametric and implicit surfaces.
//!
//! Every particle is drawn independently, so the result is random per call
//! but always follows the shape's distribution.
//!
//! ```ignore
//! use particle_genesis::{shapes, ShapeKind};
//!
//! let cloud = shapes::generate(ShapeKind::Saturn, 10_000)?;
//! renderer.upload(cloud.as_flat());
//! ```

use crate::buffer::PositionBuffer;
use crate::config::ShapeKind;
use crate::error::SamplingError;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Attempts allowed per heart point before sampling gives up.
pub const HEART_MAX_ATTEMPTS: u32 = 10_000;

/// Half-size of the cube heart candidates are drawn from.
const HEART_BOUNDS: f32 = 3.0;
/// Scale applied to accepted heart points.
const HEART_SCALE: f32 = 3.5;

const SPHERE_RADIUS: f32 = 4.0;
const SPHERE_JITTER: f32 = 0.5;

const SATURN_RING_PROBABILITY: f64 = 0.6;
const SATURN_RING_INNER: f32 = 6.0;
const SATURN_RING_OUTER: f32 = 9.0;
const SATURN_RING_HALF_THICKNESS: f32 = 0.1;
const SATURN_PLANET_RADIUS: f32 = 3.0;
/// Axial tilt applied about z.
pub const SATURN_TILT: f32 = PI / 6.0;

const FLOWER_PETALS: f32 = 5.0;
const FLOWER_BASE_RADIUS: f32 = 3.0;
const FLOWER_PETAL_DEPTH: f32 = 2.0;
const FLOWER_FLATTEN: f32 = 0.5;

pub const TORUS_MAJOR_RADIUS: f32 = 5.0;
pub const TORUS_MINOR_RADIUS: f32 = 1.5;

/// Sample `count` points on `shape` using a fresh entropy-seeded RNG.
///
/// `count == 0` yields an empty buffer.
pub fn generate(shape: ShapeKind, count: usize) -> Result<PositionBuffer, SamplingError> {
    ShapeSampler::new(SmallRng::from_entropy()).generate(shape, count)
}

/// Sample `count` points on `shape` with a caller-provided RNG.
///
/// Use a seeded RNG for reproducible clouds.
pub fn generate_with_rng<R: Rng>(
    shape: ShapeKind,
    count: usize,
    rng: &mut R,
) -> Result<PositionBuffer, SamplingError> {
    ShapeSampler::new(rng).generate(shape, count)
}

/// Left-hand side of the heart inequality; a point is inside when this is `<= 0`.
///
/// `(x² + 9/4·y² + z² - 1)³ - x²z³ - 9/80·y²z³`
#[inline]
pub fn heart_field(p: Vec3) -> f32 {
    let (x2, y2) = (p.x * p.x, p.y * p.y);
    let z3 = p.z * p.z * p.z;
    let a = x2 + 2.25 * y2 + p.z * p.z - 1.0;
    a * a * a - x2 * z3 - (9.0 / 80.0) * y2 * z3
}

/// Rotate a point about the z axis.
#[inline]
fn rotate_z(p: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z)
}

/// Point sampler for the built-in shapes.
///
/// Wraps an RNG and exposes one helper per shape, so callers can mix
/// shapes or build their own layouts on the same primitives.
pub struct ShapeSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> ShapeSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Sample `count` points on `shape`.
    pub fn generate(
        &mut self,
        shape: ShapeKind,
        count: usize,
    ) -> Result<PositionBuffer, SamplingError> {
        let mut buffer = PositionBuffer::with_capacity(count);
        for _ in 0..count {
            buffer.push(self.point(shape)?);
        }
        Ok(buffer)
    }

    /// Sample a single point on `shape`.
    pub fn point(&mut self, shape: ShapeKind) -> Result<Vec3, SamplingError> {
        Ok(match shape {
            ShapeKind::Sphere => self.sphere(),
            ShapeKind::Heart => self.heart()?,
            ShapeKind::Saturn => self.saturn(),
            ShapeKind::Flower => self.flower(),
            ShapeKind::Torus => self.torus(),
        })
    }

    // ========== Primitives ==========

    /// Uniform point on a sphere of the given radius.
    ///
    /// Uses the inverse CDF for the polar angle so points don't bunch at the poles.
    pub fn on_sphere(&mut self, radius: f32) -> Vec3 {
        let theta = self.rng.gen_range(0.0..TAU);
        let phi = (2.0 * self.rng.gen::<f32>() - 1.0).acos();

        Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }

    /// Point inside a cube of the given half-size.
    pub fn in_cube(&mut self, half_size: f32) -> Vec3 {
        Vec3::new(
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
            self.rng.gen_range(-half_size..half_size),
        )
    }

    // ========== Shapes ==========

    /// Thin shell: radius 4 plus up to 0.5 of jitter.
    pub fn sphere(&mut self) -> Vec3 {
        let radius = SPHERE_RADIUS + self.rng.gen_range(0.0..SPHERE_JITTER);
        self.on_sphere(radius)
    }

    /// Filled heart via rejection sampling in `[-3, 3]³`, scaled by 3.5.
    pub fn heart(&mut self) -> Result<Vec3, SamplingError> {
        for _ in 0..HEART_MAX_ATTEMPTS {
            let candidate = self.in_cube(HEART_BOUNDS);
            if heart_field(candidate) <= 0.0 {
                return Ok(candidate * HEART_SCALE);
            }
        }
        Err(SamplingError::RejectionExhausted {
            shape: ShapeKind::Heart,
            attempts: HEART_MAX_ATTEMPTS,
        })
    }

    /// Ring (60%) or planet shell (40%), tilted about z.
    pub fn saturn(&mut self) -> Vec3 {
        let p = if self.rng.gen_bool(SATURN_RING_PROBABILITY) {
            let angle = self.rng.gen_range(0.0..TAU);
            let radius = self.rng.gen_range(SATURN_RING_INNER..SATURN_RING_OUTER);
            Vec3::new(
                radius * angle.cos(),
                self.rng
                    .gen_range(-SATURN_RING_HALF_THICKNESS..SATURN_RING_HALF_THICKNESS),
                radius * angle.sin(),
            )
        } else {
            self.on_sphere(SATURN_PLANET_RADIUS)
        };
        rotate_z(p, SATURN_TILT)
    }

    /// Rose-curve surface with five petals, squashed along z.
    pub fn flower(&mut self) -> Vec3 {
        let u = self.rng.gen_range(0.0..TAU);
        let v = self.rng.gen_range(0.0..PI);
        let r = FLOWER_BASE_RADIUS + (FLOWER_PETALS * u).cos() * FLOWER_PETAL_DEPTH * v.sin();

        Vec3::new(
            r * v.sin() * u.cos(),
            r * v.sin() * u.sin(),
            r * v.cos() * FLOWER_FLATTEN,
        )
    }

    /// Standard torus parametrization around the z axis.
    pub fn torus(&mut self) -> Vec3 {
        let u = self.rng.gen_range(0.0..TAU);
        let v = self.rng.gen_range(0.0..TAU);
        let ring = TORUS_MAJOR_RADIUS + TORUS_MINOR_RADIUS * v.cos();

        Vec3::new(ring * u.cos(), ring * u.sin(), TORUS_MINOR_RADIUS * v.sin())
    }
}
