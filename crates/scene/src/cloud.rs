//! The point set and its rotation.
//!
//! Original coordinates are sampled once per scene and never mutated; the
//! camera-space coordinates are recomputed from them every frame so no
//! floating-point drift accumulates across frames.

use std::f64::consts::TAU;

use foundation::math::Vec3;
use rand::Rng;

use crate::config::EngineConfig;
use crate::projection::Viewport;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point {
    /// Stable position in the point list.
    pub index: usize,
    /// Seeded coordinate on the sphere surface.
    pub original: Vec3,
    /// `original` rotated by the current global angles.
    pub current: Vec3,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    points: Vec<Point>,
    radius: f64,
}

impl PointCloud {
    /// Samples `config.point_count` points uniformly over a sphere whose
    /// radius is `min(width, height) * radius_fraction`.
    pub fn seed<R: Rng + ?Sized>(viewport: Viewport, config: &EngineConfig, rng: &mut R) -> Self {
        let radius = viewport.min_dim() * config.radius_fraction;
        let points = (0..config.point_count)
            .map(|index| {
                let original = sample_sphere_surface(radius, rng);
                Point {
                    index,
                    original,
                    current: original,
                }
            })
            .collect();
        Self { points, radius }
    }

    /// Builds a cloud from explicit coordinates (indices follow input order).
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        let points: Vec<Point> = positions
            .into_iter()
            .enumerate()
            .map(|(index, original)| Point {
                index,
                original,
                current: original,
            })
            .collect();
        let radius = points
            .iter()
            .map(|p| p.original.length())
            .fold(0.0, f64::max);
        Self { points, radius }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Recomputes every `current` from `original`.
    pub fn rotate(&mut self, yaw: f64, pitch: f64) {
        let rot = YawPitch::new(yaw, pitch);
        for p in &mut self.points {
            p.current = rot.apply(p.original);
        }
    }
}

/// `theta` uniform in `[0, 2π)`, `phi = acos(2u - 1)`; uniform in area, so
/// the poles are not over-represented.
pub fn sample_sphere_surface<R: Rng + ?Sized>(radius: f64, rng: &mut R) -> Vec3 {
    let theta = rng.random::<f64>() * TAU;
    let phi = (2.0 * rng.random::<f64>() - 1.0).acos();
    let dir = Vec3::new(phi.sin() * theta.cos(), phi.sin() * theta.sin(), phi.cos());
    dir * radius
}

/// Precomputed yaw-then-pitch rotation.
#[derive(Debug, Copy, Clone)]
struct YawPitch {
    cos_yaw: f64,
    sin_yaw: f64,
    cos_pitch: f64,
    sin_pitch: f64,
}

impl YawPitch {
    fn new(yaw: f64, pitch: f64) -> Self {
        Self {
            cos_yaw: yaw.cos(),
            sin_yaw: yaw.sin(),
            cos_pitch: pitch.cos(),
            sin_pitch: pitch.sin(),
        }
    }

    fn apply(&self, v: Vec3) -> Vec3 {
        // Yaw about the vertical axis.
        let x1 = v.x * self.cos_yaw - v.z * self.sin_yaw;
        let z1 = v.x * self.sin_yaw + v.z * self.cos_yaw;
        // Pitch about the horizontal axis, on the yawed coordinates.
        let y2 = v.y * self.cos_pitch - z1 * self.sin_pitch;
        let z2 = v.y * self.sin_pitch + z1 * self.cos_pitch;
        Vec3::new(x1, y2, z2)
    }
}

/// Rotates `v` by `yaw` then `pitch`.
pub fn rotate_yaw_pitch(v: Vec3, yaw: f64, pitch: f64) -> Vec3 {
    YawPitch::new(yaw, pitch).apply(v)
}
