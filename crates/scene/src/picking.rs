use core::cmp::Ordering;

use foundation::math::Vec2;
use foundation::math::precision::stable_total_cmp_f64;

use crate::cloud::Point;
use crate::projection::Projector;

/// Screen distances closer than this count as the same pixel.
pub const DISTANCE_TIE_PX: f64 = 0.5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub index: usize,
    /// Screen distance from the click to the projected point.
    pub distance_px: f64,
    pub scale: f64,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    /// Points farther than this (strictly) from the click are ignored.
    pub hit_radius_px: f64,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            hit_radius_px: 30.0,
        }
    }
}

/// Deterministic screen-space picking over the rotated point set.
///
/// Ordering contract:
/// - Only points with a projection and `distance < hit_radius_px` qualify.
/// - The qualifying point closest to the click on screen wins.
/// - Distances within [`DISTANCE_TIE_PX`] of each other are a tie; the larger
///   projected `scale` (nearer the camera, drawn on top) wins it, then the
///   lower index.
pub fn pick_point(
    points: &[Point],
    projector: &Projector,
    at: Vec2,
    opts: PickOptions,
) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for p in points {
        let Some(proj) = projector.project(p.current) else {
            continue;
        };
        let distance_px = at.distance(proj.position());
        if distance_px.is_nan() || distance_px >= opts.hit_radius_px {
            continue;
        }

        let hit = PickHit {
            index: p.index,
            distance_px,
            scale: proj.scale,
        };
        best = match best {
            Some(b) if prefer(&b, &hit).is_le() => Some(b),
            _ => Some(hit),
        };
    }

    best
}

/// `Less` when `a` should win over `b`.
fn prefer(a: &PickHit, b: &PickHit) -> Ordering {
    if (a.distance_px - b.distance_px).abs() > DISTANCE_TIE_PX {
        return stable_total_cmp_f64(a.distance_px, b.distance_px);
    }
    stable_total_cmp_f64(b.scale, a.scale)
        .then_with(|| stable_total_cmp_f64(a.distance_px, b.distance_px))
        .then_with(|| a.index.cmp(&b.index))
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, pick_point};
    use crate::cloud::PointCloud;
    use crate::projection::{Projector, Viewport};
    use foundation::math::{Vec2, Vec3};

    fn projector() -> Projector {
        Projector::new(500.0, Viewport::new(1000.0, 1000.0))
    }

    #[test]
    fn nearer_point_wins_on_the_same_pixel() {
        // Both land on the viewport centre; z chosen for scales 0.9 and 0.95.
        let far_z = 500.0 / 0.9 - 500.0;
        let near_z = 500.0 / 0.95 - 500.0;
        let cloud = PointCloud::from_positions([
            Vec3::new(0.0, 0.0, far_z),
            Vec3::new(0.0, 0.0, near_z),
        ]);
        let hit = pick_point(
            cloud.points(),
            &projector(),
            Vec2::new(500.0, 500.0),
            PickOptions::default(),
        )
        .expect("hit");
        assert_eq!(hit.index, 1);
        assert!((hit.scale - 0.95).abs() < 1e-12);

        // Input order must not matter.
        let swapped = PointCloud::from_positions([
            Vec3::new(0.0, 0.0, near_z),
            Vec3::new(0.0, 0.0, far_z),
        ]);
        let hit = pick_point(
            swapped.points(),
            &projector(),
            Vec2::new(500.0, 500.0),
            PickOptions::default(),
        )
        .expect("hit");
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn misses_outside_hit_radius() {
        let cloud = PointCloud::from_positions([Vec3::new(0.0, 0.0, 0.0)]);
        let opts = PickOptions::default();
        assert!(pick_point(cloud.points(), &projector(), Vec2::new(530.0, 500.0), opts).is_none());
        assert!(pick_point(cloud.points(), &projector(), Vec2::new(529.0, 500.0), opts).is_some());
    }

    #[test]
    fn points_behind_camera_are_never_picked() {
        let cloud = PointCloud::from_positions([Vec3::new(0.0, 0.0, -600.0)]);
        let hit = pick_point(
            cloud.points(),
            &projector(),
            Vec2::new(500.0, 500.0),
            PickOptions { hit_radius_px: 1.0e9 },
        );
        assert!(hit.is_none());
    }

    #[test]
    fn closest_point_beats_a_slightly_nearer_one_farther_away() {
        // A sits 1px from the click at scale 1; B is 28px away but marginally
        // nearer the camera.
        let b_z = 500.0 / 1.002 - 500.0;
        let b_x = 28.0 / 1.002;
        let cloud = PointCloud::from_positions([
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(b_x, 0.0, b_z),
        ]);
        let hit = pick_point(
            cloud.points(),
            &projector(),
            Vec2::new(500.0, 500.0),
            PickOptions::default(),
        )
        .expect("hit");
        assert_eq!(hit.index, 0);
        assert!((hit.distance_px - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sub_pixel_distance_gap_is_a_tie_won_by_scale() {
        // B is 0.3px farther from the click than A but nearer the camera.
        let near_z = 500.0 / 1.05 - 500.0;
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(0.3 / 1.05, 0.0, near_z);
        let at = Vec2::new(500.0, 500.0);

        let cloud = PointCloud::from_positions([a, b]);
        let hit = pick_point(cloud.points(), &projector(), at, PickOptions::default()).unwrap();
        assert_eq!(hit.index, 1);
        assert!((hit.scale - 1.05).abs() < 1e-12);

        let swapped = PointCloud::from_positions([b, a]);
        let hit = pick_point(swapped.points(), &projector(), at, PickOptions::default()).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn equal_scale_prefers_closer_then_lower_index() {
        let cloud = PointCloud::from_positions([
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(-4.0, 0.0, 0.0),
        ]);
        let hit = pick_point(
            cloud.points(),
            &projector(),
            Vec2::new(500.0, 500.0),
            PickOptions::default(),
        )
        .unwrap();
        assert_eq!(hit.index, 1);
        assert_eq!(hit.distance_px, 4.0);
    }
}
