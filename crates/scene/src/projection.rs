use foundation::math::{Vec2, Vec3};

/// Drawing surface size in CSS pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Dimensions are clamped to at least one pixel.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn min_dim(&self) -> f64 {
        self.width.min(self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A camera-space point mapped onto the screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    /// Perspective factor; larger is nearer the camera.
    pub scale: f64,
}

impl Projected {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Pinhole projection with the camera `focal_length` in front of the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Projector {
    pub focal_length: f64,
    pub viewport: Viewport,
}

impl Projector {
    pub fn new(focal_length: f64, viewport: Viewport) -> Self {
        Self {
            focal_length,
            viewport,
        }
    }

    /// Returns `None` for points at or behind the camera plane.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        project_around(p, self.focal_length, self.viewport.center())
    }
}

/// `scale = f / (f + z)`, offset onto `origin`.
///
/// Shared by the point cloud (origin at the viewport centre) and the terrain
/// grid (origin on the horizon line).
pub fn project_around(p: Vec3, focal_length: f64, origin: Vec2) -> Option<Projected> {
    let depth = focal_length + p.z;
    if depth <= 0.0 || !depth.is_finite() {
        return None;
    }
    let scale = focal_length / depth;
    Some(Projected {
        x: p.x * scale + origin.x,
        y: p.y * scale + origin.y,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::{Projector, Viewport};
    use foundation::math::Vec3;

    #[test]
    fn origin_projects_to_viewport_center_at_unit_scale() {
        let proj = Projector::new(500.0, Viewport::new(800.0, 600.0));
        let p = proj.project(Vec3::ZERO).expect("origin is in front");
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 300.0);
        assert_eq!(p.scale, 1.0);
    }

    #[test]
    fn points_behind_camera_have_no_projection() {
        let proj = Projector::new(500.0, Viewport::new(800.0, 600.0));
        assert!(proj.project(Vec3::new(10.0, 10.0, -500.0)).is_none());
        assert!(proj.project(Vec3::new(10.0, 10.0, -750.0)).is_none());
        let near = proj.project(Vec3::new(10.0, 10.0, -499.0)).expect("just in front");
        assert!(near.x.is_finite() && near.y.is_finite() && near.scale.is_finite());
    }

    #[test]
    fn farther_points_shrink_toward_center() {
        let proj = Projector::new(500.0, Viewport::new(1000.0, 1000.0));
        let near = proj.project(Vec3::new(100.0, 0.0, -100.0)).unwrap();
        let far = proj.project(Vec3::new(100.0, 0.0, 100.0)).unwrap();
        assert!(near.scale > 1.0 && far.scale < 1.0);
        assert!(near.x > far.x);
    }

    #[test]
    fn viewport_is_never_degenerate() {
        let v = Viewport::new(0.0, -5.0);
        assert_eq!(v.width, 1.0);
        assert_eq!(v.height, 1.0);
    }
}
