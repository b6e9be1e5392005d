use glam::{DVec3, Mat4, Vec3};

use crate::config::CameraConfig;

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective camera looking down -Z from `position`.
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: DVec3,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        let aspect = if viewport.is_empty() { 1.0 } else { viewport.aspect() };
        Self {
            fov_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
            position: DVec3::new(0.0, 0.0, config.start_depth),
        }
    }

    /// Current position along the viewing axis.
    pub fn depth(&self) -> f64 {
        self.position.z
    }

    /// Update the aspect ratio for a resized viewport. Empty viewports are ignored.
    pub fn set_viewport(&mut self, viewport: Viewport) -> bool {
        if viewport.is_empty() {
            return false;
        }
        self.aspect = viewport.aspect();
        true
    }

    pub fn position_f32(&self) -> Vec3 {
        self.position.as_vec3()
    }

    /// Projection into wgpu clip space (depth 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position_f32())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraConfig::default(), Viewport::new(1600, 900))
    }

    #[test]
    fn test_defaults() {
        let cam = camera();
        assert_eq!(cam.fov_degrees, 75.0);
        assert_eq!(cam.near, 0.1);
        assert_eq!(cam.far, 1000.0);
        assert_eq!(cam.depth(), 10.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_viewport_ignored() {
        let mut cam = camera();
        assert!(!cam.set_viewport(Viewport::new(800, 0)));
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        assert!(cam.set_viewport(Viewport::new(500, 1000)));
        assert!((cam.aspect - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_point_ahead_projects_inside_clip() {
        let cam = camera();
        let clip = cam.view_projection() * Vec4::new(0.0, 0.0, -50.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_view_follows_depth() {
        let mut cam = camera();
        cam.position.z = -100.0;
        let eye = cam.view_matrix() * Vec4::new(0.0, 0.0, -150.0, 1.0);
        assert!((eye.z + 50.0).abs() < 1e-4);
    }
}
