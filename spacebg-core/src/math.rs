use glam::{Mat4, Vec3, Vec4};

/// Six clip planes of a view-projection matrix, each `[a, b, c, d]` with
/// `ax + by + cz + d >= 0` on the inside.
pub struct Frustum {
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Gribb-Hartmann extraction for wgpu clip space (depth in 0..1).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0, // left
            row3 - row0, // right
            row3 + row1, // bottom
            row3 - row1, // top
            row2,        // near
            row3 - row2, // far
        ];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 1e-8 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// True if the sphere is inside or straddles every plane.
    pub fn intersects_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|p| p.truncate().dot(center) + p.w >= -radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    fn looking_at_origin() -> Frustum {
        let proj = Mat4::perspective_rh(PI / 4.0, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(&(proj * view))
    }

    // ── from_view_projection ──

    #[test]
    fn test_planes_normalized() {
        let proj = Mat4::perspective_rh(75f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0);
        let frustum = Frustum::from_view_projection(&proj);
        for plane in &frustum.planes {
            assert!((plane.truncate().length() - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_near_plane_at_near_distance() {
        let proj = Mat4::perspective_rh(PI / 3.0, 1.0, 0.5, 100.0);
        let frustum = Frustum::from_view_projection(&proj);
        // A point just in front of the near plane is inside, just behind is outside.
        assert!(frustum.intersects_sphere(Vec3::new(0.0, 0.0, -0.6), 0.0));
        assert!(!frustum.intersects_sphere(Vec3::new(0.0, 0.0, -0.4), 0.0));
    }

    // ── intersects_sphere ──

    #[test]
    fn test_sphere_inside() {
        assert!(looking_at_origin().intersects_sphere(Vec3::ZERO, 0.5));
    }

    #[test]
    fn test_sphere_behind_camera() {
        assert!(!looking_at_origin().intersects_sphere(Vec3::new(0.0, 0.0, 200.0), 1.0));
    }

    #[test]
    fn test_sphere_beyond_far_plane() {
        assert!(!looking_at_origin().intersects_sphere(Vec3::new(0.0, 0.0, -500.0), 1.0));
    }

    #[test]
    fn test_sphere_straddling_side_plane() {
        // Far to the side, but large enough to reach into the frustum
        assert!(looking_at_origin().intersects_sphere(Vec3::new(50.0, 0.0, 0.0), 100.0));
        assert!(!looking_at_origin().intersects_sphere(Vec3::new(50.0, 0.0, 0.0), 1.0));
    }
}
