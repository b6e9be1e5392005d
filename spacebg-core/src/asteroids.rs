use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::color::Color;
use crate::config::AsteroidConfig;
use crate::geometry::MeshGeometry;
use crate::math::Frustum;
use crate::uniforms::{AsteroidInstanceRaw, MaterialUniforms};

/// Rough, half-metallic surface shared by every asteroid.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardMaterial {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl StandardMaterial {
    pub fn uniforms(&self) -> MaterialUniforms {
        let [r, g, b] = self.color.linear();
        MaterialUniforms {
            color: [r, g, b, 1.0],
            params: [self.roughness, self.metalness, 0.0, 0.0],
        }
    }
}

/// Placement of one asteroid. Fixed once generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AsteroidInstance {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    /// Uniform scale on all three axes.
    pub scale: f32,
}

impl AsteroidInstance {
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), rotation, self.position)
    }
}

/// Instances referencing one geometry and one material.
pub struct AsteroidField {
    pub geometry: MeshGeometry,
    pub material: StandardMaterial,
    pub instances: Vec<AsteroidInstance>,
    radius: f32,
}

impl AsteroidField {
    pub fn generate<R: Rng + ?Sized>(config: &AsteroidConfig, rng: &mut R) -> Self {
        let b = &config.bounds;
        let instances = (0..config.count)
            .map(|_| AsteroidInstance {
                position: Vec3::new(
                    rng.gen_range(b.min[0]..b.max[0]),
                    rng.gen_range(b.min[1]..b.max[1]),
                    rng.gen_range(b.min[2]..b.max[2]),
                ),
                rotation: Vec3::new(
                    rng.gen_range(0.0..config.max_rotation),
                    rng.gen_range(0.0..config.max_rotation),
                    rng.gen_range(0.0..config.max_rotation),
                ),
                scale: rng.gen_range(config.scale_min..config.scale_max),
            })
            .collect();

        Self {
            geometry: MeshGeometry::dodecahedron(config.radius),
            material: StandardMaterial {
                color: config.color,
                roughness: config.roughness,
                metalness: config.metalness,
            },
            instances,
            radius: config.radius,
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instance data for asteroids whose bounding sphere touches the frustum.
    pub fn visible_instances(&self, frustum: &Frustum) -> Vec<AsteroidInstanceRaw> {
        self.instances
            .iter()
            .filter(|a| frustum.intersects_sphere(a.position, a.scale * self.radius))
            .map(|a| AsteroidInstanceRaw::from_matrix(a.model_matrix()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    fn field() -> AsteroidField {
        AsteroidField::generate(&AsteroidConfig::default(), &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_default_count() {
        assert_eq!(field().len(), 50);
    }

    #[test]
    fn test_instances_within_bounds() {
        for a in &field().instances {
            assert!((-50.0..50.0).contains(&a.position.x));
            assert!((-50.0..50.0).contains(&a.position.y));
            assert!((-500.0..0.0).contains(&a.position.z));
            for angle in a.rotation.to_array() {
                assert!((0.0..PI).contains(&angle), "rotation {angle}");
            }
            assert!((0.2..0.7).contains(&a.scale), "scale {}", a.scale);
        }
    }

    #[test]
    fn test_scale_uniform_on_all_axes() {
        for a in &field().instances {
            let (scale, _, _) = a.model_matrix().to_scale_rotation_translation();
            assert!((scale.x - a.scale).abs() < 1e-5);
            assert!((scale.y - a.scale).abs() < 1e-5);
            assert!((scale.z - a.scale).abs() < 1e-5);
        }
    }

    #[test]
    fn test_instances_vary() {
        let f = field();
        let first = f.instances[0];
        assert!(f.instances.iter().skip(1).any(|a| a.scale != first.scale));
        assert!(f.instances.iter().skip(1).any(|a| a.position != first.position));
    }

    #[test]
    fn test_shared_geometry_and_material() {
        let f = field();
        assert_eq!(f.geometry.vertex_count(), 108);
        assert_eq!(f.material.color, Color(0xaaaaaa));
        assert_eq!(f.material.roughness, 0.8);
        assert_eq!(f.material.metalness, 0.5);
    }

    #[test]
    fn test_model_matrix_translation() {
        let a = AsteroidInstance {
            position: Vec3::new(1.0, -2.0, -30.0),
            rotation: Vec3::new(0.3, 1.2, 2.9),
            scale: 0.5,
        };
        let m = a.model_matrix();
        assert_eq!(m.w_axis.truncate(), a.position);
    }

    #[test]
    fn test_visible_instances_culls_behind_camera() {
        let mut f = field();
        f.instances = vec![
            AsteroidInstance { position: Vec3::new(0.0, 0.0, -20.0), rotation: Vec3::ZERO, scale: 0.5 },
            AsteroidInstance { position: Vec3::new(0.0, 0.0, 50.0), rotation: Vec3::ZERO, scale: 0.5 },
        ];
        let vp = Mat4::perspective_rh(75f32.to_radians(), 1.0, 0.1, 1000.0)
            * Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        let visible = f.visible_instances(&Frustum::from_view_projection(&vp));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].model[3][2], -20.0);
    }

    #[test]
    fn test_material_uniforms_linear() {
        let u = field().material.uniforms();
        assert!(u.color[0] < 0.5 && u.color[0] > 0.3);
        assert_eq!(u.params[0], 0.8);
        assert_eq!(u.params[1], 0.5);
    }
}
