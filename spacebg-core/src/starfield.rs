use glam::{Mat4, Vec3};
use rand::Rng;

use crate::color::Color;
use crate::config::StarfieldConfig;
use crate::uniforms::StarInstance;

/// Appearance shared by every star.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    pub size: f32,
    pub opacity: f32,
    pub transparent: bool,
}

/// The point cloud. Positions are fixed at creation; only `offset_z` moves.
pub struct Starfield {
    pub positions: Vec<Vec3>,
    pub material: PointsMaterial,
    /// Depth translation of the whole cloud.
    pub offset_z: f64,
    parallax: f64,
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(config: &StarfieldConfig, rng: &mut R) -> Self {
        let b = &config.bounds;
        let positions = (0..config.count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(b.min[0]..b.max[0]),
                    rng.gen_range(b.min[1]..b.max[1]),
                    rng.gen_range(b.min[2]..b.max[2]),
                )
            })
            .collect();

        Self {
            positions,
            material: PointsMaterial {
                color: config.color,
                size: config.size,
                opacity: config.opacity,
                transparent: config.opacity < 1.0,
            },
            offset_z: 0.0,
            parallax: config.parallax,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Move the cloud a fraction of the camera depth so it drifts slower than the camera.
    pub fn apply_parallax(&mut self, camera_depth: f64) {
        self.offset_z = camera_depth * self.parallax;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, self.offset_z as f32))
    }

    pub fn instances(&self) -> Vec<StarInstance> {
        self.positions
            .iter()
            .map(|p| StarInstance { position: p.to_array() })
            .collect()
    }
}
