use glam::Vec3;

use crate::color::Color;
use crate::config::LightConfig;
use crate::uniforms::LightUniforms;

pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Parallel light shining from `position` towards `target`.
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl DirectionalLight {
    /// Unit vector the light travels along.
    pub fn direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }
}

pub struct Lighting {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Lighting {
    pub fn new(config: &LightConfig) -> Self {
        Self {
            ambient: AmbientLight {
                color: config.ambient_color,
                intensity: config.ambient_intensity,
            },
            directional: DirectionalLight {
                color: config.directional_color,
                intensity: config.directional_intensity,
                position: Vec3::from(config.directional_position),
                target: Vec3::ZERO,
            },
        }
    }

    pub fn uniforms(&self) -> LightUniforms {
        let [ar, ag, ab] = self.ambient.color.scaled_linear(self.ambient.intensity);
        let [dr, dg, db] = self.directional.color.scaled_linear(self.directional.intensity);
        let dir = self.directional.direction();
        LightUniforms {
            ambient: [ar, ag, ab, 0.0],
            direction: [dir.x, dir.y, dir.z, 0.0],
            directional: [dr, dg, db, 0.0],
        }
    }
}
