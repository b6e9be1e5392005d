//! GPU-facing data layouts. Field order and padding must match the WGSL
//! structs in `shaders/`.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

/// Vertex of the shared asteroid mesh (locations 0 and 1).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Per-star instance data (location 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    pub position: [f32; 3],
}

/// Per-asteroid instance data: model matrix columns (locations 2..=5).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct AsteroidInstanceRaw {
    pub model: [[f32; 4]; 4],
}

impl AsteroidInstanceRaw {
    pub fn from_matrix(model: Mat4) -> Self {
        Self { model: model.to_cols_array_2d() }
    }
}

/// Camera and starfield state, rewritten every frame (group 0, binding 0).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    /// Starfield model matrix (parallax translation).
    pub star_model: [[f32; 4]; 4],
    /// xyz = camera position, w unused.
    pub camera_position: [f32; 4],
    /// rgb = linear star color, a = opacity.
    pub star_color: [f32; 4],
    /// x = viewport width, y = viewport height, z = star size, w = 1.0 to encode sRGB in the shader.
    pub params: [f32; 4],
}

/// Scene lights (group 0, binding 1). Colors are linear and pre-multiplied by intensity.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniforms {
    pub ambient: [f32; 4],
    /// xyz = normalized direction the light travels, w unused.
    pub direction: [f32; 4],
    pub directional: [f32; 4],
}

/// Shared asteroid material (group 0, binding 2).
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MaterialUniforms {
    /// rgb = linear albedo, a = 1.
    pub color: [f32; 4],
    /// x = roughness, y = metalness.
    pub params: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_uniform_sizes_are_16_byte_multiples() {
        assert_eq!(size_of::<FrameUniforms>() % 16, 0);
        assert_eq!(size_of::<LightUniforms>() % 16, 0);
        assert_eq!(size_of::<MaterialUniforms>() % 16, 0);
    }

    #[test]
    fn test_vertex_strides() {
        assert_eq!(size_of::<MeshVertex>(), 24);
        assert_eq!(size_of::<StarInstance>(), 12);
        assert_eq!(size_of::<AsteroidInstanceRaw>(), 64);
    }

    #[test]
    fn test_instance_from_matrix_is_column_major() {
        let m = Mat4::from_translation(glam::Vec3::new(1.0, 2.0, 3.0));
        let raw = AsteroidInstanceRaw::from_matrix(m);
        assert_eq!(raw.model[3], [1.0, 2.0, 3.0, 1.0]);
    }
}
