use serde::{Deserialize, Serialize};

/// A 24-bit sRGB color as written in stylesheets and scene code (`0xaaaaaa`).
///
/// Serialized as the bare integer so configs can say `color = 0x404040`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Color = Color(0xffffff);

    /// Channels in sRGB space, 0..=1.
    pub fn srgb(&self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }

    /// Channels converted to linear light for shading.
    pub fn linear(&self) -> [f32; 3] {
        self.srgb().map(srgb_to_linear)
    }

    /// Linear channels scaled by a light intensity.
    pub fn scaled_linear(&self, intensity: f32) -> [f32; 3] {
        self.linear().map(|c| c * intensity)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_srgb_channels() {
        let c = Color(0xff8000);
        let [r, g, b] = c.srgb();
        assert!((r - 1.0).abs() < EPSILON);
        assert!((g - 128.0 / 255.0).abs() < EPSILON);
        assert!(b.abs() < EPSILON);
    }

    #[test]
    fn test_linear_endpoints() {
        assert_eq!(Color(0x000000).linear(), [0.0, 0.0, 0.0]);
        let white = Color::WHITE.linear();
        for c in white {
            assert!((c - 1.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_linear_is_darker_than_srgb_midtones() {
        // 0x40 ≈ 0.251 sRGB ≈ 0.0513 linear
        let [r, _, _] = Color(0x404040).linear();
        assert!((r - 0.0513).abs() < 1e-3, "got {r}");
    }

    #[test]
    fn test_scaled_linear() {
        let [r, g, b] = Color::WHITE.scaled_linear(0.8);
        assert!((r - 0.8).abs() < EPSILON);
        assert!((g - 0.8).abs() < EPSILON);
        assert!((b - 0.8).abs() < EPSILON);
    }
}
