//! Embedded WGSL shader sources for the background pipelines.
//! Struct layouts mirror `crate::uniforms`.

pub const STARS: &str = include_str!("../shaders/stars.wgsl");
pub const ASTEROID: &str = include_str!("../shaders/asteroid.wgsl");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_points_present() {
        for src in [STARS, ASTEROID] {
            assert!(src.contains("fn vs_main"));
            assert!(src.contains("fn fs_main"));
        }
    }

    #[test]
    fn test_frame_struct_shared() {
        let frame = "struct Frame {";
        assert!(STARS.contains(frame));
        assert!(ASTEROID.contains(frame));
    }
}
