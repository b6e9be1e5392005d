use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::asteroids::AsteroidField;
use crate::camera::{PerspectiveCamera, Viewport};
use crate::config::{SceneConfig, TravelConfig};
use crate::controls::AnimationControls;
use crate::lights::Lighting;
use crate::math::Frustum;
use crate::starfield::Starfield;
use crate::uniforms::FrameUniforms;

/// Result of advancing the scene by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    pub camera_depth: f64,
    pub starfield_offset: f64,
    /// The camera passed the lower bound and was reset to the upper bound.
    pub wrapped: bool,
}

/// Everything drawn by the background, built once.
pub struct SpaceScene {
    pub camera: PerspectiveCamera,
    pub starfield: Starfield,
    pub asteroids: AsteroidField,
    pub lights: Lighting,
    travel: TravelConfig,
    frames: u64,
}

/// RNG for scene generation: seeded when the config asks for it.
pub fn scene_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

impl SpaceScene {
    pub fn build<R: Rng + ?Sized>(config: &SceneConfig, viewport: Viewport, rng: &mut R) -> Self {
        let camera = PerspectiveCamera::new(&config.camera, viewport);
        let mut starfield = Starfield::generate(&config.starfield, rng);
        let asteroids = AsteroidField::generate(&config.asteroids, rng);
        let lights = Lighting::new(&config.lights);

        starfield.apply_parallax(camera.depth());

        log::info!(
            "Built space scene: {} stars, {} asteroids ({} vertices each), viewport {}x{}",
            starfield.len(),
            asteroids.len(),
            asteroids.geometry.vertex_count(),
            viewport.width,
            viewport.height,
        );

        Self {
            camera,
            starfield,
            asteroids,
            lights,
            travel: config.travel.clone(),
            frames: 0,
        }
    }

    /// Advance the camera by `controls.current_speed`, wrap at the travel
    /// bounds and move the starfield by its parallax fraction.
    pub fn step(&mut self, controls: &AnimationControls) -> FrameStep {
        self.camera.position.z -= controls.current_speed;

        let wrapped = self.camera.position.z < self.travel.lower_bound;
        if wrapped {
            self.camera.position.z = self.travel.upper_bound;
        }

        self.starfield.apply_parallax(self.camera.depth());
        self.frames += 1;

        FrameStep {
            camera_depth: self.camera.depth(),
            starfield_offset: self.starfield.offset_z,
            wrapped,
        }
    }

    /// Returns false when the viewport is empty and nothing changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        self.camera.set_viewport(viewport)
    }

    /// Frames stepped since the scene was built.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.camera.view_projection())
    }

    /// Per-frame uniforms for a surface of `viewport` size.
    pub fn frame_uniforms(&self, viewport: Viewport, encode_srgb: bool) -> FrameUniforms {
        let [r, g, b] = self.starfield.material.color.linear();
        let eye = self.camera.position_f32();
        FrameUniforms {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            view: self.camera.view_matrix().to_cols_array_2d(),
            star_model: self.starfield.model_matrix().to_cols_array_2d(),
            camera_position: [eye.x, eye.y, eye.z, 1.0],
            star_color: [r, g, b, self.starfield.material.opacity],
            params: [
                viewport.width as f32,
                viewport.height as f32,
                self.starfield.material.size,
                if encode_srgb { 1.0 } else { 0.0 },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn scene() -> SpaceScene {
        let config = SceneConfig { seed: Some(1), ..Default::default() };
        SpaceScene::build(&config, Viewport::new(1280, 720), &mut scene_rng(config.seed))
    }

    fn small_scene() -> SpaceScene {
        let mut config = SceneConfig::default();
        config.starfield.count = 10;
        config.asteroids.count = 3;
        SpaceScene::build(&config, Viewport::new(800, 600), &mut scene_rng(Some(3)))
    }

    // ── build ──

    #[test]
    fn test_build_counts() {
        let s = scene();
        assert_eq!(s.starfield.len(), 15_000);
        assert_eq!(s.asteroids.len(), 50);
        assert_eq!(s.camera.depth(), 10.0);
        assert_eq!(s.frames(), 0);
    }

    #[test]
    fn test_seeded_builds_match() {
        let a = scene();
        let b = scene();
        assert_eq!(a.starfield.positions, b.starfield.positions);
        assert_eq!(a.asteroids.instances, b.asteroids.instances);
    }

    // ── step ──

    #[test]
    fn test_step_decrements_by_current_speed() {
        let mut s = small_scene();
        let controls = AnimationControls::default();
        let step = s.step(&controls);
        assert!((step.camera_depth - 9.995).abs() < EPSILON);
        assert!(!step.wrapped);
    }

    #[test]
    fn test_n_frames_before_wrap() {
        let mut s = small_scene();
        let controls = AnimationControls::default();
        for _ in 0..1000 {
            s.step(&controls);
        }
        assert!((s.camera.depth() - (10.0 - 1000.0 * 0.005)).abs() < 1e-6);
        assert_eq!(s.frames(), 1000);
    }

    #[test]
    fn test_wraps_below_lower_bound() {
        let mut s = small_scene();
        let controls = AnimationControls { current_speed: 1.0, ..Default::default() };
        // 10 -> -200 takes 210 frames without wrapping; the 211th goes below.
        for _ in 0..210 {
            assert!(!s.step(&controls).wrapped);
        }
        assert!((s.camera.depth() + 200.0).abs() < EPSILON);
        let step = s.step(&controls);
        assert!(step.wrapped);
        assert_eq!(step.camera_depth, 200.0);
        let step = s.step(&controls);
        assert!((step.camera_depth - 199.0).abs() < EPSILON);
    }

    #[test]
    fn test_depth_stays_in_band() {
        let mut s = small_scene();
        let controls = AnimationControls { current_speed: 7.3, ..Default::default() };
        for _ in 0..5000 {
            let step = s.step(&controls);
            assert!(step.camera_depth >= -200.0 && step.camera_depth <= 200.0);
        }
    }

    #[test]
    fn test_parallax_tracks_camera_every_frame() {
        let mut s = small_scene();
        let controls = AnimationControls::default().with_speed(3.7);
        for _ in 0..500 {
            let step = s.step(&controls);
            assert!((step.starfield_offset - step.camera_depth * 0.01).abs() < EPSILON);
            assert_eq!(s.starfield.offset_z, step.starfield_offset);
        }
    }

    #[test]
    fn test_speed_change_applies_next_frame() {
        let mut s = small_scene();
        let mut controls = AnimationControls::default();
        let before = s.step(&controls).camera_depth;
        controls.boost();
        let after = s.step(&controls).camera_depth;
        assert!((before - after - 0.15).abs() < EPSILON);
        controls.cruise();
        let last = s.step(&controls).camera_depth;
        assert!((after - last - 0.005).abs() < EPSILON);
    }

    #[test]
    fn test_zero_speed_holds_position() {
        let mut s = small_scene();
        let controls = AnimationControls::default().with_speed(0.0);
        for _ in 0..10 {
            assert_eq!(s.step(&controls).camera_depth, 10.0);
        }
    }

    // ── resize / uniforms ──

    #[test]
    fn test_resize_updates_aspect() {
        let mut s = small_scene();
        assert!(s.resize(Viewport::new(1000, 500)));
        assert!((s.camera.aspect - 2.0).abs() < 1e-6);
        assert!(!s.resize(Viewport::new(0, 500)));
        assert!((s.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_frame_uniforms() {
        let mut s = small_scene();
        s.step(&AnimationControls::default().with_speed(10.0));
        let u = s.frame_uniforms(Viewport::new(800, 600), true);
        assert_eq!(u.params, [800.0, 600.0, 0.7, 1.0]);
        assert_eq!(u.star_color[3], 0.8);
        assert_eq!(u.camera_position[2], 0.0);
        assert_eq!(u.star_model[3][2], 0.0);
    }
}
