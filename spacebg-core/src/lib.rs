//! spacebg core
//!
//! Platform-agnostic model of the animated space background: configuration,
//! camera, starfield, asteroid field, lights, the per-frame travel step and
//! the GPU-facing uniform layouts and WGSL shaders. Shared by the `wgpu`
//! renderer, the WASM web runtime and the developer CLI.

pub mod asteroids;
pub mod camera;
pub mod color;
pub mod config;
pub mod controls;
pub mod geometry;
pub mod lights;
pub mod math;
pub mod scene;
pub mod shaders;
pub mod starfield;
pub mod uniforms;

pub use asteroids::{AsteroidField, AsteroidInstance, StandardMaterial};
pub use camera::{PerspectiveCamera, Viewport};
pub use color::Color;
pub use config::{ConfigError, SceneConfig};
pub use controls::{AnimationControls, LoopError, LoopGuard, LoopState};
pub use geometry::MeshGeometry;
pub use lights::{AmbientLight, DirectionalLight, Lighting};
pub use scene::{scene_rng, FrameStep, SpaceScene};
pub use starfield::{PointsMaterial, Starfield};
