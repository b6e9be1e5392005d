use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Color;

/// Axis-aligned box used for random placement. `min` is inclusive, `max` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds3 {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Bounds3 {
    pub const fn new(min: [f32; 3], max: [f32; 3]) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: [f32; 3]) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    fn is_ordered(&self) -> bool {
        (0..3).all(|i| self.min[i].is_finite() && self.max[i].is_finite() && self.min[i] < self.max[i])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Depth (z) the camera starts at.
    pub start_depth: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            start_depth: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    pub count: usize,
    pub bounds: Bounds3,
    pub color: Color,
    /// World-space point size, attenuated by distance.
    pub size: f32,
    pub opacity: f32,
    /// Fraction of the camera depth applied to the starfield each frame.
    pub parallax: f64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 15_000,
            bounds: Bounds3::new([-1000.0, -1000.0, -1000.0], [1000.0, 1000.0, 0.0]),
            color: Color::WHITE,
            size: 0.7,
            opacity: 0.8,
            parallax: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    pub count: usize,
    pub bounds: Bounds3,
    /// Each Euler angle is drawn from `[0, max_rotation)`.
    pub max_rotation: f32,
    pub scale_min: f32,
    pub scale_max: f32,
    /// Circumradius of the shared dodecahedron.
    pub radius: f32,
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            count: 50,
            bounds: Bounds3::new([-50.0, -50.0, -500.0], [50.0, 50.0, 0.0]),
            max_rotation: std::f32::consts::PI,
            scale_min: 0.2,
            scale_max: 0.7,
            radius: 1.0,
            color: Color(0xaaaaaa),
            roughness: 0.8,
            metalness: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub directional_color: Color,
    pub directional_intensity: f32,
    /// The directional light shines from here towards the origin.
    pub directional_position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_color: Color(0x404040),
            ambient_intensity: 2.0,
            directional_color: Color::WHITE,
            directional_intensity: 0.8,
            directional_position: [5.0, 3.0, 5.0],
        }
    }
}

/// Depth band the camera travels through before wrapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelConfig {
    /// Falling below this depth triggers a wrap.
    pub lower_bound: f64,
    /// Depth the camera is reset to on wrap.
    pub upper_bound: f64,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            lower_bound: -200.0,
            upper_bound: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    pub base: f64,
    pub boost: f64,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base: 0.005,
            boost: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    pub antialias: bool,
    /// Clear to fully transparent so the page background shows through.
    pub transparent: bool,
    /// Sample count used when `antialias` is on.
    pub msaa_samples: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            antialias: true,
            transparent: true,
            msaa_samples: 4,
        }
    }
}

impl RendererConfig {
    pub fn sample_count(&self) -> u32 {
        if self.antialias {
            self.msaa_samples
        } else {
            1
        }
    }
}

/// Complete description of the background scene. Every field has a default,
/// so partial TOML/JSON documents are accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub starfield: StarfieldConfig,
    pub asteroids: AsteroidConfig,
    pub lights: LightConfig,
    pub travel: TravelConfig,
    pub speed: SpeedConfig,
    pub renderer: RendererConfig,
    /// Fixed RNG seed; random placement differs on every load when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("camera field of view must be in (0, 180) degrees, got {0}")]
    FieldOfView(f32),
    #[error("camera clip planes must satisfy 0 < near < far, got near={near} far={far}")]
    ClipPlanes { near: f32, far: f32 },
    #[error("{0} bounds must be finite with min < max on every axis")]
    Bounds(&'static str),
    #[error("star size must be positive, got {0}")]
    StarSize(f32),
    #[error("starfield parallax must be finite, got {0}")]
    Parallax(f64),
    #[error("asteroid max rotation must be finite and positive, got {0}")]
    MaxRotation(f32),
    #[error("asteroid radius must be finite and positive, got {0}")]
    AsteroidRadius(f32),
    #[error("{field} must be within [0, 1], got {value}")]
    UnitRange { field: &'static str, value: f32 },
    #[error("asteroid scale range must satisfy 0 < min < max, got [{min}, {max})")]
    ScaleRange { min: f32, max: f32 },
    #[error("travel band must satisfy lower < upper, got [{lower}, {upper}]")]
    TravelBand { lower: f64, upper: f64 },
    #[error("camera start depth {0} lies outside the travel band")]
    StartDepth(f64),
    #[error("{field} speed must be finite and non-negative, got {value}")]
    Speed { field: &'static str, value: f64 },
    #[error("msaa sample count must be 1 or 4, got {0}")]
    SampleCount(u32),
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(ConfigError::FieldOfView(cam.fov_degrees));
        }
        if !(cam.near > 0.0 && cam.near < cam.far) {
            return Err(ConfigError::ClipPlanes { near: cam.near, far: cam.far });
        }

        let stars = &self.starfield;
        if !stars.bounds.is_ordered() {
            return Err(ConfigError::Bounds("starfield"));
        }
        if !(stars.size > 0.0) {
            return Err(ConfigError::StarSize(stars.size));
        }
        check_unit("starfield opacity", stars.opacity)?;
        if !stars.parallax.is_finite() {
            return Err(ConfigError::Parallax(stars.parallax));
        }

        let rocks = &self.asteroids;
        if !rocks.bounds.is_ordered() {
            return Err(ConfigError::Bounds("asteroid"));
        }
        if !(rocks.scale_min > 0.0 && rocks.scale_min < rocks.scale_max) {
            return Err(ConfigError::ScaleRange { min: rocks.scale_min, max: rocks.scale_max });
        }
        if !(rocks.max_rotation.is_finite() && rocks.max_rotation > 0.0) {
            return Err(ConfigError::MaxRotation(rocks.max_rotation));
        }
        if !(rocks.radius.is_finite() && rocks.radius > 0.0) {
            return Err(ConfigError::AsteroidRadius(rocks.radius));
        }
        check_unit("asteroid roughness", rocks.roughness)?;
        check_unit("asteroid metalness", rocks.metalness)?;

        let travel = &self.travel;
        if !(travel.lower_bound < travel.upper_bound) {
            return Err(ConfigError::TravelBand {
                lower: travel.lower_bound,
                upper: travel.upper_bound,
            });
        }
        if cam.start_depth < travel.lower_bound || cam.start_depth > travel.upper_bound {
            return Err(ConfigError::StartDepth(cam.start_depth));
        }

        check_speed("base", self.speed.base)?;
        check_speed("boost", self.speed.boost)?;

        let samples = self.renderer.msaa_samples;
        if samples != 1 && samples != 4 {
            return Err(ConfigError::SampleCount(samples));
        }
        Ok(())
    }
}

fn check_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::UnitRange { field, value })
    }
}

fn check_speed(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Speed { field, value })
    }
}
