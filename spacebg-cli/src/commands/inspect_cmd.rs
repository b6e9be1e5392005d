use glam::Vec3;
use spacebg_core::{scene_rng, SceneConfig, SpaceScene, Viewport};

/// Per-axis min/max of a point set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min: Vec3,
    pub max: Vec3,
}

impl Extent {
    pub fn of(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(Extent { min: p, max: p }),
            Some(e) => Some(Extent {
                min: e.min.min(p),
                max: e.max.max(p),
            }),
        })
    }
}

/// Observed min/max of a scalar.
pub fn range(values: impl IntoIterator<Item = f32>) -> Option<(f32, f32)> {
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn run(config: SceneConfig) -> anyhow::Result<()> {
    let mut rng = scene_rng(config.seed);
    let scene = SpaceScene::build(&config, Viewport::new(1920, 1080), &mut rng);

    let cam = &scene.camera;
    println!("Camera");
    println!(
        "  fov {}°, near {}, far {}, depth {}",
        cam.fov_degrees,
        cam.near,
        cam.far,
        cam.depth()
    );
    println!(
        "  travel band [{}, {}]",
        config.travel.lower_bound, config.travel.upper_bound
    );

    let stars = &scene.starfield;
    println!("\nStarfield");
    println!(
        "  {} points, size {}, opacity {}, color #{:06x}",
        stars.len(),
        stars.material.size,
        stars.material.opacity,
        stars.material.color.0
    );
    if let Some(e) = Extent::of(stars.positions.iter().copied()) {
        println!("  observed extent {} .. {}", fmt_vec(e.min), fmt_vec(e.max));
    }

    let rocks = &scene.asteroids;
    println!("\nAsteroids");
    println!(
        "  {} instances of one {}-vertex mesh, color #{:06x}, roughness {}, metalness {}",
        rocks.len(),
        rocks.geometry.vertex_count(),
        rocks.material.color.0,
        rocks.material.roughness,
        rocks.material.metalness
    );
    if let Some(e) = Extent::of(rocks.instances.iter().map(|a| a.position)) {
        println!("  observed extent {} .. {}", fmt_vec(e.min), fmt_vec(e.max));
    }
    if let Some((lo, hi)) = range(rocks.instances.iter().map(|a| a.scale)) {
        println!("  scale {lo:.3} .. {hi:.3}");
    }
    let rotations = rocks
        .instances
        .iter()
        .flat_map(|a| a.rotation.to_array());
    if let Some((lo, hi)) = range(rotations) {
        println!("  rotation {lo:.3} .. {hi:.3} rad");
    }
    println!(
        "  {} of {} inside the starting view",
        rocks.visible_instances(&scene.frustum()).len(),
        rocks.len()
    );

    let lights = &scene.lights;
    println!("\nLights");
    println!(
        "  ambient #{:06x} x {}",
        lights.ambient.color.0, lights.ambient.intensity
    );
    println!(
        "  directional #{:06x} x {} from {} toward {}",
        lights.directional.color.0,
        lights.directional.intensity,
        fmt_vec(lights.directional.position),
        fmt_vec(lights.directional.target)
    );
    Ok(())
}

fn fmt_vec(v: Vec3) -> String {
    format!("({:.2}, {:.2}, {:.2})", v.x, v.y, v.z)
}
