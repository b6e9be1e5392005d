use spacebg_core::{scene_rng, AnimationControls, FrameStep, SceneConfig, SpaceScene, Viewport};

/// Headless stand-in for the browser viewport; only the aspect ratio matters.
const VIEWPORT: Viewport = Viewport {
    width: 1920,
    height: 1080,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPlan {
    pub frames: u64,
    /// Replaces the configured base speed.
    pub speed: Option<f64>,
    /// First boosted frame and how many frames boost is held.
    pub boost: Option<(u64, u64)>,
    pub every: u64,
}

impl SimulationPlan {
    fn boosting_at(&self, frame: u64) -> bool {
        match self.boost {
            Some((start, len)) => frame >= start && frame < start.saturating_add(len),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// 1-based frame number.
    pub frame: u64,
    pub speed: f64,
    pub step: FrameStep,
}

#[derive(Debug, Default)]
pub struct SimulationReport {
    pub samples: Vec<Sample>,
    pub wraps: u64,
    pub final_depth: f64,
    pub final_offset: f64,
}

/// Step `scene` according to `plan`. Boost is switched on and off between
/// frames, the way key handlers on the page would do it.
pub fn simulate(scene: &mut SpaceScene, config: &SceneConfig, plan: &SimulationPlan) -> SimulationReport {
    let base = plan.speed.unwrap_or(config.speed.base);
    let mut controls = AnimationControls::new(base, config.speed.boost);
    let every = plan.every.max(1);
    let mut report = SimulationReport {
        final_depth: scene.camera.depth(),
        final_offset: scene.starfield.offset_z,
        ..Default::default()
    };

    for frame in 0..plan.frames {
        if plan.boosting_at(frame) {
            controls.boost();
        } else {
            controls.cruise();
        }

        let step = scene.step(&controls);
        let number = frame + 1;
        if step.wrapped {
            report.wraps += 1;
        }
        if step.wrapped || number % every == 0 || number == plan.frames {
            report.samples.push(Sample {
                frame: number,
                speed: controls.current_speed,
                step,
            });
        }
        report.final_depth = step.camera_depth;
        report.final_offset = step.starfield_offset;
    }
    report
}

pub fn run(config: SceneConfig, plan: SimulationPlan) -> anyhow::Result<()> {
    let mut rng = scene_rng(config.seed);
    let mut scene = SpaceScene::build(&config, VIEWPORT, &mut rng);
    let report = simulate(&mut scene, &config, &plan);

    println!("{:>8}  {:>8}  {:>12}  {:>12}", "frame", "speed", "depth", "offset");
    for sample in &report.samples {
        println!(
            "{:>8}  {:>8.4}  {:>12.4}  {:>12.5}{}",
            sample.frame,
            sample.speed,
            sample.step.camera_depth,
            sample.step.starfield_offset,
            if sample.step.wrapped { "  wrapped" } else { "" }
        );
    }
    println!(
        "\n{} frames, {} wrap(s), final depth {:.4}, starfield offset {:.5}",
        scene.frames(),
        report.wraps,
        report.final_depth,
        report.final_offset
    );
    Ok(())
}
