mod cli;
mod commands;
mod project;

use clap::Parser;

use cli::{Cli, Command};
use commands::simulate_cmd::SimulationPlan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init { force } => {
            let ctx = project::detect_workspace()?;
            commands::init_cmd::run(force, ctx)
        }
        Command::Build { dev } => {
            let ctx = project::detect_workspace()?;
            commands::build_cmd::run(dev, ctx).await
        }
        Command::Simulate {
            frames,
            speed,
            boost_start,
            boost_frames,
            every,
        } => {
            let config = project::resolve_config(cli.config.as_deref(), &cwd)?;
            if let Some(speed) = speed {
                if !speed.is_finite() || speed < 0.0 {
                    anyhow::bail!("--speed must be finite and non-negative, got {speed}");
                }
            }
            let plan = SimulationPlan {
                frames,
                speed,
                boost: boost_start.zip(boost_frames),
                every,
            };
            commands::simulate_cmd::run(config, plan)
        }
        Command::Inspect => {
            let config = project::resolve_config(cli.config.as_deref(), &cwd)?;
            commands::inspect_cmd::run(config)
        }
    }
}
