use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "spacebg",
    about = "Developer tools for the spacebg starfield background",
    version
)]
pub struct Cli {
    /// Scene config to use instead of the nearest spacebg.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a spacebg.toml with every default value into the workspace root
    Init {
        /// Overwrite an existing spacebg.toml
        #[arg(long)]
        force: bool,
    },
    /// Build the WASM package with wasm-pack
    Build {
        /// Unoptimized debug build
        #[arg(long)]
        dev: bool,
    },
    /// Step the scene headlessly and print the camera track
    Simulate {
        /// Number of frames to step
        #[arg(long, default_value_t = 600)]
        frames: u64,
        /// Override the cruise speed (depth units per frame)
        #[arg(long)]
        speed: Option<f64>,
        /// Frame at which boost is engaged
        #[arg(long, requires = "boost_frames")]
        boost_start: Option<u64>,
        /// How many frames boost is held
        #[arg(long, requires = "boost_start")]
        boost_frames: Option<u64>,
        /// Print every Nth frame (wrap frames are always printed)
        #[arg(long, default_value_t = 60)]
        every: u64,
    },
    /// Build the scene and print what it contains
    Inspect,
}
