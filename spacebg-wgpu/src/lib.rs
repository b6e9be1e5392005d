//! spacebg wgpu renderer.
//!
//! Draws a `spacebg_core::SpaceScene` into any `wgpu` surface: a browser
//! canvas (WebGPU, or WebGL2 as fallback) or a native window.

mod backend;
mod pipelines;
mod targets;

pub use backend::SpaceRenderer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("failed to find a suitable GPU adapter")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("surface texture error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
