//! spacebg WASM runtime
//!
//! Renders an endlessly scrolling starfield with tumbling asteroids onto a
//! page's `<canvas>` and hands JavaScript a `SpaceBackground` handle for
//! speed control (boost/cruise) and starting/stopping the animation.

#[cfg(target_arch = "wasm32")]
mod app;
mod config;
#[cfg(target_arch = "wasm32")]
mod frame_loop;
#[cfg(target_arch = "wasm32")]
mod viewport;

pub use config::{parse_config, LoadConfigError};

#[cfg(target_arch = "wasm32")]
pub use app::SpaceBackground;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Runs once when the WASM module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("spacebg runtime initialized");
}

/// Create the background on the canvas with id `canvas_id` using the default scene.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_space_background(canvas_id: String) -> Result<SpaceBackground, JsValue> {
    SpaceBackground::create(&canvas_id, spacebg_core::SceneConfig::default()).await
}

/// Like `create_space_background`, with a JSON scene config. Omitted fields
/// keep their defaults.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn create_space_background_with_config(
    canvas_id: String,
    config_json: String,
) -> Result<SpaceBackground, JsValue> {
    let config = parse_config(&config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    SpaceBackground::create(&canvas_id, config).await
}
