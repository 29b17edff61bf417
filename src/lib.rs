//! Animated "neural network" background: drifting, pulsing nodes joined by
//! faint edges when close, rendered onto a 2D surface and paused whenever the
//! canvas is off-screen or the page is hidden.
//!
//! The simulation core ([`State`], [`Field`](scene::field::Field)) is host
//! independent and talks to its environment through [`DrawSurface`] and
//! [`FrameScheduler`]. On `wasm32` the [`web`] module binds those to a
//! `<canvas>` element and the browser's frame and visibility APIs.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app_state;
pub mod color;
pub mod config;
pub mod host;
pub mod models;
pub mod renderer;
pub mod scene;
pub mod ui_events;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app_state::{AnimationState, FieldStats, State};
pub use config::{ConfigError, FieldConfig};
pub use host::{DrawSurface, FrameScheduler, FrameToken};
pub use ui_events::FieldCommand;
pub use viewport::Viewport;

/// Canvas id the site's markup uses for the background animation.
pub const DEFAULT_CANVAS_ID: &str = "neuralCanvas";

/// Installs the platform logger. Safe to call more than once.
pub fn init_logging() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            if console_log::init_with_level(log::Level::Info).is_err() {
                log::debug!("Logger already initialized.");
            }
        } else {
            if env_logger::try_init().is_err() {
                log::debug!("Logger already initialized.");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_web() -> Result<(), JsValue> {
    init_logging();
    log::info!("WASM started: mounting particle field on '{}'.", DEFAULT_CANVAS_ID);
    web::mount(DEFAULT_CANVAS_ID, FieldConfig::default())
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// Mounts the particle field on the canvas with the given id. A missing canvas
/// is a no-op, not an error.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initNeuralField)]
pub fn init_neural_field(canvas_id: &str) -> Result<(), JsValue> {
    web::mount(canvas_id, FieldConfig::default())
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initNeuralFieldWithConfig)]
pub fn init_neural_field_with_config(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    let config = FieldConfig::from_json(config_json)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    log::info!("Received field config from JS.");

    web::mount(canvas_id, config)
        .map(|_| ())
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

/// JSON snapshot of the mounted field, or `null` if nothing is mounted.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = neuralFieldStats)]
pub fn neural_field_stats() -> Result<JsValue, JsValue> {
    match web::stats() {
        Some(stats) => serde_json::to_string(&stats)
            .map(|json| JsValue::from_str(&json))
            .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {}", e))),
        None => Ok(JsValue::NULL),
    }
}
