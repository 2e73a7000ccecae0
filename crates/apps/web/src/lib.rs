//! Browser host for the portfolio backgrounds.
//!
//! Exposes two handles to JavaScript, [`NeuralBackground`] and
//! [`TerrainBackground`]. Each is mounted on a canvas, then started and
//! stopped by the page; all scene logic lives in the `scene` crate.

use console_error_panic_hook::set_once;
use wasm_bindgen::prelude::*;

mod canvas;
mod facts;
mod lifecycle;
mod neural;
mod terrain;

pub use facts::DEFAULT_FACTS;
pub use neural::NeuralBackground;
pub use terrain::TerrainBackground;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

/// Per-page-load seed from the wall clock and `Math.random`.
pub(crate) fn session_seed() -> u64 {
    mix_seed(js_sys::Date::now(), js_sys::Math::random())
}

pub(crate) fn mix_seed(now_ms: f64, noise: f64) -> u64 {
    let clock = now_ms.max(0.0) as u64;
    let noise = (noise.clamp(0.0, 1.0) * u32::MAX as f64) as u64;
    clock.rotate_left(17) ^ noise.wrapping_mul(0x9E37_79B9_7F4A_7C15)
}
