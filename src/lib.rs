#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Browser entry point: boots the Inkport session in the page's canvas.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    game_core::run()
        .map_err(|e| JsValue::from_str(&format!("Inkport failed to start: {:?}", e)))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn start() {}
