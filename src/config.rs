//! Runtime Configuration
//!
//! The host page may define `window.BOM_STUDIO_CONFIG = { ... }` before the
//! wasm bundle loads. Missing or invalid overlays fall back to defaults.

use bom_core::AppConfig;
use wasm_bindgen::JsValue;

const GLOBAL_NAME: &str = "BOM_STUDIO_CONFIG";

pub fn load() -> AppConfig {
    let Some(window) = web_sys::window() else {
        return AppConfig::default();
    };
    let value = match js_sys::Reflect::get(&window, &JsValue::from_str(GLOBAL_NAME)) {
        Ok(value) if !value.is_undefined() && !value.is_null() => value,
        _ => return AppConfig::default(),
    };
    match serde_wasm_bindgen::from_value::<AppConfig>(value)
        .map_err(|e| e.to_string())
        .and_then(|c| c.checked().map_err(|e| e.user_message()))
    {
        Ok(config) => config,
        Err(e) => {
            web_sys::console::warn_1(&format!("[CONFIG] Ignoring {}: {}", GLOBAL_NAME, e).into());
            AppConfig::default()
        }
    }
}
