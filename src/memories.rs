use crate::constants::MEMORIES_GLOBAL;
use resonance_core::PhotoMemory;
use wasm_bindgen::JsValue;
use web_sys as web;

/// Read the page-provided memory list. Missing or malformed data yields an
/// empty corridor rather than an error.
pub fn load_from_page() -> Vec<PhotoMemory> {
    let Some(window) = web::window() else {
        return Vec::new();
    };
    let raw = match js_sys::Reflect::get(&window, &JsValue::from_str(MEMORIES_GLOBAL)) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => {
            log::info!("[memories] window.{} not set", MEMORIES_GLOBAL);
            return Vec::new();
        }
    };
    match raw.into_serde::<Vec<PhotoMemory>>() {
        Ok(list) => {
            log::info!("[memories] loaded {}", list.len());
            list
        }
        Err(e) => {
            log::warn!("[memories] malformed {}: {}", MEMORIES_GLOBAL, e);
            Vec::new()
        }
    }
}
