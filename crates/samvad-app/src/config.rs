//! Runtime configuration: a page-injected override with a build-env fallback.

use samvad_groq::ApiConfig;
use wasm_bindgen::JsValue;

const CONFIG_GLOBAL: &str = "SAMVAD_CONFIG";

/// Resolve the API configuration for this page session.
///
/// The hosting page may set `window.SAMVAD_CONFIG = { api_key: ..., ... }` —
/// the way a server brokers the credential to the client without baking it
/// into the bundle. Absent that, compile-time environment values apply.
pub fn load() -> ApiConfig {
    match injected() {
        Some(Ok(cfg)) => cfg,
        Some(Err(err)) => {
            log::warn!("ignoring malformed {CONFIG_GLOBAL}: {err}");
            ApiConfig::from_build_env()
        }
        None => ApiConfig::from_build_env(),
    }
}

fn injected() -> Option<Result<ApiConfig, String>> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)).ok()?;
    if value.is_undefined() || value.is_null() {
        return None;
    }
    Some(serde_wasm_bindgen::from_value(value).map_err(|e| e.to_string()))
}
