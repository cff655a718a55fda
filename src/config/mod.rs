use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

const DEFAULT_INDENT_PX: u32 = 20;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    /// Horizontal indentation per tree depth.
    pub indent_px: u32,
    /// Whether the seeded items start expanded.
    pub initial_open: bool,
}

impl EnvConfig {
    pub fn new() -> Self {
        // Outside a browser there is no `window`; fall back to defaults.
        if !cfg!(target_arch = "wasm32") {
            return Self::defaults();
        }

        match web_sys::window().and_then(|w| w.get("ENV")) {
            Some(env) => Self::from_env_object(&env),
            None => Self::defaults(),
        }
    }

    pub fn defaults() -> Self {
        Self {
            indent_px: DEFAULT_INDENT_PX,
            initial_open: true,
        }
    }

    /// Read overrides from a `window.ENV`-style object.
    ///
    /// Both `INDENT_PX` (README style) and `indent_px` are accepted; the
    /// upper-case key wins when both are set.
    pub fn from_env_object(env: &JsValue) -> Self {
        let mut cfg = Self::defaults();
        if env.is_undefined() || !env.is_object() {
            return cfg;
        }

        if let Some(px) = read_key(env, "INDENT_PX", "indent_px").and_then(|v| v.as_f64()) {
            if px.is_finite() && px >= 0.0 {
                cfg.indent_px = px.round() as u32;
            }
        }

        if let Some(open) = read_key(env, "INITIAL_OPEN", "initial_open").and_then(|v| v.as_bool())
        {
            cfg.initial_open = open;
        }

        cfg
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_key(env: &JsValue, upper: &str, lower: &str) -> Option<JsValue> {
    [upper, lower].into_iter().find_map(|k| {
        js_sys::Reflect::get(env, &k.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    })
}
