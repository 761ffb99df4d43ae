//! Interactive browser renderer for forcemap graphs.
//!
//! Mounts a live SVG into a host container, drives the force simulation from
//! an animation-frame loop, and lets the user drag individual nodes. The
//! layout, scene mapping, and validation all come from the `forcemap` core;
//! this crate only owns the DOM.

use wasm_bindgen::prelude::*;

use forcemap::error::RenderError;

mod pointer;
mod view;

/// Initialize the WASM panic hook for readable error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Mount an interactive graph view into the container matched by `selector`,
/// using the default render configuration
#[wasm_bindgen]
pub fn mount(selector: &str, graph_json: &str) -> Result<(), JsValue> {
    view::mount_impl(selector, graph_json, None).map_err(to_js)
}

/// Mount an interactive graph view with a JSON render configuration.
///
/// Missing configuration fields fall back to their defaults.
#[wasm_bindgen]
pub fn mount_with_config(
    selector: &str,
    graph_json: &str,
    config_json: &str,
) -> Result<(), JsValue> {
    view::mount_impl(selector, graph_json, Some(config_json)).map_err(to_js)
}

fn to_js(err: RenderError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
