//! Render configuration.
//!
//! Everything the original hard-coded is exposed here: canvas dimensions,
//! physics parameters, arrowhead geometry, and the pattern asset reference.

use serde::{Deserialize, Serialize};

/// Arrowhead marker geometry, written verbatim into the SVG `<marker>` element
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowheadConfig {
    pub view_box: String,
    pub ref_x: f32,
    pub width: f32,
    pub height: f32,
    pub path: String,
}

impl Default for ArrowheadConfig {
    fn default() -> Self {
        Self {
            view_box: "0 -5 10 10".to_string(),
            ref_x: 23.0,
            width: 7.0,
            height: 7.0,
            path: "M0,-4L10,0L0,4Z".to_string(),
        }
    }
}

/// Configuration for a single rendered view.
///
/// The dimensions and color assignment are fixed for the lifetime of the
/// view; only node positions change after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width
    pub width: f32,

    /// Canvas height
    pub height: f32,

    /// Margin nodes are clamped inside, on every edge of the canvas
    pub margin: f32,

    /// Centering pull strength
    pub gravity: f32,

    /// Target rest distance for linked nodes
    pub link_distance: f32,

    /// Charge strength; negative values repel
    pub charge: f32,

    /// Asset reference for the path-node fill pattern
    pub pattern_href: String,

    /// Arrowhead marker geometry
    pub arrowhead: ArrowheadConfig,

    /// Tick budget for static rendering; convergence usually happens sooner
    pub max_ticks: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 500.0,
            height: 300.0,
            margin: 15.0,
            gravity: 0.15,
            link_distance: 70.0,
            charge: -100.0,
            pattern_href: "assets/path-node.png".to_string(),
            arrowhead: ArrowheadConfig::default(),
            max_ticks: 500,
        }
    }
}

impl RenderConfig {
    /// Center of the canvas, the target of the gravity force
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}
