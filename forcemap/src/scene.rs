//! Mapping from graph data and simulation state to visual attributes.
//!
//! Static rules (radius, fill, stroke, tooltip) are computed once per node
//! and link at view creation. Geometry (link endpoints, node transforms) is
//! recomputed from current positions on every tick; the mapping is pure, so
//! syncing twice with unchanged positions yields identical attributes.

use crate::graph::{Node, NodeGroup, ResolvedLink};
use crate::palette::TypePalette;
use crate::simulation::SimNode;

/// Radius for path-group nodes
pub const PATH_NODE_RADIUS: f32 = 25.0;

/// Radius for ordinary nodes
pub const NODE_RADIUS: f32 = 8.0;

/// Stroke for links with value 1; any other value leaves the stroke unset
pub const LINK_STROKE: &str = "#333";

/// Opacity applied to every link
pub const LINK_OPACITY: f32 = 0.7;

/// Fill for a node: the shared pattern reference or a palette color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFill {
    Pattern,
    Color(&'static str),
}

/// Static visual attributes of a node, fixed at view creation
#[derive(Debug, Clone, PartialEq)]
pub struct NodeVisual {
    pub radius: f32,
    pub fill: NodeFill,
    /// Hover label of the form `"<name> (<id>), <type>"`
    pub tooltip: String,
}

/// Compute the static visuals for one node.
///
/// Path nodes get the large radius and the pattern fill regardless of type;
/// everything else is sized small and colored by type.
pub fn node_visual(node: &Node, palette: &mut TypePalette) -> NodeVisual {
    let (radius, fill) = match node.group {
        NodeGroup::Path => (PATH_NODE_RADIUS, NodeFill::Pattern),
        NodeGroup::Normal => (
            NODE_RADIUS,
            NodeFill::Color(palette.color_for(node.node_type.as_deref())),
        ),
    };

    NodeVisual {
        radius,
        fill,
        tooltip: format!(
            "{} ({}), {}",
            node.name,
            node.id,
            node.node_type.as_deref().unwrap_or("")
        ),
    }
}

/// Compute static visuals for a whole node collection with a fresh palette
pub fn node_visuals(nodes: &[Node]) -> Vec<NodeVisual> {
    let mut palette = TypePalette::new();
    nodes.iter().map(|n| node_visual(n, &mut palette)).collect()
}

/// Stroke color for a link weight
pub fn link_stroke(value: Option<f64>) -> Option<&'static str> {
    match value {
        Some(v) if v == 1.0 => Some(LINK_STROKE),
        _ => None,
    }
}

/// Current endpoint coordinates of a link
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkGeometry {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Endpoint coordinates for a link, read from the current node positions
pub fn link_geometry(link: &ResolvedLink, nodes: &[SimNode]) -> LinkGeometry {
    let source = &nodes[link.source];
    let target = &nodes[link.target];
    LinkGeometry {
        x1: source.x,
        y1: source.y,
        x2: target.x,
        y2: target.y,
    }
}

/// SVG transform translating a node group to its current position
pub fn node_transform(node: &SimNode) -> String {
    format!("translate({},{})", fmt_coord(node.x), fmt_coord(node.y))
}

/// Format a coordinate with at most two decimal places, trimming trailing
/// zeros so whole numbers render bare
pub fn fmt_coord(value: f32) -> String {
    let s = format!("{value:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
