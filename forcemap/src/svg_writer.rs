//! Standalone SVG writer.
//!
//! Runs the force layout to convergence and writes the converged scene as a
//! static SVG document: arrowhead and pattern defs, one line per link, one
//! group (circle + title) per node.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::config::RenderConfig;
use crate::error::RenderResult;
use crate::graph::{GraphData, ResolvedLink};
use crate::io::Writer;
use crate::scene::{self, NodeFill, fmt_coord};
use crate::simulation::{CpuSimulation, ForceLayout, SimNode};

/// Tile placement of the pattern image, matching the marker-relative
/// geometry the path-node circle expects
const PATTERN_IMAGE_X: f32 = -8.0;
const PATTERN_IMAGE_Y: f32 = -25.0;
const PATTERN_IMAGE_SIZE: f32 = 100.0;

/// Writer that outputs the laid-out graph as a standalone SVG document
pub struct SvgWriter {
    config: RenderConfig,
}

impl SvgWriter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Validate the graph, run the layout to convergence, and render the
    /// SVG document as a string
    pub fn render(&self, graph: &GraphData) -> RenderResult<String> {
        let links = graph.resolve()?;
        let mut sim = CpuSimulation::new(graph.nodes.len(), links.clone(), &self.config);
        sim.run_to_convergence(self.config.max_ticks);
        Ok(self.document(graph, &links, sim.nodes()))
    }

    fn document(&self, graph: &GraphData, links: &[ResolvedLink], nodes: &[SimNode]) -> String {
        let c = &self.config;
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}">"#,
            fmt_coord(c.width),
            fmt_coord(c.height),
        );

        svg.push_str("  <defs>\n");
        let _ = writeln!(
            svg,
            r#"    <marker id="arrow" viewBox="{}" refX="{}" markerWidth="{}" markerHeight="{}" orient="auto">"#,
            escape_attr(&c.arrowhead.view_box),
            fmt_coord(c.arrowhead.ref_x),
            fmt_coord(c.arrowhead.width),
            fmt_coord(c.arrowhead.height),
        );
        let _ = writeln!(svg, r#"      <path d="{}"/>"#, escape_attr(&c.arrowhead.path));
        svg.push_str("    </marker>\n");
        svg.push_str(r#"    <pattern id="path-pattern" width="1" height="1" x="0" y="0">"#);
        svg.push('\n');
        let _ = writeln!(
            svg,
            r#"      <image x="{}" y="{}" width="{}" height="{}" xlink:href="{}"/>"#,
            fmt_coord(PATTERN_IMAGE_X),
            fmt_coord(PATTERN_IMAGE_Y),
            fmt_coord(PATTERN_IMAGE_SIZE),
            fmt_coord(PATTERN_IMAGE_SIZE),
            escape_attr(&c.pattern_href),
        );
        svg.push_str("    </pattern>\n");
        svg.push_str("  </defs>\n");

        for link in links {
            let geometry = scene::link_geometry(link, nodes);
            let stroke = scene::link_stroke(link.value)
                .map(|s| format!(r#" stroke="{s}""#))
                .unwrap_or_default();
            let _ = writeln!(
                svg,
                r#"  <line class="link" x1="{}" y1="{}" x2="{}" y2="{}"{} opacity="{}" marker-end="url(#arrow)"/>"#,
                fmt_coord(geometry.x1),
                fmt_coord(geometry.y1),
                fmt_coord(geometry.x2),
                fmt_coord(geometry.y2),
                stroke,
                fmt_coord(scene::LINK_OPACITY),
            );
        }

        for (visual, position) in scene::node_visuals(&graph.nodes).iter().zip(nodes) {
            let fill = match visual.fill {
                NodeFill::Pattern => "url(#path-pattern)".to_string(),
                NodeFill::Color(color) => color.to_string(),
            };
            let _ = writeln!(
                svg,
                r#"  <g class="node" transform="{}">"#,
                scene::node_transform(position)
            );
            let _ = writeln!(
                svg,
                r#"    <circle r="{}" fill="{}"/>"#,
                fmt_coord(visual.radius),
                fill,
            );
            let _ = writeln!(svg, "    <title>{}</title>", escape_text(&visual.tooltip));
            svg.push_str("  </g>\n");
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl Writer for SvgWriter {
    fn write(&self, graph: &GraphData, output: &Path) -> RenderResult<()> {
        let svg = self.render(graph)?;
        fs::create_dir_all(output)?;
        fs::write(output.join("graph.svg"), svg)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "svg"
    }
}

/// Escape text content for element bodies
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for attribute values
fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}
