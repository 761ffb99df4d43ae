//! Laid-out graph writer.
//!
//! Emits the input graph as JSON with the converged node positions attached,
//! for downstream tooling that wants coordinates without the SVG.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::graph::{GraphData, Link, Node};
use crate::io::Writer;
use crate::simulation::{CpuSimulation, ForceLayout};

#[derive(Debug, Serialize)]
struct PlacedNode<'a> {
    #[serde(flatten)]
    node: &'a Node,
    x: f32,
    y: f32,
}

#[derive(Debug, Serialize)]
struct Layout<'a> {
    nodes: Vec<PlacedNode<'a>>,
    links: &'a [Link],
}

/// Writer that outputs the graph plus converged positions as JSON
pub struct LayoutWriter {
    config: RenderConfig,
}

impl LayoutWriter {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Validate, lay out, and serialize the placed graph
    pub fn render(&self, graph: &GraphData) -> RenderResult<String> {
        let links = graph.resolve()?;
        let mut sim = CpuSimulation::new(graph.nodes.len(), links, &self.config);
        sim.run_to_convergence(self.config.max_ticks);

        let layout = Layout {
            nodes: graph
                .nodes
                .iter()
                .zip(sim.nodes())
                .map(|(node, position)| PlacedNode {
                    node,
                    x: position.x,
                    y: position.y,
                })
                .collect(),
            links: &graph.links,
        };

        serde_json::to_string_pretty(&layout).map_err(|e| RenderError::Write(e.to_string()))
    }
}

impl Writer for LayoutWriter {
    fn write(&self, graph: &GraphData, output: &Path) -> RenderResult<()> {
        let json = self.render(graph)?;
        fs::create_dir_all(output)?;
        fs::write(output.join("graph.json"), json)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "json"
    }
}
