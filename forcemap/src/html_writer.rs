//! HTML viewer writer.
//!
//! Produces a page with the graph description and render configuration
//! embedded as JSON, plus a module script that loads the `forcemap-viz`
//! WASM bundle and mounts the interactive view into `.graph-result`.
//! The bundle itself (built with wasm-pack) is served from `pkg/` next to
//! the page; it is not embedded here.

use std::fs;
use std::path::Path;

use askama::Template;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::graph::GraphData;
use crate::io::Writer;

#[derive(Template)]
#[template(path = "viewer.html")]
struct ViewerTemplate<'a> {
    title: &'a str,
    graph_json: &'a str,
    config_json: &'a str,
    node_count: usize,
    link_count: usize,
}

/// Writer for the interactive HTML viewer page
pub struct HtmlWriter {
    config: RenderConfig,
    title: String,
}

impl HtmlWriter {
    /// Create a new HTML writer with the default page title
    pub fn new(config: RenderConfig) -> Self {
        Self {
            config,
            title: "Force-directed graph".to_string(),
        }
    }

    /// Override the page title
    pub fn with_title(config: RenderConfig, title: impl Into<String>) -> Self {
        Self {
            config,
            title: title.into(),
        }
    }

    /// Validate the graph and render the viewer page as a string
    pub fn render(&self, graph: &GraphData) -> RenderResult<String> {
        graph.resolve()?;

        let graph_json =
            serde_json::to_string(graph).map_err(|e| RenderError::Write(e.to_string()))?;
        let config_json =
            serde_json::to_string(&self.config).map_err(|e| RenderError::Write(e.to_string()))?;

        let template = ViewerTemplate {
            title: &self.title,
            graph_json: &graph_json,
            config_json: &config_json,
            node_count: graph.nodes.len(),
            link_count: graph.links.len(),
        };

        template.render().map_err(|e| RenderError::Write(e.to_string()))
    }
}

impl Writer for HtmlWriter {
    fn write(&self, graph: &GraphData, output: &Path) -> RenderResult<()> {
        let html = self.render(graph)?;
        fs::create_dir_all(output)?;
        fs::write(output.join("index.html"), html)?;
        Ok(())
    }

    fn format_id(&self) -> &str {
        "html"
    }
}
