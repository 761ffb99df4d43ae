//! End-to-end render pipeline shared by the CLI and the dev server.

use std::path::Path;

use tracing::info;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::io::FormatRegistry;

/// Read a graph description, validate it, and write the requested format.
///
/// Validation failures surface before any layout runs or any output file is
/// created.
pub fn generate(
    input: &Path,
    output: &Path,
    format: &str,
    config: &RenderConfig,
) -> RenderResult<()> {
    let registry = FormatRegistry::with_defaults(config.clone());

    let reader = registry.reader_for_path(input)?;
    let graph = reader.read(input)?;
    graph.resolve()?;

    let writer = registry
        .writer_for_format(format)
        .ok_or_else(|| RenderError::UnsupportedFormat(format.to_string()))?;
    writer.write(&graph, output)?;

    info!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        format,
        "rendered graph"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_output_format_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("graph.json");
        std::fs::write(&input, r#"{"nodes": [], "links": []}"#).unwrap();

        let result = generate(
            &input,
            &dir.path().join("out"),
            "png",
            &RenderConfig::default(),
        );
        assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
    }

    #[test]
    fn unknown_input_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("graph.toml");
        std::fs::write(&input, "").unwrap();

        let result = generate(
            &input,
            &dir.path().join("out"),
            "svg",
            &RenderConfig::default(),
        );
        assert!(matches!(result, Err(RenderError::UnsupportedFormat(_))));
    }
}
