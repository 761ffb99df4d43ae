//! JSON graph reader.

use std::fs;
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::graph::GraphData;
use crate::io::Reader;

/// Reader for `{ nodes, links }` graph descriptions in JSON
pub struct JsonReader;

impl JsonReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for JsonReader {
    fn read(&self, input: &Path) -> RenderResult<GraphData> {
        let text = fs::read_to_string(input)?;
        serde_json::from_str(&text).map_err(|e| RenderError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn reads_a_graph_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"nodes": [{{"id": 0, "name": "A"}}], "links": []}}"#
        )
        .unwrap();

        let graph = JsonReader::new().read(file.path()).unwrap();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].name, "A");
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, "{{not json").unwrap();

        assert!(matches!(
            JsonReader::new().read(file.path()),
            Err(RenderError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            JsonReader::new().read(Path::new("/nonexistent/graph.json")),
            Err(RenderError::Io(_))
        ));
    }
}
