//! YAML graph reader.

use std::fs;
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::graph::GraphData;
use crate::io::Reader;

/// Reader for `{ nodes, links }` graph descriptions in YAML
pub struct YamlReader;

impl YamlReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for YamlReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for YamlReader {
    fn read(&self, input: &Path) -> RenderResult<GraphData> {
        let text = fs::read_to_string(input)?;
        serde_yaml::from_str(&text).map_err(|e| RenderError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}
