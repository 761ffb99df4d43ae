//! Reader/Writer traits and format dispatch.
//!
//! Readers parse a graph description from an input format, selected by file
//! extension. Writers produce an output format, selected by format id.

use std::path::Path;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::graph::GraphData;
use crate::html_writer::HtmlWriter;
use crate::json_reader::JsonReader;
use crate::layout_writer::LayoutWriter;
use crate::svg_writer::SvgWriter;
use crate::yaml_reader::YamlReader;

/// A reader parses an input format into a `GraphData`
pub trait Reader {
    /// Parse the input file into a graph description
    fn read(&self, input: &Path) -> RenderResult<GraphData>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer lays out a graph and produces one output format.
///
/// `output` is a directory; each writer names its own file inside it.
pub trait Writer {
    /// Validate, lay out, and write the graph under the output directory
    fn write(&self, graph: &GraphData, output: &Path) -> RenderResult<()>;

    /// Identifier for this output format (e.g., "svg", "html", "json")
    fn format_id(&self) -> &str;
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader>>,
    writers: Vec<Box<dyn Writer>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Create a registry with all default readers and writers registered.
    ///
    /// Readers: `JsonReader` (json), `YamlReader` (yaml, yml).
    /// Writers: `SvgWriter` (svg), `HtmlWriter` (html), `LayoutWriter` (json).
    pub fn with_defaults(config: RenderConfig) -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(JsonReader::new()));
        registry.register_reader(Box::new(YamlReader::new()));
        registry.register_writer(Box::new(SvgWriter::new(config.clone())));
        registry.register_writer(Box::new(HtmlWriter::new(config.clone())));
        registry.register_writer(Box::new(LayoutWriter::new(config)));
        registry
    }

    /// Register a reader
    pub fn register_reader(&mut self, reader: Box<dyn Reader>) {
        self.readers.push(reader);
    }

    /// Register a writer
    pub fn register_writer(&mut self, writer: Box<dyn Writer>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref())
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref())
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> RenderResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| RenderError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| RenderError::UnsupportedFormat(ext.to_string()))
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // Mock reader for testing
    struct MockReader {
        extensions: Vec<&'static str>,
    }

    impl Reader for MockReader {
        fn read(&self, _input: &Path) -> RenderResult<GraphData> {
            Ok(GraphData::default())
        }

        fn supported_extensions(&self) -> &[&str] {
            &self.extensions
        }
    }

    // Mock writer for testing
    struct MockWriter {
        format: &'static str,
    }

    impl Writer for MockWriter {
        fn write(&self, _graph: &GraphData, _output: &Path) -> RenderResult<()> {
            Ok(())
        }

        fn format_id(&self) -> &str {
            self.format
        }
    }

    #[test]
    fn reader_supports_extension_case_insensitive() {
        let reader = MockReader {
            extensions: vec!["yaml", "yml"],
        };
        assert!(reader.supports_extension("yaml"));
        assert!(reader.supports_extension("YAML"));
        assert!(reader.supports_extension("yml"));
        assert!(!reader.supports_extension("toml"));
    }

    #[test]
    fn registry_finds_reader_by_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["json"],
        }));

        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_none());
    }

    #[test]
    fn registry_finds_writer_by_format() {
        let mut registry = FormatRegistry::new();
        registry.register_writer(Box::new(MockWriter { format: "svg" }));

        assert!(registry.writer_for_format("svg").is_some());
        assert!(registry.writer_for_format("SVG").is_some()); // case insensitive
        assert!(registry.writer_for_format("html").is_none());
    }

    #[test]
    fn registry_reader_for_path_extracts_extension() {
        let mut registry = FormatRegistry::new();
        registry.register_reader(Box::new(MockReader {
            extensions: vec!["json"],
        }));

        let path = PathBuf::from("/some/path/graph.json");
        assert!(registry.reader_for_path(&path).is_ok());

        let unknown = PathBuf::from("/some/path/graph.xyz");
        assert!(matches!(
            registry.reader_for_path(&unknown),
            Err(RenderError::UnsupportedFormat(_))
        ));

        let bare = PathBuf::from("/some/path/noextension");
        assert!(matches!(
            registry.reader_for_path(&bare),
            Err(RenderError::UnknownExtension(_))
        ));
    }

    #[test]
    fn with_defaults_registers_readers() {
        let registry = FormatRegistry::with_defaults(RenderConfig::default());

        assert!(registry.reader_for_extension("json").is_some());
        assert!(registry.reader_for_extension("yaml").is_some());
        assert!(registry.reader_for_extension("yml").is_some());
        assert!(registry.reader_for_extension("ttl").is_none());
    }

    #[test]
    fn with_defaults_registers_writers() {
        let registry = FormatRegistry::with_defaults(RenderConfig::default());

        assert!(registry.writer_for_format("svg").is_some());
        assert!(registry.writer_for_format("html").is_some());
        assert!(registry.writer_for_format("json").is_some());
        assert!(registry.writer_for_format("png").is_none());
    }
}
