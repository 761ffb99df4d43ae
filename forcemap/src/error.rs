//! Error types shared across the rendering pipeline.

use thiserror::Error;

/// Errors raised while validating a graph description.
///
/// These are surfaced before any layout or output happens; an invalid graph
/// never produces a partial render.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A link's source or target id does not exist in the node collection
    #[error("link {index} references unknown node id {id}")]
    UnknownNode { index: usize, id: u64 },

    /// Two nodes share the same id
    #[error("duplicate node id {id}")]
    DuplicateId { id: u64 },
}

/// Errors that can occur while reading, laying out, or writing a graph
#[derive(Error, Debug)]
pub enum RenderError {
    /// The output format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The input file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// The graph description failed validation
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),

    /// The mount container was not found in the host document
    #[error("container not found for selector: {0}")]
    Mount(String),

    /// A rendering/writing error occurred
    #[error("write error: {0}")]
    Write(String),
}

/// Result type for render pipeline operations
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_error_display_names_the_offender() {
        let err = GraphError::UnknownNode { index: 3, id: 5 };
        assert_eq!(err.to_string(), "link 3 references unknown node id 5");

        let err = GraphError::DuplicateId { id: 7 };
        assert_eq!(err.to_string(), "duplicate node id 7");
    }

    #[test]
    fn render_error_wraps_graph_error() {
        let err = RenderError::from(GraphError::DuplicateId { id: 1 });
        assert_eq!(err.to_string(), "invalid graph: duplicate node id 1");
    }

    #[test]
    fn mount_error_names_the_selector() {
        let err = RenderError::Mount(".graph-result".to_string());
        assert_eq!(
            err.to_string(),
            "container not found for selector: .graph-result"
        );
    }
}
