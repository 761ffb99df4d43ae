//! Graph description types and validation.
//!
//! A graph arrives as `{ nodes: [...], links: [...] }` where links reference
//! nodes by id. Validation resolves those references to indices and rejects
//! dangling links and duplicate ids before any layout starts.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::GraphError;

/// Group classification for a node.
///
/// Anything other than the literal `"path"` (including a missing field)
/// deserializes to `Normal` - the explicit default policy for malformed
/// input, which degrades to default styling instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeGroup {
    /// Nodes on the highlighted path, rendered with distinct size and fill
    Path,
    #[default]
    Normal,
}

fn lenient_group<'de, D>(deserializer: D) -> Result<NodeGroup, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(match value.as_deref() {
        Some("path") => NodeGroup::Path,
        _ => NodeGroup::Normal,
    })
}

/// A node in the graph description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, referenced by links
    pub id: u64,

    /// Display name
    pub name: String,

    /// Semantic type, drives the color assignment; missing types degrade to
    /// a shared default palette slot
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,

    /// Group classification (path vs ordinary)
    #[serde(default, deserialize_with = "lenient_group")]
    pub group: NodeGroup,
}

/// A link connecting two nodes by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Source node id
    pub source: u64,

    /// Target node id
    pub target: u64,

    /// Weight used for styling; only the value 1 selects the dark stroke
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// A link with endpoints resolved to indices into the node sequence.
///
/// Resolved links reference nodes by position, they do not own them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedLink {
    pub source: usize,
    pub target: usize,
    pub value: Option<f64>,
}

/// Complete graph description as supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphData {
    /// All nodes in the graph
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// All links in the graph
    #[serde(default)]
    pub links: Vec<Link>,
}

impl GraphData {
    /// Validate the graph and resolve link endpoints to node indices.
    ///
    /// Errors on duplicate node ids and on links whose source or target id
    /// is not present in the node collection.
    pub fn resolve(&self) -> Result<Vec<ResolvedLink>, GraphError> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if index.insert(node.id, i).is_some() {
                return Err(GraphError::DuplicateId { id: node.id });
            }
        }

        self.links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let lookup = |id: u64| {
                    index
                        .get(&id)
                        .copied()
                        .ok_or(GraphError::UnknownNode { index: i, id })
                };
                Ok(ResolvedLink {
                    source: lookup(link.source)?,
                    target: lookup(link.target)?,
                    value: link.value,
                })
            })
            .collect()
    }
}
