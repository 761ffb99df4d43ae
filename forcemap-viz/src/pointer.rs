//! Pointer hit-testing and drag bookkeeping.

use forcemap::simulation::SimNode;

/// Which node, if any, a drag is currently holding
#[derive(Debug, Clone, Copy, Default)]
pub struct DragState {
    node: Option<usize>,
}

impl DragState {
    /// Start dragging the given node
    pub fn begin(&mut self, index: usize) {
        self.node = Some(index);
    }

    /// Finish the drag, returning the node that was held
    pub fn end(&mut self) -> Option<usize> {
        self.node.take()
    }

    /// Node currently held by the drag
    pub fn node(&self) -> Option<usize> {
        self.node
    }
}

/// Find the node under the pointer, if any.
///
/// Later nodes sit on top in document order, so the last hit wins.
pub fn hit_test(nodes: &[SimNode], radii: &[f32], x: f32, y: f32) -> Option<usize> {
    let mut found = None;
    for (i, (node, radius)) in nodes.iter().zip(radii).enumerate() {
        let dx = x - node.x;
        let dy = y - node.y;
        if dx * dx + dy * dy <= radius * radius {
            found = Some(i);
        }
    }
    found
}
