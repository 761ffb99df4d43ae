//! Categorical color palette for node types.

use std::collections::HashMap;

/// The classic ten-color categorical palette
pub const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Stable node-type to color assignment for the lifetime of a view.
///
/// Colors are assigned in first-seen order; the same type always maps to the
/// same color, and distinct types receive distinct colors until the palette
/// is exhausted, after which assignments wrap.
#[derive(Debug, Clone, Default)]
pub struct TypePalette {
    assigned: HashMap<String, usize>,
}

impl TypePalette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color for a node type. Nodes with no type share a single slot.
    pub fn color_for(&mut self, node_type: Option<&str>) -> &'static str {
        let key = node_type.unwrap_or("");
        let next = self.assigned.len();
        let slot = *self.assigned.entry(key.to_string()).or_insert(next);
        CATEGORY10[slot % CATEGORY10.len()]
    }

    /// Number of distinct types seen so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_type_gets_same_color() {
        let mut palette = TypePalette::new();
        let first = palette.color_for(Some("doc"));
        palette.color_for(Some("img"));
        assert_eq!(palette.color_for(Some("doc")), first);
    }

    #[test]
    fn distinct_types_get_distinct_colors() {
        let mut palette = TypePalette::new();
        let colors: Vec<_> = (0..CATEGORY10.len())
            .map(|i| palette.color_for(Some(&format!("type-{i}"))))
            .collect();

        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn missing_type_is_consistent() {
        let mut palette = TypePalette::new();
        let color = palette.color_for(None);
        palette.color_for(Some("doc"));
        assert_eq!(palette.color_for(None), color);
    }

    #[test]
    fn assignment_wraps_past_the_palette_size() {
        let mut palette = TypePalette::new();
        for i in 0..CATEGORY10.len() {
            palette.color_for(Some(&format!("type-{i}")));
        }
        assert_eq!(palette.color_for(Some("one-more")), CATEGORY10[0]);
    }

    #[test]
    fn assignment_order_is_first_seen() {
        let mut palette = TypePalette::new();
        assert_eq!(palette.color_for(Some("b")), CATEGORY10[0]);
        assert_eq!(palette.color_for(Some("a")), CATEGORY10[1]);
        assert_eq!(palette.len(), 2);
    }
}
