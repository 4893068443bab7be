//! Page layout snapshots
//!
//! This module pulls the rendered layout of a web page out of a browser tab
//! in a single script evaluation. It includes:
//! - ElementNode: one element with its box, computed style and form state
//! - PageSnapshot: the flattened, document-ordered element list
//! - BoundingBox / ComputedStyle: the geometry and visibility inputs to hit-testing

pub mod element;
pub mod snapshot;

pub use element::{BoundingBox, ComputedStyle, ElementNode, FormProperties};
pub use snapshot::{PageSnapshot, Viewport};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_export() {
        let element = ElementNode::new("div");
        assert_eq!(element.tag_name, "div");
    }

    #[test]
    fn test_page_snapshot_export() {
        let snapshot = PageSnapshot::default();
        assert!(snapshot.is_empty());
    }
}
