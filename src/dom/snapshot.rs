use crate::dom::element::ElementNode;
use crate::error::{AssistantError, Result};
use headless_chrome::Tab;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Size of the layout viewport when the snapshot was taken
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Flattened, document-ordered layout snapshot of a page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PageSnapshot {
    /// `window.location.href` at snapshot time
    #[serde(default)]
    pub url: String,

    /// `document.title`
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub viewport: Viewport,

    /// Every element of the document, parents before children
    #[serde(default)]
    pub elements: Vec<ElementNode>,
}

impl PageSnapshot {
    /// Create a snapshot from already-collected elements
    pub fn new(url: impl Into<String>, elements: Vec<ElementNode>) -> Self {
        Self {
            url: url.into(),
            title: String::new(),
            viewport: Viewport::default(),
            elements,
        }
    }

    /// Capture the layout of the page loaded in a browser tab
    pub fn from_tab(tab: &Arc<Tab>) -> Result<Self> {
        let js_code = include_str!("snapshot_page.js");

        let result = tab
            .evaluate(js_code, false)
            .map_err(|e| AssistantError::SnapshotFailed(format!("Failed to execute snapshot script: {}", e)))?;

        let json_value = result
            .value
            .ok_or_else(|| AssistantError::SnapshotFailed("No value returned from snapshot script".to_string()))?;

        // The script returns a JSON string rather than an object to avoid CDP's
        // object preview truncation
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| AssistantError::SnapshotFailed(format!("Failed to get JSON string: {}", e)))?;

        let snapshot = Self::from_json(&json_str)?;
        log::debug!(
            "Captured {} elements from {} ({}x{})",
            snapshot.len(),
            snapshot.url,
            snapshot.viewport.width,
            snapshot.viewport.height
        );
        Ok(snapshot)
    }

    /// Decode a snapshot produced by the page-side script
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| AssistantError::SnapshotFailed(format!("Failed to parse snapshot JSON: {}", e)))
    }

    /// Serialize the snapshot to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AssistantError::SnapshotFailed(format!("Failed to serialize snapshot to JSON: {}", e)))
    }

    /// Append an element and return its index
    pub fn push(&mut self, element: ElementNode) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&ElementNode> {
        self.elements.get(index)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterate over `(index, element)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ElementNode)> {
        self.elements.iter().enumerate()
    }

    /// Walk from an element up through its ancestors (the element itself first)
    pub fn ancestors(&self, index: usize) -> Ancestors<'_> {
        Ancestors {
            snapshot: self,
            next: Some(index),
            remaining: self.elements.len(),
        }
    }

    /// Nearest inclusive ancestor with the given tag, like `Element.closest(tag)`
    pub fn closest(&self, index: usize, tag: &str) -> Option<(usize, &ElementNode)> {
        self.ancestors(index).find(|(_, el)| el.is_tag(tag))
    }

    /// First `<label for="id">`, like `querySelector('label[for="id"]')`
    pub fn label_for(&self, id: &str) -> Option<(usize, &ElementNode)> {
        self.iter()
            .find(|(_, el)| el.is_tag("label") && el.get_attribute("for").map(String::as_str) == Some(id))
    }

    /// Count elements that are not part of the assistant overlay
    pub fn count_page_elements(&self) -> usize {
        self.elements.iter().filter(|el| !el.is_widget_chrome).count()
    }
}

/// Iterator returned by [`PageSnapshot::ancestors`]
pub struct Ancestors<'a> {
    snapshot: &'a PageSnapshot,
    next: Option<usize>,
    // Bounds the walk so a malformed parent cycle cannot loop forever
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (usize, &'a ElementNode);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.next?;
        let element = self.snapshot.elements.get(index)?;
        self.remaining -= 1;
        self.next = element.parent;
        Some((index, element))
    }
}
