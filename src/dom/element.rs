use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tags that never carry readable page content
pub const NON_CONTENT_TAGS: [&str; 6] = ["style", "script", "noscript", "meta", "link", "head"];

/// Tags captured as form fields
pub const FORM_FIELD_TAGS: [&str; 4] = ["input", "select", "textarea", "button"];

/// One element of a page snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    /// Lower-cased HTML tag name (e.g., "div", "pre", "input")
    pub tag_name: String,

    /// Element attributes (e.g., id, class, for, etc.)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// The element's own text nodes, trimmed and joined by a single space
    #[serde(default)]
    pub direct_text: String,

    /// Full `textContent` of the element
    #[serde(default)]
    pub text_content: String,

    /// Number of child elements (text nodes excluded)
    #[serde(default)]
    pub child_count: usize,

    /// Index of the parent element in the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,

    /// Viewport-relative `getBoundingClientRect()`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,

    /// Computed style properties relevant to visibility
    #[serde(default)]
    pub style: ComputedStyle,

    /// Form control properties, present for input/select/textarea/button
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<FormProperties>,

    /// Element belongs to the assistant's own overlay
    #[serde(default)]
    pub is_widget_chrome: bool,

    /// Set when the page-side reader threw while reading this element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Viewport-relative box of an element, as `getBoundingClientRect()` reports it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// The slice of `getComputedStyle` the extractor looks at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComputedStyle {
    pub display: String,
    pub visibility: String,
}

/// Live properties of a form control
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormProperties {
    #[serde(default)]
    pub name: String,

    /// The control's `type` property ("text", "select-one", "submit", ...)
    #[serde(default, rename = "type")]
    pub input_type: String,

    #[serde(default)]
    pub placeholder: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub value: String,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            display: "block".to_string(),
            visibility: "visible".to_string(),
        }
    }
}

impl ComputedStyle {
    pub fn new(display: impl Into<String>, visibility: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            visibility: visibility.into(),
        }
    }

    /// `display:none` and `visibility:hidden` both hide an element
    pub fn is_hidden(&self) -> bool {
        self.display == "none" || self.visibility == "hidden"
    }
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into().to_ascii_lowercase(),
            attributes: HashMap::new(),
            direct_text: String::new(),
            text_content: String::new(),
            child_count: 0,
            parent: None,
            bounding_box: None,
            style: ComputedStyle::default(),
            form: None,
            is_widget_chrome: false,
            error: None,
        }
    }


    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: set text for a leaf element (direct text and text content)
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.direct_text = text.trim().to_string();
        self.text_content = text;
        self
    }

    /// Builder method: set only the element's own text nodes
    pub fn with_direct_text(mut self, text: impl Into<String>) -> Self {
        self.direct_text = text.into();
        self
    }

    /// Builder method: set the full text content
    pub fn with_text_content(mut self, text: impl Into<String>) -> Self {
        self.text_content = text.into();
        self
    }

    /// Builder method: set the parent index
    pub fn with_parent(mut self, parent: usize) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Builder method: set the child element count
    pub fn with_child_count(mut self, count: usize) -> Self {
        self.child_count = count;
        self
    }

    /// Builder method: set bounding box
    pub fn with_bounding_box(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.bounding_box = Some(BoundingBox { x, y, width, height });
        self
    }

    /// Builder method: set computed style
    pub fn with_style(mut self, display: impl Into<String>, visibility: impl Into<String>) -> Self {
        self.style = ComputedStyle::new(display, visibility);
        self
    }

    /// Builder method: set form control properties
    pub fn with_form(mut self, form: FormProperties) -> Self {
        self.form = Some(form);
        self
    }

    /// Builder method: mark as part of the assistant overlay
    pub fn as_widget_chrome(mut self) -> Self {
        self.is_widget_chrome = true;
        self
    }

    /// Builder method: record a page-side read error
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Raw `class` attribute, empty when absent
    pub fn class_name(&self) -> &str {
        self.attributes.get("class").map(String::as_str).unwrap_or("")
    }


    /// Get element ID
    pub fn id(&self) -> Option<&String> {
        self.attributes.get("id").filter(|id| !id.is_empty())
    }

    /// Check if element is a specific tag
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag_name.eq_ignore_ascii_case(tag)
    }

    /// Element has no child elements
    pub fn is_leaf(&self) -> bool {
        self.child_count == 0
    }

    /// style/script/noscript/meta/link/head
    pub fn is_non_content(&self) -> bool {
        NON_CONTENT_TAGS.iter().any(|tag| self.is_tag(tag))
    }

    /// input/select/textarea/button
    pub fn is_form_field(&self) -> bool {
        FORM_FIELD_TAGS.iter().any(|tag| self.is_tag(tag))
    }

    /// Rendered with a non-zero box
    pub fn has_area(&self) -> bool {
        self.bounding_box.is_some_and(|b| b.is_visible())
    }

    /// Text to consider for classification: the full text of a non-empty leaf,
    /// otherwise the element's own text nodes
    pub fn readable_text(&self) -> &str {
        let full = self.text_content.trim();
        if self.is_leaf() && !full.is_empty() {
            full
        } else {
            self.direct_text.trim()
        }
    }
}

impl BoundingBox {
    /// Create a new BoundingBox
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Check if the bounding box is visible (has non-zero dimensions)
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("CODE")
            .with_attribute("id", "snippet")
            .with_attribute("class", "language-java highlight")
            .with_text("int x = 1;")
            .with_bounding_box(0.0, 0.0, 100.0, 20.0);

        assert_eq!(element.tag_name, "code");
        assert_eq!(element.id(), Some(&"snippet".to_string()));
        assert_eq!(element.readable_text(), "int x = 1;");
        assert_eq!(element.class_name(), "language-java highlight");
        assert!(element.has_area());
    }

    #[test]
    fn test_add_attribute() {
        let mut element = ElementNode::new("div");
        element.add_attribute("class", "container main active");

        assert_eq!(element.class_name(), "container main active");
        assert_eq!(element.get_attribute("class").map(String::as_str), Some("container main active"));
    }

    #[test]
    fn test_empty_id_is_none() {
        let element = ElementNode::new("input").with_attribute("id", "");
        assert!(element.id().is_none());
    }

    #[test]
    fn test_tag_categories() {
        assert!(ElementNode::new("SCRIPT").is_non_content());
        assert!(ElementNode::new("head").is_non_content());
        assert!(!ElementNode::new("p").is_non_content());

        assert!(ElementNode::new("textarea").is_form_field());
        assert!(ElementNode::new("button").is_form_field());
        assert!(!ElementNode::new("label").is_form_field());
    }

    #[test]
    fn test_readable_text_prefers_leaf_text_content() {
        let leaf = ElementNode::new("span").with_text_content("  whole leaf  ");
        assert_eq!(leaf.readable_text(), "whole leaf");

        let parent = ElementNode::new("div")
            .with_child_count(2)
            .with_direct_text("own words")
            .with_text_content("own words child one child two");
        assert_eq!(parent.readable_text(), "own words");

        let empty_leaf = ElementNode::new("span").with_direct_text("fallback");
        assert_eq!(empty_leaf.readable_text(), "fallback");
    }

    #[test]
    fn test_computed_style_hidden() {
        assert!(ComputedStyle::new("none", "visible").is_hidden());
        assert!(ComputedStyle::new("block", "hidden").is_hidden());
        assert!(!ComputedStyle::new("inline", "visible").is_hidden());
    }

    #[test]
    fn test_serialization() {
        let element = ElementNode::new("input")
            .with_attribute("id", "email")
            .with_bounding_box(10.0, 20.0, 200.0, 30.0)
            .with_form(FormProperties {
                name: "email".to_string(),
                input_type: "text".to_string(),
                placeholder: "Email".to_string(),
                required: true,
                value: String::new(),
            });

        let json = serde_json::to_string(&element).unwrap();
        assert!(json.contains("\"tagName\":\"input\""));
        assert!(json.contains("\"type\":\"text\""));

        let deserialized: ElementNode = serde_json::from_str(&json).unwrap();
        assert_eq!(element, deserialized);
    }

    #[test]
    fn test_bounding_box() {
        let bbox = BoundingBox::new(10.0, 20.0, 100.0, 50.0);

        assert!(bbox.is_visible());
        assert_eq!(bbox.right(), 110.0);
        assert_eq!(bbox.bottom(), 70.0);

        let invisible_bbox = BoundingBox::new(0.0, 0.0, 0.0, 0.0);
        assert!(!invisible_bbox.is_visible());
    }
}
