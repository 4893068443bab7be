//! Content extraction from a selected area
//!
//! Given a [`PageSnapshot`] and a finalized [`SelectionRect`], collect the
//! elements whose boxes overlap the rectangle and sort their text into code,
//! prose and form fields.

pub mod classify;
pub mod fields;

pub use classify::{ContentClass, classify_element, classify_text};
pub use fields::{FormField, resolve_label};

use crate::dom::{ElementNode, PageSnapshot};
use crate::error::{AssistantError, Result};
use crate::selection::SelectionRect;
use serde::{Deserialize, Serialize};

/// What was found inside a selection. String fields are empty rather than absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Readable prose, space-separated
    #[serde(default)]
    pub text: String,

    /// Code chunks, newline-separated
    #[serde(default)]
    pub code: String,

    /// Form controls in document order
    #[serde(default)]
    pub fields: Vec<FormField>,

    /// Every prose chunk seen, kept as the fallback text
    #[serde(default)]
    pub raw_text: String,

    /// Number of elements that overlapped the selection
    #[serde(default)]
    pub element_count: usize,
}

impl ExtractionResult {
    /// Nothing at all was extracted
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.code.is_empty() && self.fields.is_empty() && self.raw_text.is_empty()
    }

    pub fn has_code(&self) -> bool {
        !self.code.trim().is_empty()
    }

    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Text to send for analysis: prose, else the raw fallback
    pub fn primary_text(&self) -> &str {
        if !self.text.is_empty() { &self.text } else { &self.raw_text }
    }
}

/// Indices of page elements whose non-empty box overlaps the rectangle
pub fn hit_test(snapshot: &PageSnapshot, rect: &SelectionRect) -> Vec<usize> {
    snapshot
        .iter()
        .filter(|(_, el)| !el.is_widget_chrome && el.has_area())
        .filter(|(_, el)| el.bounding_box.is_some_and(|b| rect.overlaps(&b)))
        .map(|(index, _)| index)
        .collect()
}

#[derive(Default)]
struct Buffers {
    text: String,
    code: String,
    raw: String,
    fields: Vec<FormField>,
}

/// Extract the content of `rect` from a page snapshot
pub fn extract(snapshot: &PageSnapshot, rect: &SelectionRect) -> ExtractionResult {
    let hits = hit_test(snapshot, rect);
    log::debug!(
        "Selection ({}, {}, {}, {}) overlaps {} of {} page elements",
        rect.left,
        rect.top,
        rect.right,
        rect.bottom,
        hits.len(),
        snapshot.count_page_elements()
    );

    let mut buffers = Buffers::default();
    for &index in &hits {
        let Some(element) = snapshot.get(index) else {
            continue;
        };
        if let Err(e) = process_element(&mut buffers, snapshot, index, element) {
            log::debug!("Skipping <{}> #{}: {}", element.tag_name, index, e);
        }
    }

    // Lossy fallback kept from the widget: with nothing classified, report the raw prose
    if buffers.text.is_empty() && buffers.code.is_empty() && buffers.fields.is_empty() && !buffers.raw.is_empty() {
        buffers.text = buffers.raw.clone();
    }

    let result = ExtractionResult {
        text: buffers.text.trim().to_string(),
        code: buffers.code.trim().to_string(),
        fields: buffers.fields,
        raw_text: buffers.raw.trim().to_string(),
        element_count: hits.len(),
    };
    log::info!(
        "Extracted {} chars of text, {} chars of code, {} fields from {} elements",
        result.text.len(),
        result.code.len(),
        result.fields.len(),
        result.element_count
    );
    result
}

/// Extract only when a confirmed rectangle exists
pub fn extract_selection(snapshot: &PageSnapshot, rect: Option<&SelectionRect>) -> Option<ExtractionResult> {
    match rect {
        Some(rect) => Some(extract(snapshot, rect)),
        None => {
            log::debug!("No selection rectangle to extract from");
            None
        }
    }
}

fn process_element(buffers: &mut Buffers, snapshot: &PageSnapshot, index: usize, element: &ElementNode) -> Result<()> {
    if let Some(error) = &element.error {
        return Err(AssistantError::SnapshotFailed(error.clone()));
    }

    if element.is_non_content() || element.style.is_hidden() {
        return Ok(());
    }

    let text = element.readable_text();
    if classify::is_within_chunk_limit(text) {
        match classify_element(element) {
            ContentClass::Code => {
                buffers.code.push_str(text);
                buffers.code.push('\n');
            }
            ContentClass::Prose => {
                buffers.text.push_str(text);
                buffers.text.push(' ');
                buffers.raw.push_str(text);
                buffers.raw.push(' ');
            }
            ContentClass::Noise => {}
        }
    }

    if element.is_form_field() {
        buffers.fields.push(FormField::from_element(snapshot, index, element));
    }

    Ok(())
}
