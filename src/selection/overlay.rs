use crate::error::{AssistantError, Result};
use crate::selection::rect::SelectionRect;
use crate::selection::tracker::{OverlayView, PointerEvent, SelectionEvent, SelectionTracker};
use headless_chrome::Tab;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Reminder shown when Confirm is pressed before a valid rectangle exists
pub const SELECT_FIRST_REMINDER: &str = "Please select an area first.";

/// How the selection ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionOutcome {
    Confirmed(SelectionRect),
    Cancelled,
}

/// Payload handed to the page-side `render`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RenderPayload<'a> {
    selection_box: Option<SelectionRect>,
    text: &'a str,
    warning: bool,
    can_confirm: bool,
}

/// In-page selection chrome: overlay, instructions banner, live box and controls.
///
/// Listeners are scoped to the overlay's lifetime. Dropping it tears the chrome
/// down, so every exit path leaves the page as it was.
pub struct Overlay {
    tab: Arc<Tab>,
    installed: bool,
}

impl Overlay {
    /// Install the overlay in a tab
    pub fn install(tab: Arc<Tab>) -> Result<Self> {
        let result = tab
            .evaluate(include_str!("overlay.js"), false)
            .map_err(|e| AssistantError::EvaluationFailed(format!("Failed to install selection overlay: {}", e)))?;

        let fresh = result.value.and_then(|v| v.as_bool()).unwrap_or(false);
        if !fresh {
            return Err(AssistantError::SelectionInProgress);
        }

        log::info!("Selection overlay installed");
        Ok(Self { tab, installed: true })
    }

    /// Drain the pointer, key and button events queued by the page.
    ///
    /// `None` means the page-side overlay is gone, e.g. the tab navigated or reloaded.
    pub fn poll(&self) -> Result<Option<Vec<PointerEvent>>> {
        let result = self
            .tab
            .evaluate("window.__pageAssistant ? window.__pageAssistant.drain() : null", false)
            .map_err(|e| AssistantError::EvaluationFailed(format!("Failed to read overlay events: {}", e)))?;

        decode_events(result.value)
    }

    /// Push the tracker's view to the page
    pub fn render(&self, view: &OverlayView) -> Result<()> {
        self.render_with_text(view, view.instructions.text(), view.instructions.is_warning())
    }

    fn render_with_text(&self, view: &OverlayView, text: &str, warning: bool) -> Result<()> {
        let payload = RenderPayload {
            selection_box: view.selection_box,
            text,
            warning,
            can_confirm: view.can_confirm,
        };
        let json = serde_json::to_string(&payload)
            .map_err(|e| AssistantError::EvaluationFailed(format!("Failed to encode overlay view: {}", e)))?;

        self.tab
            .evaluate(
                &format!("window.__pageAssistant && window.__pageAssistant.render({})", json),
                false,
            )
            .map_err(|e| AssistantError::EvaluationFailed(format!("Failed to render overlay: {}", e)))?;
        Ok(())
    }

    /// Pump events into the tracker until the user confirms or cancels
    pub fn run(&self, tracker: &mut SelectionTracker, poll_interval: Duration) -> Result<SelectionOutcome> {
        if let Some(view) = tracker.view() {
            self.render(&view)?;
        }

        loop {
            let Some(events) = self.poll()? else {
                log::warn!("Selection overlay disappeared from the page; cancelling the selection");
                tracker.cancel();
                return Ok(SelectionOutcome::Cancelled);
            };
            for event in events {
                match tracker.handle(&event) {
                    SelectionEvent::Confirmed(rect) => return Ok(SelectionOutcome::Confirmed(rect)),
                    SelectionEvent::Cancelled => return Ok(SelectionOutcome::Cancelled),
                    SelectionEvent::ConfirmIgnored => {
                        if let Some(view) = tracker.view() {
                            self.render_with_text(&view, SELECT_FIRST_REMINDER, true)?;
                        }
                        continue;
                    }
                    SelectionEvent::None => continue,
                    _ => {}
                }
                if let Some(view) = tracker.view() {
                    self.render(&view)?;
                }
            }
            std::thread::sleep(poll_interval);
        }
    }

    /// Remove the chrome and detach every listener
    pub fn teardown(&mut self) -> Result<()> {
        if !self.installed {
            return Ok(());
        }
        self.installed = false;
        self.tab
            .evaluate("window.__pageAssistant ? window.__pageAssistant.teardown() : false", false)
            .map_err(|e| AssistantError::EvaluationFailed(format!("Failed to remove selection overlay: {}", e)))?;
        log::info!("Selection overlay removed");
        Ok(())
    }
}

/// Decode the queue returned by the page; a missing or null value means no overlay
fn decode_events(value: Option<serde_json::Value>) -> Result<Option<Vec<PointerEvent>>> {
    let Some(json) = value.as_ref().and_then(|v| v.as_str()) else {
        return Ok(None);
    };
    serde_json::from_str(json)
        .map(Some)
        .map_err(|e| AssistantError::EvaluationFailed(format!("Malformed overlay events: {}", e)))
}

impl Drop for Overlay {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            log::warn!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::tracker::Instructions;

    #[test]
    fn test_render_payload_shape() {
        let payload = RenderPayload {
            selection_box: Some(SelectionRect::from_edges(1.0, 2.0, 30.0, 40.0)),
            text: Instructions::Selected.text(),
            warning: false,
            can_confirm: true,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["selectionBox"]["left"], 1.0);
        assert_eq!(json["selectionBox"]["bottom"], 40.0);
        assert_eq!(json["canConfirm"], true);
        assert_eq!(json["warning"], false);
    }

    #[test]
    fn test_hidden_box_serializes_as_null() {
        let payload = RenderPayload {
            selection_box: None,
            text: SELECT_FIRST_REMINDER,
            warning: true,
            can_confirm: false,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["selectionBox"].is_null());
        assert_eq!(json["text"], "Please select an area first.");
    }

    #[test]
    fn test_missing_overlay_decodes_as_gone() {
        assert_eq!(decode_events(None).unwrap(), None);
        assert_eq!(decode_events(Some(serde_json::Value::Null)).unwrap(), None);
    }

    #[test]
    fn test_event_queue_decodes() {
        let queue = serde_json::json!(r#"[{"kind":"down","x":1.0,"y":2.0},{"kind":"cancel"}]"#);
        let events = decode_events(Some(queue)).unwrap().unwrap();
        assert_eq!(events, vec![PointerEvent::Down { x: 1.0, y: 2.0 }, PointerEvent::Cancel]);

        let empty = decode_events(Some(serde_json::json!("[]"))).unwrap();
        assert_eq!(empty, Some(Vec::new()));

        assert!(decode_events(Some(serde_json::json!("not json"))).is_err());
    }
}
