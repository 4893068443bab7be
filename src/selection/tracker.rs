//! Drag-tracking state machine behind the selection overlay.

use crate::config::MIN_SELECTION_SIZE;
use crate::error::{AssistantError, Result};
use crate::selection::rect::{Point, SelectionRect};
use serde::{Deserialize, Serialize};

/// Input delivered by the overlay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointerEvent {
    /// Pointer pressed on the overlay
    Down { x: f64, y: f64 },
    /// Pointer moved anywhere in the document
    Move { x: f64, y: f64 },
    /// Pointer released anywhere in the document
    Up { x: f64, y: f64 },
    /// Key pressed while the overlay is up
    Key { key: String },
    /// Confirm button
    Confirm,
    /// Cancel button
    Cancel,
}

/// Result of feeding one [`PointerEvent`] to the tracker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// A drag began at the anchor point
    Started,
    /// The live box was resized
    Dragging,
    /// A drag finished with a rectangle at least the minimum size
    Completed(SelectionRect),
    /// A drag finished but the rectangle was too small
    Rejected,
    /// The user confirmed a valid rectangle; the selection is over
    Confirmed(SelectionRect),
    /// Confirm was pressed with no valid rectangle; nothing changed
    ConfirmIgnored,
    /// Cancel or Escape; the selection is over
    Cancelled,
    /// The event did not apply to the current state
    None,
}

/// Text shown in the instructions banner
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Instructions {
    Drag,
    TooSmall,
    Selected,
}

impl Instructions {
    pub fn text(&self) -> &'static str {
        match self {
            Instructions::Drag => "Drag to select the area you want to analyze",
            Instructions::TooSmall => "Selection too small. Please drag to create a larger area.",
            Instructions::Selected => "Area selected! Click \"Analyze Selection\" to continue.",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Instructions::TooSmall)
    }
}

/// What the overlay should currently display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    /// Live selection box; `None` hides it
    pub selection_box: Option<SelectionRect>,
    pub instructions: Instructions,
    /// Confirm only does something once a valid rectangle exists
    pub can_confirm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Active {
        anchor: Option<Point>,
        cursor: Option<Point>,
        dragging: bool,
        finalized: Option<SelectionRect>,
        instructions: Instructions,
    },
}

/// Tracks one selection at a time from pointer-down to confirm or cancel
#[derive(Debug, Clone)]
pub struct SelectionTracker {
    min_size: f64,
    phase: Phase,
}

impl Default for SelectionTracker {
    fn default() -> Self {
        Self::new(MIN_SELECTION_SIZE)
    }
}

impl SelectionTracker {
    pub fn new(min_size: f64) -> Self {
        Self {
            min_size,
            phase: Phase::Idle,
        }
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Whether a selection is in progress
    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active { .. })
    }

    /// Enter selection mode
    pub fn start(&mut self) -> Result<()> {
        if self.is_active() {
            return Err(AssistantError::SelectionInProgress);
        }
        self.phase = Phase::Active {
            anchor: None,
            cursor: None,
            dragging: false,
            finalized: None,
            instructions: Instructions::Drag,
        };
        Ok(())
    }

    /// The finalized rectangle, if a valid one has been drawn
    pub fn selection(&self) -> Option<SelectionRect> {
        match self.phase {
            Phase::Active { finalized, .. } => finalized,
            Phase::Idle => None,
        }
    }

    /// Current overlay view; `None` when no selection is active
    pub fn view(&self) -> Option<OverlayView> {
        match self.phase {
            Phase::Idle => None,
            Phase::Active {
                anchor,
                cursor,
                finalized,
                instructions,
                ..
            } => {
                let selection_box = match (anchor, cursor) {
                    (Some(a), Some(c)) => Some(SelectionRect::from_points(a, c)),
                    _ => None,
                };
                Some(OverlayView {
                    selection_box,
                    instructions,
                    can_confirm: finalized.is_some(),
                })
            }
        }
    }

    /// Feed one input event
    pub fn handle(&mut self, event: &PointerEvent) -> SelectionEvent {
        let min_size = self.min_size;
        let Phase::Active {
            anchor,
            cursor,
            dragging,
            finalized,
            instructions,
        } = &mut self.phase
        else {
            return SelectionEvent::None;
        };

        match *event {
            PointerEvent::Down { x, y } => {
                let point = Point::new(x, y);
                *anchor = Some(point);
                *cursor = Some(point);
                *dragging = true;
                *finalized = None;
                SelectionEvent::Started
            }
            PointerEvent::Move { x, y } => {
                if !*dragging || anchor.is_none() {
                    return SelectionEvent::None;
                }
                *cursor = Some(Point::new(x, y));
                SelectionEvent::Dragging
            }
            PointerEvent::Up { x, y } => {
                if !*dragging {
                    return SelectionEvent::None;
                }
                *dragging = false;
                let Some(start) = *anchor else {
                    return SelectionEvent::None;
                };
                let rect = SelectionRect::from_points(start, Point::new(x, y));
                if rect.meets_minimum(min_size) {
                    *cursor = Some(Point::new(x, y));
                    *finalized = Some(rect);
                    *instructions = Instructions::Selected;
                    SelectionEvent::Completed(rect)
                } else {
                    log::debug!("Rejected {}x{} selection", rect.width(), rect.height());
                    *anchor = None;
                    *cursor = None;
                    *finalized = None;
                    *instructions = Instructions::TooSmall;
                    SelectionEvent::Rejected
                }
            }
            PointerEvent::Key { ref key } if key == "Escape" => self.finish(SelectionEvent::Cancelled),
            PointerEvent::Key { .. } => SelectionEvent::None,
            PointerEvent::Confirm => match *finalized {
                Some(rect) => self.finish(SelectionEvent::Confirmed(rect)),
                None => SelectionEvent::ConfirmIgnored,
            },
            PointerEvent::Cancel => self.finish(SelectionEvent::Cancelled),
        }
    }

    /// Confirm the current rectangle, ending the selection
    pub fn confirm(&mut self) -> Result<SelectionRect> {
        match self.handle(&PointerEvent::Confirm) {
            SelectionEvent::Confirmed(rect) => Ok(rect),
            _ => Err(AssistantError::EmptySelection),
        }
    }

    /// Abandon the selection; returns whether one was active
    pub fn cancel(&mut self) -> bool {
        self.handle(&PointerEvent::Cancel) == SelectionEvent::Cancelled
    }

    fn finish(&mut self, event: SelectionEvent) -> SelectionEvent {
        self.phase = Phase::Idle;
        event
    }
}
