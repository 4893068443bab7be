//! Area selection over a live page
//!
//! - [`SelectionRect`] / [`Point`]: normalized viewport geometry
//! - [`SelectionTracker`]: the pointer-down / move / up state machine with the
//!   minimum-size policy
//! - [`Overlay`]: the in-page chrome that feeds the tracker and renders its view

pub mod overlay;
pub mod rect;
pub mod tracker;

pub use overlay::{Overlay, SelectionOutcome, SELECT_FIRST_REMINDER};
pub use rect::{Point, SelectionRect};
pub use tracker::{Instructions, OverlayView, PointerEvent, SelectionEvent, SelectionTracker};
