//! # page-assistant
//!
//! Drag-select a region of a live web page, pull out the text, code and form
//! fields inside it, and ask an AI Scanner backend about it.
//!
//! ## Features
//!
//! - **Area selection**: an in-page overlay driven over Chrome DevTools Protocol (CDP)
//!   feeds a pure selection state machine
//! - **Content extraction**: geometric hit-testing over a layout snapshot, with
//!   code/prose/form-field classification
//! - **Context-aware prompts**: questions are expanded into one of a fixed set of
//!   templates based on intent and the scanned material
//! - **Backend client**: health-checked calls to `/chat`, `/ask` and `/analyze`
//!
//! ## CLI
//!
//! ```bash
//! # Select an area interactively and chat about it
//! cargo run -- select https://example.com
//!
//! # Extract a fixed rectangle headlessly
//! cargo run -- extract https://example.com --rect 0,0,800,600
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use page_assistant::{BrowserSession, LaunchOptions, SelectionRect, extract};
//!
//! # fn main() -> page_assistant::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! session.open("https://example.com")?;
//!
//! let snapshot = session.snapshot()?;
//! let result = extract(&snapshot, &SelectionRect::from_edges(0.0, 0.0, 800.0, 600.0));
//! println!("{} elements, code: {}", result.element_count, result.has_code());
//! # Ok(())
//! # }
//! ```
//!
//! ### Asking about a selection
//!
//! ```rust,no_run
//! use page_assistant::{Assistant, AssistantConfig, ScannerClient, SelectionRect, PageSnapshot};
//!
//! # async fn run(snapshot: PageSnapshot) -> page_assistant::Result<()> {
//! let config = AssistantConfig::default();
//! let mut assistant = Assistant::new(&config, ScannerClient::new(&config)?)?;
//!
//! assistant.scan_selection(&snapshot, &SelectionRect::from_edges(0.0, 0.0, 400.0, 300.0)).await?;
//! assistant.send_message("What will this code output?").await?;
//!
//! for message in assistant.conversation().messages() {
//!     println!("{:?}: {}", message.role, message.content);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and configuration
//! - [`dom`]: Page layout snapshots
//! - [`selection`]: Selection geometry, tracker state machine and in-page overlay
//! - [`extract`]: Hit-testing and content classification
//! - [`prompt`]: Intent detection, template selection and context rendering
//! - [`client`]: AI Scanner backend client
//! - [`widget`]: The assistant's conversation and flows
//! - [`config`], [`error`]: Configuration, error types and result aliases

pub mod browser;
pub mod client;
pub mod config;
pub mod dom;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod selection;
pub mod widget;

pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use client::{ChatRequest, ChatResponse, PageAnalysis, ScannerBackend, ScannerClient};
pub use config::{AssistantConfig, DEFAULT_API_BASE, MIN_SELECTION_SIZE};
pub use dom::{BoundingBox, ElementNode, PageSnapshot};
pub use error::{AssistantError, Result};
pub use extract::{ContentClass, ExtractionResult, FormField, extract, extract_selection, hit_test};
pub use prompt::{Prompt, PromptTemplate, build_prompt};
pub use selection::{Overlay, PointerEvent, SelectionEvent, SelectionOutcome, SelectionRect, SelectionTracker};
pub use widget::{Assistant, Conversation, CurrentAnalysis, Message, Role};
