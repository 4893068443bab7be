//! The assistant widget's owned state and its user-facing flows
//!
//! [`Assistant`] holds the conversation, the selection tracker, the current
//! analysis and the loading flag. Every flow reports its outcome to the user
//! as a bot message; the returned `Result` is for the caller's bookkeeping.

pub mod conversation;
pub mod state;

pub use conversation::{Conversation, Message, Role, THINKING};
pub use state::{CurrentAnalysis, page_summary, selection_summary};

use crate::client::{ChatRequest, ChatResponse, PageAnalysis, ScannerBackend};
use crate::config::AssistantConfig;
use crate::dom::PageSnapshot;
use crate::error::{AssistantError, Result};
use crate::extract::{ExtractionResult, extract};
use crate::prompt::{build_prompt, is_general_question, selection_question};
use crate::selection::{
    OverlayView, PointerEvent, SELECT_FIRST_REMINDER, SelectionEvent, SelectionOutcome, SelectionRect,
    SelectionTracker,
};

pub const SELECTION_CANCELLED: &str = "Selection cancelled. You can try again!";
pub const NO_CONTENT_FOUND: &str =
    "No content found in the selected area. Please try selecting an area with text, forms, or code.";
pub const SCAN_READY: &str = "Ready to answer your questions about the scanned content!";
pub const SCAN_WITHOUT_ANSWER: &str = "Content scanned! You can now ask me questions about the selected content.";
pub const SCAN_FAILED: &str = "Failed to analyze the selected area. Please try again.";
pub const NO_ANSWER: &str = "I apologize, but I couldn't generate a response right now.";
pub const ANSWER_FAILED: &str = "Sorry, I encountered an error while processing your question. Please try again.";
pub const PAGE_SCAN_FAILED: &str = "Failed to analyze page. Please try again.";
pub const INVALID_URL: &str = "Please enter a valid URL";

/// The page assistant: one conversation, one selection, one current analysis
pub struct Assistant<B: ScannerBackend> {
    backend: B,
    tracker: SelectionTracker,
    conversation: Conversation,
    analysis: Option<CurrentAnalysis>,
    pending: Option<SelectionRect>,
    current_url: Option<String>,
    loading: bool,
}

impl<B: ScannerBackend> Assistant<B> {
    pub fn new(config: &AssistantConfig, backend: B) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            backend,
            tracker: SelectionTracker::new(config.min_selection_size),
            conversation: Conversation::new(),
            analysis: None,
            pending: None,
            current_url: None,
            loading: false,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn analysis(&self) -> Option<&CurrentAnalysis> {
        self.analysis.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_selecting(&self) -> bool {
        self.tracker.is_active()
    }

    /// Page the conversation is about, else the URL of the cached analysis
    pub fn current_url(&self) -> Option<&str> {
        self.current_url
            .as_deref()
            .or_else(|| self.analysis.as_ref().and_then(CurrentAnalysis::url))
    }

    /// Page the follow-up questions are about
    pub fn set_current_url(&mut self, url: impl Into<String>) {
        self.current_url = Some(url.into());
    }

    /// Tracker driven by an in-page [`Overlay`](crate::selection::Overlay)
    pub fn tracker_mut(&mut self) -> &mut SelectionTracker {
        &mut self.tracker
    }

    /// Enter selection mode
    pub fn start_selection(&mut self) -> Result<()> {
        if self.loading {
            return Err(AssistantError::SelectionInProgress);
        }
        self.pending = None;
        self.tracker.start()?;
        log::info!("Selection started");
        Ok(())
    }

    pub fn selection_view(&self) -> Option<OverlayView> {
        self.tracker.view()
    }

    /// Feed one pointer, key or button event to the selection
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> SelectionEvent {
        let outcome = self.tracker.handle(event);
        match outcome {
            SelectionEvent::Confirmed(rect) => self.finish_selection(SelectionOutcome::Confirmed(rect)),
            SelectionEvent::Cancelled => self.finish_selection(SelectionOutcome::Cancelled),
            SelectionEvent::ConfirmIgnored => {
                self.conversation.push_bot(SELECT_FIRST_REMINDER);
            }
            _ => {}
        }
        outcome
    }

    /// Record how an overlay-driven selection ended
    pub fn finish_selection(&mut self, outcome: SelectionOutcome) {
        match outcome {
            SelectionOutcome::Confirmed(rect) => {
                log::info!("Selection confirmed: {}x{}", rect.width(), rect.height());
                self.pending = Some(rect);
            }
            SelectionOutcome::Cancelled => {
                log::info!("Selection cancelled");
                self.pending = None;
                self.conversation.push_bot(SELECTION_CANCELLED);
            }
        }
    }

    /// Abandon the active selection; returns whether one was active
    pub fn cancel_selection(&mut self) -> bool {
        let was_active = self.tracker.cancel();
        if was_active {
            self.finish_selection(SelectionOutcome::Cancelled);
        }
        was_active
    }

    /// Scan the confirmed selection against a snapshot of the page
    ///
    /// Without a valid rectangle the reminder is posted locally and nothing is sent.
    pub async fn confirm_selection(&mut self, snapshot: &PageSnapshot) -> Result<()> {
        let rect = match self.pending.take() {
            Some(rect) => rect,
            None => match self.tracker.confirm() {
                Ok(rect) => rect,
                Err(e) => {
                    self.conversation.push_bot(SELECT_FIRST_REMINDER);
                    return Err(e);
                }
            },
        };
        self.scan_selection(snapshot, &rect).await
    }

    /// Extract `rect` from `snapshot` and send it for analysis
    pub async fn scan_selection(&mut self, snapshot: &PageSnapshot, rect: &SelectionRect) -> Result<()> {
        if !snapshot.url.is_empty() {
            self.current_url = Some(snapshot.url.clone());
        }

        self.begin_loading();
        let content = extract(snapshot, rect);
        if content.is_empty() {
            self.end_loading();
            self.conversation.push_bot(NO_CONTENT_FOUND);
            return Err(AssistantError::EmptyExtraction);
        }

        let content = ExtractionResult {
            text: content.primary_text().to_string(),
            ..content
        };
        let request = ChatRequest::question(selection_question(&content))
            .with_url(snapshot.url.clone())
            .with_page_content(content.primary_text());
        let result = self.backend.chat(request).await;
        self.end_loading();

        match result {
            Ok(response) if response.answer_text().is_some() => {
                for message in selection_summary(&content) {
                    self.conversation.push_bot(message);
                }
                if let Some(answer) = response.answer_text() {
                    self.conversation.push_bot(answer);
                }
                self.conversation.push_bot(SCAN_READY);
                self.analysis = Some(CurrentAnalysis::Selection {
                    content,
                    response: ChatResponse {
                        url: response.url.clone().or_else(|| Some(snapshot.url.clone())),
                        ..response
                    },
                });
                Ok(())
            }
            Ok(_) => {
                self.conversation.push_bot(SCAN_WITHOUT_ANSWER);
                Ok(())
            }
            Err(e) => {
                log::warn!("Selection analysis failed: {}", e);
                self.report_failure(&e, SCAN_FAILED);
                Err(e)
            }
        }
    }

    /// Ask a question about the current scan, expanded into a context-aware prompt
    pub async fn send_message(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return Ok(());
        }

        self.conversation.push_user(text);
        self.begin_loading();

        let scanned = self.analysis.as_ref().and_then(CurrentAnalysis::scanned);
        let prompt = build_prompt(text, scanned);
        let context = self.analysis.as_ref().map(CurrentAnalysis::context).unwrap_or_default();

        let mut request = ChatRequest::question(prompt.text).with_page_content(context);
        if let Some(url) = self.current_url() {
            request = request.with_url(url);
        }

        let result = self.backend.chat(request).await;
        self.end_loading();
        self.post_answer(result)
    }

    /// Standalone-page chat: general questions go to `/ask` without context,
    /// anything else to `/chat` with the page URL and summary
    pub async fn ask(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return Ok(());
        }

        self.conversation.push_user(text);
        self.begin_loading();

        let result = if is_general_question(text) {
            log::debug!("Routing general question to /ask");
            self.backend.ask(ChatRequest::question(text)).await
        } else {
            let mut request = ChatRequest::question(text);
            if let Some(CurrentAnalysis::Page(analysis)) = &self.analysis {
                request = request.with_url(analysis.url.clone());
                if let Some(summary) = &analysis.page_summary {
                    request = request.with_page_content(summary.clone());
                }
            } else if let Some(url) = &self.current_url {
                request = request.with_url(url.clone());
            }
            self.backend.chat(request).await
        };

        self.end_loading();
        self.post_answer(result)
    }

    /// Scan a whole page through the backend
    pub async fn scan_page(&mut self, url: &str) -> Result<PageAnalysis> {
        let url = url.trim();
        if url.is_empty() {
            self.conversation.push_bot(INVALID_URL);
            return Err(AssistantError::NavigationFailed(INVALID_URL.to_string()));
        }

        self.begin_loading();
        let result = self.backend.analyze(url).await;
        self.end_loading();

        match result {
            Ok(analysis) => {
                if let Some(error) = analysis.error.as_deref().filter(|e| !e.is_empty()) {
                    log::warn!("Backend reported a scan error for {}: {}", url, error);
                    self.conversation.push_bot(error);
                    return Err(AssistantError::InvalidResponse(error.to_string()));
                }
                self.conversation.push_bot(page_summary(&analysis));
                self.current_url = Some(if analysis.url.is_empty() {
                    url.to_string()
                } else {
                    analysis.url.clone()
                });
                self.analysis = Some(CurrentAnalysis::Page(analysis.clone()));
                Ok(analysis)
            }
            Err(e) => {
                log::warn!("Page scan failed: {}", e);
                self.report_failure(&e, PAGE_SCAN_FAILED);
                Err(e)
            }
        }
    }

    fn begin_loading(&mut self) {
        self.loading = true;
        self.conversation.begin_thinking();
    }

    fn end_loading(&mut self) {
        self.conversation.retract_thinking();
        self.loading = false;
    }

    fn post_answer(&mut self, result: Result<ChatResponse>) -> Result<()> {
        match result {
            Ok(response) => {
                let answer = response.answer_text().unwrap_or(NO_ANSWER).to_string();
                self.conversation.push_bot(answer);
                Ok(())
            }
            Err(e) => {
                log::warn!("Question failed: {}", e);
                self.report_failure(&e, ANSWER_FAILED);
                Err(e)
            }
        }
    }

    /// An unreachable backend is reported verbatim; other backend failures keep
    /// their status and detail after the fallback text
    fn report_failure(&mut self, error: &AssistantError, fallback: &str) {
        let message = match error {
            AssistantError::BackendUnreachable { .. } => error.to_string(),
            AssistantError::Http { status, body } => {
                format!("{} (status {}: {})", fallback, status, backend_error_detail(body))
            }
            other if other.is_backend() => format!("{} ({})", fallback, other),
            _ => fallback.to_string(),
        };
        self.conversation.push_bot(message);
    }
}

/// The `error` field of a JSON error body, else the trimmed body
fn backend_error_detail(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| value.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .filter(|error| !error.trim().is_empty())
        .unwrap_or_else(|| body.trim().to_string())
}
