use crate::client::{ChatResponse, PageAnalysis};
use crate::extract::ExtractionResult;
use crate::prompt::{render_page_context, render_selection_context};

/// Scanned text longer than this is shortened in the chat summary
pub const DISPLAY_TEXT_LIMIT: usize = 500;

/// The widget's single cached analysis, replaced wholesale by each scan
#[derive(Debug, Clone, PartialEq)]
pub enum CurrentAnalysis {
    /// Content extracted from a confirmed selection and the backend's first answer
    Selection {
        content: ExtractionResult,
        response: ChatResponse,
    },
    /// Backend scan of a whole page
    Page(PageAnalysis),
}

impl CurrentAnalysis {
    /// The selection content, when the analysis came from a selection
    pub fn scanned(&self) -> Option<&ExtractionResult> {
        match self {
            CurrentAnalysis::Selection { content, .. } => Some(content),
            CurrentAnalysis::Page(_) => None,
        }
    }

    /// Context blob sent as `pageContent` with follow-up questions
    pub fn context(&self) -> String {
        match self {
            CurrentAnalysis::Selection { content, .. } => render_selection_context(content),
            CurrentAnalysis::Page(analysis) => render_page_context(analysis),
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            CurrentAnalysis::Selection { response, .. } => response.url.as_deref(),
            CurrentAnalysis::Page(analysis) => Some(analysis.url.as_str()).filter(|u| !u.is_empty()),
        }
    }
}

/// Bot messages announcing a successful selection scan, in display order
pub fn selection_summary(content: &ExtractionResult) -> Vec<String> {
    let mut messages = Vec::new();

    let mut summary = String::from("CONTENT SCANNED SUCCESSFULLY!\n\nScan Results:\n");
    summary.push_str(&format!("• Elements Found: {}\n", content.element_count));
    if !content.fields.is_empty() {
        summary.push_str(&format!("• Form Fields: {}\n", content.fields.len()));
    }
    if content.has_code() {
        summary.push_str("• Code Detected: Yes\n");
    }
    if content.has_text() {
        summary.push_str("• Text Content: Yes\n");
    }
    messages.push(summary);

    if content.has_code() {
        messages.push(format!("SCANNED CODE:\n```\n{}\n```", content.code.trim()));
    }

    if content.has_text() {
        messages.push(format!("SCANNED TEXT:\n\n\"{}\"", truncate_for_display(&content.text)));
    }

    if !content.fields.is_empty() {
        let mut fields = String::from("FORM FIELDS DETECTED:\n\n");
        for (i, field) in content.fields.iter().enumerate() {
            fields.push_str(&format!("{}. **{}**\n", i + 1, field.display_name()));
            fields.push_str(&format!("   • Type: {}\n", field.field_type));
            if let Some(placeholder) = &field.placeholder {
                fields.push_str(&format!("   • Placeholder: \"{}\"\n", placeholder));
            }
            if field.required {
                fields.push_str("   • Required: Yes\n");
            }
            fields.push('\n');
        }
        messages.push(fields);
    }

    messages
}

/// Bot message announcing a page scan
pub fn page_summary(analysis: &PageAnalysis) -> String {
    let mut summary = format!(
        "PAGE SCANNED: {}\n\nURL: {}\n",
        analysis.title.as_deref().unwrap_or("Untitled page"),
        analysis.url
    );
    summary.push_str(&format!("• Form Fields: {}\n", analysis.fields.len()));
    if let Some(text) = analysis.page_summary.as_deref().filter(|s| !s.trim().is_empty()) {
        summary.push_str(&format!("\n{}\n", text.trim()));
    }
    if let Some(purpose) = analysis.ai_analysis.as_ref().and_then(|a| a.page_purpose.as_deref()) {
        summary.push_str(&format!("\nPurpose: {}\n", purpose));
    }
    if analysis.demo_form.is_some() {
        summary.push_str("\nA demo form was generated for this page.\n");
    }
    summary
}

fn truncate_for_display(text: &str) -> String {
    if text.chars().count() > DISPLAY_TEXT_LIMIT {
        let head: String = text.chars().take(DISPLAY_TEXT_LIMIT).collect();
        format!("{}...\n\n(Content truncated for display)", head)
    } else {
        text.to_string()
    }
}
