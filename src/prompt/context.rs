//! Rendering of the context blob sent as `pageContent`.

use crate::client::PageAnalysis;
use crate::extract::{ExtractionResult, FormField};

/// Joins non-blank blocks with a blank line
fn join_blocks<I: IntoIterator<Item = String>>(blocks: I) -> String {
    blocks
        .into_iter()
        .filter(|b| !b.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `label (type), …` using the field name when no label was found
pub fn describe_fields(fields: &[FormField]) -> String {
    fields
        .iter()
        .map(|f| format!("{} ({})", f.display_name(), f.field_type))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `Code:`, `Text:` and `Form Fields:` blocks for a selection scan
pub fn render_selection_context(content: &ExtractionResult) -> String {
    let mut blocks = Vec::new();
    if !content.code.is_empty() {
        blocks.push(format!("Code: {}", content.code));
    }
    if !content.text.is_empty() {
        blocks.push(format!("Text: {}", content.text));
    }
    if !content.fields.is_empty() {
        blocks.push(format!("Form Fields: {}", describe_fields(&content.fields)));
    }
    join_blocks(blocks)
}

/// Summary, page content, code content and questions content of a page scan
pub fn render_page_context(analysis: &PageAnalysis) -> String {
    join_blocks([
        analysis.page_summary.clone().unwrap_or_default(),
        analysis.page_content.clone().unwrap_or_default(),
        analysis.code_content.clone().unwrap_or_default(),
        analysis.questions_content.clone().unwrap_or_default(),
    ])
}

/// Question sent right after a selection is confirmed
pub fn selection_question(content: &ExtractionResult) -> String {
    if content.has_code() {
        format!(
            "What will be the output of this code? Please analyze and explain step by step:\n\n{}",
            content.code
        )
    } else {
        format!(
            "Analyze this selected content and explain what it means:\n\n{}",
            content.primary_text()
        )
    }
}

/// Text and code of a scan joined by a space, as quoted into the prompt
pub fn scanned_text(content: &ExtractionResult) -> String {
    format!("{} {}", content.text, content.code).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, label: Option<&str>, kind: &str) -> FormField {
        FormField {
            name: name.to_string(),
            field_type: kind.to_string(),
            label: label.map(str::to_string),
            placeholder: None,
            required: false,
            value: String::new(),
        }
    }

    #[test]
    fn test_selection_context_blocks() {
        let content = ExtractionResult {
            text: "Hello world".to_string(),
            code: "int x = 1;".to_string(),
            fields: vec![field("email", Some("Email address"), "text"), field("age", None, "number")],
            ..Default::default()
        };
        assert_eq!(
            render_selection_context(&content),
            "Code: int x = 1;\n\nText: Hello world\n\nForm Fields: Email address (text), age (number)"
        );
    }

    #[test]
    fn test_selection_context_skips_empty_blocks() {
        let content = ExtractionResult {
            text: "Only prose".to_string(),
            ..Default::default()
        };
        assert_eq!(render_selection_context(&content), "Text: Only prose");
        assert_eq!(render_selection_context(&ExtractionResult::default()), "");
    }

    #[test]
    fn test_page_context() {
        let analysis = PageAnalysis {
            page_summary: Some("A loan form".to_string()),
            page_content: Some("  ".to_string()),
            code_content: Some("x = 1".to_string()),
            ..Default::default()
        };
        assert_eq!(render_page_context(&analysis), "A loan form\n\nx = 1");
    }

    #[test]
    fn test_selection_question() {
        let with_code = ExtractionResult {
            code: "int x = 1;".to_string(),
            ..Default::default()
        };
        assert!(selection_question(&with_code).starts_with("What will be the output of this code?"));
        assert!(selection_question(&with_code).ends_with("int x = 1;"));

        let prose = ExtractionResult {
            raw_text: "Fallback words".to_string(),
            ..Default::default()
        };
        assert!(selection_question(&prose).ends_with("Fallback words"));
    }

    #[test]
    fn test_scanned_text() {
        let content = ExtractionResult {
            text: "Hello".to_string(),
            code: "x = 1;".to_string(),
            ..Default::default()
        };
        assert_eq!(scanned_text(&content), "Hello x = 1;");
        assert_eq!(scanned_text(&ExtractionResult::default()), "");
    }
}
