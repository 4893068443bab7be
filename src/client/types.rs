use serde::{Deserialize, Serialize};

/// Body of `POST /chat` and `POST /ask`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_content: Option<String>,
}

impl ChatRequest {
    /// A bare question, as sent to `/ask`
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_page_content(mut self, content: impl Into<String>) -> Self {
        self.page_content = Some(content.into());
        self
    }
}

/// Answer from `/chat` or `/ask`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(default)]
    pub answer: Option<String>,

    #[serde(default)]
    pub question: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Milliseconds since the epoch, as stamped by the backend
    #[serde(default)]
    pub timestamp: Option<i64>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ChatResponse {
    /// The answer, if the backend produced a non-blank one
    pub fn answer_text(&self) -> Option<&str> {
        self.answer.as_deref().filter(|a| !a.trim().is_empty())
    }
}

/// Body of `POST /analyze`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// A form field as described by the backend's page scan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageField {
    pub name: Option<String>,
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub ai_explanation: Option<String>,
    pub validation_rules: Option<String>,
    pub best_practices: Option<String>,
    pub security_notes: Option<String>,
}

impl PageField {
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("unnamed")
    }
}

/// Structured AI commentary attached to a page scan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AiAnalysis {
    pub page_purpose: Option<String>,
    pub user_experience_assessment: Option<String>,
    pub form_complexity: Option<String>,
    pub potential_improvements: Option<String>,
    pub accessibility_considerations: Option<String>,
    pub business_insights: Option<String>,
    pub analysis_timestamp: Option<i64>,
    pub ai_model: Option<String>,
}

/// Result of `POST /analyze`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PageAnalysis {
    pub url: String,
    pub title: Option<String>,
    pub page_summary: Option<String>,
    pub fields: Vec<PageField>,
    pub demo_form: Option<String>,
    pub ai_analysis: Option<AiAnalysis>,
    pub error: Option<String>,
    pub page_content: Option<String>,
    pub code_content: Option<String>,
    pub questions_content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_omits_missing_context() {
        let body = serde_json::to_value(ChatRequest::question("What is MongoDB?")).unwrap();
        assert_eq!(body, json!({"question": "What is MongoDB?"}));

        let body = serde_json::to_value(
            ChatRequest::question("q")
                .with_url("https://example.com")
                .with_page_content("Text: hi"),
        )
        .unwrap();
        assert_eq!(body["pageContent"], "Text: hi");
        assert_eq!(body["url"], "https://example.com");
    }

    #[test]
    fn test_chat_response_tolerates_partial_bodies() {
        let response: ChatResponse = serde_json::from_value(json!({"answer": "42"})).unwrap();
        assert_eq!(response.answer_text(), Some("42"));
        assert!(response.timestamp.is_none());

        let blank: ChatResponse = serde_json::from_value(json!({"answer": "  ", "timestamp": 1700000000000i64})).unwrap();
        assert_eq!(blank.answer_text(), None);
        assert_eq!(blank.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn test_page_analysis_decoding() {
        let analysis: PageAnalysis = serde_json::from_value(json!({
            "url": "https://example.com/loan",
            "title": "Loan application",
            "pageSummary": "A loan form",
            "fields": [
                {"name": "income", "label": "Annual income", "type": "number", "required": true},
                {"name": "notes", "type": "textarea"}
            ],
            "aiAnalysis": {"pagePurpose": "Collect loan details", "aiModel": "gemini"},
            "codeContent": ""
        }))
        .unwrap();

        assert_eq!(analysis.fields.len(), 2);
        assert_eq!(analysis.fields[0].display_name(), "Annual income");
        assert_eq!(analysis.fields[1].display_name(), "notes");
        assert!(analysis.fields[0].required);
        assert_eq!(
            analysis.ai_analysis.unwrap().page_purpose.as_deref(),
            Some("Collect loan details")
        );
        assert!(analysis.demo_form.is_none());
    }
}
