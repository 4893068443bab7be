//! Context-aware prompt construction
//!
//! A question is expanded into exactly one [`PromptTemplate`]. With a
//! selection scan in hand the template is picked from the question's intent
//! and the scanned material; without one, from the question's topic alone.

pub mod context;
pub mod intent;
pub mod templates;

pub use context::{describe_fields, render_page_context, render_selection_context, scanned_text, selection_question};
pub use intent::{ContentProfile, QuestionIntent, Topic, is_general_question};
pub use templates::PromptTemplate;

use crate::extract::ExtractionResult;

/// A rendered prompt and the template it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub template: PromptTemplate,
    pub text: String,
}

/// Pick the template for a question about scanned content. First match wins.
pub fn select_template(intent: QuestionIntent, profile: ContentProfile) -> PromptTemplate {
    if intent.analysis && profile.code {
        PromptTemplate::CodeAnalysis
    } else if intent.coding && profile.code {
        PromptTemplate::CodeSolution
    } else if intent.explanation {
        PromptTemplate::Explanation
    } else if intent.brief {
        PromptTemplate::Focused
    } else if profile.educational {
        PromptTemplate::Explanation
    } else {
        PromptTemplate::Conversational
    }
}

/// Template for a question asked with nothing scanned
pub fn select_general_template(topic: Topic) -> PromptTemplate {
    match topic {
        Topic::Programming => PromptTemplate::Programming,
        Topic::Forms => PromptTemplate::Forms,
        Topic::Web => PromptTemplate::Web,
        Topic::General => PromptTemplate::General,
    }
}

/// Expand a user question, using the current selection scan when there is one
pub fn build_prompt(question: &str, scanned: Option<&ExtractionResult>) -> Prompt {
    let (template, all_content) = match scanned {
        Some(content) => {
            let all_content = scanned_text(content);
            let intent = QuestionIntent::classify(question);
            let profile = ContentProfile::of(&all_content, &content.code);
            (select_template(intent, profile), all_content)
        }
        None => (select_general_template(Topic::classify(question)), String::new()),
    };

    log::debug!("Prompt template for {:?}: {:?}", question, template);
    Prompt {
        template,
        text: template.render(question, &all_content),
    }
}
