use serde::{Deserialize, Serialize};

/// Prompt shapes sent to the backend. The first five wrap scanned content,
/// the last four are used when nothing has been scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptTemplate {
    CodeSolution,
    Explanation,
    CodeAnalysis,
    Focused,
    Conversational,
    Programming,
    Forms,
    Web,
    General,
}

impl PromptTemplate {
    /// Marker the backend recognises as an already-expanded prompt
    pub fn marker(&self) -> &'static str {
        match self {
            PromptTemplate::CodeSolution => "CODING TASK",
            PromptTemplate::Explanation => "EXPLANATION REQUEST",
            PromptTemplate::CodeAnalysis => "CODE ANALYSIS",
            PromptTemplate::Focused => "FOCUSED QUESTION",
            PromptTemplate::Conversational => "GENERAL QUESTION",
            PromptTemplate::Programming => "PROGRAMMING HELP",
            PromptTemplate::Forms => "WEB FORMS EXPERT",
            PromptTemplate::Web => "WEB DEVELOPMENT GUIDE",
            PromptTemplate::General => "GENERAL AI ASSISTANT",
        }
    }

    pub fn uses_scanned_content(&self) -> bool {
        matches!(
            self,
            PromptTemplate::CodeSolution
                | PromptTemplate::Explanation
                | PromptTemplate::CodeAnalysis
                | PromptTemplate::Focused
                | PromptTemplate::Conversational
        )
    }

    fn role(&self) -> &'static str {
        match self {
            PromptTemplate::CodeSolution => "You are an expert programming instructor.",
            PromptTemplate::Explanation => "You are an expert teacher.",
            PromptTemplate::CodeAnalysis => "You are an expert code analyzer.",
            PromptTemplate::Focused | PromptTemplate::Conversational => "You are a helpful AI assistant.",
            PromptTemplate::Programming => "You are an expert programming tutor.",
            PromptTemplate::Forms => "You are a web forms and UX specialist.",
            PromptTemplate::Web => "You are a web development expert.",
            PromptTemplate::General => {
                "You are a helpful AI assistant specializing in web development, programming, and form analysis."
            }
        }
    }

    fn purpose(&self) -> &'static str {
        match self {
            PromptTemplate::CodeSolution => {
                "The user selected and scanned this specific content, and they want programming help related to it."
            }
            PromptTemplate::Explanation => {
                "The user selected and scanned this specific content and wants an explanation about it."
            }
            PromptTemplate::CodeAnalysis => "The user selected and scanned this specific content and wants analysis of it.",
            PromptTemplate::Focused => {
                "The user asked a specific, focused question and wants a BRIEF, DIRECT answer."
            }
            PromptTemplate::Conversational => {
                "The user selected and scanned this specific content and has a question about it."
            }
            PromptTemplate::Programming => "Please provide comprehensive help for this programming question:",
            PromptTemplate::Forms => "Please provide detailed help for this form-related question:",
            PromptTemplate::Web => "Please provide comprehensive help for this web development question:",
            PromptTemplate::General => "Please provide a comprehensive and helpful response to this question:",
        }
    }

    /// Response headings requested from the model; empty when none are wanted
    pub fn headings(&self) -> &'static [&'static str] {
        match self {
            PromptTemplate::CodeSolution => &[
                "Complete Code Implementation (with proper class definitions if needed)",
                "Clear Comments explaining each part",
                "Example Usage showing how to use the code",
                "Expected Output (if applicable)",
                "Code Explanation in simple terms",
            ],
            PromptTemplate::Explanation => &[
                "Simple Summary (what this scanned content is about)",
                "Detailed Explanation (how it works based on the scanned content)",
                "Key Points (important concepts from the scanned content)",
                "Real-world Examples (practical applications related to the scanned content)",
                "Common Questions (FAQ style if relevant to the scanned content)",
            ],
            PromptTemplate::CodeAnalysis => &[
                "Code Analysis (what the scanned content shows)",
                "Step-by-Step Execution (how it works based on scanned content)",
                "Expected Output (what will happen based on scanned content)",
                "Logic Explanation (why it works this way based on scanned content)",
                "Potential Issues (if any, related to scanned content)",
            ],
            PromptTemplate::Focused => &["Direct Answer (2-3 sentences maximum based on scanned content)"],
            PromptTemplate::Conversational => &[],
            PromptTemplate::Programming => &[
                "Code Example (working solution with proper syntax)",
                "Explanation (how the code works step by step)",
                "Key Concepts (important programming principles)",
                "Best Practices (professional tips)",
                "Related Topics (what to learn next)",
            ],
            PromptTemplate::Forms => &[
                "Direct Answer (addressing the specific question)",
                "Form Best Practices (UX and accessibility guidelines)",
                "Implementation Tips (practical advice)",
                "Examples (real-world scenarios)",
                "Common Mistakes (what to avoid)",
            ],
            PromptTemplate::Web => &[
                "Direct Answer (clear solution)",
                "Code Examples (if applicable)",
                "Explanation (how it works)",
                "Best Practices (industry standards)",
                "Resources (additional learning)",
            ],
            PromptTemplate::General => &[
                "Direct Answer (addressing the main question)",
                "Detailed Explanation (providing context and details)",
                "Helpful Tips (practical advice)",
                "Examples (if relevant)",
            ],
        }
    }

    fn closing(&self) -> &'static str {
        match self {
            PromptTemplate::CodeSolution => {
                "Format your response with proper headings and code blocks for maximum clarity. Focus entirely on the scanned content, not the webpage."
            }
            PromptTemplate::Explanation => {
                "Make your explanation clear, structured, and easy to understand. Focus entirely on the scanned content."
            }
            PromptTemplate::CodeAnalysis => {
                "Present your analysis in a clear, structured format. Focus entirely on the scanned content."
            }
            PromptTemplate::Focused => {
                "Keep it short, focused, and directly answer what they asked. Do NOT include sections like \"Simple Summary\", \"Detailed Explanation\", \"Key Points\", \"Real-world Examples\", or \"Common Questions\". Just give the direct answer."
            }
            PromptTemplate::Conversational => {
                "Please provide a helpful response based on the scanned content. Keep it clear and focused. Do NOT include structured sections like \"Simple Summary\", \"Detailed Explanation\", \"Key Points\", \"Real-world Examples\", or \"Common Questions\". Just answer the question directly and conversationally."
            }
            PromptTemplate::Programming => "Make your response educational and include practical examples.",
            PromptTemplate::Forms => "Focus on user experience and accessibility.",
            PromptTemplate::Web => "Make it practical and actionable.",
            PromptTemplate::General => "Be informative, accurate, and user-friendly in your response.",
        }
    }

    fn headings_block(&self) -> String {
        let headings = self.headings();
        if headings.is_empty() {
            return String::new();
        }

        let intro = match self {
            PromptTemplate::CodeSolution => "Please provide a complete, working solution with:",
            PromptTemplate::Explanation => "Please provide a comprehensive explanation with:",
            PromptTemplate::CodeAnalysis => "Please analyze and provide:",
            PromptTemplate::Focused => "Please provide a CONCISE response with ONLY:",
            PromptTemplate::General => "Please structure your response clearly with:",
            _ => "Please structure your response with:",
        };

        let mut block = String::from(intro);
        for (i, heading) in headings.iter().enumerate() {
            block.push_str(&format!("\n{}. {}", i + 1, heading));
        }
        block
    }

    /// Render this template around the user's question
    ///
    /// `scanned` is the combined text and code of the current selection scan
    /// and is ignored by the context-free templates.
    pub fn render(&self, question: &str, scanned: &str) -> String {
        if self.uses_scanned_content() {
            let mut sections = vec![
                format!(
                    "{}: {} Based on the SCANNED CONTENT from the user: \"{}\"",
                    self.marker(),
                    self.role(),
                    scanned
                ),
                "IMPORTANT: Answer based ONLY on the scanned content above. Do NOT reference any webpage content."
                    .to_string(),
                self.purpose().to_string(),
            ];

            let headings = self.headings_block();
            if *self == PromptTemplate::Focused {
                sections.push(format!("User Question: {}", question));
                sections.push(headings);
            } else {
                if !headings.is_empty() {
                    sections.push(headings);
                }
                sections.push(format!("User Question: {}", question));
            }
            sections.push(self.closing().to_string());
            sections.join("\n\n")
        } else {
            [
                format!("{}: {} {}", self.marker(), self.role(), self.purpose()),
                format!("\"{}\"", question),
                self.headings_block(),
                self.closing().to_string(),
            ]
            .join("\n\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanned_templates_quote_content() {
        let text = PromptTemplate::CodeAnalysis.render("What will this code output?", "int x = 1;");
        assert!(text.starts_with("CODE ANALYSIS:"));
        assert!(text.contains("SCANNED CONTENT from the user: \"int x = 1;\""));
        assert!(text.contains("User Question: What will this code output?"));
        assert!(text.contains("3. Expected Output"));
    }

    #[test]
    fn test_conversational_has_no_headings() {
        let text = PromptTemplate::Conversational.render("Tell me more about this passage please", "Some text");
        assert!(text.starts_with("GENERAL QUESTION:"));
        assert!(!text.contains("1. "));
    }

    #[test]
    fn test_focused_asks_for_one_section() {
        let text = PromptTemplate::Focused.render("Meaning?", "Some text");
        let question_at = text.find("User Question").unwrap();
        let answer_at = text.find("1. Direct Answer").unwrap();
        assert!(question_at < answer_at);
    }

    #[test]
    fn test_context_free_templates_ignore_scan() {
        let text = PromptTemplate::General.render("What is MongoDB?", "should not appear");
        assert!(text.starts_with("GENERAL AI ASSISTANT:"));
        assert!(text.contains("\"What is MongoDB?\""));
        assert!(!text.contains("should not appear"));
        assert!(text.contains("4. Examples"));
    }

    #[test]
    fn test_scan_templates_share_preamble() {
        for template in [
            PromptTemplate::CodeSolution,
            PromptTemplate::Explanation,
            PromptTemplate::CodeAnalysis,
            PromptTemplate::Focused,
            PromptTemplate::Conversational,
        ] {
            let text = template.render("q", "content");
            assert!(text.contains("SCANNED CONTENT"));
            assert!(text.contains("Answer based ONLY on the scanned content"));
        }
    }
}
