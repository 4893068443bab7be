//! Keyword signals read from a question and from scanned content.
//!
//! Matching is plain substring search. Question keywords are matched against
//! the lower-cased question; content vocabulary is matched case-sensitively.

const CODING_KEYWORDS: &[&str] = &[
    "code", "solution", "implement", "write", "program", "method", "function", "solve", "algorithm", "generate",
];

const EXPLANATION_KEYWORDS: &[&str] = &["explain", "what", "how", "why", "mean", "understand"];

const ANALYSIS_KEYWORDS: &[&str] = &["analyze", "output", "result", "happen"];

const BRIEF_PREFIXES: &[&str] = &["what is", "what are", "define", "meaning of"];

/// Questions of at most this many words are treated as brief
pub const BRIEF_WORD_LIMIT: usize = 5;

const CODE_VOCABULARY: &[&str] = &[
    "method",
    "function",
    "algorithm",
    "implement",
    "write a program",
    "public class",
    "System.out.println",
    "objects",
    "array",
    "list",
];

const EDUCATIONAL_VOCABULARY: &[&str] = &["Tutorial", "learn", "introduction", "guide", "examples"];

const PROGRAMMING_TOPICS: &[&str] = &["code", "program", "java", "algorithm", "method", "function", "class", "array", "loop"];

const FORM_TOPICS: &[&str] = &["form", "field", "input", "button", "submit"];

const WEB_TOPICS: &[&str] = &["web", "html", "css", "javascript", "website"];

const GENERAL_TOPICS: &[&str] = &[
    "what is",
    "explain",
    "define",
    "describe",
    "how does",
    "tell me about",
    "mongodb",
    "database",
    "sql",
    "nosql",
    "javascript",
    "python",
    "java",
    "html",
    "css",
    "react",
    "node.js",
    "spring",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "cloud",
    "api",
    "rest",
    "graphql",
    "microservices",
    "machine learning",
    "ai",
    "artificial intelligence",
    "data science",
    "cybersecurity",
    "networking",
    "devops",
    "agile",
    "scrum",
];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// What the user is asking for. Several flags may be set at once; template
/// selection decides which one wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuestionIntent {
    pub coding: bool,
    pub explanation: bool,
    pub analysis: bool,
    pub brief: bool,
}

impl QuestionIntent {
    pub fn classify(question: &str) -> Self {
        let lower = question.to_lowercase();
        let trimmed = lower.trim();

        Self {
            coding: contains_any(&lower, CODING_KEYWORDS),
            explanation: contains_any(&lower, EXPLANATION_KEYWORDS),
            analysis: contains_any(&lower, ANALYSIS_KEYWORDS),
            brief: trimmed.split_whitespace().count() <= BRIEF_WORD_LIMIT
                || BRIEF_PREFIXES.iter().any(|p| trimmed.starts_with(p)),
        }
    }
}

/// What kind of material was scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentProfile {
    pub code: bool,
    pub educational: bool,
}

impl ContentProfile {
    /// Profile the combined text+code of a scan; any code at all marks it code-bearing
    pub fn of(all_content: &str, code: &str) -> Self {
        Self {
            code: !code.is_empty() || contains_any(all_content, CODE_VOCABULARY),
            educational: contains_any(all_content, EDUCATIONAL_VOCABULARY),
        }
    }
}

/// Subject of a question asked with nothing scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Programming,
    Forms,
    Web,
    General,
}

impl Topic {
    /// First matching list wins, in the order programming, forms, web
    pub fn classify(question: &str) -> Self {
        let lower = question.to_lowercase();
        if contains_any(&lower, PROGRAMMING_TOPICS) {
            Topic::Programming
        } else if contains_any(&lower, FORM_TOPICS) {
            Topic::Forms
        } else if contains_any(&lower, WEB_TOPICS) {
            Topic::Web
        } else {
            Topic::General
        }
    }
}

/// A question about a general topic that needs no page context (routed to `/ask`)
pub fn is_general_question(question: &str) -> bool {
    contains_any(&question.to_lowercase(), GENERAL_TOPICS)
}
