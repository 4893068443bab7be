//! Heuristics that sort a chunk of element text into code, prose or noise.

use crate::dom::ElementNode;
use regex::Regex;
use std::sync::LazyLock;

/// Chunks at or above this many characters are ignored as likely script/style blobs
pub const MAX_CHUNK_CHARS: usize = 1000;

/// Above this share of `{}();=` characters a chunk is treated as markup noise
pub const SYMBOL_DENSITY_LIMIT: f64 = 0.1;

static FUNCTION_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s*\(").expect("function pattern is valid"));

/// How a chunk of text is routed into an extraction result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentClass {
    Code,
    Prose,
    /// Neither code nor readable language; dropped
    Noise,
}

/// `<code>`, `<pre>`, or a class name mentioning code/highlight/language-
pub fn is_code_container(element: &ElementNode) -> bool {
    if element.is_tag("code") || element.is_tag("pre") {
        return true;
    }
    let class = element.class_name();
    class.contains("code") || class.contains("highlight") || class.contains("language-")
}

/// Text that reads like source code even outside a code container
pub fn looks_like_code(text: &str) -> bool {
    let java = (text.contains("public class") && text.contains('{'))
        || (text.contains("public static void main") && text.contains("String[] args"))
        || text.contains("System.out.println(");

    let declaration = ["var ", "const ", "let "].iter().any(|kw| text.contains(kw));
    let script = (FUNCTION_CALL.is_match(text) && text.contains('{'))
        || (declaration && text.contains('=') && text.contains(';'));

    java || script
}

/// Share of `{}();=` characters is above [`SYMBOL_DENSITY_LIMIT`]
pub fn is_symbol_heavy(text: &str) -> bool {
    let total = text.chars().count();
    let symbols = text.chars().filter(|c| matches!(c, '{' | '}' | '(' | ')' | ';' | '=')).count();
    symbols as f64 > total as f64 * SYMBOL_DENSITY_LIMIT
}

/// At least one whitespace-separated token longer than two characters made only of letters
pub fn has_natural_words(text: &str) -> bool {
    text.split_whitespace()
        .any(|word| word.len() > 2 && word.chars().all(|c| c.is_ascii_alphabetic()))
}

/// Whether a chunk is short enough to be considered at all
pub fn is_within_chunk_limit(text: &str) -> bool {
    let len = text.chars().count();
    len > 0 && len < MAX_CHUNK_CHARS
}

/// Classify a chunk, code first, then noise, then prose
pub fn classify_text(text: &str, in_code_container: bool) -> ContentClass {
    if in_code_container || looks_like_code(text) {
        ContentClass::Code
    } else if is_symbol_heavy(text) || !has_natural_words(text) {
        ContentClass::Noise
    } else {
        ContentClass::Prose
    }
}

/// Classify the readable text of an element
pub fn classify_element(element: &ElementNode) -> ContentClass {
    classify_text(element.readable_text(), is_code_container(element))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_containers() {
        assert!(is_code_container(&ElementNode::new("pre")));
        assert!(is_code_container(&ElementNode::new("CODE")));
        assert!(is_code_container(&ElementNode::new("div").with_attribute("class", "language-rust")));
        assert!(is_code_container(&ElementNode::new("div").with_attribute("class", "highlight")));
        assert!(is_code_container(&ElementNode::new("span").with_attribute("class", "inline-code")));
        assert!(!is_code_container(&ElementNode::new("p").with_attribute("class", "lead")));
    }

    #[test]
    fn test_java_patterns() {
        assert!(looks_like_code("public class Main {"));
        assert!(looks_like_code("public static void main(String[] args)"));
        assert!(looks_like_code("System.out.println(\"hi\")"));
        assert!(!looks_like_code("public class attendance is mandatory"));
    }

    #[test]
    fn test_script_patterns() {
        assert!(looks_like_code("function (a) { return a; }"));
        assert!(looks_like_code("const answer = 42;"));
        assert!(looks_like_code("var total = a + b;"));
        assert!(looks_like_code("let x = 1;"));
        assert!(!looks_like_code("the function of the heart"));
        assert!(!looks_like_code("const x = 1"));
    }

    #[test]
    fn test_symbol_density() {
        assert!(is_symbol_heavy("a(b);c=d"));
        assert!(!is_symbol_heavy("Hello (world) and some more words here"));
    }

    #[test]
    fn test_natural_words() {
        assert!(has_natural_words("Hello world"));
        assert!(!has_natural_words("a1 b2 42 ok"));
        assert!(!has_natural_words("x.y z"));
    }

    #[test]
    fn test_chunk_limit() {
        assert!(!is_within_chunk_limit(""));
        assert!(is_within_chunk_limit("short"));
        assert!(!is_within_chunk_limit(&"a".repeat(MAX_CHUNK_CHARS)));
        assert!(is_within_chunk_limit(&"a".repeat(MAX_CHUNK_CHARS - 1)));
    }

    #[test]
    fn test_classification_precedence() {
        assert_eq!(classify_text("int x = 1;", true), ContentClass::Code);
        assert_eq!(classify_text("const y = 2;", false), ContentClass::Code);
        assert_eq!(classify_text("{};()==", false), ContentClass::Noise);
        assert_eq!(classify_text("12 34 56", false), ContentClass::Noise);
        assert_eq!(classify_text("Hello world", false), ContentClass::Prose);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let samples = [
            ("Hello world", false),
            ("function(x) { }", false),
            ("== ;; ()", false),
            ("plain words in a code block", true),
        ];
        for (text, container) in samples {
            let first = classify_text(text, container);
            for _ in 0..10 {
                assert_eq!(classify_text(text, container), first);
            }
        }
    }

    #[test]
    fn test_classify_element_uses_readable_text() {
        let pre = ElementNode::new("pre").with_text("  int x = 1;  ");
        assert_eq!(classify_element(&pre), ContentClass::Code);

        let p = ElementNode::new("p").with_text("Hello world");
        assert_eq!(classify_element(&p), ContentClass::Prose);
    }
}
