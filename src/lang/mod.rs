//! Language support for the playground slots.
//!
//! | Module      | Purpose                               |
//! |-------------|---------------------------------------|
//! | `format`    | Ad-hoc line-based formatters          |
//! | `highlight` | Escape-then-wrap keyword highlighting |
//! | `snippet`   | Tab-triggered snippet expansion       |
//!
//! Deliberately shallow: keyword tables and line transforms, no tokenizer,
//! no AST. Good enough for playground-sized sources.

pub mod format;
pub mod highlight;
pub mod snippet;

pub use format::format;
pub use highlight::highlight;
pub use snippet::{Expansion, expand};

use serde::{Deserialize, Serialize};

/// A slot's source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Html,
    Css,
    JavaScript,
    Python,
}

impl Language {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
        }
    }

    /// Stable identifier used in API payloads.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Css => "css",
            Self::JavaScript => "javascript",
            Self::Python => "python",
        }
    }

    /// Words wrapped by the highlighter.
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Html => &[
                "html", "head", "body", "div", "span", "p", "a", "img", "ul", "li", "ol", "table",
                "tr", "td", "th",
            ],
            Self::Css => &[
                "color",
                "background",
                "margin",
                "padding",
                "border",
                "font",
                "display",
                "position",
                "width",
                "height",
            ],
            Self::JavaScript => &[
                "function", "const", "let", "var", "if", "else", "for", "while", "return", "class",
                "import", "export",
            ],
            Self::Python => &[
                "def", "class", "if", "elif", "else", "for", "while", "import", "from", "return",
                "try", "except",
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_names() {
        assert_eq!(Language::Html.name(), "HTML");
        assert_eq!(Language::JavaScript.name(), "JavaScript");
        assert_eq!(Language::Python.id(), "python");
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Language::JavaScript).unwrap(),
            "\"javascript\""
        );
        let parsed: Language = serde_json::from_str("\"css\"").unwrap();
        assert_eq!(parsed, Language::Css);
    }

    #[test]
    fn test_keyword_tables_nonempty() {
        for lang in [
            Language::Html,
            Language::Css,
            Language::JavaScript,
            Language::Python,
        ] {
            assert!(!lang.keywords().is_empty());
        }
    }
}
