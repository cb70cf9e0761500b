//! Keyword highlighting for listing previews.
//!
//! Output is HTML: the source is entity-escaped first, then keyword matches
//! are wrapped in `<span class="kw">`. Matching runs on the escaped text in a
//! single pass, so inserted span tags are never rescanned as source.

use std::sync::LazyLock;

use regex::Regex;

use super::Language;

static HTML_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(Language::Html));
static CSS_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(Language::Css));
static JS_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(Language::JavaScript));
static PYTHON_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| keyword_pattern(Language::Python));

fn keyword_pattern(lang: Language) -> Regex {
    let words = lang.keywords().join("|");
    Regex::new(&format!(r"(?i)\b(?:{words})\b")).unwrap()
}

fn keyword_regex(lang: Language) -> &'static Regex {
    match lang {
        Language::Html => &HTML_KEYWORDS,
        Language::Css => &CSS_KEYWORDS,
        Language::JavaScript => &JS_KEYWORDS,
        Language::Python => &PYTHON_KEYWORDS,
    }
}

/// Escape `source` and wrap its keywords for display.
pub fn highlight(source: &str, lang: Language) -> String {
    let escaped = crate::utils::html::escape(source);
    keyword_regex(lang)
        .replace_all(&escaped, "<span class=\"kw\">${0}</span>")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_keywords() {
        let out = highlight("def main():", Language::Python);
        assert_eq!(out, "<span class=\"kw\">def</span> main():");
    }

    #[test]
    fn test_highlight_escapes_before_wrapping() {
        let out = highlight("<div>", Language::Html);
        assert_eq!(out, "&lt;<span class=\"kw\">div</span>&gt;");
    }

    #[test]
    fn test_highlight_preserves_case() {
        let out = highlight("RETURN x", Language::JavaScript);
        assert_eq!(out, "<span class=\"kw\">RETURN</span> x");
    }

    #[test]
    fn test_highlight_respects_word_boundaries() {
        // "indefinite" contains "def" but must stay unwrapped.
        assert_eq!(highlight("indefinite", Language::Python), "indefinite");
    }

    #[test]
    fn test_highlight_span_tag_not_rescanned() {
        // "span" is an HTML keyword; the wrapper markup itself must survive.
        let out = highlight("<span>", Language::Html);
        assert_eq!(out, "&lt;<span class=\"kw\">span</span>&gt;");
    }

    #[test]
    fn test_highlight_multiple_keywords() {
        let out = highlight("const x = 1; let y = 2;", Language::JavaScript);
        assert!(out.contains("<span class=\"kw\">const</span>"));
        assert!(out.contains("<span class=\"kw\">let</span>"));
    }
}
