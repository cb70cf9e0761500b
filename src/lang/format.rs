//! Line-based source formatters.
//!
//! Each formatter is total: any input produces some output, and malformed
//! sources come back as best-effort lines rather than errors. Nesting is
//! tracked with a plain depth counter, so unbalanced delimiters degrade
//! gracefully instead of failing.

use super::Language;
use crate::utils::html::is_void_element;

/// Reformat `source` according to its language's conventions.
pub fn format(source: &str, lang: Language) -> String {
    match lang {
        Language::Html => format_html(source),
        Language::Css => format_css(source),
        Language::JavaScript => format_javascript(source),
        Language::Python => format_python(source),
    }
}

// =============================================================================
// HTML
// =============================================================================

/// One tag per line, two-space indent per nesting level.
fn format_html(html: &str) -> String {
    let broken = html.replace("><", ">\n<");

    let mut indent = 0usize;
    let mut out = Vec::new();
    for line in broken.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }
        if trimmed.starts_with("</") {
            indent = indent.saturating_sub(1);
        }
        out.push(format!("{}{}", "  ".repeat(indent), trimmed));
        if opens_element(trimmed) {
            indent += 1;
        }
    }
    out.join("\n")
}

/// True when the line opens an element that stays open past this line.
fn opens_element(line: &str) -> bool {
    line.starts_with('<')
        && !line.starts_with("</")
        && !line.starts_with("<!")
        && !line.ends_with("/>")
        && !line.contains("</")
        && !is_void_element(tag_name(line))
}

fn tag_name(line: &str) -> &str {
    line.trim_start_matches('<')
        .split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .unwrap_or("")
}

// =============================================================================
// CSS
// =============================================================================

/// One declaration per line, braces opening inline and closing alone.
fn format_css(css: &str) -> String {
    let broken = css
        .replace(" {", "{")
        .replace('{', " {\n")
        .replace('}', "\n}\n")
        .replace(';', ";\n");
    indent_braced(&broken)
}

// =============================================================================
// JavaScript
// =============================================================================

/// Statement-per-line layout keyed off braces, semicolons and commas.
fn format_javascript(js: &str) -> String {
    let broken = js
        .replace(" {", "{")
        .replace('{', " {\n")
        .replace('}', "\n}")
        .replace(';', ";\n")
        .replace(',', ",\n");
    indent_braced(&broken)
}

/// Re-indent pre-broken lines by brace depth, dropping blanks.
fn indent_braced(broken: &str) -> String {
    let mut depth = 0usize;
    let mut out = Vec::new();
    for line in broken.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('}') {
            depth = depth.saturating_sub(1);
        }
        out.push(format!("{}{}", "  ".repeat(depth), trimmed));
        if trimmed.ends_with('{') {
            depth += 1;
        }
    }
    out.join("\n")
}

// =============================================================================
// Python
// =============================================================================

const BLOCK_STARTERS: [&str; 6] = ["def ", "class ", "if ", "elif ", "for ", "while "];

/// Four-space indent after block-introducing lines ending in `:`.
///
/// Only continuation keywords dedent; closing a block otherwise requires
/// understanding the grammar, which this formatter deliberately does not.
fn format_python(py: &str) -> String {
    let mut indent = 0usize;
    let mut out = Vec::new();
    for line in py.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }
        if is_continuation(trimmed) {
            indent = indent.saturating_sub(4);
        }
        out.push(format!("{}{}", " ".repeat(indent), trimmed));
        if opens_suite(trimmed) {
            indent += 4;
        }
    }
    out.join("\n")
}

/// Keywords that resume the suite opened by an earlier statement.
fn is_continuation(line: &str) -> bool {
    line.starts_with("elif ") || line.starts_with("else") || line.starts_with("except")
}

fn opens_suite(line: &str) -> bool {
    if !line.ends_with(':') {
        return false;
    }
    BLOCK_STARTERS.iter().any(|kw| line.starts_with(kw))
        || line.starts_with("try")
        || line.starts_with("except")
        || line.starts_with("else")
}

// =============================================================================
// Tests
// =============================================================================
