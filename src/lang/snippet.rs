//! Tab-triggered snippet expansion.
//!
//! The word immediately before the cursor is looked up in a per-language
//! trigger table. On a hit the trigger is replaced with the snippet body and
//! the cursor lands after it; on a miss the caller falls back to inserting
//! plain indentation.

use super::Language;

/// Result of a successful expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Full buffer text with the trigger replaced.
    pub text: String,
    /// Byte offset of the cursor after the inserted body.
    pub cursor: usize,
}

/// Expand the trigger word ending at `cursor` (a byte offset into `text`).
///
/// Returns `None` when the cursor does not sit directly after a known
/// trigger, including when it sits on whitespace.
pub fn expand(text: &str, cursor: usize, lang: Language) -> Option<Expansion> {
    let cursor = clamp_to_boundary(text, cursor);
    let before = &text[..cursor];
    let trigger = before.split_whitespace().next_back()?;
    if !before.ends_with(trigger) {
        return None;
    }
    let body = lookup(lang, trigger)?;

    let start = cursor - trigger.len();
    let mut out = String::with_capacity(text.len() - trigger.len() + body.len());
    out.push_str(&text[..start]);
    out.push_str(body);
    out.push_str(&text[cursor..]);
    Some(Expansion {
        text: out,
        cursor: start + body.len(),
    })
}

/// Largest char boundary at or below `cursor`.
fn clamp_to_boundary(text: &str, cursor: usize) -> usize {
    let mut cursor = cursor.min(text.len());
    while !text.is_char_boundary(cursor) {
        cursor -= 1;
    }
    cursor
}

fn lookup(lang: Language, trigger: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match lang {
        Language::Html => &[
            ("div", "<div class=\"\"></div>"),
            ("link", "<a href=\"\"></a>"),
            ("img", "<img src=\"\" alt=\"\">"),
            ("ul", "<ul>\n  <li></li>\n</ul>"),
            (
                "table",
                "<table>\n  <tr>\n    <th></th>\n  </tr>\n  <tr>\n    <td></td>\n  </tr>\n</table>",
            ),
        ],
        Language::Css => &[
            (
                "flex",
                "display: flex;\njustify-content: center;\nalign-items: center;",
            ),
            (
                "grid",
                "display: grid;\ngrid-template-columns: repeat(auto-fit, minmax(200px, 1fr));\ngap: 1rem;",
            ),
            ("center", "margin: 0 auto;\ntext-align: center;"),
            (
                "gradient",
                "background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);",
            ),
        ],
        Language::JavaScript => &[
            ("func", "function functionName() {\n  \n}"),
            ("arrow", "const functionName = () => {\n  \n};"),
            ("class", "class ClassName {\n  constructor() {\n    \n  }\n}"),
            ("foreach", "array.forEach((item, index) => {\n  \n});"),
            (
                "fetch",
                "fetch(url)\n  .then(response => response.json())\n  .then(data => {\n    \n  })\n  .catch(error => {\n    console.error(error);\n  });",
            ),
        ],
        Language::Python => &[
            ("def", "def function_name():\n    pass"),
            (
                "class",
                "class ClassName:\n    def __init__(self):\n        pass",
            ),
            ("for", "for item in items:\n    pass"),
            ("if", "if condition:\n    pass"),
            (
                "try",
                "try:\n    pass\nexcept Exception as e:\n    print(f\"Error: {e}\")",
            ),
        ],
    };
    table
        .iter()
        .find(|(name, _)| *name == trigger)
        .map(|(_, body)| *body)
}
