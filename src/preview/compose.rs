//! Preview document composition.
//!
//! Builds a complete HTML document from a session snapshot by string
//! assembly. Composition is total: any buffer text, balanced or not, yields a
//! document. Web projects get an executing document with an error trap (or a
//! bare one for the standalone tab); react and python projects get a
//! highlighted source listing, since the preview pane cannot run them.

use crate::lang::highlight;
use crate::utils::html::escape;
use crate::workspace::{ProjectKind, SessionSnapshot, Slot};

// =============================================================================
// Executing document (web)
// =============================================================================

// Skeleton pieces are concatenated around the raw buffer texts, so user
// content is never scanned for placeholders.
const TRAP_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Vibe Code Preview</title>
  <style>
    body {
      margin: 0;
      padding: 20px;
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    }
"#;

const TRAP_BODY_OPEN: &str = r#"  </style>
</head>
<body>
"#;

const TRAP_SCRIPT_OPEN: &str = r#"
<script>
  window.addEventListener('error', function (e) {
    console.error('Preview Error:', e.error);
    var panel = document.createElement('div');
    panel.style.cssText = 'background: #fee; border: 1px solid #fcc; padding: 10px; margin: 10px 0; border-radius: 4px; color: #c33; font-family: monospace;';
    panel.innerHTML = '<strong>JavaScript Error:</strong> ' + e.message;
    document.body.appendChild(panel);
  });

  try {
"#;

const TRAP_SCRIPT_CLOSE: &str = r#"
  } catch (error) {
    console.error('JavaScript Error:', error);
    var panel = document.createElement('div');
    panel.style.cssText = 'background: #fee; border: 1px solid #fcc; padding: 10px; margin: 10px 0; border-radius: 4px; color: #c33; font-family: monospace;';
    panel.innerHTML = '<strong>JavaScript Error:</strong> ' + error.message
      + (error.stack ? '<pre>' + error.stack + '</pre>' : '');
    document.body.appendChild(panel);
  }
</script>
</body>
</html>
"#;

/// Compose the document shown in the preview pane.
///
/// Missing slots read as empty text, so a snapshot of any kind composes.
pub fn compose(snapshot: &SessionSnapshot) -> String {
    match snapshot.kind {
        ProjectKind::Web => compose_trapped(snapshot),
        ProjectKind::React | ProjectKind::Python => compose_listing(snapshot),
    }
}

/// Compose the standalone-tab variant: same sources, no error trap.
pub fn compose_plain(snapshot: &SessionSnapshot) -> String {
    match snapshot.kind {
        ProjectKind::Web => compose_bare(snapshot),
        ProjectKind::React | ProjectKind::Python => compose_listing(snapshot),
    }
}

fn compose_trapped(snapshot: &SessionSnapshot) -> String {
    let style = snapshot.text(Slot::Style);
    let markup = snapshot.text(Slot::Markup);
    let script = snapshot.text(Slot::Script);

    let mut doc = String::with_capacity(
        TRAP_HEAD.len()
            + TRAP_BODY_OPEN.len()
            + TRAP_SCRIPT_OPEN.len()
            + TRAP_SCRIPT_CLOSE.len()
            + style.len()
            + markup.len()
            + script.len(),
    );
    doc.push_str(TRAP_HEAD);
    doc.push_str(style);
    doc.push_str(TRAP_BODY_OPEN);
    doc.push_str(markup);
    doc.push_str(TRAP_SCRIPT_OPEN);
    doc.push_str(script);
    doc.push_str(TRAP_SCRIPT_CLOSE);
    doc
}

// =============================================================================
// Bare document (web, standalone tab)
// =============================================================================

const BARE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Vibe Code Project</title>
  <style>"#;

const BARE_BODY_OPEN: &str = r#"</style>
</head>
<body>
"#;

const BARE_SCRIPT_OPEN: &str = "\n<script>";

const BARE_TAIL: &str = r#"</script>
</body>
</html>
"#;

fn compose_bare(snapshot: &SessionSnapshot) -> String {
    let mut doc = String::new();
    doc.push_str(BARE_HEAD);
    doc.push_str(snapshot.text(Slot::Style));
    doc.push_str(BARE_BODY_OPEN);
    doc.push_str(snapshot.text(Slot::Markup));
    doc.push_str(BARE_SCRIPT_OPEN);
    doc.push_str(snapshot.text(Slot::Script));
    doc.push_str(BARE_TAIL);
    doc
}

// =============================================================================
// Source listing (react, python)
// =============================================================================

const LISTING_STYLE: &str = r#"
    body {
      margin: 0;
      padding: 20px;
      background: #1e1e2e;
      color: #cdd6f4;
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    }
    h1 { font-size: 18px; margin: 0 0 4px; }
    p.note { color: #9399b2; font-size: 13px; margin: 0 0 20px; }
    section { margin-bottom: 24px; }
    h2 {
      font-size: 13px;
      color: #89b4fa;
      font-family: monospace;
      margin: 0 0 8px;
    }
    pre {
      background: #11111b;
      border: 1px solid #313244;
      border-radius: 6px;
      padding: 12px;
      overflow-x: auto;
      margin: 0;
    }
    code { font-family: 'SF Mono', Consolas, monospace; font-size: 13px; }
    .kw { color: #cba6f7; font-weight: 600; }
"#;

fn compose_listing(snapshot: &SessionSnapshot) -> String {
    let mut doc = String::new();
    doc.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    doc.push_str("  <meta charset=\"UTF-8\">\n");
    doc.push_str("  <title>Vibe Code Preview</title>\n  <style>");
    doc.push_str(LISTING_STYLE);
    doc.push_str("  </style>\n</head>\n<body>\n");

    doc.push_str(&format!("  <h1>{}</h1>\n", escape(&snapshot.name)));
    doc.push_str(&format!(
        "  <p class=\"note\">{} source listing</p>\n",
        snapshot.kind
    ));

    for (slot, text) in &snapshot.slots {
        doc.push_str("  <section>\n");
        doc.push_str(&format!("    <h2>{}</h2>\n", slot.file_name()));
        doc.push_str(&format!(
            "    <pre><code>{}</code></pre>\n",
            highlight(text, slot.language())
        ));
        doc.push_str("  </section>\n");
    }

    doc.push_str("</body>\n</html>\n");
    doc
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn web_snapshot(markup: &str, style: &str, script: &str) -> SessionSnapshot {
        SessionSnapshot {
            name: "demo".to_string(),
            kind: ProjectKind::Web,
            slots: vec![
                (Slot::Markup, markup.to_string()),
                (Slot::Style, style.to_string()),
                (Slot::Script, script.to_string()),
            ],
        }
    }

    #[test]
    fn test_compose_embeds_all_three_buffers() {
        let doc = compose(&web_snapshot(
            "<h1>Hi</h1>",
            "h1 { color: red; }",
            "console.log('x');",
        ));
        assert!(doc.contains("<h1>Hi</h1>"));
        assert!(doc.contains("h1 { color: red; }"));
        assert!(doc.contains("console.log('x');"));
        assert!(doc.contains("<title>Vibe Code Preview</title>"));
    }

    #[test]
    fn test_compose_wraps_script_in_trap() {
        let doc = compose(&web_snapshot("", "", "throw new Error(\"boom\")"));
        // The throwing statement sits between try and catch.
        let try_at = doc.find("try {").unwrap();
        let throw_at = doc.find("throw new Error(\"boom\")").unwrap();
        let catch_at = doc.find("} catch (error)").unwrap();
        assert!(try_at < throw_at && throw_at < catch_at);
        assert!(doc.contains("JavaScript Error:"));
        assert!(doc.contains("window.addEventListener('error'"));
    }

    #[test]
    fn test_compose_missing_slots_are_empty() {
        let snapshot = SessionSnapshot {
            name: "demo".to_string(),
            kind: ProjectKind::Web,
            slots: vec![(Slot::Markup, "<p>only markup</p>".to_string())],
        };
        let doc = compose(&snapshot);
        assert!(doc.contains("<p>only markup</p>"));
        // Style and script sections compose as empty, not as an error.
        assert!(doc.contains("<style>"));
        assert!(doc.contains("try {"));
    }

    #[test]
    fn test_compose_is_total_over_odd_text() {
        let doc = compose(&web_snapshot("</body></html>", "}{", "`${'__STYLE__'}`"));
        assert!(doc.contains("}{"));
        assert!(doc.contains("`${'__STYLE__'}`"));
        assert!(doc.ends_with("</html>\n"));
    }

    #[test]
    fn test_compose_plain_has_no_trap() {
        let doc = compose_plain(&web_snapshot("<p>x</p>", "p{}", "alert(1)"));
        assert!(doc.contains("<title>Vibe Code Project</title>"));
        assert!(doc.contains("<p>x</p>"));
        assert!(doc.contains("<script>alert(1)</script>"));
        assert!(!doc.contains("addEventListener('error'"));
        assert!(!doc.contains("try {"));
    }

    #[test]
    fn test_compose_react_is_a_listing() {
        let snapshot = SessionSnapshot {
            name: "app".to_string(),
            kind: ProjectKind::React,
            slots: vec![
                (Slot::Component, "const App = () => <div/>;".to_string()),
                (Slot::Style, "".to_string()),
            ],
        };
        let doc = compose(&snapshot);
        assert!(doc.contains("App.jsx"));
        assert!(doc.contains("style.css"));
        // Source is escaped, not executable.
        assert!(doc.contains("&lt;div/&gt;"));
        assert!(doc.contains("<span class=\"kw\">const</span>"));
        assert!(!doc.contains("<script>"));
    }

    #[test]
    fn test_compose_python_listing_highlights_keywords() {
        let snapshot = SessionSnapshot {
            name: "py".to_string(),
            kind: ProjectKind::Python,
            slots: vec![(Slot::Python, "def main():\n    pass".to_string())],
        };
        let doc = compose(&snapshot);
        assert!(doc.contains("main.py"));
        assert!(doc.contains("<span class=\"kw\">def</span>"));
    }

    #[test]
    fn test_compose_listing_escapes_project_name() {
        let snapshot = SessionSnapshot {
            name: "<b>x</b>".to_string(),
            kind: ProjectKind::Python,
            slots: vec![(Slot::Python, String::new())],
        };
        assert!(compose(&snapshot).contains("&lt;b&gt;x&lt;/b&gt;"));
    }
}
