//! Embedded static resources for Vibe.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `editor`   - The browser editor shell (editor.html, playground.js, editor.css)
//! - `pages`    - Minimal standalone status pages (404, revoked handle, waiting)
//! - `seed`     - Default slot content per project kind, plus the export README
//!
//! # Usage
//!
//! ```ignore
//! use embed::editor::{EDITOR_HTML, ShellVars};
//!
//! let html = EDITOR_HTML.render(&ShellVars {
//!     project_name: "My Playground",
//!     kind_id: "web",
//!     version: env!("CARGO_PKG_VERSION"),
//!     ws_port: 35729,
//! });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod editor {
    use super::{Template, TemplateVars};

    /// Variables for editor.html.
    pub struct ShellVars<'a> {
        pub project_name: &'a str,
        pub kind_id: &'a str,
        pub version: &'a str,
        pub ws_port: u16,
    }

    impl TemplateVars for ShellVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace(
                    "__PROJECT_NAME__",
                    &crate::utils::html::escape(self.project_name),
                )
                .replace("__KIND__", self.kind_id)
                .replace("__VERSION__", self.version)
                .replace("__WS_PORT__", &self.ws_port.to_string())
        }
    }

    /// Editor shell page, served at `/`.
    pub const EDITOR_HTML: Template<ShellVars<'static>> =
        Template::new(include_str!("editor/editor.html"));

    /// Editor client logic, served at `/assets/playground.js`.
    pub const PLAYGROUND_JS: &str = include_str!("editor/playground.js");

    /// Editor stylesheet, served at `/assets/editor.css`.
    pub const EDITOR_CSS: &str = include_str!("editor/editor.css");
}

pub mod pages {
    use super::{Template, TemplateVars};

    /// Variables for bare status pages.
    pub struct StatusVars<'a> {
        pub title: &'a str,
        pub message: &'a str,
    }

    impl TemplateVars for StatusVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__TITLE__", &crate::utils::html::escape(self.title))
                .replace("__MESSAGE__", &crate::utils::html::escape(self.message))
        }
    }

    /// Standalone page used for 404s, revoked handles and the pre-build wait.
    pub const STATUS_HTML: Template<StatusVars<'static>> =
        Template::new(include_str!("pages/status.html"));
}

pub mod seed {
    use super::{Template, TemplateVars};
    use crate::workspace::{ProjectKind, Slot};

    const WEB_HTML: &str = include_str!("seed/web.html");
    const WEB_CSS: &str = include_str!("seed/web.css");
    const WEB_JS: &str = include_str!("seed/web.js");
    const REACT_JSX: &str = include_str!("seed/react.jsx");
    const REACT_CSS: &str = include_str!("seed/react.css");
    const PYTHON_PY: &str = include_str!("seed/python.py");

    /// Default content for a kind's slot. Empty for slots outside the kind.
    pub fn content(kind: ProjectKind, slot: Slot) -> &'static str {
        match (kind, slot) {
            (ProjectKind::Web, Slot::Markup) => WEB_HTML,
            (ProjectKind::Web, Slot::Style) => WEB_CSS,
            (ProjectKind::Web, Slot::Script) => WEB_JS,
            (ProjectKind::React, Slot::Component) => REACT_JSX,
            (ProjectKind::React, Slot::Style) => REACT_CSS,
            (ProjectKind::Python, Slot::Python) => PYTHON_PY,
            _ => "",
        }
    }

    /// Variables for the exported README.md.
    pub struct ReadmeVars<'a> {
        pub name: &'a str,
        pub description: &'a str,
        /// Pre-joined `- file` lines.
        pub files: &'a str,
        pub run_note: &'a str,
        pub version: &'a str,
        pub date: &'a str,
    }

    impl TemplateVars for ReadmeVars<'_> {
        fn apply(&self, content: &str) -> String {
            content
                .replace("__NAME__", self.name)
                .replace("__DESCRIPTION__", self.description)
                .replace("__FILES__", self.files)
                .replace("__RUN_NOTE__", self.run_note)
                .replace("__VERSION__", self.version)
                .replace("__DATE__", self.date)
        }
    }

    /// README template written by `vibe export`.
    pub const README_MD: Template<ReadmeVars<'static>> =
        Template::new(include_str!("seed/readme.md"));
}
