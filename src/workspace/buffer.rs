//! Editor buffers - in-memory text with revision tracking.

/// One editable text buffer.
///
/// The revision counter increments on every effective change. Setting a
/// buffer to its current text is a no-op, which is what suppresses file
/// watcher echoes after a write-through save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorBuffer {
    text: String,
    revision: u64,
}

impl EditorBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            revision: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the buffer content.
    ///
    /// Returns `false` when the new text is identical to the current text,
    /// leaving the revision untouched.
    pub fn set(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_changes_revision() {
        let mut buffer = EditorBuffer::new("<h1>Hi</h1>");
        assert_eq!(buffer.revision(), 0);

        assert!(buffer.set("<h1>Hello</h1>"));
        assert_eq!(buffer.revision(), 1);
        assert_eq!(buffer.text(), "<h1>Hello</h1>");
    }

    #[test]
    fn test_set_identical_is_noop() {
        let mut buffer = EditorBuffer::new("h1 { color: red; }");
        assert!(!buffer.set("h1 { color: red; }"));
        assert_eq!(buffer.revision(), 0);
    }

    #[test]
    fn test_empty_default() {
        let buffer = EditorBuffer::default();
        assert!(buffer.is_empty());
        assert_eq!(buffer.text(), "");
    }
}
