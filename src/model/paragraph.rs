//! Paragraph and text run models.

use serde::{Deserialize, Serialize};

/// A run of text with one set of character-level formatting.
///
/// Styling flags are tri-state: `Some(true)` / `Some(false)` mean the run
/// carries an explicit override, `None` means the attribute is unset at the
/// run level and inherited from the paragraph or style. The `None` case is
/// serialized as JSON `null`, never coerced to `false`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// The text content
    pub text: String,

    /// Explicit bold override, if any
    pub bold: Option<bool>,

    /// Explicit italic override, if any
    pub italic: Option<bool>,

    /// Explicit underline override, if any
    pub underline: Option<bool>,

    /// Explicit font color as an RRGGBB hex string, if any
    pub color: Option<String>,
}

impl Run {
    /// Create a run with no explicit formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Check if this run carries any explicit formatting override.
    pub fn has_formatting(&self) -> bool {
        self.bold.is_some()
            || self.italic.is_some()
            || self.underline.is_some()
            || self.color.is_some()
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A paragraph: a style name plus its ordered runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    /// Display name of the paragraph style (e.g. "Heading 1", "Normal")
    pub style: String,

    /// Text runs in document order; empty for an empty paragraph
    pub content: Vec<Run>,
}

impl ParagraphBlock {
    /// Create an empty paragraph with the given style name.
    pub fn new(style: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            content: Vec::new(),
        }
    }

    /// Create a paragraph holding a single unformatted run.
    pub fn with_text(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            content: vec![Run::plain(text)],
        }
    }

    /// Add a run to this paragraph.
    pub fn add_run(&mut self, run: Run) {
        self.content.push(run);
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.content.iter().map(|r| r.text.as_str()).collect()
    }

    /// Check if this paragraph has no runs or only empty runs.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.content.iter().all(|r| r.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_run() {
        let run = Run::plain("Hello");
        assert_eq!(run.text, "Hello");
        assert!(!run.has_formatting());
        assert_eq!(run.bold, None);
    }

    #[test]
    fn test_run_serializes_unset_as_null() {
        let run = Run::plain("x");
        let json = serde_json::to_value(&run).unwrap();
        assert!(json["bold"].is_null());
        assert!(json["italic"].is_null());
        assert!(json["underline"].is_null());
        assert!(json["color"].is_null());
    }

    #[test]
    fn test_run_preserves_explicit_false() {
        let run = Run {
            text: "x".to_string(),
            bold: Some(false),
            ..Default::default()
        };
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["bold"], serde_json::Value::Bool(false));
        assert!(json["italic"].is_null());
    }

    #[test]
    fn test_paragraph_plain_text() {
        let mut para = ParagraphBlock::new("Normal");
        para.add_run(Run::plain("Hello, "));
        para.add_run(Run::plain("World!"));
        assert_eq!(para.plain_text(), "Hello, World!");
        assert!(!para.is_empty());
    }

    #[test]
    fn test_empty_paragraph_is_valid() {
        let para = ParagraphBlock::new("Normal");
        assert!(para.is_empty());
        assert_eq!(para.plain_text(), "");

        let json = serde_json::to_value(&para).unwrap();
        assert_eq!(json["content"], serde_json::json!([]));
    }
}
