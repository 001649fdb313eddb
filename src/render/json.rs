//! JSON renderer implementation.

use crate::error::{Error, Result};
use crate::model::Document;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON (the canonical wire form)
    #[default]
    Compact,
    /// Pretty-printed with 2-space indentation
    Pretty,
}

/// Convert a Document to a JSON array of content blocks.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Compact => serde_json::to_string(doc),
        JsonFormat::Pretty => serde_json::to_string_pretty(doc),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert a Document to JSON with default formatting.
pub fn to_json_default(doc: &Document) -> Result<String> {
    to_json(doc, JsonFormat::Compact)
}
