//! Document model structures.

use super::{ParagraphBlock, TableBlock};
use serde::{Deserialize, Serialize};

/// A content block: one paragraph or one table.
///
/// Serializes with a `"type"` tag of `"paragraph"` or `"table"` alongside
/// the block's own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// A paragraph of styled runs
    Paragraph(ParagraphBlock),
    /// A table of rows and cells
    Table(TableBlock),
}

/// An extracted document: the ordered sequence of content blocks.
///
/// Block order is the document reading order, paragraphs and tables
/// interleaved exactly as they appear in the source. Serializes as a bare
/// JSON array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    /// Content blocks in document order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a content block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Add a paragraph block.
    pub fn add_paragraph(&mut self, para: ParagraphBlock) {
        self.blocks.push(Block::Paragraph(para));
    }

    /// Add a table block.
    pub fn add_table(&mut self, table: TableBlock) {
        self.blocks.push(Block::Table(table));
    }

    /// Get the number of content blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Count the paragraph blocks.
    pub fn paragraph_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Paragraph(_)))
            .count()
    }

    /// Count the table blocks.
    pub fn table_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count()
    }

    /// Extract all text content as a single string.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for block in &self.blocks {
            match block {
                Block::Paragraph(para) => {
                    text.push_str(&para.plain_text());
                    text.push('\n');
                }
                Block::Table(table) => {
                    text.push_str(&table.plain_text());
                }
            }
        }
        text.trim_end().to_string()
    }

    /// Convert to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to compact JSON.
    pub fn to_json_compact(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
