//! # docxtract
//!
//! Word document content extraction to structured JSON.
//!
//! This library parses DOCX files and produces an ordered sequence of
//! content blocks (paragraphs with styled runs, and tables of cells) in
//! document reading order, ready for JSON serialization.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docxtract::extract_file;
//!
//! // Extract to the content model
//! let doc = extract_file("document.docx")?;
//! println!("Blocks: {}", doc.len());
//!
//! // Straight to JSON
//! let json = docxtract::extract_to_json("document.docx")?;
//! println!("{}", json);
//! # Ok::<(), docxtract::Error>(())
//! ```
//!
//! ## Lower-level API
//!
//! ```no_run
//! use docxtract::docx::DocxParser;
//!
//! let parser = DocxParser::open("report.docx")?;
//! let doc = parser.parse()?;
//! # Ok::<(), docxtract::Error>(())
//! ```
//!
//! Extraction is a pure function of the document bytes: no mutation, no
//! caching, no retained state between calls. It either fully succeeds or
//! fails with an [`Error`]; partial results are never returned.

pub mod container;
pub mod detect;
pub mod docx;
pub mod error;
pub mod model;
pub mod render;

// Re-exports
pub use container::DocxContainer;
pub use detect::{ensure_docx_bytes, ensure_docx_path, is_zip_file};
pub use error::{Error, Result};
pub use model::{Block, Cell, Document, ParagraphBlock, Row, Run, TableBlock};

use std::path::Path;

/// Extract the content of a Word document file.
///
/// Validates that the file is a WordprocessingML package, then parses it
/// into the ordered block model.
///
/// # Example
///
/// ```no_run
/// use docxtract::extract_file;
///
/// let doc = extract_file("document.docx")?;
/// println!("Paragraphs: {}", doc.paragraph_count());
/// # Ok::<(), docxtract::Error>(())
/// ```
pub fn extract_file(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    detect::ensure_docx_path(path)?;

    let parser = docx::DocxParser::open(path)?;
    parser.parse()
}

/// Extract the content of a Word document from bytes.
///
/// # Example
///
/// ```no_run
/// use docxtract::extract_bytes;
///
/// let data = std::fs::read("document.docx")?;
/// let doc = extract_bytes(&data)?;
/// # Ok::<(), docxtract::Error>(())
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<Document> {
    detect::ensure_docx_bytes(data)?;

    let parser = docx::DocxParser::from_bytes(data.to_vec())?;
    parser.parse()
}

/// Extract a Word document straight to its compact JSON array form.
pub fn extract_to_json(path: impl AsRef<Path>) -> Result<String> {
    let doc = extract_file(path)?;
    render::to_json(&doc, render::JsonFormat::Compact)
}
