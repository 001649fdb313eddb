//! Extracted content model.
//!
//! This module defines the data structures produced by extraction: a flat,
//! ordered sequence of content blocks (paragraphs and tables) with run-level
//! styling preserved exactly as the source document declares it. The parser
//! fills these structures and the renderer serializes them to JSON.

mod document;
mod paragraph;
mod table;

pub use document::*;
pub use paragraph::*;
pub use table::*;
