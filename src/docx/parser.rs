//! DOCX parser implementation.

use crate::container::DocxContainer;
use crate::error::{Error, Result};
use crate::model::{Cell, Document, ParagraphBlock, Row, Run, TableBlock};

use super::styles::StyleMap;

/// Parser for DOCX (Word) documents.
///
/// Walks `word/document.xml` in a single streaming pass and emits content
/// blocks in body order: paragraphs and tables come out interleaved exactly
/// as they appear between `<w:body>` and `</w:body>`.
pub struct DocxParser {
    container: DocxContainer,
    styles: StyleMap,
}

impl DocxParser {
    /// Open a DOCX file for parsing.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let container = DocxContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = DocxContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a parser from a container.
    fn from_container(container: DocxContainer) -> Result<Self> {
        if !container.exists("word/document.xml") {
            return Err(Error::NotWordDocument(
                "package does not contain word/document.xml".to_string(),
            ));
        }

        let styles = if let Ok(xml) = container.read_xml("word/styles.xml") {
            StyleMap::parse(&xml)?
        } else {
            StyleMap::default()
        };

        Ok(Self { container, styles })
    }

    /// Parse the document and return the extracted content blocks.
    ///
    /// Read-only traversal: calling this twice on the same parser yields
    /// identical output.
    pub fn parse(&self) -> Result<Document> {
        let xml = self.container.read_xml("word/document.xml")?;
        let mut doc = Document::new();

        let mut reader = quick_xml::Reader::from_str(&xml);
        // Don't trim text - preserve whitespace from xml:space="preserve" elements
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut in_body = false;
        let mut in_paragraph = false;
        let mut table_depth: u32 = 0;
        let mut fragment = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"w:body" if !in_paragraph && table_depth == 0 => {
                        in_body = true;
                    }
                    b"w:p" if in_body && !in_paragraph && table_depth == 0 => {
                        in_paragraph = true;
                        fragment.clear();
                        append_start_tag(&mut fragment, e);
                    }
                    b"w:tbl" if in_body && !in_paragraph => {
                        if table_depth == 0 {
                            fragment.clear();
                        }
                        table_depth += 1;
                        append_start_tag(&mut fragment, e);
                    }
                    _ => {
                        if in_paragraph || table_depth > 0 {
                            append_start_tag(&mut fragment, e);
                        }
                    }
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => match e.name().as_ref() {
                    // Self-closing <w:p/> is an empty paragraph
                    b"w:p" if in_body && !in_paragraph && table_depth == 0 => {
                        doc.add_paragraph(ParagraphBlock::new(self.resolve_style(None)));
                    }
                    b"w:tbl" if in_body && !in_paragraph && table_depth == 0 => {
                        doc.add_table(TableBlock::new());
                    }
                    _ => {
                        if in_paragraph || table_depth > 0 {
                            append_empty_tag(&mut fragment, e);
                        }
                    }
                },
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if in_paragraph || table_depth > 0 {
                        let text = e.unescape().unwrap_or_default();
                        fragment.push_str(&escape_xml(&text));
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"w:body" if !in_paragraph && table_depth == 0 => {
                        in_body = false;
                    }
                    b"w:p" if in_paragraph && table_depth == 0 => {
                        fragment.push_str("</w:p>");
                        doc.add_paragraph(self.parse_paragraph(&fragment)?);
                        in_paragraph = false;
                    }
                    b"w:tbl" if table_depth > 0 => {
                        fragment.push_str("</w:tbl>");
                        table_depth -= 1;
                        if table_depth == 0 {
                            doc.add_table(self.parse_table(&fragment)?);
                        }
                    }
                    _ => {
                        if in_paragraph || table_depth > 0 {
                            append_end_tag(&mut fragment, e.name());
                        }
                    }
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(doc)
    }

    /// Parse a single top-level paragraph element.
    fn parse_paragraph(&self, xml: &str) -> Result<ParagraphBlock> {
        let mut reader = quick_xml::Reader::from_str(xml);
        // Don't trim text - preserve whitespace from xml:space="preserve" elements
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut style_id: Option<String> = None;
        let mut runs: Vec<Run> = Vec::new();

        let mut in_ppr = false;
        let mut in_run = false;
        let mut in_rpr = false;
        let mut in_text = false;
        let mut in_instr_text = false;
        let mut current = Run::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"w:pPr" => in_ppr = true,
                    b"w:r" => {
                        in_run = true;
                        current = Run::default();
                    }
                    b"w:rPr" if in_run => in_rpr = true,
                    b"w:t" if in_run => in_text = true,
                    b"w:instrText" => in_instr_text = true,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => match e.name().as_ref() {
                    b"w:pStyle" if in_ppr => {
                        if let Some(val) = get_attr(e, b"w:val") {
                            style_id = Some(val);
                        }
                    }
                    b"w:b" if in_rpr => {
                        current.bold = Some(get_bool_attr(e, b"w:val").unwrap_or(true));
                    }
                    b"w:i" if in_rpr => {
                        current.italic = Some(get_bool_attr(e, b"w:val").unwrap_or(true));
                    }
                    b"w:u" if in_rpr => {
                        let val = get_attr(e, b"w:val");
                        current.underline = Some(val.as_deref() != Some("none"));
                    }
                    b"w:color" if in_rpr => {
                        if let Some(val) = get_attr(e, b"w:val") {
                            if val != "auto" {
                                current.color = Some(val);
                            }
                        }
                    }
                    b"w:tab" if in_run && !in_rpr => current.text.push('\t'),
                    b"w:br" | b"w:cr" if in_run && !in_rpr => current.text.push('\n'),
                    _ => {}
                },
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if in_run && in_text && !in_instr_text {
                        let text = e.unescape().unwrap_or_default();
                        current.text.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"w:pPr" => in_ppr = false,
                    b"w:rPr" => in_rpr = false,
                    b"w:t" => in_text = false,
                    b"w:instrText" => in_instr_text = false,
                    b"w:r" => {
                        in_run = false;
                        if !current.text.is_empty() {
                            runs.push(std::mem::take(&mut current));
                        }
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(ParagraphBlock {
            style: self.resolve_style(style_id.as_deref()),
            content: runs,
        })
    }

    /// Parse a top-level table element.
    ///
    /// Cell text is every paragraph in the cell joined with `"\n"`; the cell
    /// style is the style name of its first paragraph. Content of tables
    /// nested inside a cell is not part of the cell's text.
    fn parse_table(&self, xml: &str) -> Result<TableBlock> {
        let mut reader = quick_xml::Reader::from_str(xml);
        // Don't trim text - preserve whitespace from xml:space="preserve" elements
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut table = TableBlock::new();
        let mut current_row: Option<Row> = None;

        let mut in_cell = false;
        let mut cell_para_texts: Vec<String> = Vec::new();
        let mut cell_style: Option<String> = None;

        let mut in_paragraph = false;
        let mut para_text = String::new();
        let mut para_style_id: Option<String> = None;
        let mut in_ppr = false;
        let mut in_run = false;
        let mut in_rpr = false;
        let mut in_text = false;
        let mut in_instr_text = false;

        // 0 = main table level, 1+ = inside a nested table
        let mut nested_depth: u32 = 0;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => match e.name().as_ref() {
                    b"w:tbl" if in_cell || nested_depth > 0 => nested_depth += 1,
                    _ if nested_depth > 0 => {}
                    b"w:tr" => current_row = Some(Row::new()),
                    b"w:tc" => {
                        in_cell = true;
                        cell_para_texts.clear();
                        cell_style = None;
                    }
                    b"w:p" if in_cell => {
                        in_paragraph = true;
                        para_text.clear();
                        para_style_id = None;
                    }
                    b"w:pPr" if in_paragraph => in_ppr = true,
                    b"w:r" if in_paragraph => in_run = true,
                    b"w:rPr" if in_run => in_rpr = true,
                    b"w:t" if in_run => in_text = true,
                    b"w:instrText" => in_instr_text = true,
                    _ => {}
                },
                Ok(quick_xml::events::Event::Empty(ref e)) => {
                    if nested_depth == 0 {
                        match e.name().as_ref() {
                            // Self-closing <w:p/> is an empty paragraph in the cell
                            b"w:p" if in_cell && !in_paragraph => {
                                if cell_style.is_none() {
                                    cell_style = Some(self.resolve_style(None));
                                }
                                cell_para_texts.push(String::new());
                            }
                            b"w:pStyle" if in_ppr => {
                                if let Some(val) = get_attr(e, b"w:val") {
                                    para_style_id = Some(val);
                                }
                            }
                            b"w:tab" if in_run && !in_rpr => para_text.push('\t'),
                            b"w:br" | b"w:cr" if in_run && !in_rpr => para_text.push('\n'),
                            _ => {}
                        }
                    }
                }
                Ok(quick_xml::events::Event::Text(ref e)) => {
                    if nested_depth == 0 && in_run && in_text && !in_instr_text {
                        let text = e.unescape().unwrap_or_default();
                        para_text.push_str(&text);
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => match e.name().as_ref() {
                    b"w:tbl" if nested_depth > 0 => nested_depth -= 1,
                    _ if nested_depth > 0 => {}
                    b"w:pPr" => in_ppr = false,
                    b"w:rPr" => in_rpr = false,
                    b"w:t" => in_text = false,
                    b"w:instrText" => in_instr_text = false,
                    b"w:r" => in_run = false,
                    b"w:p" if in_cell => {
                        if cell_style.is_none() {
                            cell_style = Some(self.resolve_style(para_style_id.as_deref()));
                        }
                        cell_para_texts.push(std::mem::take(&mut para_text));
                        in_paragraph = false;
                    }
                    b"w:tc" => {
                        let style = cell_style
                            .take()
                            .unwrap_or_else(|| self.styles.default_style_name());
                        let cell = Cell::new(cell_para_texts.join("\n"), style);
                        if let Some(ref mut row) = current_row {
                            row.add_cell(cell);
                        }
                        cell_para_texts.clear();
                        in_cell = false;
                    }
                    b"w:tr" => {
                        if let Some(row) = current_row.take() {
                            table.add_row(row);
                        }
                    }
                    _ => {}
                },
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(table)
    }

    /// Resolve an optional style ID to a display name, falling back to the
    /// default paragraph style.
    fn resolve_style(&self, style_id: Option<&str>) -> String {
        match style_id {
            Some(id) => self.styles.display_name(id),
            None => self.styles.default_style_name(),
        }
    }
}

/// Append a start tag with its attributes to the collected fragment.
fn append_start_tag(dst: &mut String, e: &quick_xml::events::BytesStart) {
    append_tag(dst, e, false);
}

/// Append a self-closing tag with its attributes to the collected fragment.
fn append_empty_tag(dst: &mut String, e: &quick_xml::events::BytesStart) {
    append_tag(dst, e, true);
}

fn append_tag(dst: &mut String, e: &quick_xml::events::BytesStart, self_closing: bool) {
    dst.push('<');
    dst.push_str(&String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes().flatten() {
        dst.push(' ');
        dst.push_str(&String::from_utf8_lossy(attr.key.as_ref()));
        dst.push_str("=\"");
        // Attribute values are still in their escaped form; write them back as-is
        dst.push_str(&String::from_utf8_lossy(&attr.value));
        dst.push('"');
    }
    dst.push_str(if self_closing { "/>" } else { ">" });
}

/// Append an end tag to the collected fragment.
fn append_end_tag(dst: &mut String, name: quick_xml::name::QName) {
    dst.push_str("</");
    dst.push_str(&String::from_utf8_lossy(name.as_ref()));
    dst.push('>');
}

/// Helper to get an attribute value.
fn get_attr(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// Helper to get a boolean attribute value.
fn get_bool_attr(e: &quick_xml::events::BytesStart, key: &[u8]) -> Option<bool> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == key {
            let val = String::from_utf8_lossy(&attr.value);
            return Some(val != "0" && val != "false");
        }
    }
    None
}

/// Escape XML special characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
