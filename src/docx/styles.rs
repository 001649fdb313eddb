//! DOCX style name resolution.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Fallback style name when a document carries no usable style table.
const FALLBACK_STYLE_NAME: &str = "Normal";

/// Style names parsed from word/styles.xml.
///
/// Maps style IDs (e.g. "Heading1") to their display names (e.g.
/// "Heading 1") and tracks the default paragraph style, which applies to
/// every paragraph without an explicit `w:pStyle`.
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    /// Display names by style ID
    names: HashMap<String, String>,
    /// ID of the default paragraph style
    default_paragraph: Option<String>,
}

impl StyleMap {
    /// Parse style names from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        // Handle empty content
        if xml.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut map = StyleMap::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_id: Option<String> = None;
        let mut current_is_default = false;
        let mut current_is_paragraph = false;
        let mut current_name = String::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Start(ref e)) => {
                    if e.name().as_ref() == b"w:style" {
                        current_id = None;
                        current_is_default = false;
                        current_is_paragraph = false;
                        current_name.clear();
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"w:styleId" => {
                                    current_id =
                                        Some(String::from_utf8_lossy(&attr.value).to_string());
                                }
                                b"w:type" => {
                                    current_is_paragraph =
                                        String::from_utf8_lossy(&attr.value) == "paragraph";
                                }
                                b"w:default" => {
                                    let val = String::from_utf8_lossy(&attr.value);
                                    current_is_default = val == "1" || val == "true";
                                }
                                _ => {}
                            }
                        }
                    }
                }
                Ok(quick_xml::events::Event::Empty(ref e)) => {
                    if e.name().as_ref() == b"w:name" && current_id.is_some() {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"w:val" {
                                current_name =
                                    String::from_utf8_lossy(&attr.value).to_string();
                            }
                        }
                    }
                }
                Ok(quick_xml::events::Event::End(ref e)) => {
                    if e.name().as_ref() == b"w:style" {
                        if let Some(id) = current_id.take() {
                            if current_is_default && current_is_paragraph {
                                map.default_paragraph = Some(id.clone());
                            }
                            if !current_name.is_empty() {
                                map.names.insert(id, std::mem::take(&mut current_name));
                            }
                        }
                        current_name.clear();
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Resolve a style ID to its display name.
    ///
    /// Unknown IDs resolve to the ID itself so that documents referencing
    /// styles missing from the style table still round-trip something
    /// meaningful.
    pub fn display_name(&self, style_id: &str) -> String {
        self.names
            .get(style_id)
            .cloned()
            .unwrap_or_else(|| style_id.to_string())
    }

    /// Name of the default paragraph style, applied when a paragraph has no
    /// explicit style reference.
    pub fn default_style_name(&self) -> String {
        match self.default_paragraph {
            Some(ref id) => self.display_name(id),
            None => FALLBACK_STYLE_NAME.to_string(),
        }
    }

    /// Number of named styles.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the style table is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
        <w:name w:val="Normal"/>
    </w:style>
    <w:style w:type="paragraph" w:styleId="Heading1">
        <w:name w:val="Heading 1"/>
        <w:basedOn w:val="Normal"/>
    </w:style>
    <w:style w:type="character" w:styleId="Emphasis">
        <w:name w:val="Emphasis"/>
    </w:style>
</w:styles>"#;

    #[test]
    fn test_parse_styles() {
        let map = StyleMap::parse(STYLES_XML).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.display_name("Heading1"), "Heading 1");
        assert_eq!(map.display_name("Normal"), "Normal");
    }

    #[test]
    fn test_default_paragraph_style() {
        let map = StyleMap::parse(STYLES_XML).unwrap();
        assert_eq!(map.default_style_name(), "Normal");
    }

    #[test]
    fn test_unknown_id_falls_back_to_id() {
        let map = StyleMap::parse(STYLES_XML).unwrap();
        assert_eq!(map.display_name("Mystery"), "Mystery");
    }

    #[test]
    fn test_empty_input() {
        let map = StyleMap::parse("").unwrap();
        assert!(map.is_empty());
        assert_eq!(map.default_style_name(), "Normal");
    }

    #[test]
    fn test_character_default_is_not_paragraph_default() {
        let xml = r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:style w:type="character" w:default="1" w:styleId="DefaultFont">
                <w:name w:val="Default Paragraph Font"/>
            </w:style>
        </w:styles>"#;
        let map = StyleMap::parse(xml).unwrap();
        assert_eq!(map.default_style_name(), "Normal");
    }
}
