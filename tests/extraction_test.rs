//! End-to-end extraction tests.
//!
//! Each test builds a minimal WordprocessingML package in memory, so the
//! suite needs no fixture files.

use docxtract::{extract_bytes, extract_file, Block, Error};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
    <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
        <w:name w:val="Normal"/>
    </w:style>
    <w:style w:type="paragraph" w:styleId="Heading1">
        <w:name w:val="Heading 1"/>
    </w:style>
</w:styles>"#;

/// Build a .docx package holding the given body content.
fn docx_with_body(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let mut buffer = Vec::new();
    let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(CONTENT_TYPES_XML.as_bytes()).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.start_file("word/styles.xml", options).unwrap();
    writer.write_all(STYLES_XML.as_bytes()).unwrap();
    writer.finish().unwrap();

    buffer
}

#[test]
fn paragraph_only_document_yields_one_block_per_paragraph() {
    let data = docx_with_body(
        r#"<w:p><w:r><w:t>one</w:t></w:r></w:p>
           <w:p><w:r><w:t>two</w:t></w:r></w:p>
           <w:p><w:r><w:t>three</w:t></w:r></w:p>"#,
    );
    let doc = extract_bytes(&data).unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.paragraph_count(), 3);
    assert_eq!(doc.table_count(), 0);

    let json = serde_json::to_value(&doc).unwrap();
    for block in json.as_array().unwrap() {
        assert_eq!(block["type"], "paragraph");
        // Runs without explicit formatting carry nulls, not false
        for run in block["content"].as_array().unwrap() {
            assert!(run["bold"].is_null());
            assert!(run["italic"].is_null());
            assert!(run["underline"].is_null());
            assert!(run["color"].is_null());
        }
    }
}

#[test]
fn empty_document_extracts_to_empty_sequence() {
    let data = docx_with_body("");
    let doc = extract_bytes(&data).unwrap();

    assert!(doc.is_empty());
    assert_eq!(doc.to_json_compact().unwrap(), "[]");
}

#[test]
fn body_order_is_preserved() {
    let data = docx_with_body(
        r#"<w:p><w:r><w:t>P1</w:t></w:r></w:p>
           <w:tbl><w:tr><w:tc><w:p><w:r><w:t>T</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
           <w:p><w:r><w:t>P2</w:t></w:r></w:p>"#,
    );
    let doc = extract_bytes(&data).unwrap();

    assert_eq!(doc.len(), 3);
    let Block::Paragraph(ref p1) = doc.blocks[0] else {
        panic!("expected paragraph first");
    };
    assert_eq!(p1.plain_text(), "P1");
    assert!(matches!(doc.blocks[1], Block::Table(_)));
    let Block::Paragraph(ref p2) = doc.blocks[2] else {
        panic!("expected paragraph last");
    };
    assert_eq!(p2.plain_text(), "P2");
}

#[test]
fn repeat_extraction_is_byte_identical() {
    let data = docx_with_body(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/><w:color w:val="1F4E79"/></w:rPr><w:t>Styled</w:t></w:r></w:p>
           <w:tbl><w:tr><w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
    );

    let first = extract_bytes(&data).unwrap().to_json_compact().unwrap();
    let second = extract_bytes(&data).unwrap().to_json_compact().unwrap();
    assert_eq!(first, second);
}

#[test]
fn cell_paragraphs_join_with_newline() {
    let data = docx_with_body(
        r#"<w:tbl><w:tr><w:tc>
             <w:p><w:r><w:t>Hello</w:t></w:r></w:p>
             <w:p><w:r><w:t>World</w:t></w:r></w:p>
           </w:tc></w:tr></w:tbl>"#,
    );
    let doc = extract_bytes(&data).unwrap();

    let Block::Table(ref table) = doc.blocks[0] else {
        panic!("expected table");
    };
    assert_eq!(table.content[0].cells[0].text, "Hello\nWorld");
}

#[test]
fn table_rows_and_cells_keep_order() {
    let data = docx_with_body(
        r#"<w:tbl>
             <w:tr>
               <w:tc><w:p><w:r><w:t>A1</w:t></w:r></w:p></w:tc>
               <w:tc><w:p><w:r><w:t>B1</w:t></w:r></w:p></w:tc>
             </w:tr>
             <w:tr>
               <w:tc><w:p><w:r><w:t>A2</w:t></w:r></w:p></w:tc>
               <w:tc><w:p><w:r><w:t>B2</w:t></w:r></w:p></w:tc>
             </w:tr>
           </w:tbl>"#,
    );
    let doc = extract_bytes(&data).unwrap();

    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json[0]["type"], "table");
    assert_eq!(json[0]["content"][0][0]["text"], "A1");
    assert_eq!(json[0]["content"][0][1]["text"], "B1");
    assert_eq!(json[0]["content"][1][0]["text"], "A2");
    assert_eq!(json[0]["content"][1][1]["text"], "B2");
    assert_eq!(json[0]["content"][0][0]["style"], "Normal");
}

#[test]
fn heading_with_bold_run_matches_wire_contract() {
    let data = docx_with_body(
        r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:b/></w:rPr><w:t>Title</w:t></w:r></w:p>"#,
    );
    let doc = extract_bytes(&data).unwrap();

    assert_eq!(
        doc.to_json_compact().unwrap(),
        r#"[{"type":"paragraph","style":"Heading 1","content":[{"text":"Title","bold":true,"italic":null,"underline":null,"color":null}]}]"#
    );
}

#[test]
fn missing_file_is_an_error_not_an_empty_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.docx");

    let result = extract_file(&path);
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn extract_file_roundtrips_through_disk() {
    let data = docx_with_body(r#"<w:p><w:r><w:t>on disk</w:t></w:r></w:p>"#);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.docx");
    std::fs::write(&path, &data).unwrap();

    let from_disk = extract_file(&path).unwrap();
    let from_memory = extract_bytes(&data).unwrap();
    assert_eq!(from_disk, from_memory);
    assert_eq!(from_disk.plain_text(), "on disk");
}

#[test]
fn non_word_package_is_rejected() {
    // A valid ZIP that is not a WordprocessingML package
    let mut buffer = Vec::new();
    let mut writer = ZipWriter::new(Cursor::new(&mut buffer));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("xl/workbook.xml", options).unwrap();
    writer.write_all(b"<workbook/>").unwrap();
    writer.finish().unwrap();

    let result = extract_bytes(&buffer);
    assert!(matches!(result, Err(Error::NotWordDocument(_))));
}

#[test]
fn truncated_archive_is_rejected() {
    let mut data = docx_with_body(r#"<w:p><w:r><w:t>x</w:t></w:r></w:p>"#);
    data.truncate(data.len() / 2);

    let result = extract_bytes(&data);
    assert!(result.is_err());
}

#[test]
fn explicit_off_toggles_survive_to_json() {
    let data = docx_with_body(
        r#"<w:p><w:r><w:rPr><w:b w:val="0"/><w:u w:val="none"/></w:rPr><w:t>plain-ish</w:t></w:r></w:p>"#,
    );
    let doc = extract_bytes(&data).unwrap();

    let json = serde_json::to_value(&doc).unwrap();
    let run = &json[0]["content"][0];
    assert_eq!(run["bold"], serde_json::Value::Bool(false));
    assert_eq!(run["underline"], serde_json::Value::Bool(false));
    assert!(run["italic"].is_null());
}
