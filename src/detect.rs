//! Validation that an input is a WordprocessingML package.

use crate::container::decode_xml_bytes;
use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// ZIP file magic bytes: PK\x03\x04
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Content type for the DOCX main document part.
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

/// Verify that the file at `path` is a Word document package.
///
/// Reads the file, checks the ZIP container, and inspects
/// `[Content_Types].xml` to confirm the package holds a WordprocessingML
/// main document.
///
/// # Example
///
/// ```no_run
/// use docxtract::detect::ensure_docx_path;
///
/// ensure_docx_path("document.docx")?;
/// # Ok::<(), docxtract::Error>(())
/// ```
pub fn ensure_docx_path(path: impl AsRef<Path>) -> Result<()> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    ensure_docx_reader(reader)
}

/// Verify that a byte slice is a Word document package.
pub fn ensure_docx_bytes(data: &[u8]) -> Result<()> {
    if !is_zip_file(data) {
        return Err(Error::NotWordDocument(
            "missing ZIP signature".to_string(),
        ));
    }

    let cursor = std::io::Cursor::new(data);
    ensure_docx_reader(cursor)
}

/// Verify that a reader yields a Word document package.
pub fn ensure_docx_reader<R: Read + Seek>(reader: R) -> Result<()> {
    let mut archive = zip::ZipArchive::new(reader)?;

    let content_types = match archive.by_name("[Content_Types].xml") {
        Ok(mut file) => {
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            decode_xml_bytes(&bytes)?
        }
        Err(_) => {
            return Err(Error::MissingComponent("[Content_Types].xml".to_string()));
        }
    };

    if content_types.contains(DOCX_CONTENT_TYPE) {
        return Ok(());
    }

    // Fallback: some producers omit the Override entry but still lay the
    // package out under word/.
    let has_main_document = archive.file_names().any(|n| n == "word/document.xml");
    if has_main_document {
        Ok(())
    } else {
        Err(Error::NotWordDocument(
            "package does not contain a WordprocessingML main document".to_string(),
        ))
    }
}

/// Check if data starts with ZIP magic bytes.
pub fn is_zip_file(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == ZIP_MAGIC
}
