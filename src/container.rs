//! ZIP container abstraction for WordprocessingML packages.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Byte order of a UTF-16 encoded part.
#[derive(Clone, Copy)]
enum Utf16Order {
    Le,
    Be,
}

/// Rewrite the XML declaration after a UTF-16 part has been decoded.
///
/// The decoded String is UTF-8, but the declaration still claims UTF-16,
/// which makes quick-xml reject the content. Only the declaration is
/// touched.
fn rewrite_encoding_declaration(content: &str) -> String {
    let Some(end_decl) = content
        .starts_with("<?xml")
        .then(|| content.find("?>"))
        .flatten()
    else {
        return content.to_string();
    };

    let mut decl = content[..end_decl + 2].to_string();
    for spelled in ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"] {
        let quote = &spelled[..1];
        decl = decl.replace(
            &format!("encoding={}", spelled),
            &format!("encoding={0}UTF-8{0}", quote),
        );
    }
    format!("{}{}", decl, &content[end_decl + 2..])
}

/// Decode XML part bytes, handling UTF-8 and UTF-16 LE/BE encodings.
///
/// WordprocessingML parts are almost always UTF-8; UTF-16 shows up in
/// documents produced by some older generators, BOM-marked or not.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => {
            String::from_utf8(rest.to_vec()).map_err(|e| Error::Encoding(e.to_string()))
        }
        [0xFF, 0xFE, rest @ ..] => {
            decode_utf16(rest, Utf16Order::Le).map(|s| rewrite_encoding_declaration(&s))
        }
        [0xFE, 0xFF, rest @ ..] => {
            decode_utf16(rest, Utf16Order::Be).map(|s| rewrite_encoding_declaration(&s))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(s) => Ok(s),
            // BOM-less UTF-16 puts the null byte of ASCII code points on one
            // side consistently; use the first two code units to pick a side.
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                decode_utf16(bytes, Utf16Order::Le)
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                decode_utf16(bytes, Utf16Order::Be)
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

/// Decode UTF-16 bytes to a String; a trailing odd byte is dropped.
fn decode_utf16(bytes: &[u8], order: Utf16Order) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| match order {
        Utf16Order::Le => u16::from_le_bytes([pair[0], pair[1]]),
        Utf16Order::Be => u16::from_be_bytes([pair[0], pair[1]]),
    });

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Encoding(e.to_string()))
}

/// Container abstraction over the ZIP archive of a .docx package.
///
/// Provides read access to the XML parts of the package. The archive is held
/// entirely in memory; the container never touches the filesystem after
/// construction.
pub struct DocxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl DocxContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use docxtract::container::DocxContainer;
    ///
    /// let container = DocxContainer::open("document.docx")?;
    /// # Ok::<(), docxtract::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let mut reader = BufReader::new(file);
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Create a container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let cursor = Cursor::new(data);
        let archive = zip::ZipArchive::new(cursor)?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a container from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part from the archive as a string.
    ///
    /// Handles different encodings:
    /// - UTF-8 (with or without BOM)
    /// - UTF-16 LE (with BOM: FF FE)
    /// - UTF-16 BE (with BOM: FE FF)
    pub fn read_xml(&self, part: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(part)
            .map_err(|_| Error::MissingComponent(part.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        decode_xml_bytes(&bytes)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, part: &str) -> bool {
        let archive = self.archive.borrow();
        archive.file_names().any(|n| n == part)
    }

    /// List all parts in the archive.
    pub fn part_names(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}
