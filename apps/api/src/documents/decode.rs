//! Upload decoding: turns an uploaded file into plain text.
//!
//! The decoder is chosen by file extension (case-insensitive):
//! - `.txt`  → strict UTF-8
//! - `.docx` → `word/document.xml`, one line per paragraph
//! - `.pdf`  → `pdf-extract`
//! - `.pptx` → `ppt/slides/slideN.xml` in slide order, one entry per text shape
//!
//! All functions here are synchronous and CPU-bound; callers run them inside
//! `tokio::task::spawn_blocking`.

use std::io::{Cursor, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("File is not valid UTF-8 text: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    #[error("Malformed {format} file: {message}")]
    Corrupt {
        format: &'static str,
        message: String,
    },
}

impl DecodingError {
    fn corrupt(format: &'static str, err: impl std::fmt::Display) -> Self {
        DecodingError::Corrupt {
            format,
            message: err.to_string(),
        }
    }
}

/// Supported upload kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Text,
    Docx,
    Pdf,
    Pptx,
}

impl UploadFormat {
    /// Resolves the format from a filename's extension.
    pub fn from_filename(filename: &str) -> Result<Self, DecodingError> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_lowercase()))
            .unwrap_or_default();

        match extension.as_str() {
            ".txt" => Ok(UploadFormat::Text),
            ".docx" => Ok(UploadFormat::Docx),
            ".pdf" => Ok(UploadFormat::Pdf),
            ".pptx" => Ok(UploadFormat::Pptx),
            _ => Err(DecodingError::UnsupportedFormat(extension)),
        }
    }
}

/// Extracts plain text from an uploaded file.
pub fn extract_text(filename: &str, bytes: &[u8]) -> Result<String, DecodingError> {
    match UploadFormat::from_filename(filename)? {
        UploadFormat::Text => Ok(String::from_utf8(bytes.to_vec())?),
        UploadFormat::Docx => extract_docx(bytes),
        UploadFormat::Pdf => catch_decoder_panic("PDF", || {
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| DecodingError::corrupt("PDF", e))
        }),
        UploadFormat::Pptx => extract_pptx(bytes),
    }
}

/// Runs a third-party decoder, reporting a panic on malformed input as a
/// corrupt file instead of letting it unwind into the worker.
fn catch_decoder_panic<T>(
    format: &'static str,
    decode: impl FnOnce() -> Result<T, DecodingError>,
) -> Result<T, DecodingError> {
    panic::catch_unwind(AssertUnwindSafe(decode)).unwrap_or_else(|payload| {
        let reason = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "decoder panicked".to_string());
        Err(DecodingError::corrupt(format, reason))
    })
}

fn extract_docx(bytes: &[u8]) -> Result<String, DecodingError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| DecodingError::corrupt("DOCX", e))?;
    let xml = read_entry(&mut archive, "word/document.xml", "DOCX")?;
    let paragraphs = collect_paragraphs(&xml, "DOCX")?;
    Ok(paragraphs.join("\n"))
}

fn extract_pptx(bytes: &[u8]) -> Result<String, DecodingError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| DecodingError::corrupt("PPTX", e))?;

    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| {
            let number = name
                .strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse::<u32>()
                .ok()?;
            Some((number, name.to_string()))
        })
        .collect();
    slides.sort_by_key(|(number, _)| *number);

    let mut shapes = Vec::new();
    for (_, name) in slides {
        let xml = read_entry(&mut archive, &name, "PPTX")?;
        shapes.extend(collect_shape_texts(&xml)?);
    }
    Ok(shapes.join("\n"))
}

fn read_entry(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
    format: &'static str,
) -> Result<String, DecodingError> {
    let mut entry = archive
        .by_name(name)
        .map_err(|e| DecodingError::corrupt(format, format!("{name}: {e}")))?;
    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| DecodingError::corrupt(format, e))?;
    Ok(xml)
}

/// Collects the text of every `<*:p>` paragraph from text runs (`<*:t>`).
/// Tabs and line breaks inside a paragraph are kept.
fn collect_paragraphs(xml: &str, format: &'static str) -> Result<Vec<String>, DecodingError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader
            .read_event()
            .map_err(|e| DecodingError::corrupt(format, e))?
        {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match (e.local_name().as_ref(), current.as_mut()) {
                (b"tab", Some(p)) => p.push('\t'),
                (b"br", Some(p)) => p.push('\n'),
                (b"p", None) => paragraphs.push(String::new()),
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(p) = current.as_mut() {
                    let text = t.unescape().map_err(|e| DecodingError::corrupt(format, e))?;
                    p.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.extend(current.take()),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(paragraphs)
}

/// Collects one string per text-bearing shape (`<p:sp>` with a `<p:txBody>`),
/// paragraphs joined by newline. Shapes without a text body are skipped.
fn collect_shape_texts(xml: &str) -> Result<Vec<String>, DecodingError> {
    let mut reader = Reader::from_str(xml);
    let mut shapes = Vec::new();
    let mut in_shape = false;
    let mut body: Option<Vec<String>> = None;
    let mut paragraph: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader
            .read_event()
            .map_err(|e| DecodingError::corrupt("PPTX", e))?
        {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sp" => {
                    in_shape = true;
                    body = None;
                }
                b"txBody" if in_shape => body = Some(Vec::new()),
                b"p" if body.is_some() => paragraph = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"br" => {
                    if let Some(p) = paragraph.as_mut() {
                        p.push('\n');
                    }
                }
                b"p" => {
                    if let Some(b) = body.as_mut() {
                        b.push(String::new());
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| DecodingError::corrupt("PPTX", e))?;
                    p.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let (Some(b), Some(p)) = (body.as_mut(), paragraph.take()) {
                        b.push(p);
                    }
                }
                b"sp" => {
                    in_shape = false;
                    shapes.extend(body.take().map(|b| b.join("\n")));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(shapes)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Builds an in-memory ZIP container with the given entries.
    pub fn zip_with(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub const DOCX_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Quarterly</w:t></w:r><w:r><w:t xml:space="preserve"> report &amp; plan</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Revenue</w:t><w:tab/><w:t>up</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    /// One `<p:sp>` per entry; paragraphs within a shape are separated by `\n`.
    pub fn slide_xml(shapes: &[&str]) -> String {
        let body: String = shapes
            .iter()
            .map(|shape| {
                let ps: String = shape
                    .split('\n')
                    .map(|p| format!("<a:p><a:r><a:t>{p}</a:t></a:r></a:p>"))
                    .collect();
                format!("<p:sp><p:nvSpPr/><p:txBody><a:bodyPr/>{ps}</p:txBody></p:sp>")
            })
            .collect();
        format!(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main"><p:cSld><p:spTree><p:sp><p:nvSpPr/></p:sp>{body}</p:spTree></p:cSld></p:sld>"#
        )
    }
}
