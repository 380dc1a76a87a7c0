//! PDF serialization of a `PaginatedDocument`.
//!
//! One page object per paginated page, all sharing a single Helvetica
//! (WinAnsiEncoding) font resource. Each drawn line is placed with an absolute
//! text matrix, so line positions in the file match the paginator exactly.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};
use thiserror::Error;

use crate::layout::font_metrics::{win_ansi_code, PageGeometry};
use crate::layout::paginator::{DrawnLine, Page, PaginatedDocument};

const FONT_RESOURCE: &[u8] = b"F1";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to encode page content: {0}")]
    Content(String),

    #[error("failed to write PDF: {0}")]
    Write(String),
}

/// Renders the document to PDF bytes.
pub fn render_pdf(doc: &PaginatedDocument) -> Result<Vec<u8>, RenderError> {
    let mut pdf = Document::with_version("1.5");
    let pages_id = pdf.new_object_id();

    let font_id = pdf.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = pdf.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let geometry = doc.geometry;
    let mut kids: Vec<Object> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let content = page_content(page, &geometry);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;
        let content_id = pdf.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(geometry.page_width),
                Object::Real(geometry.page_height),
            ],
        }),
    );

    let catalog_id = pdf.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    pdf.trailer.set("Root", Object::Reference(catalog_id));
    pdf.compress();

    let mut buffer = Vec::new();
    pdf.save_to(&mut buffer)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(buffer)
}

fn page_content(page: &Page, geometry: &PageGeometry) -> Content {
    if page.lines.is_empty() {
        return Content {
            operations: Vec::new(),
        };
    }

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(FONT_RESOURCE.to_vec()),
                Object::Real(geometry.font_size),
            ],
        ),
    ];
    operations.extend(page.lines.iter().flat_map(line_operations));
    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

fn line_operations(line: &DrawnLine) -> [Operation; 2] {
    [
        Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                Object::Real(line.x),
                Object::Real(line.y),
            ],
        ),
        Operation::new(
            "Tj",
            vec![Object::String(
                encode_win_ansi(&line.text),
                StringFormat::Literal,
            )],
        ),
    ]
}

/// Maps text to single-byte WinAnsi codes. Characters without a WinAnsi glyph
/// become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_code(c).unwrap_or(b'?'))
        .collect()
}
