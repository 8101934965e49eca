//! Assembles the equipment-status report PDF.

use std::path::Path;

use chrono::{DateTime, Local};
use genpdf::elements::{Break, Paragraph};
use genpdf::style::Style;
use genpdf::{Alignment, Element, Margins, SimplePageDecorator, Size};

use crate::submission::record::SubmissionRecord;

use super::fonts;
use super::grid::{self, CellBody};
use super::layout;

// Landscape A4.
const PAGE_WIDTH_MM: f64 = 297.0;
const PAGE_HEIGHT_MM: f64 = 210.0;
const PAGE_MARGIN_MM: f64 = 15.0;

const BODY_FONT_SIZE: u8 = 10;
const TITLE_FONT_SIZE: u8 = 20;
const STAMP_FONT_SIZE: u8 = 9;

pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub filename: String,
}

#[derive(Debug)]
pub enum RenderError {
    /// No usable font could be resolved.
    Fonts(String),
    /// The layout engine itself failed.
    Engine(genpdf::error::Error),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Fonts(msg) => write!(f, "font resolution failed: {msg}"),
            RenderError::Engine(err) => write!(f, "PDF engine error: {err}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Fonts(_) => None,
            RenderError::Engine(err) => Some(err),
        }
    }
}

impl From<genpdf::error::Error> for RenderError {
    fn from(err: genpdf::error::Error) -> Self {
        RenderError::Engine(err)
    }
}

/// Renders the report with the current local time as the generation stamp.
pub fn render_now(
    record: &SubmissionRecord,
    image: Option<&[u8]>,
    font_dir: &Path,
) -> Result<RenderedReport, RenderError> {
    render(record, image, font_dir, Local::now())
}

/// Renders one report. The timestamp is a parameter so callers derive it and
/// tests can pin it.
pub fn render(
    record: &SubmissionRecord,
    image: Option<&[u8]>,
    font_dir: &Path,
    generated_at: DateTime<Local>,
) -> Result<RenderedReport, RenderError> {
    let resolved = fonts::resolve(font_dir).map_err(RenderError::Fonts)?;

    let mut doc = genpdf::Document::new(resolved.family);
    doc.set_title(grid::REPORT_TITLE);
    doc.set_font_size(BODY_FONT_SIZE);
    doc.set_paper_size(Size::new(PAGE_WIDTH_MM, PAGE_HEIGHT_MM));

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(Margins::trbl(
        PAGE_MARGIN_MM,
        PAGE_MARGIN_MM,
        PAGE_MARGIN_MM,
        PAGE_MARGIN_MM,
    ));
    doc.set_page_decorator(decorator);

    let mut title_style = Style::new();
    title_style.set_font_size(TITLE_FONT_SIZE);
    doc.push(
        Paragraph::new(grid::REPORT_TITLE)
            .aligned(Alignment::Center)
            .styled(title_style),
    );
    doc.push(Break::new(1));

    let spec = grid::report_grid(record, photo_body(image));
    doc.push(layout::layout_table(spec)?);

    doc.push(Break::new(1));
    let mut stamp_style = Style::new();
    stamp_style.set_font_size(STAMP_FONT_SIZE);
    doc.push(
        Paragraph::new(format!(
            "작성일시: {}",
            generated_at.format("%Y-%m-%d %H:%M")
        ))
        .aligned(Alignment::Right)
        .styled(stamp_style),
    );

    let mut bytes = Vec::new();
    doc.render(&mut bytes)?;

    Ok(RenderedReport {
        bytes,
        filename: record.filename(),
    })
}

/// Decides the photo cell content. Decode failures degrade to a placeholder
/// label; the textual report always renders.
fn photo_body(image: Option<&[u8]>) -> CellBody {
    match image {
        None => CellBody::Text(grid::NO_PHOTO_LABEL.to_string()),
        Some(bytes) => match image::load_from_memory(bytes) {
            Ok(decoded) => CellBody::Image(decoded),
            Err(e) => {
                tracing::warn!("Attached photo could not be decoded: {e}");
                CellBody::Text(grid::PHOTO_ERROR_LABEL.to_string())
            }
        },
    }
}
