//! Turns a [`TableSpec`](crate::report::grid::TableSpec) into genpdf
//! elements.
//!
//! Merged cells are realized by giving each grid row its own `TableLayout`
//! whose column weights are summed over the cell spans; because weights are
//! proportional to the same usable width, column edges line up across rows
//! and the stacked tables read as one grid.

use genpdf::elements::{Break, FrameCellDecorator, Image, LinearLayout, Paragraph, TableLayout};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element, Margins, Scale};
use image::GenericImageView;

use super::elements::{AnyElement, MinHeight, Shaded};
use super::grid::{Cell, CellAlign, CellBody, TableSpec};

/// Symmetric padding inside every cell; approximates the paper form's
/// middle vertical alignment for single-line rows.
const CELL_PADDING_MM: f64 = 2.5;

/// Height of the grey band behind header cells, matched to one padded line
/// of header text.
const HEADER_BAND_MM: f64 = 10.0;

const HEADER_BACKGROUND: Color = Color::Rgb(211, 211, 211);

/// Printed width of the photo; aspect ratio is preserved.
const PHOTO_WIDTH_MM: f64 = 50.8;

/// The engine sizes decoded images at this resolution; scaling starts from
/// the size it will assume.
const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;

/// Builds the bordered grid for the given spec.
pub fn layout_table(spec: TableSpec) -> Result<LinearLayout, Error> {
    spec.validate()
        .map_err(|msg| Error::new(msg, ErrorKind::InvalidData))?;

    let mut stack = LinearLayout::vertical();
    for row in spec.rows {
        let weights = row.weights();
        let header = row.header;
        let min_height_mm = row.min_height_mm;

        let mut table = TableLayout::new(weights);
        table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

        let mut builder = table.row();
        for cell in row.cells {
            builder.push_element(cell_element(cell, header, min_height_mm)?);
        }
        builder.push()?;

        stack.push(table);
    }
    Ok(stack)
}

fn cell_element(
    cell: Cell,
    header: bool,
    min_height_mm: Option<f64>,
) -> Result<AnyElement, Error> {
    let alignment = match cell.align {
        CellAlign::Left => Alignment::Left,
        CellAlign::Center => Alignment::Center,
    };

    let content = match cell.body {
        CellBody::Text(text) => AnyElement::new(Paragraph::new(text).aligned(alignment)),
        CellBody::Lines(lines) => {
            let mut layout = LinearLayout::vertical();
            for line in lines {
                if line.is_empty() {
                    layout.push(Break::new(1));
                } else {
                    layout.push(Paragraph::new(line).aligned(alignment));
                }
            }
            AnyElement::new(layout)
        }
        CellBody::Image(decoded) => AnyElement::new(photo_element(decoded)?),
    };

    let padded = content.padded(Margins::trbl(
        CELL_PADDING_MM,
        CELL_PADDING_MM,
        CELL_PADDING_MM,
        CELL_PADDING_MM,
    ));

    let mut element = if header {
        let mut label = Style::new();
        label.set_bold();
        AnyElement::new(Shaded::new(
            padded.styled(label),
            HEADER_BAND_MM,
            HEADER_BACKGROUND,
        ))
    } else {
        AnyElement::new(padded)
    };

    if let Some(mm) = min_height_mm {
        element = AnyElement::new(MinHeight::new(element, mm));
    }

    Ok(element)
}

fn photo_element(decoded: image::DynamicImage) -> Result<Image, Error> {
    let (px_width, _) = decoded.dimensions();
    // The engine lays the image out at DEFAULT_IMAGE_DPI; derive the scale
    // that makes it print at the fixed target width.
    let natural_width_mm = MM_PER_INCH * (px_width as f64) / DEFAULT_IMAGE_DPI;
    let mut element = Image::from_dynamic_image(decoded)?;
    element.set_alignment(Alignment::Center);
    if natural_width_mm > f64::EPSILON {
        let scale = PHOTO_WIDTH_MM / natural_width_mm;
        element.set_scale(Scale::new(scale, scale));
    }
    Ok(element)
}
