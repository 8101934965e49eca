//! Custom genpdf elements used by the table layout routine.

use genpdf::error::Error;
use genpdf::render;
use genpdf::style::{Color, Style};
use genpdf::{Context, Element, Mm, Position, RenderResult};

/// A boxed element, so heterogeneous cell contents can flow through one
/// concrete type.
pub struct AnyElement {
    inner: Box<dyn Element>,
}

impl AnyElement {
    pub fn new(element: impl Element + 'static) -> Self {
        Self {
            inner: Box::new(element),
        }
    }
}

impl Element for AnyElement {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        self.inner.render(context, area, style)
    }
}

/// Reserves a minimum height for its inner element. Used for the
/// inspection-notes row, which must keep its paper-form height even when the
/// status text is short.
pub struct MinHeight<E: Element> {
    inner: E,
    min_height_mm: f64,
}

impl<E: Element> MinHeight<E> {
    pub fn new(inner: E, min_height_mm: f64) -> Self {
        Self {
            inner,
            min_height_mm,
        }
    }
}

impl<E: Element> Element for MinHeight<E> {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        // Never claim more than the remaining page area.
        let mut reserved = Mm::from(self.min_height_mm);
        if reserved > area.size().height {
            reserved = area.size().height;
        }
        let mut result = self.inner.render(context, area, style)?;
        if result.size.height < reserved {
            result.size.height = reserved;
        }
        Ok(result)
    }
}

/// Paints a background band behind its inner element by stroking one thick
/// horizontal line before the content is rendered. The band height is fixed,
/// matched to the single-line header rows it decorates.
pub struct Shaded<E: Element> {
    inner: E,
    band_height_mm: f64,
    color: Color,
}

impl<E: Element> Shaded<E> {
    pub fn new(inner: E, band_height_mm: f64, color: Color) -> Self {
        Self {
            inner,
            band_height_mm,
            color,
        }
    }
}

impl<E: Element> Element for Shaded<E> {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut band = Mm::from(self.band_height_mm);
        if band > area.size().height {
            band = area.size().height;
        }
        let middle = band / 2.0;
        area.draw_line(
            vec![
                Position::new(0, middle),
                Position::new(area.size().width, middle),
            ],
            Style::new().with_color(self.color),
        );

        self.inner.render(context, area, style)
    }
}
