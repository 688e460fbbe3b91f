use cairo::{Context, FontSlant, FontWeight};
use gyre::arc_text::GlyphMeasure;
use gyre::geometry::Point;

pub const FONT_FAMILY: &str = "Sans";
pub const MONO_FAMILY: &str = "Monospace";

fn select(cr: &Context, family: &str, bold: bool, size: f64) {
    let weight = if bold {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };
    cr.select_font_face(family, FontSlant::Normal, weight);
    cr.set_font_size(size);
}

pub fn select_font(cr: &Context, bold: bool, size: f64) {
    select(cr, FONT_FAMILY, bold, size);
}

pub fn select_mono(cr: &Context, size: f64) {
    select(cr, MONO_FAMILY, true, size);
}

/// Measures glyph advances with the context's current font.
pub struct CairoMeasure<'a> {
    cr: &'a Context,
}

impl<'a> CairoMeasure<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }
}

impl GlyphMeasure for CairoMeasure<'_> {
    fn advance(&self, ch: char) -> Option<f64> {
        let mut buf = [0u8; 4];
        match self.cr.text_extents(ch.encode_utf8(&mut buf)) {
            Ok(ext) => Some(ext.x_advance()),
            Err(e) => {
                log::debug!("could not measure '{}': {}", ch, e);
                None
            }
        }
    }
}

/// Draws `text` with its ink box centered on `at`.
pub fn show_centered(cr: &Context, text: &str, at: Point) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        at.x - ext.x_bearing() - ext.width() / 2.0,
        at.y - ext.y_bearing() - ext.height() / 2.0,
    );
    cr.show_text(text)
}

/// Draws `text` with its left edge at `x` and baseline at `baseline`.
pub fn show_leading(cr: &Context, text: &str, x: f64, baseline: f64) -> Result<(), cairo::Error> {
    cr.move_to(x, baseline);
    cr.show_text(text)
}
