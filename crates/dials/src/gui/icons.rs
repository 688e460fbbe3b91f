use crate::gui::measure::{self, show_centered};
use crate::gui::paint;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use gyre::geometry::Point;
use gyre::icon::{self, IconName};
use palette::Srgba;
use std::cell::RefCell;
use std::collections::HashMap;

/// Pixel size icons are rasterised at before scaling.
pub const ICON_SIZE: i32 = 64;

thread_local! {
    static PIXBUFS: RefCell<HashMap<IconName, Option<Pixbuf>>> = RefCell::new(HashMap::new());
}

fn load_pixbuf(name: &IconName) -> Option<Pixbuf> {
    let path = icon::find_icon_path(name, ICON_SIZE as u16)?;
    Pixbuf::from_file_at_scale(&path, ICON_SIZE, ICON_SIZE, true)
        .map_err(|e| log::warn!("Failed to load icon '{}': {}", path.display(), e))
        .ok()
}

pub fn pixbuf(name: &IconName) -> Option<Pixbuf> {
    PIXBUFS.with(|cache| {
        cache
            .borrow_mut()
            .entry(name.clone())
            .or_insert_with(|| load_pixbuf(name))
            .clone()
    })
}

pub fn clear() {
    PIXBUFS.with(|cache| cache.borrow_mut().clear());
    icon::clear_cache();
}

/// Draws the themed icon centered on `center`, or its fallback letter.
pub fn draw_icon(
    cr: &Context,
    name: &IconName,
    center: Point,
    size: f64,
    fallback: Srgba<f64>,
) -> Result<(), cairo::Error> {
    if let Some(pixbuf) = pixbuf(name) {
        let scale = size / pixbuf.width().max(pixbuf.height()).max(1) as f64;
        let (w, h) = (
            pixbuf.width() as f64 * scale,
            pixbuf.height() as f64 * scale,
        );
        cr.save()?;
        cr.translate(center.x - w / 2.0, center.y - h / 2.0);
        cr.scale(scale, scale);
        cr.set_source_pixbuf(&pixbuf, 0.0, 0.0);
        cr.paint()?;
        return cr.restore();
    }

    let Some(glyph) = name.fallback_glyph() else {
        return Ok(());
    };
    paint::set_color(cr, fallback);
    measure::select_font(cr, true, size * 0.6);
    show_centered(cr, &glyph.to_string(), center)
}
