use super::model::{CompassState, Waypoint};
use crate::gui::icons;
use crate::gui::measure::{self, show_centered, show_leading};
use crate::gui::paint::{self, black, white};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gyre::angle::{Degrees, Radians};
use gyre::geometry::{Point, Rect, Size};
use gyre::rotation::WaypointTransform;
use std::f64::consts::TAU;
use std::time::Duration;

const CORNER_RADIUS: f64 = 50.0;
const MARGIN: f64 = 40.0;
const GRABBER: Size = Size {
    width: 40.0,
    height: 5.0,
};
const ROW_SPACING: f64 = 42.0;
const CAPTION_FONT_SIZE: f64 = 11.0;
const ROW_FONT_SIZE: f64 = 15.0;
const ARROW_DIAMETER: f64 = 93.0;
const CARD_DIAMETER: f64 = 120.0;
const CARD_SPACING: f64 = 24.0;
const CARD_DOT_DIAMETER: f64 = 28.0;
const CARD_ICON_SIZE: f64 = 16.0;

/// Bottom sheet with info rows, the heading arrow and waypoint cards.
pub fn draw(
    cr: &Context,
    state: &CompassState,
    canvas: Size,
    now: Duration,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let top = state.sheet_top_at(now);
    if top >= canvas.height {
        return Ok(());
    }

    let panel = Rect::new(
        Point::new(0.0, top),
        Size::new(canvas.width, canvas.height - top + CORNER_RADIUS),
    );
    paint::set_color(cr, black(0.75));
    paint::rounded_rect(cr, panel, CORNER_RADIUS);
    cr.fill()?;
    paint::set_color(cr, white(0.15));
    cr.set_line_width(1.0);
    paint::rounded_rect(cr, panel, CORNER_RADIUS);
    cr.stroke()?;

    let grabber = Rect::centered(Point::new(canvas.width / 2.0, top + 12.0), GRABBER);
    paint::set_color(cr, white(0.3));
    paint::rounded_rect(cr, grabber, GRABBER.height / 2.0);
    cr.fill()?;

    cr.push_group();
    let column = canvas.width / 2.0;
    let bottom = draw_info(cr, state, Point::new(MARGIN, top + MARGIN + 10.0), colors)?;
    let arrow_center = Point::new(
        MARGIN + ARROW_DIAMETER / 2.0,
        bottom + 20.0 + ARROW_DIAMETER / 2.0,
    );
    draw_arrow(cr, arrow_center, state.needle_angle(now), colors)?;
    draw_waypoints(cr, state, Point::new(column + 20.0, top + MARGIN + 10.0), colors)?;
    cr.pop_group_to_source()?;
    cr.paint_with_alpha(state.presentation(now).clamp(0.0, 1.0))
}

/// Returns the y just below the last row.
fn draw_info(
    cr: &Context,
    state: &CompassState,
    origin: Point,
    colors: &ThemeColors,
) -> Result<f64, cairo::Error> {
    let mut y = origin.y;
    for row in &state.info {
        paint::set_color(cr, paint::with_alpha(colors.ink, 0.5));
        measure::select_font(cr, false, CAPTION_FONT_SIZE);
        show_leading(cr, &row.title.to_uppercase(), origin.x, y)?;

        paint::set_color(cr, colors.ink);
        measure::select_font(cr, true, ROW_FONT_SIZE);
        show_leading(cr, &row.text, origin.x, y + ROW_FONT_SIZE + 4.0)?;
        y += ROW_SPACING;
    }
    Ok(y)
}

/// Dashed dial with an arrow pointing along the heading.
fn draw_arrow(
    cr: &Context,
    center: Point,
    needle: Degrees,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let radius = ARROW_DIAMETER / 2.0;
    paint::fill_circle(cr, center, radius, black(0.4))?;
    paint::dashed_ring(cr, center, radius, 6.0, &[1.0, 2.0], white(0.3))?;
    paint::stroke_circle(cr, center, radius - 12.0, 1.0, white(0.2))?;

    paint::rotated(cr, center, needle, |cr| {
        let tip = Point::new(center.x, center.y - radius * 0.6);
        let tail = Point::new(center.x, center.y + radius * 0.35);
        paint::set_color(cr, colors.ink);
        cr.move_to(tip.x, tip.y);
        cr.line_to(center.x + radius * 0.25, tail.y);
        cr.line_to(center.x, center.y + radius * 0.15);
        cr.line_to(center.x - radius * 0.25, tail.y);
        cr.close_path();
        cr.fill()
    })
}

fn draw_waypoints(
    cr: &Context,
    state: &CompassState,
    origin: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    paint::set_color(cr, paint::with_alpha(colors.ink, 0.5));
    measure::select_font(cr, false, CAPTION_FONT_SIZE);
    show_leading(cr, "WAYPOINTS", origin.x, origin.y)?;

    let snapshot = state.snapshot();
    let mut center = Point::new(
        origin.x + CARD_DIAMETER / 2.0,
        origin.y + 16.0 + CARD_DIAMETER / 2.0,
    );
    for waypoint in &state.waypoints {
        let transform = WaypointTransform::for_heading(waypoint.bearing, &snapshot);
        draw_card(cr, waypoint, center, &transform, colors)?;
        center.y += CARD_DIAMETER + CARD_SPACING;
    }
    Ok(())
}

/// A ring carrying a coloured dot. The ring turns by the marker angle and
/// the icon inside the dot turns back by the icon angle.
fn draw_card(
    cr: &Context,
    waypoint: &Waypoint,
    center: Point,
    transform: &WaypointTransform,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let radius = CARD_DIAMETER / 2.0;
    paint::stroke_circle(cr, center, radius, 1.0, white(0.2))?;
    paint::dashed_ring(cr, center, radius - 4.0, 4.0, &[1.0, 4.0], white(0.15))?;

    // Dot frame sits in the top-left corner of the card's square.
    let dot_r = CARD_DOT_DIAMETER / 2.0;
    let inset = radius - dot_r;
    let dot_offset = (inset * inset * 2.0).sqrt();
    let dot_bearing = Radians::new(TAU * 7.0 / 8.0);

    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(transform.marker.to_radians().value());
    let dot = Point::on_circle(Point::ORIGIN, dot_offset, dot_bearing);
    paint::fill_circle(cr, dot, dot_r, waypoint.color)?;
    cr.translate(dot.x, dot.y);
    cr.rotate(transform.icon.to_radians().value());
    icons::draw_icon(cr, &waypoint.icon, Point::ORIGIN, CARD_ICON_SIZE, white(1.0))?;
    cr.restore()?;

    paint::set_color(cr, colors.ink);
    measure::select_font(cr, true, 13.0);
    show_centered(cr, &waypoint.title, Point::new(center.x, center.y - 10.0))?;
    paint::set_color(cr, paint::with_alpha(colors.ink, 0.6));
    measure::select_font(cr, false, 9.0);
    show_centered(cr, &waypoint.latitude, Point::new(center.x, center.y + 8.0))?;
    show_centered(cr, &waypoint.longitude, Point::new(center.x, center.y + 20.0))
}
