use super::model::ClockState;
use super::{
    CASE_DIAMETERS, CENTER_DOT_RADIUS, HOUR_HAND, HandShape, ICON_DISPLAY_SIZE, ICON_FRAME,
    MINUTE_FONT_SIZE, MINUTE_FRAME, MINUTE_HAND, NUMERAL_FONT_SIZE, NUMERAL_FRAME, TICK_DASH,
    TICK_RING_DIAMETER,
};
use crate::gui::icons;
use crate::gui::measure::{self, show_centered};
use crate::gui::paint::{self, black, white};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gyre::angle::Degrees;
use gyre::geometry::{Point, Rect, Size};
use gyre::placement;
use palette::Srgba;
use std::time::Duration;

pub fn draw(
    cr: &Context,
    state: &ClockState,
    canvas: Size,
    now: Duration,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let center = Rect::new(Point::ORIGIN, canvas).mid();

    draw_background(cr, canvas)?;
    draw_case(cr, center, colors)?;
    draw_numerals(cr, state, center, colors)?;
    draw_icons(cr, state, center, colors)?;
    paint::dashed_ring(
        cr,
        center,
        TICK_RING_DIAMETER / 2.0,
        10.0,
        &TICK_DASH,
        white(0.6),
    )?;
    draw_minutes(cr, state, center, colors)?;
    draw_hand(cr, center, HOUR_HAND, state.hour_angle(now), colors)?;
    draw_hand(cr, center, MINUTE_HAND, state.minute_angle(now), colors)?;
    paint::fill_circle(cr, center, CENTER_DOT_RADIUS, colors.ink)
}

fn draw_background(cr: &Context, canvas: Size) -> Result<(), cairo::Error> {
    let bottom = Srgba::new(0.12, 0.12, 0.14, 1.0);
    paint::vertical_source(cr, 0.0, canvas.height, black(1.0), bottom)?;
    cr.paint()
}

fn draw_case(cr: &Context, center: Point, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let [outer, middle, inner] = CASE_DIAMETERS.map(|d| d / 2.0);
    paint::gradient_circle(cr, center, outer, colors.case, black(1.0))?;
    paint::stroke_circle(cr, center, outer, 1.0, white(0.3))?;
    paint::gradient_circle(cr, center, middle, black(1.0), colors.case)?;
    paint::gradient_circle(cr, center, inner, paint::with_alpha(colors.case, 0.35), black(1.0))?;
    paint::stroke_circle(cr, center, inner, 1.0, white(0.15))
}

fn draw_numerals(
    cr: &Context,
    state: &ClockState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let frame = Rect::centered(center, Size::square(NUMERAL_FRAME));
    paint::set_color(cr, colors.ink);
    measure::select_font(cr, true, NUMERAL_FONT_SIZE);
    for (slot, numeral) in placement::place(state.numerals.len(), frame)
        .iter()
        .zip(&state.numerals)
    {
        show_centered(cr, &numeral.to_string(), slot.point)?;
    }
    Ok(())
}

fn draw_icons(
    cr: &Context,
    state: &ClockState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let frame = Rect::centered(center, Size::square(ICON_FRAME));
    for (slot, name) in placement::place(state.icons.len(), frame)
        .iter()
        .zip(&state.icons)
    {
        icons::draw_icon(cr, name, slot.point, ICON_DISPLAY_SIZE, colors.ink)?;
    }
    Ok(())
}

fn draw_minutes(
    cr: &Context,
    state: &ClockState,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let frame = Rect::centered(center, Size::square(MINUTE_FRAME));
    paint::set_color(cr, paint::with_alpha(colors.ink, 0.6));
    measure::select_font(cr, false, MINUTE_FONT_SIZE);
    let labels = state.minute_labels();
    for (slot, label) in placement::place(labels.len(), frame).iter().zip(&labels) {
        show_centered(cr, label, slot.point)?;
    }
    Ok(())
}

/// Hand drawn pointing at 12 and rotated about the face center.
fn draw_hand(
    cr: &Context,
    center: Point,
    shape: HandShape,
    angle: Degrees,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    paint::rotated(cr, center, angle, |cr| {
        let hand_center = Point::new(center.x, center.y + shape.offset);
        let rect = Rect::centered(hand_center, Size::new(shape.width, shape.length));
        paint::set_color(cr, colors.ink);
        paint::rounded_rect(cr, rect, shape.width / 2.0);
        cr.fill()
    })
}
