use super::model::CompassState;
use super::{
    BUTTON_ROW_BOTTOM, Button, ButtonKind, CARDINAL_FONT_SIZE, CARDINAL_RADIUS, CITY_FONT_SIZE,
    FACE_WIDTH, FLASHLIGHT_RADIUS, HUB_RADIUS, INNER_RING_INSETS, OUTER_RING_SCALES,
    OUTER_RING_SCALES_SHOWN, STROKE_FRAME, TICK_RINGS, TITLE_BASELINE, TITLE_FONT_SIZE,
    WAYPOINT_DOT_RADIUS, WAYPOINT_ORBIT, buttons, sheet,
};
use crate::gui::measure::{self, CairoMeasure, show_centered};
use crate::gui::paint::{self, black, white};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gyre::angle::{Degrees, Radians};
use gyre::arc_text::GlyphOrientation;
use gyre::direction::CompassPoint;
use gyre::geometry::{Point, Rect, Size};
use gyre::placement;
use palette::Srgba;
use std::f64::consts::TAU;
use std::time::Duration;
use strum::IntoEnumIterator;

/// Draws the compass face. Returns true when the circular label picked up
/// new measurements and needs a second pass.
pub fn draw(
    cr: &Context,
    state: &mut CompassState,
    canvas: Size,
    now: Duration,
    colors: &ThemeColors,
) -> Result<bool, cairo::Error> {
    state.canvas = canvas;
    let center = Rect::new(Point::ORIGIN, canvas).mid();
    let face = FaceFrame {
        center,
        dial: state.dial_angle(now),
        squash: state.dial_squash(now),
    };
    let shown = state.presentation(now);

    draw_background(cr, center)?;
    draw_outer_rings(cr, center, shown)?;
    face.apply(cr, Degrees::ZERO, |cr| draw_inner_rings(cr, center))?;
    draw_flashlight(cr, state, &face, 1.0 - shown)?;
    face.apply(cr, face.dial, |cr| {
        draw_cardinals(cr, center, Some(white(0.6)))?;
        draw_waypoint_dots(cr, state, center, state.waypoint_scale(now))
    })?;
    let unsettled = draw_label(cr, state, center, colors)?;
    face.apply(cr, face.dial, |cr| draw_ticks(cr, center))?;
    draw_light(cr, center)?;
    draw_title(cr, state, canvas, colors)?;
    draw_buttons(cr, state, canvas, now, colors)?;
    sheet::draw(cr, state, canvas, now, colors)?;

    Ok(unsettled)
}

/// Dial transform: squashed vertically by the tilt, then rotated.
struct FaceFrame {
    center: Point,
    dial: Degrees,
    squash: f64,
}

impl FaceFrame {
    fn apply<F>(&self, cr: &Context, rotation: Degrees, f: F) -> Result<(), cairo::Error>
    where
        F: FnOnce(&Context) -> Result<(), cairo::Error>,
    {
        cr.save()?;
        cr.translate(self.center.x, self.center.y);
        cr.scale(1.0, self.squash);
        cr.rotate(rotation.to_radians().value());
        cr.translate(-self.center.x, -self.center.y);
        let result = f(cr);
        cr.restore()?;
        result
    }
}

fn face_radius() -> f64 {
    FACE_WIDTH / 2.0
}

fn draw_background(cr: &Context, center: Point) -> Result<(), cairo::Error> {
    let glow = Srgba::new(0.30, 0.31, 0.44, 1.0);
    paint::radial_source(cr, center, 400.0, glow, black(1.0))?;
    cr.paint()
}

fn draw_outer_rings(cr: &Context, center: Point, shown: f64) -> Result<(), cairo::Error> {
    for (rest, expanded) in OUTER_RING_SCALES.iter().zip(OUTER_RING_SCALES_SHOWN) {
        let scale = rest + (expanded - rest) * shown;
        let radius = face_radius() * scale;
        paint::gradient_circle(cr, center, radius, black(0.5), black(0.0))?;
        paint::stroke_circle(cr, center, radius, 1.0, white(0.1))?;
    }
    Ok(())
}

fn draw_inner_rings(cr: &Context, center: Point) -> Result<(), cairo::Error> {
    for inset in INNER_RING_INSETS {
        let radius = face_radius() - inset;
        paint::gradient_circle(cr, center, radius, black(0.2), white(0.05))?;
        paint::stroke_circle(cr, center, radius, 1.0, white(0.1))?;
    }
    paint::fill_circle(cr, center, HUB_RADIUS, white(1.0))
}

/// N, E, S, W on the dial, each turned to face outward. `None` keeps the
/// current source, used when the flashlight gradient is installed.
fn draw_cardinals(
    cr: &Context,
    center: Point,
    color: Option<Srgba<f64>>,
) -> Result<(), cairo::Error> {
    if let Some(color) = color {
        paint::set_color(cr, color);
    }
    measure::select_font(cr, true, CARDINAL_FONT_SIZE);
    let cardinals = CompassPoint::iter().filter(CompassPoint::is_cardinal);
    for (slot, point) in placement::place_with_radius(4, center, CARDINAL_RADIUS)
        .iter()
        .zip(cardinals)
    {
        paint::rotated(cr, slot.point, slot.angle, |cr| {
            show_centered(cr, &point.to_string(), slot.point)
        })?;
    }
    Ok(())
}

fn draw_waypoint_dots(
    cr: &Context,
    state: &CompassState,
    center: Point,
    scale: f64,
) -> Result<(), cairo::Error> {
    for waypoint in &state.waypoints {
        let at = Point::on_circle(center, WAYPOINT_ORBIT * scale, waypoint.bearing.to_radians());
        paint::fill_circle(cr, at, WAYPOINT_DOT_RADIUS * scale, waypoint.color)?;
        paint::stroke_circle(cr, at, WAYPOINT_DOT_RADIUS * scale, 1.0, white(0.5))?;
    }
    Ok(())
}

fn draw_ticks(cr: &Context, center: Point) -> Result<(), cairo::Error> {
    let radius = STROKE_FRAME / 2.0;
    for (width, dash) in TICK_RINGS {
        paint::dashed_ring(cr, center, radius, width, &dash, white(0.5))?;
    }
    Ok(())
}

/// Measures any glyph still missing, then draws the label from the widths
/// known so far.
fn draw_label(
    cr: &Context,
    state: &mut CompassState,
    center: Point,
    colors: &ThemeColors,
) -> Result<bool, cairo::Error> {
    measure::select_mono(cr, state.font_size);
    let report = state.label.measure_with(&CairoMeasure::new(cr));
    let unsettled = state.label.absorb(report);

    let layout = state.label.layout();
    let ring = state.label_frame / 2.0;
    let upright = state.label.orientation() == GlyphOrientation::Upright;

    paint::set_color(cr, paint::with_alpha(colors.ink, 0.7));
    let mut buf = [0u8; 4];
    for glyph in &layout.glyphs {
        let position = layout.position(glyph);
        let at = Point::on_circle(center, ring, position);
        let turn = if upright {
            position + glyph.counter_rotation
        } else {
            position
        };

        cr.save()?;
        cr.translate(at.x, at.y);
        cr.rotate(turn.value());
        show_centered(cr, glyph.ch.encode_utf8(&mut buf), Point::ORIGIN)?;
        cr.restore()?;
    }

    Ok(unsettled)
}

/// Soft highlight in the upper left of the face.
fn draw_light(cr: &Context, center: Point) -> Result<(), cairo::Error> {
    cr.save()?;
    paint::radial_source(cr, center, 200.0, white(0.2), white(0.0))?;
    cr.set_line_width(200.0);
    cr.new_sub_path();
    cr.arc(center.x, center.y, 100.0, 0.6 * TAU, 0.9 * TAU);
    cr.stroke()?;
    cr.restore()
}

/// Lights rings and cardinal letters around the pointer. Screen-fixed, so
/// only the letters follow the dial.
fn draw_flashlight(
    cr: &Context,
    state: &CompassState,
    face: &FaceFrame,
    opacity: f64,
) -> Result<(), cairo::Error> {
    let Some(spot) = state.flashlight.spot() else {
        return Ok(());
    };
    if opacity <= 0.0 {
        return Ok(());
    }

    cr.push_group();
    paint::radial_source(cr, spot, FLASHLIGHT_RADIUS, white(0.1), white(0.0))?;
    cr.paint()?;

    paint::radial_source(cr, spot, FLASHLIGHT_RADIUS, white(0.9), white(0.0))?;
    cr.set_line_width(2.0);
    for scale in OUTER_RING_SCALES {
        paint::circle_path(cr, face.center, face_radius() * scale);
        cr.stroke()?;
    }
    face.apply(cr, Degrees::ZERO, |cr| {
        for inset in INNER_RING_INSETS {
            paint::circle_path(cr, face.center, face_radius() - inset);
            cr.stroke()?;
        }
        Ok(())
    })?;

    // The source was installed in screen space and stays locked there.
    face.apply(cr, face.dial, |cr| draw_cardinals(cr, face.center, None))?;

    cr.pop_group_to_source()?;
    cr.paint_with_alpha(opacity)
}

fn draw_title(
    cr: &Context,
    state: &CompassState,
    canvas: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let snapshot = state.snapshot();
    let color = if state.is_stale() {
        colors.warning
    } else {
        colors.ink
    };
    let mid = canvas.width / 2.0;

    paint::set_color(cr, color);
    measure::select_font(cr, true, TITLE_FONT_SIZE);
    show_centered(cr, &snapshot.readout(), Point::new(mid, TITLE_BASELINE))?;

    paint::set_color(cr, paint::with_alpha(colors.ink, 0.6));
    measure::select_font(cr, false, CITY_FONT_SIZE);
    show_centered(
        cr,
        &state.city,
        Point::new(mid, TITLE_BASELINE + TITLE_FONT_SIZE * 0.9),
    )
}

fn draw_buttons(
    cr: &Context,
    state: &CompassState,
    canvas: Size,
    now: Duration,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    if canvas.height < BUTTON_ROW_BOTTOM {
        return Ok(());
    }
    for button in buttons(canvas) {
        let scale = match button.kind {
            ButtonKind::List => state.press_scale(now),
            ButtonKind::Add | ButtonKind::Locate => 1.0,
        };
        let pressed = button.kind == ButtonKind::List && state.sheet.is_shown();
        draw_button(cr, &button, scale, pressed, colors)?;
    }
    Ok(())
}

fn draw_button(
    cr: &Context,
    button: &Button,
    scale: f64,
    pressed: bool,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let c = button.rect.mid();
    let r = button.rect.size.width / 2.0 * scale;

    let fill = if pressed {
        paint::with_alpha(colors.accent, 0.8)
    } else {
        black(0.6)
    };
    paint::fill_circle(cr, c, r, fill)?;
    paint::stroke_circle(cr, c, r, 1.0, white(0.2))?;

    cr.save()?;
    paint::set_color(cr, colors.ink);
    cr.set_line_width(2.5);
    cr.set_line_cap(cairo::LineCap::Round);
    let u = r * 0.3;
    match button.kind {
        ButtonKind::List => {
            for row in [-1.0, 0.0, 1.0] {
                cr.move_to(c.x - u, c.y + row * u * 0.7);
                cr.line_to(c.x + u, c.y + row * u * 0.7);
            }
            cr.stroke()?;
        }
        ButtonKind::Add => {
            cr.move_to(c.x - u, c.y);
            cr.line_to(c.x + u, c.y);
            cr.move_to(c.x, c.y - u);
            cr.line_to(c.x, c.y + u);
            cr.stroke()?;
        }
        ButtonKind::Locate => {
            let tip = Point::on_circle(c, u, Radians::new(TAU / 8.0));
            let left = Point::on_circle(c, u, Radians::new(TAU * 5.0 / 8.0 - 0.5));
            let right = Point::on_circle(c, u, Radians::new(TAU * 5.0 / 8.0 + 0.5));
            cr.move_to(tip.x, tip.y);
            cr.line_to(left.x, left.y);
            cr.line_to(c.x, c.y);
            cr.line_to(right.x, right.y);
            cr.close_path();
            cr.fill()?;
        }
    }
    cr.restore()
}
