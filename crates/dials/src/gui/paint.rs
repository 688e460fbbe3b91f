//! Small cairo helpers shared by both faces.

use cairo::{Context, LinearGradient, RadialGradient};
use gyre::angle::Degrees;
use gyre::geometry::{Point, Rect};
use palette::Srgba;
use std::f64::consts::{PI, TAU};

pub fn white(alpha: f64) -> Srgba<f64> {
    Srgba::new(1.0, 1.0, 1.0, alpha)
}

pub fn black(alpha: f64) -> Srgba<f64> {
    Srgba::new(0.0, 0.0, 0.0, alpha)
}

pub fn with_alpha(color: Srgba<f64>, alpha: f64) -> Srgba<f64> {
    Srgba::new(color.red, color.green, color.blue, color.alpha * alpha)
}

pub fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn circle_path(cr: &Context, center: Point, radius: f64) {
    cr.new_sub_path();
    cr.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
}

pub fn fill_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    circle_path(cr, center, radius);
    cr.fill()
}

/// Stroke kept inside `radius`, like a bordered view.
pub fn stroke_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    width: f64,
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    set_color(cr, color);
    cr.set_line_width(width);
    circle_path(cr, center, radius - width / 2.0);
    cr.stroke()
}

pub fn dashed_ring(
    cr: &Context,
    center: Point,
    radius: f64,
    width: f64,
    dash: &[f64],
    color: Srgba<f64>,
) -> Result<(), cairo::Error> {
    cr.save()?;
    cr.set_dash(dash, 0.0);
    stroke_circle(cr, center, radius, width, color)?;
    cr.restore()
}

/// Diagonal gradient from the top-left to the bottom-right of the circle.
pub fn gradient_circle(
    cr: &Context,
    center: Point,
    radius: f64,
    from: Srgba<f64>,
    to: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let gradient = LinearGradient::new(
        center.x - radius,
        center.y - radius,
        center.x + radius,
        center.y + radius,
    );
    add_stop(&gradient, 0.0, from);
    add_stop(&gradient, 1.0, to);
    cr.set_source(&gradient)?;
    circle_path(cr, center, radius);
    cr.fill()
}

/// Radial glow from `inner` at `center` fading to `outer` at `end_radius`.
pub fn radial_source(
    cr: &Context,
    center: Point,
    end_radius: f64,
    inner: Srgba<f64>,
    outer: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let gradient = RadialGradient::new(center.x, center.y, 0.0, center.x, center.y, end_radius);
    add_stop(&gradient, 0.0, inner);
    add_stop(&gradient, 1.0, outer);
    cr.set_source(&gradient)
}

pub fn vertical_source(
    cr: &Context,
    top: f64,
    bottom: f64,
    from: Srgba<f64>,
    to: Srgba<f64>,
) -> Result<(), cairo::Error> {
    let gradient = LinearGradient::new(0.0, top, 0.0, bottom);
    add_stop(&gradient, 0.0, from);
    add_stop(&gradient, 1.0, to);
    cr.set_source(&gradient)
}

fn add_stop(gradient: &cairo::Gradient, offset: f64, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    gradient.add_color_stop_rgba(offset, r, g, b, a);
}

pub fn rounded_rect(cr: &Context, rect: Rect, radius: f64) {
    let r = radius.min(rect.size.width / 2.0).min(rect.size.height / 2.0);
    let (x, y) = (rect.origin.x, rect.origin.y);
    let (w, h) = (rect.size.width, rect.size.height);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

/// Runs `f` with the user space rotated clockwise by `angle` about `center`.
pub fn rotated<F>(cr: &Context, center: Point, angle: Degrees, f: F) -> Result<(), cairo::Error>
where
    F: FnOnce(&Context) -> Result<(), cairo::Error>,
{
    cr.save()?;
    cr.translate(center.x, center.y);
    cr.rotate(angle.to_radians().value());
    cr.translate(-center.x, -center.y);
    let result = f(cr);
    cr.restore()?;
    result
}
