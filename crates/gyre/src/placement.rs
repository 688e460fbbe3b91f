//! Even distribution of items around a circle.
//!
//! Item 0 sits at 12 o'clock and the rest follow clockwise at equal
//! angular steps. Item sizes are not considered: callers keep the count
//! small enough that equal spacing reads well.

use crate::angle::Degrees;
use crate::geometry::{Point, Rect};

/// Ratio between the placement frame's shorter side and the orbit radius.
pub const RADIUS_DIVISOR: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub angle: Degrees,
    pub point: Point,
}

pub fn radius_for(bounds: Rect) -> f64 {
    bounds.size.min_side() / RADIUS_DIVISOR
}

/// `None` for an empty set; there is no meaningful step between zero items.
pub fn angle_step(count: usize) -> Option<Degrees> {
    (count > 0).then(|| Degrees::FULL_TURN / count as f64)
}

/// Places `count` items on a circle of `min(width, height) / 3` centered in `bounds`.
pub fn place(count: usize, bounds: Rect) -> Vec<Placement> {
    place_with_radius(count, bounds.mid(), radius_for(bounds))
}

pub fn place_with_radius(count: usize, center: Point, radius: f64) -> Vec<Placement> {
    let Some(step) = angle_step(count) else {
        return Vec::new();
    };

    (0..count)
        .map(|index| {
            let angle = step * index as f64;
            Placement {
                index,
                angle,
                point: Point::on_circle(center, radius, angle.to_radians()),
            }
        })
        .collect()
}
