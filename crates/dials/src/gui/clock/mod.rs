pub mod model;
pub mod view;

pub use model::ClockState;
pub use view::draw;

pub const NUMERAL_FRAME: f64 = 240.0;
pub const ICON_FRAME: f64 = 120.0;
pub const MINUTE_FRAME: f64 = 360.0;
pub const TICK_RING_DIAMETER: f64 = 220.0;
pub const TICK_DASH: [f64; 2] = [1.0, 10.0];
pub const CASE_DIAMETERS: [f64; 3] = [360.0, 320.0, 280.0];
pub const NUMERAL_FONT_SIZE: f64 = 22.0;
pub const MINUTE_FONT_SIZE: f64 = 11.0;
pub const ICON_DISPLAY_SIZE: f64 = 22.0;
pub const CENTER_DOT_RADIUS: f64 = 6.0;

/// Hand geometry: width, length and vertical offset of its center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandShape {
    pub width: f64,
    pub length: f64,
    pub offset: f64,
}

pub const HOUR_HAND: HandShape = HandShape {
    width: 8.0,
    length: 70.0,
    offset: -32.0,
};
pub const MINUTE_HAND: HandShape = HandShape {
    width: 8.0,
    length: 100.0,
    offset: -46.0,
};
