use gyre::geometry::{Point, Rect, Size};

pub mod model;
pub mod sheet;
pub mod view;

pub use model::{CompassState, InfoRow, Waypoint};
pub use view::draw;

/// Reference width the face was designed for.
pub const FACE_WIDTH: f64 = 393.0;
pub const OUTER_RING_SCALES: [f64; 2] = [1.2, 1.5];
/// Outer ring scales while the sheet is shown.
pub const OUTER_RING_SCALES_SHOWN: [f64; 2] = [1.5, 2.0];
/// Insets of the inner rings from the face edge.
pub const INNER_RING_INSETS: [f64; 6] = [20.0, 80.0, 100.0, 120.0, 145.0, 170.0];
pub const HUB_RADIUS: f64 = 8.5;
pub const STROKE_FRAME: f64 = 315.0;
/// Width and dash of the three tick rings on the dial.
pub const TICK_RINGS: [(f64, [f64; 2]); 3] = [(5.0, [1.0, 1.0]), (10.0, [1.0, 6.0]), (15.0, [1.0, 62.0])];
pub const CARDINAL_RADIUS: f64 = 135.0;
pub const CARDINAL_FONT_SIZE: f64 = 13.0;
pub const WAYPOINT_ORBIT: f64 = 215.0;
pub const WAYPOINT_DOT_RADIUS: f64 = 6.0;
pub const TITLE_FONT_SIZE: f64 = 34.0;
pub const TITLE_BASELINE: f64 = 70.0;
pub const CITY_FONT_SIZE: f64 = 13.0;
/// Tilt of the dial when the sheet is shown, in degrees about the x axis.
pub const SHOWN_TILT: f64 = 10.0;
pub const SHOWN_WAYPOINT_SCALE: f64 = 0.9;
pub const FLASHLIGHT_RADIUS: f64 = 120.0;

pub const BUTTON_ROW_BOTTOM: f64 = 100.0;
pub const BUTTON_SPACING: f64 = 30.0;
pub const PRESS_SCALE: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    List,
    Add,
    Locate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
}

impl ButtonKind {
    fn diameter(self) -> f64 {
        match self {
            Self::List | Self::Locate => 64.0,
            Self::Add => 52.0,
        }
    }
}

/// The bottom button row, centered horizontally.
pub fn buttons(canvas: Size) -> [Button; 3] {
    let kinds = [ButtonKind::List, ButtonKind::Add, ButtonKind::Locate];
    let total: f64 =
        kinds.iter().map(|k| k.diameter()).sum::<f64>() + BUTTON_SPACING * (kinds.len() - 1) as f64;
    let row_mid = canvas.height - BUTTON_ROW_BOTTOM - ButtonKind::List.diameter() / 2.0;

    let mut x = (canvas.width - total) / 2.0;
    kinds.map(|kind| {
        let d = kind.diameter();
        let rect = Rect::centered(Point::new(x + d / 2.0, row_mid), Size::square(d));
        x += d + BUTTON_SPACING;
        Button { kind, rect }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_row_layout() {
        let row = buttons(Size::new(393.0, 852.0));
        assert_eq!(row[0].kind, ButtonKind::List);
        assert!((row[0].rect.origin.x - 76.5).abs() < 1e-9);
        assert!((row[1].rect.mid().x - 196.5).abs() < 1e-9);
        assert!((row[2].rect.origin.x + 64.0 - 316.5).abs() < 1e-9);
        for b in &row {
            assert!((b.rect.mid().y - 720.0).abs() < 1e-9);
        }
    }
}
