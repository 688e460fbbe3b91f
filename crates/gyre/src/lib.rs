//! Radial layout and rotation primitives for dial-style faces.

pub mod angle;
pub mod arc_text;
pub mod direction;
pub mod geometry;
pub mod gesture;
pub mod heading;
pub mod icon;
pub mod macros;
pub mod placement;
pub mod protocol;
pub mod rotation;
pub mod tween;
