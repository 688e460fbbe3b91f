pub mod app;
pub mod clock;
pub mod compass;
pub mod icons;
pub mod measure;
pub mod paint;
pub mod theme;
