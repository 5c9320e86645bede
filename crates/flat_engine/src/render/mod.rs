//! Paint capability consumed by shape drawing
//!
//! The engine never rasterizes anything itself. Shapes resolve their world
//! space vertices and hand them to a [`background::Background`]
//! implementation supplied by the application.

pub mod background;

pub use self::background::{Background, NullBackground, PaintMode};
