//! Background paint capability
//!
//! A [`Background`] owns the color, texture or backend state a shape is
//! painted with. The engine only drives the protocol: `apply` right before
//! vertex data is emitted, then `paint` with the resolved vertices.

use crate::foundation::math::Vec3;

/// How a closed vertex run should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintMode {
    /// Fill the interior
    Fill,
    /// Trace the border only
    Outline,
}

/// Paint capability invoked by shape drawing
pub trait Background {
    /// Establishes the current paint state, called right before `paint`
    fn apply(&self);

    /// Paints one closed vertex run in world space
    fn paint(&self, vertices: &[Vec3], mode: PaintMode);
}

/// Background that paints nothing
///
/// The default for entities constructed without an explicit background.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackground;

impl Background for NullBackground {
    fn apply(&self) {}

    fn paint(&self, _vertices: &[Vec3], _mode: PaintMode) {}
}
