//! Oriented rectangle geometry
//!
//! A rectangle hangs off its top-left corner: `angle` is the direction of
//! the top edge and the other corners are derived from it. The corner
//! offsets are cached and recomputed only when a dimension or the angle
//! changes, so collision tests can fetch corners without trigonometry.

use crate::foundation::math::{constants::DEG_90, Vec3};

/// Rectangle anchored at its top-left corner, oriented by `angle`
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    width: f64,
    height: f64,
    angle: f64,
    width_vec: Vec3,
    height_vec: Vec3,
}

impl Rectangle {
    /// Creates a rectangle with the top edge at `angle` radians
    pub fn new(width: f64, height: f64, angle: f64) -> Self {
        let mut rectangle = Self {
            width,
            height,
            angle,
            width_vec: Vec3::zeros(),
            height_vec: Vec3::zeros(),
        };
        rectangle.update_corners();
        rectangle
    }

    /// Top edge length
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Side edge length
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Orientation of the top edge in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Sets the top edge length and refreshes the cached corners
    pub fn set_width(&mut self, width: f64) {
        self.width = width;
        self.update_corners();
    }

    /// Sets the side edge length and refreshes the cached corners
    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.update_corners();
    }

    /// Sets the orientation and refreshes the cached corners
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.update_corners();
    }

    /// Corner positions in `[TL, BL, BR, TR]` order, anchored at `top_left`
    pub fn corners(&self, top_left: Vec3) -> [Vec3; 4] {
        [
            top_left,
            top_left + self.height_vec,
            top_left + self.width_vec + self.height_vec,
            top_left + self.width_vec,
        ]
    }

    fn update_corners(&mut self) {
        // the height edge runs a quarter turn clockwise from the top edge
        let height_angle = self.angle - DEG_90;
        self.width_vec = Vec3::new(
            self.width * self.angle.cos(),
            self.width * self.angle.sin(),
            0.0,
        );
        self.height_vec = Vec3::new(
            self.height * height_angle.cos(),
            self.height * height_angle.sin(),
            0.0,
        );
    }
}
