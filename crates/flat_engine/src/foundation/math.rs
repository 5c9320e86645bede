//! Math utilities and types
//!
//! Provides the vector type and the small set of geometric helpers the rest
//! of the engine is built on. Lengths are plain world units, angles are
//! radians, scalars are `f64` throughout.

pub use nalgebra::Vector3;

/// 3D vector type
///
/// Also used for 2D work: planar routines read the first two components and
/// carry the third through unchanged.
pub type Vec3 = Vector3<f64>;

/// Principal rotation axis selector for [`rotate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rotate about the X axis
    X,
    /// Rotate about the Y axis
    Y,
    /// Rotate about the Z axis
    Z,
}

/// Angle and tolerance constants
pub mod constants {
    /// Archimedes' constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Tolerance for geometric comparisons (edge proximity, area sums)
    pub const EPSILON: f64 = 1e-9;

    /// 30 degrees in radians
    pub const DEG_30: f64 = PI / 6.0;

    /// 45 degrees in radians
    pub const DEG_45: f64 = PI / 4.0;

    /// 60 degrees in radians
    pub const DEG_60: f64 = PI / 3.0;

    /// 90 degrees in radians
    pub const DEG_90: f64 = PI / 2.0;

    /// 135 degrees in radians
    pub const DEG_135: f64 = DEG_90 + DEG_45;

    /// 225 degrees in radians, expressed as the negative back-rotation
    pub const DEG_225: f64 = -DEG_135;

    /// 270 degrees in radians, expressed as the negative back-rotation
    pub const DEG_270: f64 = -DEG_90;

    /// 315 degrees in radians, expressed as the negative back-rotation
    pub const DEG_315: f64 = -DEG_45;
}

/// Returns true iff every component is exactly `0.0`
pub fn is_zero(ray: Vec3) -> bool {
    ray.x == 0.0 && ray.y == 0.0 && ray.z == 0.0
}

/// Scales `ray` so its norm equals `new_size`
///
/// The zero vector has no direction to scale along; callers must pass a
/// vector of non-zero length or the result is a division by zero.
pub fn resize(ray: Vec3, new_size: f64) -> Vec3 {
    ray * (new_size / ray.norm())
}

/// Euclidean distance between two points
pub fn distance(point_1: Vec3, point_2: Vec3) -> f64 {
    (point_1 - point_2).norm()
}

/// Rotates `ray` by `angle` radians about a principal axis
///
/// An angle of exactly `0.0` short-circuits and returns the input unchanged,
/// bit for bit.
pub fn rotate(ray: Vec3, angle: f64, axis: Axis) -> Vec3 {
    if angle == 0.0 {
        return ray;
    }

    let sin_angle = angle.sin();
    let cos_angle = angle.cos();

    match axis {
        Axis::X => Vec3::new(
            ray.x,
            cos_angle * ray.y - sin_angle * ray.z,
            sin_angle * ray.y + cos_angle * ray.z,
        ),
        Axis::Y => Vec3::new(
            cos_angle * ray.x + sin_angle * ray.z,
            ray.y,
            cos_angle * ray.z - sin_angle * ray.x,
        ),
        Axis::Z => Vec3::new(
            cos_angle * ray.x - sin_angle * ray.y,
            sin_angle * ray.x + cos_angle * ray.y,
            ray.z,
        ),
    }
}

/// Three-way clamp of `value` into `[min_value, max_value]`
pub fn clamp<T: PartialOrd>(value: T, min_value: T, max_value: T) -> T {
    if value > max_value {
        max_value
    } else if value < min_value {
        min_value
    } else {
        value
    }
}

/// Absolute area of the triangle `(a, b, c)`, read from the XY components
pub fn area_triangle_2d(tri_point_1: Vec3, tri_point_2: Vec3, tri_point_3: Vec3) -> f64 {
    ((tri_point_1.x * (tri_point_2.y - tri_point_3.y)
        + tri_point_2.x * (tri_point_3.y - tri_point_1.y)
        + tri_point_3.x * (tri_point_1.y - tri_point_2.y))
        * 0.5)
        .abs()
}

/// Area of a rectangle given its corners in `[TL, BL, BR, TR]` order
pub fn area_rectangle_2d(corners: &[Vec3; 4]) -> f64 {
    distance(corners[1], corners[0]) * distance(corners[2], corners[1])
}

/// The four edges of a rectangle, traversed TL→BL, BL→BR, BR→TR, TR→TL
///
/// Corners are given in `[TL, BL, BR, TR]` order.
pub fn edges_rectangle_2d(corners: &[Vec3; 4]) -> [(Vec3, Vec3); 4] {
    [
        (corners[0], corners[1]),
        (corners[1], corners[2]),
        (corners[2], corners[3]),
        (corners[3], corners[0]),
    ]
}

/// The three edges of a triangle, traversed a→b, b→c, c→a
pub fn edges_triangle_2d(tri_point_1: Vec3, tri_point_2: Vec3, tri_point_3: Vec3) -> [(Vec3, Vec3); 3] {
    [
        (tri_point_1, tri_point_2),
        (tri_point_2, tri_point_3),
        (tri_point_3, tri_point_1),
    ]
}
