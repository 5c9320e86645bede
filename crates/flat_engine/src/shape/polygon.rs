//! Regular polygon geometry
//!
//! A regular polygon is described by its circumscribed radius, vertex count
//! and a phase angle for the first vertex. Collision tests treat it as the
//! circumscribed circle; the discrete vertices only matter for drawing.

use crate::foundation::math::{constants::PI, Vec3};

/// Regular polygon inscribed in a circle of `radius`
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Radius of the circumscribed circle
    pub radius: f64,
    /// Number of vertices
    pub sides: u32,
    /// Phase of the first vertex in radians
    pub angle: f64,
}

impl Polygon {
    /// Creates a polygon with the first vertex at `angle` radians
    pub fn new(radius: f64, sides: u32, angle: f64) -> Self {
        Self {
            radius,
            sides,
            angle,
        }
    }

    /// Vertex positions around `center`, keeping its z coordinate
    pub fn vertices(&self, center: Vec3) -> Vec<Vec3> {
        let step = 2.0 * PI / f64::from(self.sides);
        (0..self.sides)
            .map(|index| {
                let vertex_angle = f64::from(index) * step + self.angle;
                Vec3::new(
                    center.x + self.radius * vertex_angle.cos(),
                    center.y + self.radius * vertex_angle.sin(),
                    center.z,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants::DEG_90;
    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn test_vertices_lie_on_circle() {
        let polygon = Polygon::new(3.0, 7, 0.25);
        let center = Vec3::new(1.0, -2.0, 0.5);
        for vertex in polygon.vertices(center) {
            assert_relative_eq!((vertex - center).norm(), 3.0, epsilon = TOLERANCE);
            assert_relative_eq!(vertex.z, 0.5, epsilon = TOLERANCE);
        }
    }

    #[test]
    fn test_square_vertices() {
        let polygon = Polygon::new(1.0, 4, 0.0);
        let vertices = polygon.vertices(Vec3::zeros());
        assert_eq!(vertices.len(), 4);
        assert_relative_eq!(vertices[0].x, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(vertices[0].y, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(vertices[1].x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(vertices[1].y, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(vertices[2].x, -1.0, epsilon = TOLERANCE);
        assert_relative_eq!(vertices[3].y, -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_phase_angle_rotates_first_vertex() {
        let polygon = Polygon::new(2.0, 3, DEG_90);
        let vertices = polygon.vertices(Vec3::zeros());
        assert_relative_eq!(vertices[0].x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(vertices[0].y, 2.0, epsilon = TOLERANCE);
    }
}
