//! Pure collision queries
//!
//! Every function is stateless and side-effect free. Tests that produce a
//! witness point return `Option<Vec3>`: `Some` carries the point where the
//! shapes touch or are nearest, `None` means no collision. Distance queries
//! return the distance together with the near point(s) on the segment(s).
//!
//! "Ray" here always means a finite segment given by its two endpoints,
//! unless an `infinite` flag widens the query to the whole line.
//!
//! Rectangles are passed as their four corners in `[TL, BL, BR, TR]` order,
//! matching [`crate::foundation::math::edges_rectangle_2d`].

use crate::foundation::math::{
    area_rectangle_2d, area_triangle_2d, clamp, constants::EPSILON, distance, edges_rectangle_2d,
    Vec3,
};

/// Distance from `point` to the segment `ray_start..ray_end`
///
/// Projects the point onto the carrying line; unless `infinite` is set the
/// projection parameter is clamped to the segment. Returns the distance and
/// the near point. A degenerate segment (`ray_start == ray_end`) falls back
/// to plain point-to-point distance with the near point at `ray_start`.
pub fn distance_ray_to_point(
    ray_start: Vec3,
    ray_end: Vec3,
    point: Vec3,
    infinite: bool,
) -> (f64, Vec3) {
    let delta_ray = ray_end - ray_start;
    let length_pow = delta_ray.norm_squared();

    if length_pow == 0.0 {
        return (distance(point, ray_start), ray_start);
    }

    let mut param = (point - ray_start).dot(&delta_ray) / length_pow;
    if !infinite {
        param = clamp(param, 0.0, 1.0);
    }

    let near_point = ray_start + delta_ray * param;
    (distance(point, near_point), near_point)
}

/// Closest approach between two finite segments
///
/// Returns the minimum distance together with the endpoints of the
/// connecting segment (first on ray 1, then on ray 2). Parallel, collinear
/// and zero-length segments are handled without dividing by zero.
pub fn distance_rays(
    ray_1_start: Vec3,
    ray_1_end: Vec3,
    ray_2_start: Vec3,
    ray_2_end: Vec3,
) -> (f64, Vec3, Vec3) {
    let delta_1 = ray_1_end - ray_1_start;
    let delta_2 = ray_2_end - ray_2_start;
    let offset = ray_1_start - ray_2_start;

    let length_pow_1 = delta_1.norm_squared();
    let length_pow_2 = delta_2.norm_squared();
    let projection_2 = delta_2.dot(&offset);

    let (param_1, param_2) = if length_pow_1 <= EPSILON && length_pow_2 <= EPSILON {
        (0.0, 0.0)
    } else if length_pow_1 <= EPSILON {
        (0.0, clamp(projection_2 / length_pow_2, 0.0, 1.0))
    } else {
        let projection_1 = delta_1.dot(&offset);

        if length_pow_2 <= EPSILON {
            (clamp(-projection_1 / length_pow_1, 0.0, 1.0), 0.0)
        } else {
            let alignment = delta_1.dot(&delta_2);
            let denom = length_pow_1 * length_pow_2 - alignment * alignment;

            // denom vanishes for parallel segments; anchor on ray 1's start
            let param_1 = if denom.abs() <= EPSILON {
                0.0
            } else {
                clamp(
                    (alignment * projection_2 - projection_1 * length_pow_2) / denom,
                    0.0,
                    1.0,
                )
            };
            let param_2 = (alignment * param_1 + projection_2) / length_pow_2;

            if param_2 < 0.0 {
                (clamp(-projection_1 / length_pow_1, 0.0, 1.0), 0.0)
            } else if param_2 > 1.0 {
                (
                    clamp((alignment - projection_1) / length_pow_1, 0.0, 1.0),
                    1.0,
                )
            } else {
                (param_1, param_2)
            }
        }
    };

    let near_1 = ray_1_start + delta_1 * param_1;
    let near_2 = ray_2_start + delta_2 * param_2;
    (distance(near_1, near_2), near_1, near_2)
}

/// Point-in-triangle test on the XY plane, boundary-inclusive
///
/// Uses area decomposition: the point is inside iff the three sub-triangles
/// it forms with the edges sum to the whole area.
pub fn collision_point_triangle_2d(
    point: Vec3,
    tri_point_1: Vec3,
    tri_point_2: Vec3,
    tri_point_3: Vec3,
) -> bool {
    let area = area_triangle_2d(tri_point_1, tri_point_2, tri_point_3);
    let decomposed = area_triangle_2d(point, tri_point_1, tri_point_2)
        + area_triangle_2d(point, tri_point_2, tri_point_3)
        + area_triangle_2d(point, tri_point_3, tri_point_1);
    (decomposed - area).abs() <= EPSILON
}

/// Point-in-rectangle test on the XY plane, boundary-inclusive
pub fn collision_point_rectangle_2d(point: Vec3, corners: &[Vec3; 4]) -> bool {
    let area = area_rectangle_2d(corners);
    let decomposed: f64 = edges_rectangle_2d(corners)
        .iter()
        .map(|&(edge_start, edge_end)| area_triangle_2d(point, edge_start, edge_end))
        .sum();
    (decomposed - area).abs() <= EPSILON
}

/// Sphere-sphere overlap, boundary-inclusive and symmetric
pub fn collision_spheres(position_1: Vec3, radius_1: f64, position_2: Vec3, radius_2: f64) -> bool {
    distance(position_1, position_2) <= radius_1 + radius_2
}

/// Segment-sphere overlap
///
/// `Some` carries the near point on the segment when it passes within
/// `circle_radius` of `circle_center`.
pub fn collision_ray_sphere(
    ray_start: Vec3,
    ray_end: Vec3,
    circle_center: Vec3,
    circle_radius: f64,
    infinite: bool,
) -> Option<Vec3> {
    let (dist, near_point) = distance_ray_to_point(ray_start, ray_end, circle_center, infinite);
    (dist <= circle_radius).then_some(near_point)
}

/// Rectangle-rectangle overlap on the XY plane
///
/// Collides when any edge of one rectangle approaches any edge of the other
/// within tolerance, or when a corner of either rectangle lies inside the
/// other. The corner rule is what catches full containment with no edge
/// crossing. The witness is the near point on the first rectangle's edge,
/// or the contained corner.
pub fn collision_rectangles_2d(rect_1: &[Vec3; 4], rect_2: &[Vec3; 4]) -> Option<Vec3> {
    for (edge_1_start, edge_1_end) in edges_rectangle_2d(rect_1) {
        for (edge_2_start, edge_2_end) in edges_rectangle_2d(rect_2) {
            let (dist, near_point, _) =
                distance_rays(edge_1_start, edge_1_end, edge_2_start, edge_2_end);
            if dist <= EPSILON {
                return Some(near_point);
            }
        }
    }

    for &corner in rect_1 {
        if collision_point_rectangle_2d(corner, rect_2) {
            return Some(corner);
        }
    }
    for &corner in rect_2 {
        if collision_point_rectangle_2d(corner, rect_1) {
            return Some(corner);
        }
    }

    None
}

/// Rectangle-circle overlap on the XY plane
///
/// Tests the circle against the top, right, bottom and left edges in turn,
/// then falls back to a center-containment check. The witness is the near
/// point on the first overlapping edge, or the circle center when only
/// containment holds.
pub fn collision_rectangle_circle_2d(
    corners: &[Vec3; 4],
    circle_center: Vec3,
    circle_radius: f64,
) -> Option<Vec3> {
    let [top_left, bottom_left, bottom_right, top_right] = *corners;

    let edges = [
        (top_left, top_right),
        (top_right, bottom_right),
        (bottom_left, bottom_right),
        (top_left, bottom_left),
    ];

    for (edge_start, edge_end) in edges {
        if let Some(near_point) =
            collision_ray_sphere(edge_start, edge_end, circle_center, circle_radius, false)
        {
            return Some(near_point);
        }
    }

    if collision_point_rectangle_2d(circle_center, corners) {
        return Some(circle_center);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TOLERANCE: f64 = 1e-9;

    /// Axis-aligned rectangle corners in `[TL, BL, BR, TR]` order, y-up
    fn rect(left: f64, bottom: f64, width: f64, height: f64) -> [Vec3; 4] {
        [
            Vec3::new(left, bottom + height, 0.0),
            Vec3::new(left, bottom, 0.0),
            Vec3::new(left + width, bottom, 0.0),
            Vec3::new(left + width, bottom + height, 0.0),
        ]
    }

    #[test]
    fn test_distance_ray_to_point_projects_onto_segment() {
        let (dist, near) = distance_ray_to_point(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 5.0, 0.0),
            false,
        );
        assert_relative_eq!(dist, 5.0, epsilon = TOLERANCE);
        assert_relative_eq!(near.x, 5.0, epsilon = TOLERANCE);
        assert_relative_eq!(near.y, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_distance_ray_to_point_clamps_to_endpoint() {
        let (dist, near) = distance_ray_to_point(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(13.0, 4.0, 0.0),
            false,
        );
        assert_relative_eq!(dist, 5.0, epsilon = TOLERANCE);
        assert_relative_eq!(near.x, 10.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_distance_ray_to_point_infinite_line() {
        let (dist, near) = distance_ray_to_point(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(13.0, 4.0, 0.0),
            true,
        );
        assert_relative_eq!(dist, 4.0, epsilon = TOLERANCE);
        assert_relative_eq!(near.x, 13.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_distance_ray_to_point_degenerate_segment() {
        let start = Vec3::new(2.0, 1.0, 0.0);
        let (dist, near) = distance_ray_to_point(start, start, Vec3::new(2.0, 4.0, 0.0), false);
        assert_relative_eq!(dist, 3.0, epsilon = TOLERANCE);
        assert_eq!(near, start);
    }

    #[test]
    fn test_distance_rays_crossing() {
        let (dist, near_1, near_2) = distance_rays(
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        );
        assert_relative_eq!(dist, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(near_1.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(near_2.y, 0.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_distance_rays_parallel() {
        let (dist, near_1, near_2) = distance_rays(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(10.0, 5.0, 0.0),
        );
        assert_relative_eq!(dist, 5.0, epsilon = TOLERANCE);
        assert_relative_eq!(distance(near_1, near_2), 5.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_distance_rays_skew_endpoints() {
        // segments pointing apart: closest approach is endpoint to endpoint
        let (dist, near_1, near_2) = distance_rays(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(3.0, 9.0, 0.0),
        );
        assert_relative_eq!(dist, 5.0, epsilon = TOLERANCE);
        assert_eq!(near_1, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(near_2, Vec3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn test_distance_rays_degenerate_to_point() {
        let point = Vec3::new(5.0, 3.0, 0.0);
        let (dist, _, near_2) = distance_rays(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            point,
            point,
        );
        assert_relative_eq!(dist, 3.0, epsilon = TOLERANCE);
        assert_eq!(near_2, point);
    }

    #[test]
    fn test_point_triangle_inside_outside() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 4.0, 0.0);
        assert!(collision_point_triangle_2d(Vec3::new(1.0, 1.0, 0.0), a, b, c));
        assert!(!collision_point_triangle_2d(Vec3::new(3.0, 3.0, 0.0), a, b, c));
    }

    #[test]
    fn test_point_triangle_boundary_is_inside() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(4.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 4.0, 0.0);
        // vertex and edge midpoint both classify as inside
        assert!(collision_point_triangle_2d(a, a, b, c));
        assert!(collision_point_triangle_2d(Vec3::new(2.0, 0.0, 0.0), a, b, c));
        assert!(collision_point_triangle_2d(Vec3::new(2.0, 2.0, 0.0), a, b, c));
    }

    #[test]
    fn test_point_rectangle_inside_outside() {
        let corners = rect(0.0, 0.0, 4.0, 2.0);
        assert!(collision_point_rectangle_2d(Vec3::new(2.0, 1.0, 0.0), &corners));
        assert!(!collision_point_rectangle_2d(Vec3::new(4.5, 1.0, 0.0), &corners));
        assert!(!collision_point_rectangle_2d(Vec3::new(2.0, -0.5, 0.0), &corners));
    }

    #[test]
    fn test_point_rectangle_boundary_is_inside() {
        let corners = rect(0.0, 0.0, 4.0, 2.0);
        assert!(collision_point_rectangle_2d(Vec3::new(0.0, 0.0, 0.0), &corners));
        assert!(collision_point_rectangle_2d(Vec3::new(4.0, 1.0, 0.0), &corners));
    }

    #[test]
    fn test_point_rectangle_rotated() {
        // unit square rotated 45 degrees about the origin
        let corners = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        assert!(collision_point_rectangle_2d(Vec3::new(0.0, 0.0, 0.0), &corners));
        assert!(collision_point_rectangle_2d(Vec3::new(0.4, 0.4, 0.0), &corners));
        assert!(!collision_point_rectangle_2d(Vec3::new(0.8, 0.8, 0.0), &corners));
    }

    #[test]
    fn test_spheres_boundary_inclusive() {
        let origin = Vec3::zeros();
        assert!(!collision_spheres(origin, 1.0, Vec3::new(3.0, 0.0, 0.0), 1.0));
        assert!(collision_spheres(origin, 1.0, Vec3::new(2.0, 0.0, 0.0), 1.0));
        assert!(collision_spheres(origin, 1.0, Vec3::new(1.5, 0.0, 0.0), 1.0));
    }

    #[test]
    fn test_spheres_symmetric() {
        let a = Vec3::new(0.5, -1.0, 2.0);
        let b = Vec3::new(3.0, 1.0, -1.0);
        assert_eq!(
            collision_spheres(a, 1.5, b, 2.0),
            collision_spheres(b, 2.0, a, 1.5)
        );
        assert_eq!(
            collision_spheres(a, 0.1, b, 0.1),
            collision_spheres(b, 0.1, a, 0.1)
        );
    }

    #[test]
    fn test_ray_sphere() {
        let hit = collision_ray_sphere(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 2.0, 0.0),
            3.0,
            false,
        );
        let near = hit.expect("segment passes within the radius");
        assert_relative_eq!(near.x, 5.0, epsilon = TOLERANCE);

        let miss = collision_ray_sphere(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(5.0, 4.0, 0.0),
            3.0,
            false,
        );
        assert!(miss.is_none());
    }

    #[test]
    fn test_rectangles_overlap() {
        let hit = collision_rectangles_2d(&rect(0.0, 0.0, 2.0, 2.0), &rect(1.0, 1.0, 2.0, 2.0));
        assert!(hit.is_some());
    }

    #[test]
    fn test_rectangles_separated() {
        let hit = collision_rectangles_2d(&rect(0.0, 0.0, 2.0, 2.0), &rect(5.0, 0.0, 2.0, 2.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_rectangles_touching_edge() {
        let hit = collision_rectangles_2d(&rect(0.0, 0.0, 2.0, 2.0), &rect(2.0, 0.0, 2.0, 2.0));
        assert!(hit.is_some());
    }

    #[test]
    fn test_contained_rectangle_collides() {
        // no edge crossing at all: only the corner rule can catch this
        let hit = collision_rectangles_2d(&rect(0.0, 0.0, 10.0, 10.0), &rect(4.0, 4.0, 2.0, 2.0));
        let witness = hit.expect("containment must register as a collision");
        assert!(collision_point_rectangle_2d(witness, &rect(0.0, 0.0, 10.0, 10.0)));

        let inverted = collision_rectangles_2d(&rect(4.0, 4.0, 2.0, 2.0), &rect(0.0, 0.0, 10.0, 10.0));
        assert!(inverted.is_some());
    }

    #[test]
    fn test_rectangle_circle_edge_hit() {
        let corners = rect(0.0, 0.0, 4.0, 2.0);
        // circle just above the top edge, overlapping it
        let hit = collision_rectangle_circle_2d(&corners, Vec3::new(2.0, 2.5, 0.0), 1.0);
        let near = hit.expect("circle overlaps the top edge");
        assert_relative_eq!(near.y, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(near.x, 2.0, epsilon = TOLERANCE);
    }

    #[test]
    fn test_rectangle_circle_center_contained() {
        let corners = rect(0.0, 0.0, 10.0, 10.0);
        // tiny circle deep inside: no edge within reach, containment only
        let center = Vec3::new(5.0, 5.0, 0.0);
        let hit = collision_rectangle_circle_2d(&corners, center, 0.5);
        assert_eq!(hit, Some(center));
    }

    #[test]
    fn test_rectangle_circle_miss() {
        let corners = rect(0.0, 0.0, 4.0, 2.0);
        let hit = collision_rectangle_circle_2d(&corners, Vec3::new(2.0, 8.0, 0.0), 1.0);
        assert!(hit.is_none());
    }
}
