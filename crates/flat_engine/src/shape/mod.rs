//! Shape hierarchy and pairwise collision protocol
//!
//! A [`Shape`] is a local position, a closed geometric kind and an ordered
//! list of child shapes drawn at accumulated offsets. Collision between two
//! shapes runs in two phases: an exact narrow test for the pairs the kinds
//! know how to test, then a generic swept fallback that approximates a fast
//! mover by the rectangle it sweeps over one step, so tunneling movers are
//! still caught. When everything misses once, the whole test is retried a
//! single time with the roles swapped.

use crate::foundation::math::{self, constants::DEG_90, Vec3};
use crate::physics::collision;
use crate::render::background::{Background, PaintMode};

pub mod polygon;
pub mod rectangle;

pub use self::polygon::Polygon;
pub use self::rectangle::Rectangle;

/// Side count used to render a circle as a regular polygon
pub const CIRCLE_SIDES: u32 = 100;

/// Geometric kind of a shape
///
/// The set is closed: pairwise collision dispatch is a total match over
/// these variants, there is no open-ended downcasting.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Position-only node, draws nothing and collides with nothing
    Empty,
    /// Oriented rectangle anchored at its top-left corner
    Rectangle(Rectangle),
    /// Regular polygon, collides as its circumscribed circle
    Polygon(Polygon),
    /// Circle with the given radius, drawn as a high side count polygon
    Circle(f64),
}

/// Positioned geometry with child shapes
///
/// `position` is local: the world anchor of a shape is the offset handed to
/// [`Shape::draw`] or [`Shape::detect_collision`] plus this position, and
/// children accumulate it in turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Local position, added to the inherited offset
    pub position: Vec3,
    children: Vec<Shape>,
    kind: ShapeKind,
}

impl Shape {
    /// Creates a shape of the given kind
    pub fn new(position: Vec3, kind: ShapeKind) -> Self {
        Self {
            position,
            children: Vec::new(),
            kind,
        }
    }

    /// Creates a position-only shape with no geometry
    pub fn empty(position: Vec3) -> Self {
        Self::new(position, ShapeKind::Empty)
    }

    /// Creates a rectangle anchored at `position` as its top-left corner
    pub fn rectangle(position: Vec3, width: f64, height: f64, angle: f64) -> Self {
        Self::new(
            position,
            ShapeKind::Rectangle(Rectangle::new(width, height, angle)),
        )
    }

    /// Creates a regular polygon centered at `position`
    pub fn polygon(position: Vec3, radius: f64, sides: u32, angle: f64) -> Self {
        Self::new(
            position,
            ShapeKind::Polygon(Polygon::new(radius, sides, angle)),
        )
    }

    /// Creates a circle centered at `position`
    pub fn circle(position: Vec3, radius: f64) -> Self {
        Self::new(position, ShapeKind::Circle(radius))
    }

    /// Geometric kind of this shape
    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Mutable access to the geometric kind
    pub fn kind_mut(&mut self) -> &mut ShapeKind {
        &mut self.kind
    }

    /// Appends a child shape, drawn after this one at the accumulated offset
    pub fn add_child(&mut self, child: Shape) {
        self.children.push(child);
    }

    /// Child shapes in insertion order
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Collision radius for round kinds, `None` otherwise
    pub fn radius(&self) -> Option<f64> {
        match &self.kind {
            ShapeKind::Polygon(polygon) => Some(polygon.radius),
            ShapeKind::Circle(radius) => Some(*radius),
            ShapeKind::Empty | ShapeKind::Rectangle(_) => None,
        }
    }

    /// Rectangle corners anchored at `offset` plus the local position,
    /// `None` for non-rectangle kinds
    pub fn corners(&self, offset: Vec3) -> Option<[Vec3; 4]> {
        match &self.kind {
            ShapeKind::Rectangle(rectangle) => Some(rectangle.corners(offset + self.position)),
            _ => None,
        }
    }

    /// Paints this shape at `offset` plus its local position, then recurses
    /// into children with the accumulated offset
    ///
    /// A [`ShapeKind::Empty`] shape makes no paint calls but still recurses.
    pub fn draw(&self, offset: Vec3, background: &dyn Background, border_only: bool) {
        let anchor = offset + self.position;
        let mode = if border_only {
            PaintMode::Outline
        } else {
            PaintMode::Fill
        };

        match &self.kind {
            ShapeKind::Empty => {}
            ShapeKind::Rectangle(rectangle) => {
                background.apply();
                background.paint(&rectangle.corners(anchor), mode);
            }
            ShapeKind::Polygon(polygon) => {
                background.apply();
                background.paint(&polygon.vertices(anchor), mode);
            }
            ShapeKind::Circle(radius) => {
                let outline = Polygon::new(*radius, CIRCLE_SIDES, 0.0);
                background.apply();
                background.paint(&outline.vertices(anchor), mode);
            }
        }

        for child in &self.children {
            child.draw(anchor, background, border_only);
        }
    }

    /// Swept proxy covering the space this shape crosses in one step
    ///
    /// Round shapes sweep into a rectangle as long as the distance traveled
    /// and as wide as their diameter, aligned to the velocity direction.
    /// Rectangles and empty shapes define no proxy and return `None`. The
    /// proxy is itself a shape and is tested under the same offset as the
    /// shape it stands in for.
    pub fn collision_space(&self, speed: Vec3) -> Option<Shape> {
        let radius = self.radius()?;
        let direction = speed.y.atan2(speed.x);
        let top_left = self.position
            + Vec3::new(
                radius * (direction + DEG_90).cos(),
                radius * (direction + DEG_90).sin(),
                0.0,
            );
        Some(Shape::new(
            top_left,
            ShapeKind::Rectangle(Rectangle::new(speed.norm(), 2.0 * radius, direction)),
        ))
    }

    /// Pairwise collision test between this shape and `other`
    ///
    /// Each shape sits at its own offset plus local position and moves at
    /// its own speed. Returns the witness point of the first test that
    /// registers a hit.
    ///
    /// The exact narrow test for the current pair of kinds runs first. When
    /// it misses, or the pair has no exact test, the swept fallback takes
    /// over: if either shape moves, this shape's swept proxy is tested
    /// against the other (which keeps its speed and may sweep in turn), then
    /// proxy against proxy with both held still. If everything missed and
    /// `try_inverse` is set, the whole protocol reruns once with the roles
    /// swapped, so every ordered pair of kinds gets its exact test attempted
    /// regardless of call order.
    pub fn detect_collision(
        &self,
        other: &Shape,
        my_offset: Vec3,
        my_speed: Vec3,
        other_offset: Vec3,
        other_speed: Vec3,
        try_inverse: bool,
    ) -> Option<Vec3> {
        if let Some(point) = self.exact_collision(other, my_offset, other_offset) {
            return Some(point);
        }
        self.sweep_collision(
            other,
            my_offset,
            my_speed,
            other_offset,
            other_speed,
            try_inverse,
        )
    }

    /// Exact narrow test for recognized kind pairs, `None` on miss or when
    /// the pair is unrecognized
    fn exact_collision(&self, other: &Shape, my_offset: Vec3, other_offset: Vec3) -> Option<Vec3> {
        let my_center = my_offset + self.position;
        let other_center = other_offset + other.position;

        match (&self.kind, &other.kind) {
            (ShapeKind::Rectangle(mine), ShapeKind::Rectangle(theirs)) => {
                collision::collision_rectangles_2d(
                    &mine.corners(my_center),
                    &theirs.corners(other_center),
                )
            }
            (ShapeKind::Rectangle(mine), _) => {
                let radius = other.radius()?;
                collision::collision_rectangle_circle_2d(
                    &mine.corners(my_center),
                    other_center,
                    radius,
                )
            }
            (_, ShapeKind::Rectangle(theirs)) => {
                let radius = self.radius()?;
                collision::collision_rectangle_circle_2d(
                    &theirs.corners(other_center),
                    my_center,
                    radius,
                )
            }
            _ => {
                let my_radius = self.radius()?;
                let other_radius = other.radius()?;
                collision::collision_spheres(my_center, my_radius, other_center, other_radius)
                    .then(|| (my_center + other_center) * 0.5)
            }
        }
    }

    /// Generic swept fallback, then a single role swap
    fn sweep_collision(
        &self,
        other: &Shape,
        my_offset: Vec3,
        my_speed: Vec3,
        other_offset: Vec3,
        other_speed: Vec3,
        try_inverse: bool,
    ) -> Option<Vec3> {
        let stopped = Vec3::zeros();

        if !(math::is_zero(my_speed) && math::is_zero(other_speed)) {
            if let Some(my_space) = self.collision_space(my_speed) {
                // the proxy stands in for this shape and is held still;
                // the other side keeps its speed so it can sweep in turn
                if let Some(point) = my_space.detect_collision(
                    other,
                    my_offset,
                    stopped,
                    other_offset,
                    other_speed,
                    try_inverse,
                ) {
                    log::trace!("swept proxy hit at {:?}", point);
                    return Some(point);
                }
                if let Some(other_space) = other.collision_space(other_speed) {
                    if let Some(point) = my_space.detect_collision(
                        &other_space,
                        my_offset,
                        stopped,
                        other_offset,
                        stopped,
                        false,
                    ) {
                        log::trace!("swept proxy pair hit at {:?}", point);
                        return Some(point);
                    }
                }
            }
        }

        if try_inverse {
            return other.detect_collision(
                self,
                other_offset,
                other_speed,
                my_offset,
                my_speed,
                false,
            );
        }
        None
    }
}

impl Default for Shape {
    /// An empty shape at the origin
    fn default() -> Self {
        Self::empty(Vec3::zeros())
    }
}
