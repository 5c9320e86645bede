//! Entity data and lifecycle hooks

use slotmap::new_key_type;

use crate::foundation::math::Vec3;
use crate::render::background::{Background, NullBackground};
use crate::scene::graph::Scene;
use crate::shape::Shape;

new_key_type! {
    /// Generation checked handle to an entity in a [`Scene`]
    ///
    /// Keys stay valid across other insertions and removals. Once the
    /// entity is torn down, every operation given its key is rejected by
    /// the arena's generation check, so a stale key can never reach
    /// another entity that happens to reuse the slot.
    pub struct EntityKey;
}

/// Scene graph node with kinematic state and optional shapes
///
/// Positions are world coordinates. The parent link only drives traversal
/// and lifetime, it is not a transform hierarchy: a child moves in the same
/// coordinate frame as its parent.
pub struct Entity {
    /// World position
    pub position: Vec3,
    /// Position delta applied once per update
    pub speed: Vec3,
    /// Speed delta applied once per update
    pub acceleration: Vec3,
    /// Whether drawing renders this entity and visits its subtree
    pub display: bool,
    /// Visual shape, an empty shape when there is nothing to show
    pub mesh: Shape,
    /// Collision proxy; `None` opts the entity out of collision tests
    pub collider: Option<Shape>,
    /// Paint capability the mesh is rendered with
    pub background: Box<dyn Background>,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) parent: Option<EntityKey>,
    pub(crate) children: Vec<EntityKey>,
}

impl Entity {
    /// Creates an unlinked entity from its construction parameters
    pub fn new(params: EntityParams) -> Self {
        Self {
            position: params.position,
            speed: params.speed,
            acceleration: params.acceleration,
            display: params.display,
            mesh: params.mesh,
            collider: params.collider,
            background: params.background,
            behavior: params.behavior,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Key of the parent entity, if linked
    pub fn parent(&self) -> Option<EntityKey> {
        self.parent
    }
}

/// Construction parameters for [`Scene::spawn`]
///
/// Every field has a default: zero kinematics, visible, an empty mesh, no
/// collider, a background that paints nothing and no behavior.
pub struct EntityParams {
    /// Initial world position
    pub position: Vec3,
    /// Initial speed
    pub speed: Vec3,
    /// Initial acceleration
    pub acceleration: Vec3,
    /// Initial display flag
    pub display: bool,
    /// Visual shape
    pub mesh: Shape,
    /// Collision proxy
    pub collider: Option<Shape>,
    /// Paint capability
    pub background: Box<dyn Background>,
    /// Lifecycle hooks
    pub behavior: Option<Box<dyn Behavior>>,
}

impl EntityParams {
    /// Builder pattern: set the initial world position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder pattern: set the initial speed
    pub fn with_speed(mut self, speed: Vec3) -> Self {
        self.speed = speed;
        self
    }

    /// Builder pattern: set the initial acceleration
    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Builder pattern: set the display flag
    pub fn with_display(mut self, display: bool) -> Self {
        self.display = display;
        self
    }

    /// Builder pattern: set the visual shape
    pub fn with_mesh(mut self, mesh: Shape) -> Self {
        self.mesh = mesh;
        self
    }

    /// Builder pattern: set the collision proxy
    pub fn with_collider(mut self, collider: Shape) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Builder pattern: set the paint capability
    pub fn with_background(mut self, background: impl Background + 'static) -> Self {
        self.background = Box::new(background);
        self
    }

    /// Builder pattern: set the lifecycle hooks
    pub fn with_behavior(mut self, behavior: impl Behavior + 'static) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }
}

impl Default for EntityParams {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            speed: Vec3::zeros(),
            acceleration: Vec3::zeros(),
            display: true,
            mesh: Shape::default(),
            collider: None,
            background: Box::new(NullBackground),
            behavior: None,
        }
    }
}

/// Lifecycle hooks an entity runs as the scene drives it
///
/// All hooks default to doing nothing, implementors override the ones they
/// care about. Mutating hooks receive the owning [`Scene`] and the key of
/// the entity they belong to; while a hook runs, the behavior is detached
/// from its entity, so the scene can be freely borrowed and even the hook's
/// own entity can be inspected or destroyed.
#[allow(unused_variables)]
pub trait Behavior {
    /// Runs before kinematic integration and child updates
    fn before_update(&mut self, scene: &mut Scene, me: EntityKey, now: f64, tick: u64) {}

    /// Runs after all children of this entity updated
    fn after_update(&mut self, scene: &mut Scene, me: EntityKey, now: f64, tick: u64) {}

    /// Runs before the entity's mesh is painted
    fn before_draw(&self, entity: &Entity) {}

    /// Runs after the entity's subtree is painted
    fn after_draw(&self, entity: &Entity) {}

    /// Runs on both entities of a colliding pair, each seeing the other
    fn on_collision(&mut self, scene: &mut Scene, me: EntityKey, other: EntityKey, point: Vec3) {}

    /// Runs at teardown while the entity still exists in the scene
    fn before_destroy(&mut self, scene: &mut Scene, me: EntityKey) {}

    /// Runs after the entity was removed; `me` is already stale here
    fn after_destroy(&mut self, scene: &mut Scene, me: EntityKey) {}
}

/// Behavior with every hook left at its default
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBehavior;

impl Behavior for NullBehavior {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    #[test]
    fn test_params_default() {
        let params = EntityParams::default();
        assert!(params.display);
        assert!(params.collider.is_none());
        assert!(params.behavior.is_none());
        assert_eq!(params.position, Vec3::zeros());
        assert_eq!(*params.mesh.kind(), ShapeKind::Empty);
    }

    #[test]
    fn test_params_builder_chain() {
        let params = EntityParams::default()
            .with_position(Vec3::new(1.0, 2.0, 0.0))
            .with_speed(Vec3::new(0.5, 0.0, 0.0))
            .with_display(false)
            .with_mesh(Shape::circle(Vec3::zeros(), 2.0))
            .with_collider(Shape::circle(Vec3::zeros(), 2.0))
            .with_behavior(NullBehavior);

        assert_eq!(params.position, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(params.speed, Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(params.acceleration, Vec3::zeros());
        assert!(!params.display);
        assert!(matches!(*params.mesh.kind(), ShapeKind::Circle(_)));
        assert!(params.collider.is_some());
        assert!(params.behavior.is_some());

        let entity = Entity::new(params);
        assert!(!entity.display);
        assert_eq!(entity.parent(), None);
    }
}
