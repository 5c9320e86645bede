//! Scene arena and per-frame traversal
//!
//! The [`Scene`] owns every entity in a slotmap arena and drives the three
//! per-frame passes: update, draw and sibling collision tests. Destruction
//! is deferred: [`Scene::destroy`] marks the entity and hides it, the
//! teardown itself runs when the outermost [`Scene::update`] of the frame
//! returns. A depth counter tracks nesting, so updates started from inside
//! a behavior hook never drain the queue early. Marked entities keep
//! participating in whatever traversal is already in flight; the arena's
//! generation check rejects their keys afterwards.

use slotmap::SlotMap;

use crate::scene::entity::{Behavior, Entity, EntityKey, EntityParams};

/// Arena of entities with deferred destruction
pub struct Scene {
    entities: SlotMap<EntityKey, Entity>,
    marked: Vec<EntityKey>,
    update_depth: u32,
}

impl Scene {
    /// Creates an empty scene
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
            marked: Vec::new(),
            update_depth: 0,
        }
    }

    /// Inserts an unlinked entity and returns its key
    pub fn spawn(&mut self, params: EntityParams) -> EntityKey {
        self.entities.insert(Entity::new(params))
    }

    /// Whether `key` addresses a live entity
    ///
    /// Marked entities still count as live until the deferred teardown runs.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(key)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Shared access to an entity, `None` for stale keys
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Mutable access to an entity, `None` for stale keys
    pub fn get_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Key of `key`'s parent, `None` when unlinked or stale
    pub fn parent(&self, key: EntityKey) -> Option<EntityKey> {
        self.entities.get(key).and_then(|entity| entity.parent)
    }

    /// Children of `key` in insertion order, empty for stale keys
    pub fn children(&self, key: EntityKey) -> &[EntityKey] {
        match self.entities.get(key) {
            Some(entity) => &entity.children,
            None => &[],
        }
    }

    /// Links `child` under `parent`, unlinking it from any previous parent
    ///
    /// Membership and back reference move together. The call is silently a
    /// no-op when either key is stale, and refuses to link an entity into
    /// its own subtree. Re-adding an existing child moves it to the end of
    /// the child list.
    pub fn add_child(&mut self, parent: EntityKey, child: EntityKey) {
        if !self.entities.contains_key(parent) || !self.entities.contains_key(child) {
            return;
        }

        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                log::warn!("refusing cycle: {:?} is an ancestor of {:?}", child, parent);
                return;
            }
            cursor = self.entities.get(ancestor).and_then(|entity| entity.parent);
        }

        self.remove_parent(child);
        if let Some(entity) = self.entities.get_mut(child) {
            entity.parent = Some(parent);
        }
        if let Some(entity) = self.entities.get_mut(parent) {
            entity.children.push(child);
        }
    }

    /// Unlinks `child` from `parent` if currently linked there
    pub fn remove_child(&mut self, parent: EntityKey, child: EntityKey) {
        let linked = self
            .entities
            .get(child)
            .map_or(false, |entity| entity.parent == Some(parent));
        if !linked {
            return;
        }

        if let Some(entity) = self.entities.get_mut(parent) {
            entity.children.retain(|&key| key != child);
        }
        if let Some(entity) = self.entities.get_mut(child) {
            entity.parent = None;
        }
    }

    /// Links `child` under `parent`, the child-side spelling of
    /// [`Scene::add_child`]
    pub fn set_parent(&mut self, child: EntityKey, parent: EntityKey) {
        self.add_child(parent, child);
    }

    /// Unlinks `key` from its parent, a no-op when unlinked or stale
    pub fn remove_parent(&mut self, key: EntityKey) {
        let parent = match self.entities.get(key) {
            Some(entity) => entity.parent,
            None => return,
        };

        if let Some(parent) = parent {
            if let Some(entity) = self.entities.get_mut(parent) {
                entity.children.retain(|&other| other != key);
            }
            if let Some(entity) = self.entities.get_mut(key) {
                entity.parent = None;
            }
        }
    }

    /// Marks `key` for destruction and hides it immediately
    ///
    /// The entity stays live, linked and updatable until the outermost
    /// update of the frame returns; the teardown then runs once no matter
    /// how often it was marked. Destroying outside any update takes effect
    /// when the next update completes. Stale keys are silently ignored.
    pub fn destroy(&mut self, key: EntityKey) {
        if let Some(entity) = self.entities.get_mut(key) {
            entity.display = false;
            self.marked.push(key);
        }
    }

    /// Updates the subtree rooted at `root` for one fixed step
    ///
    /// Per entity: before-update hook, kinematic integration (`position +=
    /// speed`, then `speed += acceleration`), recursion into a snapshot of
    /// the children taken after integration, after-update hook. When this
    /// call is the outermost update on the scene, the pending destruction
    /// queue is drained before it returns.
    pub fn update(&mut self, root: EntityKey, now: f64, tick: u64) {
        self.update_depth += 1;
        self.update_entity(root, now, tick);
        self.update_depth -= 1;

        if self.update_depth == 0 {
            self.drain_marked();
        }
    }

    fn update_entity(&mut self, key: EntityKey, now: f64, tick: u64) {
        if !self.entities.contains_key(key) {
            return;
        }

        let mut behavior = self.take_behavior(key);
        if let Some(behavior) = behavior.as_mut() {
            behavior.before_update(self, key, now, tick);
        }

        // snapshot the children so hooks below may relink freely
        let children = match self.entities.get_mut(key) {
            Some(entity) => {
                entity.position += entity.speed;
                entity.speed += entity.acceleration;
                entity.children.clone()
            }
            None => Vec::new(),
        };

        for child in children {
            self.update_entity(child, now, tick);
        }

        if let Some(behavior) = behavior.as_mut() {
            behavior.after_update(self, key, now, tick);
        }
        self.restore_behavior(key, behavior);
    }

    /// Draws the subtree rooted at `root`
    ///
    /// A hidden entity contributes nothing, its subtree included. Drawing a
    /// stale key is a protocol violation and is logged, never fatal.
    pub fn draw(&self, root: EntityKey, border_only: bool) {
        let entity = match self.entities.get(root) {
            Some(entity) => entity,
            None => {
                log::warn!("drawing error: entity {:?} is destroyed", root);
                return;
            }
        };

        if !entity.display {
            return;
        }

        if let Some(behavior) = entity.behavior.as_ref() {
            behavior.before_draw(entity);
        }
        entity
            .mesh
            .draw(entity.position, entity.background.as_ref(), border_only);
        for &child in &entity.children {
            self.draw(child, border_only);
        }
        if let Some(behavior) = entity.behavior.as_ref() {
            behavior.after_draw(entity);
        }
    }

    /// Tests every ordered pair of `parent`'s children for collision
    ///
    /// For each pair (i, j) with i before j in child order, the pair is
    /// tested only when child i carries a collider; on a hit the collision
    /// hook runs on both entities, each seeing the other and the shared
    /// witness point. The child list is snapshotted up front, so hooks may
    /// mark and relink freely while the pass runs.
    pub fn detect_collisions(&mut self, parent: EntityKey) {
        let children = match self.entities.get(parent) {
            Some(entity) => entity.children.clone(),
            None => return,
        };

        for (index, &first) in children.iter().enumerate() {
            let armed = self
                .entities
                .get(first)
                .map_or(false, |entity| entity.collider.is_some());
            if !armed {
                continue;
            }
            for &second in &children[index + 1..] {
                self.test_pair(first, second);
            }
        }
    }

    fn test_pair(&mut self, first: EntityKey, second: EntityKey) {
        let point = {
            let first_entity = match self.entities.get(first) {
                Some(entity) => entity,
                None => return,
            };
            let second_entity = match self.entities.get(second) {
                Some(entity) => entity,
                None => return,
            };
            let (first_collider, second_collider) = match (
                first_entity.collider.as_ref(),
                second_entity.collider.as_ref(),
            ) {
                (Some(first_collider), Some(second_collider)) => (first_collider, second_collider),
                _ => return,
            };

            first_collider.detect_collision(
                second_collider,
                first_entity.position,
                first_entity.speed,
                second_entity.position,
                second_entity.speed,
                true,
            )
        };

        if let Some(point) = point {
            log::trace!("collision of {:?} and {:?} at {:?}", first, second, point);

            let mut behavior = self.take_behavior(first);
            if let Some(behavior) = behavior.as_mut() {
                behavior.on_collision(self, first, second, point);
            }
            self.restore_behavior(first, behavior);

            let mut behavior = self.take_behavior(second);
            if let Some(behavior) = behavior.as_mut() {
                behavior.on_collision(self, second, first, point);
            }
            self.restore_behavior(second, behavior);
        }
    }

    /// Tears down marked entities until the queue is empty
    ///
    /// Per entity: before-destroy hook, unlink from the parent, mark every
    /// child (they drain in this same loop), remove from the arena (which
    /// releases mesh, collider and background together), after-destroy
    /// hook. Entities marked more than once tear down once.
    fn drain_marked(&mut self) {
        while let Some(key) = self.marked.pop() {
            if !self.entities.contains_key(key) {
                continue;
            }

            let mut behavior = self.take_behavior(key);
            if let Some(behavior) = behavior.as_mut() {
                behavior.before_destroy(self, key);
            }

            self.remove_parent(key);
            let children = match self.entities.get(key) {
                Some(entity) => entity.children.clone(),
                None => Vec::new(),
            };
            for child in children {
                self.destroy(child);
            }

            self.entities.remove(key);
            if let Some(behavior) = behavior.as_mut() {
                behavior.after_destroy(self, key);
            }
        }
    }

    fn take_behavior(&mut self, key: EntityKey) -> Option<Box<dyn Behavior>> {
        self.entities
            .get_mut(key)
            .and_then(|entity| entity.behavior.take())
    }

    /// Puts a taken behavior back unless the hook installed a replacement
    fn restore_behavior(&mut self, key: EntityKey, behavior: Option<Box<dyn Behavior>>) {
        if let Some(behavior) = behavior {
            if let Some(entity) = self.entities.get_mut(key) {
                if entity.behavior.is_none() {
                    entity.behavior = Some(behavior);
                }
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
