//! Scene graph with deferred destruction
//!
//! Entities live in a generation checked arena owned by a [`Scene`] and are
//! addressed by [`entity::EntityKey`] handles. Destroying an entity only
//! marks it; the actual teardown runs when the outermost update of the
//! frame returns, so traversals in flight never lose the node under their
//! feet and stale handles are rejected by the arena afterwards.

pub mod entity;
pub mod graph;

pub use self::entity::{Behavior, Entity, EntityKey, EntityParams, NullBehavior};
pub use self::graph::Scene;
