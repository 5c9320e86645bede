//! # Flat Engine
//!
//! Geometric and lifecycle core for small real-time 2D simulations.
//!
//! ## Features
//!
//! - **Vector math**: rotation, resizing, distances and 2D area/edge helpers
//! - **Collision geometry**: pure pairwise queries returning witness points
//! - **Shape hierarchy**: rectangles, polygons and circles with a swept
//!   proxy fallback that catches fast movers
//! - **Scene graph**: entities with kinematic state, lifecycle hooks and
//!   deferred destruction safe against mid-traversal mutation
//!
//! ## Quick Start
//!
//! ```rust
//! use flat_engine::prelude::*;
//!
//! let mut scene = Scene::new();
//! let puck = scene.spawn(EntityParams {
//!     speed: Vec3::new(1.0, 0.0, 0.0),
//!     mesh: Shape::circle(Vec3::zeros(), 1.0),
//!     collider: Some(Shape::circle(Vec3::zeros(), 1.0)),
//!     ..EntityParams::default()
//! });
//!
//! scene.update(puck, 0.0, 0);
//! assert_eq!(scene.get(puck).unwrap().position.x, 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;
pub mod shape;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        foundation::{
            math::{Axis, Vec3},
            time::Timer,
        },
        render::background::{Background, NullBackground, PaintMode},
        scene::{Behavior, Entity, EntityKey, EntityParams, NullBehavior, Scene},
        shape::{Shape, ShapeKind},
    };
}
