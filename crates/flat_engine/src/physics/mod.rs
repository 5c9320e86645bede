//! Physics module - Narrow-phase collision detection
//!
//! Pure geometric queries built on [`crate::foundation::math`]: distance
//! from segments to points, closest approach between segments, and the
//! pairwise intersection tests the shape layer dispatches to. Everything
//! here is stateless; shapes are passed in as raw geometry.

pub mod collision;
