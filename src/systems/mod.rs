//! Engine systems.
//!
//! The per-tick phases of a scene. Plain ECS systems run inside the scene's
//! schedules; behavior dispatch needs the whole world and runs as exclusive
//! functions.
//!
//! Submodules overview
//! - [`behaviors`] – run behavior hooks in draw order, isolating failures
//! - [`camera`] – move the camera toward its target
//! - [`collision`] – pairwise AABB overlap tests
//! - [`hierarchy`] – place children relative to their parents
//! - [`physics`] – force integration and world boundary containment
//! - [`time`] – advance simulation time

pub mod behaviors;
pub mod camera;
pub mod collision;
pub mod hierarchy;
pub mod physics;
pub mod time;
