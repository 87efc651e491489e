//! Pond Engine library.
//!
//! A small 2D simulation kernel: force-based physics over a bounded world
//! with friction areas, pairwise collision detection, per-entity behaviors,
//! a following camera, and scenes with a managed lifecycle. Rendering, input
//! and asset loading are collaborators behind traits.
//!
//! # Project Structure
//!
//! - [`behaviors`] – behavior trait and the built-in behaviors
//! - [`components`] – ECS components (position, body, material, flags, ...)
//! - [`error`] – the [`error::EngineError`] taxonomy
//! - [`events`] – per-tick collision pairs
//! - [`game`] – demo scenes
//! - [`render`] – canvas collaborator and the render pass
//! - [`resources`] – ECS resources (physics world, camera, config, input, ...)
//! - [`scene`] – scenes, builder, layouts and the scene manager
//! - [`systems`] – ECS systems (integrator, collisions, camera, dispatch, ...)

pub mod behaviors;
pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod render;
pub mod resources;
pub mod scene;
pub mod systems;
