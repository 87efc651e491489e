//! ECS components for entities.
//!
//! Every entity spawned through [`Scene::spawn`](crate::scene::Scene::spawn)
//! carries a position, a collider, a body, a material, a physics kind, flags,
//! identity and a draw priority. Shapes, camera attachment and parent offsets
//! are optional.
//!
//! Submodules overview:
//! - [`boxcollider`] – axis-aligned bounds used for overlap tests and sizing
//! - [`cameraattached`] – marker for HUD entities positioned in camera space
//! - [`flags`] – active and per-tick contact flags
//! - [`identity`] – unique name and monotonic creation id
//! - [`localoffset`] – offset of a child from its parent
//! - [`mapposition`] – world-space position (top-left corner)
//! - [`material`] – density, kinetic friction and elasticity
//! - [`physickind`] – static / dynamic / none classification
//! - [`rigidbody`] – velocity, mass and the per-tick pending forces
//! - [`shape`] – tagged drawable variant (rect, ellipse, text)
//! - [`zindex`] – draw order hint

pub mod boxcollider;
pub mod cameraattached;
pub mod flags;
pub mod identity;
pub mod localoffset;
pub mod mapposition;
pub mod material;
pub mod physickind;
pub mod rigidbody;
pub mod shape;
pub mod zindex;
