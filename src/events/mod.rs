//! Event types used by the engine.
//!
//! Submodules:
//! - [`collision`] – overlap pairs found by the collision detector this tick
pub mod collision;
