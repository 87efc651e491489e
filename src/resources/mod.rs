//! ECS resources made available to systems.
//!
//! Scene-wide data stored in each scene's world. Each submodule documents the
//! semantics and intended usage of its resource(s).
//!
//! Overview
//! - `assetstore` – fonts and images loaded once, cached by path
//! - `camera2d` – camera following a target entity
//! - `gameconfig` – tunables loaded from `config.ini`
//! - `input` – per-frame state of the abstract keys
//! - `physicsworld` – world bounds, gravity, velocity clamp and areas
//! - `sceneindex` – entity lookup by name and id allocation
//! - `worldtime` – simulation time and delta
pub mod assetstore;
pub mod camera2d;
pub mod gameconfig;
pub mod input;
pub mod physicsworld;
pub mod sceneindex;
pub mod worldtime;
