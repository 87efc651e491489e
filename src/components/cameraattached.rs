//! Marker for entities fixed to the camera.
//!
//! Entities carrying [`CameraAttached`] are HUD elements: their
//! [`MapPosition`](super::mapposition::MapPosition) is interpreted in camera
//! (screen) space, so the render pass does not subtract the camera offset.
//! They do not take part in collision detection.

use bevy_ecs::prelude::Component;

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct CameraAttached;
