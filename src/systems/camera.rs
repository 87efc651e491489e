//! Camera follow system.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::warn;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::resources::camera2d::Camera2D;

/// Move the camera toward the position that centers its target.
///
/// `pos = lerp(pos, target.pos - (camera.size - target.size) / 2, tween)`;
/// a tween of 1 locks onto the target with no lag. Does nothing when the
/// scene has no camera.
pub fn follow_camera(
    camera: Option<ResMut<Camera2D>>,
    targets: Query<(&MapPosition, Option<&BoxCollider>)>,
) {
    let Some(mut camera) = camera else {
        return;
    };
    let Ok((position, collider)) = targets.get(camera.target) else {
        warn!("Camera target {:?} no longer exists", camera.target);
        return;
    };
    let size = collider.map(|c| c.size).unwrap_or(Vec2::ZERO);
    let goal = camera.centered_on(position.pos, size);
    camera.pos = camera.pos.lerp(goal, camera.tween);
}
