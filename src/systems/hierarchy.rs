//! Parent/child position propagation.
//!
//! Children carry a [`LocalOffset`] and a [`ChildOf`] link. After the
//! integrator and behaviors have moved the parents, their children (and
//! grandchildren) are placed at `parent.pos + offset`.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::localoffset::LocalOffset;
use crate::components::mapposition::MapPosition;

type ChildQuery<'w, 's> = Query<
    'w,
    's,
    (
        Option<&'static LocalOffset>,
        &'static mut MapPosition,
        Option<&'static Children>,
    ),
    With<ChildOf>,
>;

pub fn propagate_children(
    roots: Query<(&MapPosition, &Children), Without<ChildOf>>,
    mut children_query: ChildQuery<'_, '_>,
) {
    for (root_pos, children) in roots.iter() {
        let direct: Vec<Entity> = children.iter().collect();
        place_children(root_pos.pos, direct, &mut children_query);
    }
}

fn place_children(parent_pos: Vec2, children: Vec<Entity>, children_query: &mut ChildQuery<'_, '_>) {
    for child_entity in children {
        let Ok((offset, mut position, grandchildren)) = children_query.get_mut(child_entity) else {
            continue;
        };
        position.pos = parent_pos + offset.map(|o| o.0).unwrap_or(Vec2::ZERO);
        let child_pos = position.pos;
        let next: Vec<Entity> = grandchildren
            .map(|g| g.iter().collect())
            .unwrap_or_default();
        place_children(child_pos, next, children_query);
    }
}
