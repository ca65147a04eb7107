use crate::core::error::EngineError;
use crate::domain::collides::{CheckGroup, CollisionClass, GROUP_NONE};
use crate::systems::kinetic::KineticBody;

use super::WorldCore;

/// A body owned by the world, with its check groups
#[derive(Clone, Debug, PartialEq)]
pub struct BodySlot {
    pub body: KineticBody,
    pub group: CheckGroup,
    pub check_against: CheckGroup,
}

impl BodySlot {
    pub fn new(body: KineticBody) -> Self {
        Self {
            body,
            group: GROUP_NONE,
            check_against: GROUP_NONE,
        }
    }
}

pub(super) fn spawn_body(
    world: &mut WorldCore,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    class: CollisionClass,
) -> Result<u32, EngineError> {
    let body = KineticBody::new(x, y, w, h)?.with_class(class);
    Ok(insert_body(world, body))
}

pub(super) fn insert_body(world: &mut WorldCore, mut body: KineticBody) -> u32 {
    let id = world.next_id;
    world.next_id = world.next_id.wrapping_add(1).max(1);

    body.id = id;
    log::debug!(
        "spawned body {} at ({}, {}) size {}x{} as {:?}",
        id,
        body.pos.x,
        body.pos.y,
        body.size.x,
        body.size.y,
        body.collision_class
    );
    world.bodies.push(BodySlot::new(body));
    id
}

pub(super) fn remove_body(world: &mut WorldCore, id: u32) -> bool {
    match world.bodies.iter().position(|s| s.body.id == id) {
        Some(idx) => {
            // Keep insertion order: pair order decides hook order
            world.bodies.remove(idx);
            true
        }
        None => false,
    }
}

pub(super) fn slot(world: &WorldCore, id: u32) -> Option<&BodySlot> {
    world.bodies.iter().find(|s| s.body.id == id)
}

pub(super) fn slot_mut(world: &mut WorldCore, id: u32) -> Option<&mut BodySlot> {
    world.bodies.iter_mut().find(|s| s.body.id == id)
}

pub(super) fn clear(world: &mut WorldCore) {
    world.bodies.clear();
    world.events.clear();
    world.frame = 0;
}
