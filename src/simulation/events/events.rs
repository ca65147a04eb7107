use serde::Serialize;

use crate::systems::resolve::Axis;

/// What happened between two bodies during the pair pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// `body` checks against `other`'s group
    Check,
    CollideX,
    CollideY,
}

impl EventKind {
    pub const CHECK: u8 = 0;
    pub const COLLIDE_X: u8 = 1;
    pub const COLLIDE_Y: u8 = 2;

    pub fn collide(axis: Axis) -> Self {
        match axis {
            Axis::X => EventKind::CollideX,
            Axis::Y => EventKind::CollideY,
        }
    }

    /// Numeric code for JS
    pub fn code(self) -> u8 {
        match self {
            EventKind::Check => Self::CHECK,
            EventKind::CollideX => Self::COLLIDE_X,
            EventKind::CollideY => Self::COLLIDE_Y,
        }
    }
}

/// One hook invocation, in the order the hooks fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CollisionEvent {
    pub body: u32,
    pub other: u32,
    pub kind: EventKind,
}
