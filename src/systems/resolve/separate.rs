use crate::core::vec2::Vec2;
use crate::systems::kinetic::KineticBody;
use crate::systems::trace::{trace, TraceStats};

use super::ResolveContext;

/// Who moves, relative to the ordered (top/left, bottom/right) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Role {
    BothMove,
    FirstYields,
    SecondYields,
    Immovable,
}

/// Move `body` through the grid by `delta`, returning where it ended up
#[inline]
fn nudge(body: &KineticBody, delta: Vec2, ctx: &ResolveContext<'_>) -> Vec2 {
    let res = trace(ctx.grid, body.pos, delta, body.size);
    ctx.record_trace(TraceStats::of(&res));
    res.pos
}

/// Weak body takes on the strong body's velocity, minus its own bounce
#[inline]
fn yield_velocity(weak: f32, strong: f32, bounciness: f32) -> f32 {
    -weak * bounciness + strong
}

pub(super) fn separate_on_y(
    top: &mut KineticBody,
    bottom: &mut KineticBody,
    role: Role,
    ctx: &ResolveContext<'_>,
) {
    let overlap = top.bottom() - bottom.pos.y;

    match role {
        Role::Immovable => {}

        Role::FirstYields => {
            top.vel.y = yield_velocity(top.vel.y, bottom.vel.y, top.bounciness);

            // Riding: carried along by what it stands on
            let mut carry = 0.0;
            if (top.vel.y - bottom.vel.y).abs() < top.min_bounce_velocity {
                top.standing = true;
                carry = bottom.vel.x * ctx.tick;
            }
            top.pos = nudge(top, Vec2::new(carry, -overlap), ctx);
        }

        Role::SecondYields => {
            bottom.vel.y = yield_velocity(bottom.vel.y, top.vel.y, bottom.bounciness);
            bottom.pos = nudge(bottom, Vec2::new(0.0, overlap), ctx);
        }

        Role::BothMove if ctx.gravity != 0.0 && (bottom.standing || top.vel.y > 0.0) => {
            // Landing: only the top body is pushed back
            top.pos.y = nudge(top, Vec2::new(0.0, -overlap), ctx).y;

            if top.bounciness > 0.0 && top.vel.y > top.min_bounce_velocity {
                top.vel.y *= -top.bounciness;
            } else {
                top.standing = true;
                top.vel.y = 0.0;
            }
        }

        Role::BothMove => {
            let v2 = (top.vel.y - bottom.vel.y) / 2.0;
            top.vel.y = -v2;
            bottom.vel.y = v2;

            let carry = top.vel.x * ctx.tick;
            top.pos.y = nudge(top, Vec2::new(0.0, -overlap / 2.0), ctx).y;
            bottom.pos = nudge(bottom, Vec2::new(carry, overlap / 2.0), ctx);
        }
    }
}

pub(super) fn separate_on_x(
    left: &mut KineticBody,
    right: &mut KineticBody,
    role: Role,
    ctx: &ResolveContext<'_>,
) {
    let overlap = left.right() - right.pos.x;

    match role {
        Role::Immovable => {}

        Role::FirstYields => {
            left.vel.x = yield_velocity(left.vel.x, right.vel.x, left.bounciness);
            left.pos.x = nudge(left, Vec2::new(-overlap, 0.0), ctx).x;
        }

        Role::SecondYields => {
            right.vel.x = yield_velocity(right.vel.x, left.vel.x, right.bounciness);
            right.pos.x = nudge(right, Vec2::new(overlap, 0.0), ctx).x;
        }

        Role::BothMove => {
            let v2 = (left.vel.x - right.vel.x) / 2.0;
            left.vel.x = -v2;
            right.vel.x = v2;

            left.pos.x = nudge(left, Vec2::new(-overlap / 2.0, 0.0), ctx).x;
            right.pos.x = nudge(right, Vec2::new(overlap / 2.0, 0.0), ctx).x;
        }
    }
}
