use crate::core::grid::TileGrid;
use crate::systems::trace::{trace, TraceResult};

use super::body::KineticBody;

/// Slope angles (from `atan2(dir.x, dir.y)`) that count as ground
pub const SLOPE_STANDING_MIN: f32 = 44.0 * std::f32::consts::PI / 180.0;
pub const SLOPE_STANDING_MAX: f32 = 136.0 * std::f32::consts::PI / 180.0;

/// Clamp `v` to `±max`. A non-finite `max` leaves the speed unbounded.
#[inline]
fn clamp_speed(v: f32, max: f32) -> f32 {
    let max = if max.is_finite() { max.abs() } else { f32::MAX };
    v.clamp(-max, max)
}

/// Advance one axis of velocity: acceleration wins over friction, friction
/// never pushes the velocity past zero, and the result is within `±max`.
#[inline]
pub fn new_velocity(vel: f32, accel: f32, friction: f32, max: f32, tick: f32) -> f32 {
    if accel != 0.0 {
        return clamp_speed(vel + accel * tick, max);
    }
    if friction != 0.0 {
        let delta = friction * tick;
        let decayed = if vel - delta > 0.0 {
            vel - delta
        } else if vel + delta < 0.0 {
            vel + delta
        } else {
            0.0
        };
        return clamp_speed(decayed, max);
    }
    clamp_speed(vel, max)
}

/// Integrate one tick: gravity, acceleration/friction, swept move, response.
///
/// Returns the trace so callers can inspect what was hit.
pub fn step(body: &mut KineticBody, tick: f32, gravity: f32, grid: &TileGrid) -> TraceResult {
    body.last_pos = body.pos;

    body.vel.y += gravity * tick * body.gravity_factor;
    body.vel.x = new_velocity(body.vel.x, body.accel.x, body.friction.x, body.max_vel.x, tick);
    body.vel.y = new_velocity(body.vel.y, body.accel.y, body.friction.y, body.max_vel.y, tick);

    let res = trace(grid, body.pos, body.vel * tick, body.size);
    handle_movement_trace(body, &res);
    res
}

/// Apply a trace result to the body's velocity, standing flag and position
pub fn handle_movement_trace(body: &mut KineticBody, res: &TraceResult) {
    body.standing = false;

    if res.collision.y {
        if body.bounciness > 0.0 && body.vel.y.abs() > body.min_bounce_velocity {
            body.vel.y *= -body.bounciness;
        } else {
            if body.vel.y > 0.0 {
                body.standing = true;
            }
            body.vel.y = 0.0;
        }
    }

    if res.collision.x {
        if body.bounciness > 0.0 && body.vel.x.abs() > body.min_bounce_velocity {
            body.vel.x *= -body.bounciness;
        } else {
            body.vel.x = 0.0;
        }
    }

    if let Some(slope) = res.collision.slope {
        if body.bounciness > 0.0 {
            // Reflect about the normal
            let proj = body.vel.dot(slope.normal);
            body.vel = (body.vel - slope.normal * (proj * 2.0)) * body.bounciness;
        } else {
            // Slide along the line
            let dot = body.vel.dot(slope.dir) / slope.dir.length_squared();
            body.vel = slope.dir * dot;

            let angle = slope.dir.x.atan2(slope.dir.y);
            if (SLOPE_STANDING_MIN..=SLOPE_STANDING_MAX).contains(&angle) {
                body.standing = true;
            }
        }

        // Reflection/projection can rotate speed onto a tighter axis
        body.vel.x = clamp_speed(body.vel.x, body.max_vel.x);
        body.vel.y = clamp_speed(body.vel.y, body.max_vel.y);
    }

    body.pos = res.pos;
}
