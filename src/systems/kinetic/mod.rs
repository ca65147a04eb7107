//! Kinetic Body Integrator
//!
//! Per tick and per body:
//! 1. remember the pre-step position (the resolver's axis heuristic needs it)
//! 2. gravity, then acceleration or friction, clamped to max velocity
//! 3. swept move through the tile grid
//! 4. response: bounce or stop on X/Y hits, reflect or slide on slopes

mod body;
mod integrate;

pub use body::KineticBody;
pub use integrate::{
    handle_movement_trace, new_velocity, step, SLOPE_STANDING_MAX, SLOPE_STANDING_MIN,
};
