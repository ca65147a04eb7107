use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::vec2::Vec2;
use crate::domain::collides::CollisionClass;

/// Kinetic Body - axis-aligned box moved by the integrator and the resolver
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KineticBody {
    /// Host-assigned id (0 = unassigned)
    pub id: u32,

    // === Motion ===
    /// Top-left corner (pixels)
    pub pos: Vec2,
    /// Position before the last integration step
    pub last_pos: Vec2,
    /// Velocity (pixels per second)
    pub vel: Vec2,
    pub accel: Vec2,
    /// Velocity decay per second while not accelerating
    pub friction: Vec2,
    pub max_vel: Vec2,
    pub size: Vec2,
    pub gravity_factor: f32,

    // === Response ===
    /// 0.0 = absorb, 1.0 = perfect reflection
    pub bounciness: f32,
    /// Below this speed a collision stops the body instead of bouncing it
    pub min_bounce_velocity: f32,
    pub standing: bool,
    pub collision_class: CollisionClass,
}

impl KineticBody {
    pub const DEFAULT_MAX_VEL: f32 = 100.0;
    pub const DEFAULT_MIN_BOUNCE_VELOCITY: f32 = 40.0;

    /// Create a body at (x, y) with size (w, h). Size must be positive and finite.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, EngineError> {
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(EngineError::InvalidBody(format!(
                "size must be positive and finite, got {}x{}",
                w, h
            )));
        }
        if !(x.is_finite() && y.is_finite()) {
            return Err(EngineError::InvalidBody(format!(
                "position must be finite, got ({}, {})",
                x, y
            )));
        }

        Ok(Self {
            id: 0,
            pos: Vec2::new(x, y),
            last_pos: Vec2::new(x, y),
            vel: Vec2::zero(),
            accel: Vec2::zero(),
            friction: Vec2::zero(),
            max_vel: Vec2::new(Self::DEFAULT_MAX_VEL, Self::DEFAULT_MAX_VEL),
            size: Vec2::new(w, h),
            gravity_factor: 1.0,
            bounciness: 0.0,
            min_bounce_velocity: Self::DEFAULT_MIN_BOUNCE_VELOCITY,
            standing: false,
            collision_class: CollisionClass::Never,
        })
    }

    pub fn with_class(mut self, class: CollisionClass) -> Self {
        self.collision_class = class;
        self
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vel = Vec2::new(vx, vy);
        self
    }

    /// Set bounciness (clamped to 0..=1)
    pub fn set_bounciness(&mut self, b: f32) {
        self.bounciness = if b.is_finite() { b.clamp(0.0, 1.0) } else { 0.0 };
    }

    /// Move without leaving a stale `last_pos` behind
    pub fn teleport(&mut self, x: f32, y: f32) {
        self.pos = Vec2::new(x, y);
        self.last_pos = self.pos;
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Open-interval AABB overlap (shared edges don't touch)
    pub fn touches(&self, other: &KineticBody) -> bool {
        !(self.pos.x >= other.right()
            || self.right() <= other.pos.x
            || self.pos.y >= other.bottom()
            || self.bottom() <= other.pos.y)
    }

    /// Center-to-center distance
    pub fn distance_to(&self, other: &KineticBody) -> f32 {
        (other.center() - self.center()).length()
    }

    /// Angle (radians) from this center to the other center
    pub fn angle_to(&self, other: &KineticBody) -> f32 {
        let d = other.center() - self.center();
        d.y.atan2(d.x)
    }
}
