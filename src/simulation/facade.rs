use wasm_bindgen::prelude::*;

use crate::core::vec2::Vec2;
use crate::domain::collides::CollisionClass;
use crate::systems::kinetic::KineticBody;

use super::perf_stats::PerfStats;
use super::WorldCore;

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

impl World {
    pub fn core(&self) -> &WorldCore {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut WorldCore {
        &mut self.core
    }

    /// Apply `f` to a body; false when the id is unknown
    fn with_body(&mut self, id: u32, f: impl FnOnce(&mut KineticBody)) -> bool {
        match self.core.body_mut(id) {
            Some(body) => {
                f(body);
                true
            }
            None => false,
        }
    }
}

#[wasm_bindgen]
impl World {
    /// Create an all-air world of `width`x`height` tiles
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, tile_size: f32) -> Result<World, JsValue> {
        let core = WorldCore::new(width, height, tile_size)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 { self.core.grid().width() }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 { self.core.grid().height() }

    #[wasm_bindgen(getter)]
    pub fn tile_size(&self) -> f32 { self.core.grid().tile_size() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> u32 { self.core.body_count() as u32 }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        self.core.set_gravity(gravity);
    }

    pub fn set_max_step(&mut self, max_step: f32) {
        self.core.set_max_step(max_step);
    }

    // === MAP API ===

    /// Replace the collision map: `{"tilesize": 16, "data": [[0, 1], ...]}`
    pub fn load_collision_map(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_collision_map_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the slope table: `{"slopes": [{"id", "p1", "p2", "solid"}]}`
    pub fn load_slope_table(&mut self, json: String) -> Result<(), JsValue> {
        self.core
            .load_slope_table_json(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_tile(&mut self, col: i32, row: i32, id: u32) -> bool {
        self.core.set_tile(col, row, id)
    }

    /// Tile id at (col, row); 0 outside the map
    pub fn tile_at(&self, col: i32, row: i32) -> u32 {
        self.core.tile_at(col, row)
    }

    pub fn tile_at_px(&self, x: f32, y: f32) -> u32 {
        self.core.tile_at_px(x, y)
    }

    pub fn set_tile_at_px(&mut self, x: f32, y: f32, id: u32) -> bool {
        self.core.set_tile_at_px(x, y, id)
    }

    // === BODY API ===

    /// Spawn a body. `class` is a class weight (see `class_*`).
    /// Returns the body id, or 0 when the size/class is invalid.
    pub fn spawn_body(&mut self, x: f32, y: f32, w: f32, h: f32, class: u8) -> u32 {
        let Some(class) = CollisionClass::from_weight(class) else {
            log::warn!("spawn_body: unknown collision class {}", class);
            return 0;
        };
        match self.core.spawn_body(x, y, w, h, class) {
            Ok(id) => id,
            Err(e) => {
                log::warn!("spawn_body: {}", e);
                0
            }
        }
    }

    pub fn remove_body(&mut self, id: u32) -> bool {
        self.core.remove_body(id)
    }

    pub fn clear(&mut self) {
        self.core.clear();
    }

    /// Move a body without sweeping (also resets its last position)
    pub fn set_body_position(&mut self, id: u32, x: f32, y: f32) -> bool {
        self.with_body(id, |b| b.teleport(x, y))
    }

    pub fn set_body_velocity(&mut self, id: u32, vx: f32, vy: f32) -> bool {
        self.with_body(id, |b| b.vel = Vec2::new(vx, vy))
    }

    pub fn set_body_accel(&mut self, id: u32, ax: f32, ay: f32) -> bool {
        self.with_body(id, |b| b.accel = Vec2::new(ax, ay))
    }

    pub fn set_body_friction(&mut self, id: u32, fx: f32, fy: f32) -> bool {
        self.with_body(id, |b| b.friction = Vec2::new(fx, fy))
    }

    /// False for an unknown id or a non-finite limit
    pub fn set_body_max_vel(&mut self, id: u32, mx: f32, my: f32) -> bool {
        if !mx.is_finite() || !my.is_finite() {
            return false;
        }
        self.with_body(id, |b| b.max_vel = Vec2::new(mx.abs(), my.abs()))
    }

    pub fn set_body_bounciness(&mut self, id: u32, bounciness: f32) -> bool {
        self.with_body(id, |b| b.set_bounciness(bounciness))
    }

    pub fn set_body_min_bounce_velocity(&mut self, id: u32, v: f32) -> bool {
        self.with_body(id, |b| b.min_bounce_velocity = v.abs())
    }

    pub fn set_body_gravity_factor(&mut self, id: u32, factor: f32) -> bool {
        self.with_body(id, |b| b.gravity_factor = factor)
    }

    pub fn set_body_class(&mut self, id: u32, class: u8) -> bool {
        match CollisionClass::from_weight(class) {
            Some(class) => self.with_body(id, |b| b.collision_class = class),
            None => false,
        }
    }

    /// Check groups are bit sets (`group_a` = 1, `group_b` = 2)
    pub fn set_body_groups(&mut self, id: u32, group: u8, check_against: u8) -> bool {
        self.core.set_body_groups(id, group, check_against)
    }

    pub fn body_x(&self, id: u32) -> Option<f32> {
        self.core.body(id).map(|b| b.pos.x)
    }

    pub fn body_y(&self, id: u32) -> Option<f32> {
        self.core.body(id).map(|b| b.pos.y)
    }

    pub fn body_vel_x(&self, id: u32) -> Option<f32> {
        self.core.body(id).map(|b| b.vel.x)
    }

    pub fn body_vel_y(&self, id: u32) -> Option<f32> {
        self.core.body(id).map(|b| b.vel.y)
    }

    pub fn body_standing(&self, id: u32) -> bool {
        self.core.body(id).map(|b| b.standing).unwrap_or(false)
    }

    /// Center-to-center distance between two bodies
    pub fn body_distance(&self, a: u32, b: u32) -> Option<f32> {
        Some(self.core.body(a)?.distance_to(self.core.body(b)?))
    }

    /// Angle (radians) from body `a`'s center to body `b`'s center
    pub fn body_angle(&self, a: u32, b: u32) -> Option<f32> {
        Some(self.core.body(a)?.angle_to(self.core.body(b)?))
    }

    /// Full body state as JSON (for debugging tools)
    pub fn body_json(&self, id: u32) -> Result<String, JsValue> {
        let body = self
            .core
            .body(id)
            .ok_or_else(|| JsValue::from_str(&format!("no body with id {}", id)))?;
        serde_json::to_string(body).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    // === SIMULATION ===

    /// Step the simulation forward by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.core.step(dt);
    }

    pub fn collision_event_count(&self) -> u32 {
        self.core.events().len() as u32
    }

    pub fn collision_event_body(&self, index: u32) -> u32 {
        self.core.events().get(index as usize).map(|e| e.body).unwrap_or(0)
    }

    pub fn collision_event_other(&self, index: u32) -> u32 {
        self.core.events().get(index as usize).map(|e| e.other).unwrap_or(0)
    }

    /// Event kind code (see `event_*`); 255 when out of range
    pub fn collision_event_kind(&self, index: u32) -> u8 {
        self.core
            .events()
            .get(index as usize)
            .map(|e| e.kind.code())
            .unwrap_or(u8::MAX)
    }

    pub fn collision_events_json(&self) -> Result<String, JsValue> {
        self.core
            .events_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
