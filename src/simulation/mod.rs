//! World - tile collision simulation host
//!
//! Owns one tile grid and a flat list of bodies. Every `step`:
//! 1. integrate all bodies against the grid (parallel with the `parallel` feature)
//! 2. scan all body pairs, resolve the touching ones
//! 3. record the check/collide hooks that fired as `CollisionEvent`s
//!
//! World only orchestrates: tracing, integration and resolution live in systems/

use std::sync::Arc;

use crate::core::error::EngineError;
use crate::core::grid::{CollisionLayer, TileGrid, TileId};
use crate::domain::collides::{CheckGroup, CollisionClass};
use crate::domain::slopes::SlopeTable;
use crate::systems::kinetic::KineticBody;

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "events/events.rs"]
mod events;
#[path = "bodies/bodies.rs"]
mod bodies;
#[path = "step/step.rs"]
mod step;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use bodies::BodySlot;
pub use events::{CollisionEvent, EventKind};
pub use facade::World;
pub use perf_stats::PerfStats;
pub use settings::SimSettings;

/// The simulation world
pub struct WorldCore {
    grid: TileGrid,
    bodies: Vec<BodySlot>,
    next_id: u32,

    settings: SimSettings,

    // State
    frame: u64,
    events: Vec<CollisionEvent>,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WorldCore {
    /// Create an all-air world of `width`x`height` tiles
    pub fn new(width: u32, height: u32, tile_size: f32) -> Result<Self, EngineError> {
        Ok(Self::with_grid(TileGrid::empty(tile_size, width, height)?))
    }

    pub fn with_grid(grid: TileGrid) -> Self {
        init::create_world_core(grid, SimSettings::default())
    }

    pub fn with_settings(grid: TileGrid, settings: SimSettings) -> Self {
        init::create_world_core(grid, settings)
    }

    // === MAP ===

    /// Replace the grid from a `{"tilesize", "data"}` layer. The current
    /// slope table carries over.
    pub fn load_collision_map_json(&mut self, json: &str) -> Result<(), EngineError> {
        let layer: CollisionLayer = serde_json::from_str(json)?;
        self.load_collision_layer(layer)
    }

    pub fn load_collision_layer(&mut self, layer: CollisionLayer) -> Result<(), EngineError> {
        let slopes = Arc::new(self.grid.slopes().clone());
        self.grid = TileGrid::from_layer(layer, slopes)?;
        log::debug!(
            "collision map loaded: {}x{} tiles of {}px",
            self.grid.width(),
            self.grid.height(),
            self.grid.tile_size()
        );
        Ok(())
    }

    /// Swap in a `{"slopes": [...]}` table. Ids above the new last slope id
    /// become solid.
    pub fn load_slope_table_json(&mut self, json: &str) -> Result<(), EngineError> {
        let table = SlopeTable::from_json(json)?;
        log::debug!(
            "slope table loaded: {} lines, last slope id {}",
            table.len(),
            table.last_slope()
        );
        self.grid.set_slopes(Arc::new(table));
        Ok(())
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn set_tile(&mut self, col: i32, row: i32, id: TileId) -> bool {
        self.grid.set_tile(col, row, id)
    }

    pub fn tile_at(&self, col: i32, row: i32) -> TileId {
        self.grid.tile(col, row)
    }

    pub fn tile_at_px(&self, x: f32, y: f32) -> TileId {
        self.grid.tile_at_px(x, y)
    }

    pub fn set_tile_at_px(&mut self, x: f32, y: f32, id: TileId) -> bool {
        self.grid.set_tile_at_px(x, y, id)
    }

    // === BODIES ===

    /// Spawn a body and return its id (ids start at 1)
    pub fn spawn_body(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        class: CollisionClass,
    ) -> Result<u32, EngineError> {
        bodies::spawn_body(self, x, y, w, h, class)
    }

    /// Take ownership of a prepared body; its id is reassigned
    pub fn insert_body(&mut self, body: KineticBody) -> u32 {
        bodies::insert_body(self, body)
    }

    pub fn remove_body(&mut self, id: u32) -> bool {
        bodies::remove_body(self, id)
    }

    pub fn body(&self, id: u32) -> Option<&KineticBody> {
        bodies::slot(self, id).map(|s| &s.body)
    }

    pub fn body_mut(&mut self, id: u32) -> Option<&mut KineticBody> {
        bodies::slot_mut(self, id).map(|s| &mut s.body)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &KineticBody> {
        self.bodies.iter().map(|s| &s.body)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Set which groups a body belongs to and which groups it checks against
    pub fn set_body_groups(&mut self, id: u32, group: CheckGroup, check_against: CheckGroup) -> bool {
        match bodies::slot_mut(self, id) {
            Some(slot) => {
                slot.group = group;
                slot.check_against = check_against;
                true
            }
            None => false,
        }
    }

    /// Remove all bodies and events; the grid stays
    pub fn clear(&mut self) {
        bodies::clear(self)
    }

    // === SETTINGS ===

    pub fn settings(&self) -> SimSettings {
        self.settings
    }

    pub fn set_gravity(&mut self, gravity: f32) {
        settings::set_gravity(self, gravity);
    }

    pub fn set_max_step(&mut self, max_step: f32) {
        settings::set_max_step(self, max_step);
    }

    /// Enable or disable per-step perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last step perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    // === SIMULATION ===

    /// Advance by `dt` seconds (clamped to the max step)
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Hooks fired during the last step, in firing order
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    pub fn events_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.events)?)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
