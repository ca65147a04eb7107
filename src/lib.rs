//! Tile collision engine - swept AABB movement through tile maps in WASM
//!
//! Architecture:
//! - core/       - leaf types: vectors, the tile grid, errors
//! - domain/     - constant resources: slope table, collision classes
//! - systems/    - tracer, integrator, pairwise resolver
//! - simulation/ - world host and the JS facade

// Utils with safety macros (must be first for macro export!)
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Re-export wasm-bindgen-rayon for thread pool initialization
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Re-export main types
pub use crate::core::{EngineError, TileGrid, TileId, Vec2};
pub use domain::{CollisionClass, SlopeDef, SlopeTable};
pub use simulation::{CollisionEvent, EventKind, PerfStats, SimSettings, World, WorldCore};
pub use systems::{check_pair, resolve, step, touches, trace};
pub use systems::{Axis, Collidable, KineticBody, ResolveContext, TraceResult};

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    // Second init() keeps the first logger
    let _ = console_log::init_with_level(log::Level::Info);

    web_sys::console::log_1(&"Tile collision engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Export collision class weights for JS
#[wasm_bindgen]
pub fn class_never() -> u8 { CollisionClass::Never.weight() }
#[wasm_bindgen]
pub fn class_lite() -> u8 { CollisionClass::Lite.weight() }
#[wasm_bindgen]
pub fn class_passive() -> u8 { CollisionClass::Passive.weight() }
#[wasm_bindgen]
pub fn class_active() -> u8 { CollisionClass::Active.weight() }
#[wasm_bindgen]
pub fn class_fixed() -> u8 { CollisionClass::Fixed.weight() }

// Check groups
#[wasm_bindgen]
pub fn group_none() -> u8 { domain::GROUP_NONE }
#[wasm_bindgen]
pub fn group_a() -> u8 { domain::GROUP_A }
#[wasm_bindgen]
pub fn group_b() -> u8 { domain::GROUP_B }
#[wasm_bindgen]
pub fn group_both() -> u8 { domain::GROUP_BOTH }

// Collision event kinds
#[wasm_bindgen]
pub fn event_check() -> u8 { EventKind::CHECK }
#[wasm_bindgen]
pub fn event_collide_x() -> u8 { EventKind::COLLIDE_X }
#[wasm_bindgen]
pub fn event_collide_y() -> u8 { EventKind::COLLIDE_Y }

// Tile ids with fixed meaning
#[wasm_bindgen]
pub fn tile_empty() -> u32 { crate::core::TILE_EMPTY }
#[wasm_bindgen]
pub fn tile_solid() -> u32 { crate::core::TILE_SOLID }
