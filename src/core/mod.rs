//! Core - leaf types shared by every system
//!
//! - utils/  - safety macros (must be first for macro export!)
//! - vec2    - 2D vector math
//! - grid    - tile grid storage and lookup
//! - error   - construction/loading errors

#[macro_use]
#[path = "utils/safety.rs"]
pub mod safety;

pub mod error;
pub mod grid;
pub mod vec2;

pub use error::EngineError;
pub use grid::{CollisionLayer, TileGrid, TileId, TileKind, TILE_EMPTY, TILE_SOLID};
pub use vec2::Vec2;
