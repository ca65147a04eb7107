//! Domain - engine-wide constant resources
//!
//! - slopes   - standard line tile table and JSON overrides
//! - collides - collision classes and check groups

pub mod collides;
pub mod slopes;

pub use collides::{CheckGroup, CollisionClass, GROUP_A, GROUP_B, GROUP_BOTH, GROUP_NONE};
pub use slopes::{SlopeDef, SlopeTable, STANDARD_SLOPES};
