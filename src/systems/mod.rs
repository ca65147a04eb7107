//! Systems - per-tick collision logic
//!
//! - trace/   - swept movement through the tile grid
//! - kinetic/ - body state and the integrator
//! - resolve/ - pairwise body separation

pub mod trace;
pub mod kinetic;
pub mod resolve;

pub use kinetic::{step, KineticBody};
pub use resolve::{check_pair, resolve, touches, Axis, Collidable, ResolutionKind, ResolveContext};
pub use trace::{trace, Collision, SlopeContact, TraceResult, TraceStats, MAX_SUBSTEPS};
