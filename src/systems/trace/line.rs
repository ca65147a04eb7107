use crate::core::grid::{TileGrid, TileId};
use crate::core::vec2::Vec2;

use super::{SlopeContact, TraceResult};

/// Non-solid lines only catch a body whose corner was in front of the line
/// (within this many pixels) before the move.
const ONE_WAY_TOLERANCE: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum LineHit {
    /// Corner stays on the open side, or the id has no line definition
    Clear,
    /// Treat like a full tile on this axis
    Blocked,
    /// Projected back onto the line; `res` now carries the slope contact
    Slid,
}

/// Corner test of the moving box against the line tile `t` at (col, row).
#[allow(clippy::too_many_arguments)]
pub(super) fn check_line(
    grid: &TileGrid,
    res: &mut TraceResult,
    t: TileId,
    origin: Vec2,
    delta: Vec2,
    size: Vec2,
    col: i32,
    row: i32,
) -> LineHit {
    let Some(def) = grid.slopes().get(t) else {
        return LineHit::Clear;
    };

    let tile_size = grid.tile_size();
    let start = def.start(col, row, tile_size);
    let line = def.direction(tile_size);

    // Box corner closest to the line, relative to the line start
    let corner = Vec2::new(
        origin.x + delta.x + if line.y < 0.0 { size.x } else { 0.0 } - start.x,
        origin.y + delta.y + if line.x > 0.0 { size.y } else { 0.0 } - start.y,
    );

    // Corner on the open side?
    if line.cross(corner) <= 0.0 {
        return LineHit::Clear;
    }

    // Moving out of the solid side
    if delta.x * -line.y + delta.y * line.x < 0.0 {
        return if def.solid { LineHit::Blocked } else { LineHit::Clear };
    }

    let len = line.length();
    let normal = Vec2::new(line.y / len, -line.x / len);
    let push = normal * corner.dot(normal);

    // Pushed out further than we moved in: full tile for solid lines. A
    // one-way line only blocks if the corner started in front of it.
    if push.length_squared() >= delta.length_squared() {
        let was_in_front = line.cross(corner - delta) < ONE_WAY_TOLERANCE;
        return if def.solid || was_in_front { LineHit::Blocked } else { LineHit::Clear };
    }

    res.pos = origin + delta - push;
    res.collision.slope = Some(SlopeContact { dir: line, normal });
    LineHit::Slid
}
