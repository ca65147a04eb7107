use crate::core::grid::{TileGrid, TileId, TileKind};
use crate::core::vec2::Vec2;

use super::line::{check_line, LineHit};
use super::TraceResult;

/// One sub-step: move by `delta`, then resolve X, then Y.
///
/// `origin` is the position before the sub-step. The tile the leading edge
/// occupied before moving is only re-tested on the first sub-step, and only
/// for line tiles.
pub(super) fn trace_step(
    grid: &TileGrid,
    res: &mut TraceResult,
    origin: Vec2,
    delta: Vec2,
    size: Vec2,
    first_step: bool,
) {
    let mut origin = origin;
    let mut delta = delta;
    res.pos += delta;

    let tile_size = grid.tile_size();
    let cols = grid.width() as i32;
    let rows = grid.height() as i32;

    // Horizontal (walls)
    if delta.x != 0.0 {
        let px_offset = if delta.x > 0.0 { size.x } else { 0.0 };
        let tile_offset = if delta.x < 0.0 { tile_size } else { 0.0 };
        let first_row = grid.tile_coord(origin.y).max(0);
        let last_row = (((origin.y + size.y) / tile_size).ceil() as i32).min(rows);
        let col = grid.tile_coord(res.pos.x + px_offset);
        let prev_col = Some(grid.tile_coord(origin.x + px_offset))
            .filter(|&c| first_step && c != col && c >= 0 && c < cols);

        if col >= 0 && col < cols {
            for row in first_row..last_row {
                if let Some(prev_col) = prev_col {
                    if starts_on_line(grid, res, origin, delta, size, prev_col, row) {
                        break;
                    }
                }

                let t = grid.tile(col, row);
                if !blocks(grid, res, t, origin, delta, size, col, row) {
                    continue;
                }
                if grid.kind(t) == TileKind::Slope && res.collision.slope.is_some() {
                    break;
                }

                res.collision.x = true;
                res.hit_tile.0 = t;
                res.pos.x = col as f32 * tile_size - px_offset + tile_offset;
                origin.x = res.pos.x;
                delta.x = 0.0;
                break;
            }
        }
    }

    // Vertical (floor, ceiling)
    if delta.y != 0.0 {
        let py_offset = if delta.y > 0.0 { size.y } else { 0.0 };
        let tile_offset = if delta.y < 0.0 { tile_size } else { 0.0 };
        let first_col = grid.tile_coord(res.pos.x).max(0);
        let last_col = (((res.pos.x + size.x) / tile_size).ceil() as i32).min(cols);
        let row = grid.tile_coord(res.pos.y + py_offset);
        let prev_row = Some(grid.tile_coord(origin.y + py_offset))
            .filter(|&r| first_step && r != row && r >= 0 && r < rows);

        if row >= 0 && row < rows {
            for col in first_col..last_col {
                if let Some(prev_row) = prev_row {
                    if starts_on_line(grid, res, origin, delta, size, col, prev_row) {
                        break;
                    }
                }

                let t = grid.tile(col, row);
                if !blocks(grid, res, t, origin, delta, size, col, row) {
                    continue;
                }
                if grid.kind(t) == TileKind::Slope && res.collision.slope.is_some() {
                    break;
                }

                res.collision.y = true;
                res.hit_tile.1 = t;
                res.pos.y = row as f32 * tile_size - py_offset + tile_offset;
                break;
            }
        }
    }
}

/// Line tile the leading edge was already inside before moving
#[inline]
fn starts_on_line(
    grid: &TileGrid,
    res: &mut TraceResult,
    origin: Vec2,
    delta: Vec2,
    size: Vec2,
    col: i32,
    row: i32,
) -> bool {
    let t = grid.tile(col, row);
    grid.kind(t) == TileKind::Slope
        && check_line(grid, res, t, origin, delta, size, col, row) != LineHit::Clear
}

/// Whether the destination tile stops this axis (line tiles may record a
/// slope contact on the way)
#[inline]
#[allow(clippy::too_many_arguments)]
fn blocks(
    grid: &TileGrid,
    res: &mut TraceResult,
    t: TileId,
    origin: Vec2,
    delta: Vec2,
    size: Vec2,
    col: i32,
    row: i32,
) -> bool {
    match grid.kind(t) {
        TileKind::Empty => false,
        TileKind::Solid => true,
        TileKind::Slope => check_line(grid, res, t, origin, delta, size, col, row) != LineHit::Clear,
    }
}
