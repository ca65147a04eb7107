//! Swept Tracer - move an axis-aligned box through the tile grid
//!
//! The requested displacement is cut into sub-steps no longer than one tile
//! so a fast body can't skip a one-tile-thin wall. Each sub-step resolves the
//! X axis first, then Y. Full tiles clamp the body to the tile boundary and
//! freeze that axis; line tiles either block like a full tile or project the
//! body back onto the line (a slope contact) and stop the trace.

mod axis;
mod line;

use crate::core::grid::{TileGrid, TileId, TILE_EMPTY};
use crate::core::vec2::Vec2;

/// Extra length added before counting sub-steps. Forces one more sub-step
/// when a displacement is an exact multiple of the tile size.
const STEP_EPSILON: f32 = 0.1;

/// Upper bound on sub-steps per call. Displacements too long to fit are
/// shortened along their own direction first.
pub const MAX_SUBSTEPS: u32 = 1024;

/// Contact with a line tile: line direction (pixels) and its unit normal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlopeContact {
    pub dir: Vec2,
    pub normal: Vec2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Collision {
    pub x: bool,
    pub y: bool,
    pub slope: Option<SlopeContact>,
}

impl Collision {
    pub fn any(&self) -> bool {
        self.x || self.y || self.slope.is_some()
    }
}

/// Outcome of a single `trace` call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceResult {
    pub collision: Collision,
    /// Collision-adjusted end position
    pub pos: Vec2,
    /// Tile ids that blocked the X and Y axes (0 when the axis was free)
    pub hit_tile: (TileId, TileId),
    /// Sub-steps actually run
    pub substeps: u32,
}

impl TraceResult {
    fn at(pos: Vec2) -> Self {
        Self {
            collision: Collision::default(),
            pos,
            hit_tile: (TILE_EMPTY, TILE_EMPTY),
            substeps: 0,
        }
    }
}

/// Trace work done by a batch of calls
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceStats {
    pub calls: u32,
    pub substeps: u32,
}

impl TraceStats {
    pub fn of(res: &TraceResult) -> Self {
        Self { calls: 1, substeps: res.substeps }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            calls: self.calls.saturating_add(other.calls),
            substeps: self.substeps.saturating_add(other.substeps),
        }
    }
}

/// Trace a `size` box from `pos` by `delta` through `grid`.
///
/// Never panics. A non-finite position or displacement returns `pos`
/// unchanged with no collision. At most `MAX_SUBSTEPS` sub-steps run, each
/// no longer than one tile.
pub fn trace(grid: &TileGrid, pos: Vec2, delta: Vec2, size: Vec2) -> TraceResult {
    let mut res = TraceResult::at(pos);
    if !pos.is_finite() || !delta.is_finite() || !size.is_finite() {
        return res;
    }

    let tile_size = grid.tile_size();
    let mut delta = delta;
    let reach = (MAX_SUBSTEPS - 1) as f32 * tile_size;
    let longest = delta.x.abs().max(delta.y.abs());
    if longest > reach {
        delta = delta * (reach / longest);
    }

    let steps = ((delta.x.abs().max(delta.y.abs()) + STEP_EPSILON) / tile_size).ceil();
    if steps <= 1.0 {
        axis::trace_step(grid, &mut res, pos, delta, size, true);
        res.substeps = 1;
        return res;
    }

    let steps = (steps as u32).min(MAX_SUBSTEPS);
    let mut step = Vec2::new(delta.x / steps as f32, delta.y / steps as f32);
    for i in 0..steps {
        if step.is_zero() {
            break;
        }
        let origin = res.pos;
        axis::trace_step(grid, &mut res, origin, step, size, i == 0);
        res.substeps += 1;

        if res.collision.x {
            step.x = 0.0;
        }
        if res.collision.y {
            step.y = 0.0;
        }
        if res.collision.slope.is_some() {
            break;
        }
    }

    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::TILE_SOLID;

    fn grid(tile_size: f32, rows: &[&[TileId]]) -> TileGrid {
        TileGrid::new(tile_size, rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
    }

    #[test]
    fn zero_delta_is_identity() {
        let g = grid(16.0, &[&[1, 1], &[1, 2]]);
        let pos = Vec2::new(3.5, 7.25);
        let res = trace(&g, pos, Vec2::zero(), Vec2::new(8.0, 8.0));
        assert_eq!(res.pos, pos);
        assert!(!res.collision.any());
        assert_eq!(res.hit_tile, (0, 0));
    }

    #[test]
    fn fast_body_does_not_tunnel_through_thin_wall() {
        let g = grid(64.0, &[&[0, 1, 0, 0, 0]]);
        let res = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(10000.0, 0.0), Vec2::new(16.0, 16.0));
        assert!(res.collision.x);
        assert_eq!(res.hit_tile.0, TILE_SOLID);
        assert!(res.pos.x + 16.0 <= 64.0);
        assert_close(res.pos.x, 48.0);
    }

    #[test]
    fn exact_tile_multiple_still_hits_first_wall() {
        let g = grid(16.0, &[&[0, 0, 1, 0]]);
        let res = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(32.0, 0.0), Vec2::new(16.0, 16.0));
        assert!(res.collision.x);
        assert_close(res.pos.x, 16.0);
    }

    #[test]
    fn lands_on_floor() {
        let g = grid(16.0, &[&[0], &[0], &[1]]);
        let res = trace(&g, Vec2::new(4.0, 0.0), Vec2::new(0.0, 40.0), Vec2::new(8.0, 8.0));
        assert!(res.collision.y);
        assert!(!res.collision.x);
        assert_eq!(res.hit_tile.1, TILE_SOLID);
        assert_close(res.pos.y, 24.0);
        assert_close(res.pos.x, 4.0);
    }

    #[test]
    fn moving_left_clamps_to_far_side_of_wall() {
        let g = grid(16.0, &[&[1, 0, 0]]);
        let res = trace(&g, Vec2::new(20.0, 0.0), Vec2::new(-10.0, 0.0), Vec2::new(8.0, 8.0));
        assert!(res.collision.x);
        assert_close(res.pos.x, 16.0);
    }

    #[test]
    fn unknown_ids_above_slope_range_are_solid() {
        let g = grid(16.0, &[&[0], &[0], &[99]]);
        let res = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(0.0, 30.0), Vec2::new(8.0, 8.0));
        assert!(res.collision.y);
        assert_eq!(res.hit_tile.1, 99);
    }

    #[test]
    fn unmapped_slope_id_is_air() {
        // 46 sits inside 2..=55 but has no line definition
        let g = grid(16.0, &[&[0], &[0], &[46]]);
        let res = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(0.0, 30.0), Vec2::new(8.0, 8.0));
        assert!(!res.collision.any());
        assert_close(res.pos.y, 30.0);
    }

    #[test]
    fn outside_grid_moves_freely() {
        let g = grid(16.0, &[&[1, 1], &[1, 1]]);
        let res = trace(&g, Vec2::new(-100.0, -100.0), Vec2::new(10.0, 5.0), Vec2::new(8.0, 8.0));
        assert!(!res.collision.any());
        assert_eq!(res.pos, Vec2::new(-90.0, -95.0));
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let g = grid(16.0, &[&[0]]);
        let pos = Vec2::new(1.0, 1.0);
        let res = trace(&g, pos, Vec2::new(f32::NAN, 2.0), Vec2::new(4.0, 4.0));
        assert_eq!(res.pos, pos);
        assert!(!res.collision.any());
    }

    #[test]
    fn falling_onto_45_degree_slope_slides() {
        let g = grid(16.0, &[&[0, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
        let res = trace(&g, Vec2::new(20.0, 10.0), Vec2::new(0.0, 12.0), Vec2::new(4.0, 4.0));
        let slope = res.collision.slope.expect("slope contact");
        assert!(!res.collision.y);
        assert_close(res.pos.x, 19.0);
        assert_close(res.pos.y, 21.0);
        assert_eq!(slope.dir, Vec2::new(16.0, -16.0));
        assert_close(slope.normal.x, -std::f32::consts::FRAC_1_SQRT_2);
        assert_close(slope.normal.y, -std::f32::consts::FRAC_1_SQRT_2);
    }

    #[test]
    fn above_the_slope_line_is_free() {
        let g = grid(16.0, &[&[0, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
        let res = trace(&g, Vec2::new(20.0, 10.0), Vec2::new(0.0, 6.0), Vec2::new(4.0, 4.0));
        assert!(!res.collision.any());
        assert_close(res.pos.y, 16.0);
    }

    #[test]
    fn one_way_platform_catches_from_above() {
        let g = grid(16.0, &[&[0, 0, 0], &[0, 0, 0], &[0, 12, 0], &[0, 0, 0]]);
        let res = trace(&g, Vec2::new(18.0, 20.0), Vec2::new(0.0, 8.0), Vec2::new(8.0, 8.0));
        let slope = res.collision.slope.expect("landed on the one-way line");
        assert_close(res.pos.y, 24.0);
        assert_eq!(slope.dir, Vec2::new(16.0, 0.0));
    }

    #[test]
    fn one_way_platform_passes_from_below() {
        let g = grid(16.0, &[&[0, 0, 0], &[0, 0, 0], &[0, 12, 0], &[0, 0, 0]]);
        let res = trace(&g, Vec2::new(18.0, 40.0), Vec2::new(0.0, -8.0), Vec2::new(8.0, 8.0));
        assert!(!res.collision.any());
        assert_close(res.pos.y, 32.0);
    }

    #[test]
    fn diagonal_corner_entry_resolves_on_y_because_x_is_tested_first() {
        // Known asymmetry: X uses the pre-step rows, Y uses the post-X
        // columns, so a diagonal hit on a lone corner block is a floor hit.
        let g = grid(16.0, &[&[0, 0], &[0, 1]]);
        let res = trace(&g, Vec2::new(4.0, 4.0), Vec2::new(8.0, 8.0), Vec2::new(8.0, 8.0));
        assert!(!res.collision.x);
        assert!(res.collision.y);
        assert_close(res.pos.x, 12.0);
        assert_close(res.pos.y, 8.0);
    }

    #[test]
    fn blocked_axis_stops_but_other_axis_keeps_sliding() {
        let g = grid(16.0, &[&[0, 0, 0, 1], &[0, 0, 0, 1], &[0, 0, 0, 1], &[0, 0, 0, 1]]);
        let res = trace(&g, Vec2::new(30.0, 0.0), Vec2::new(40.0, 40.0), Vec2::new(8.0, 8.0));
        assert!(res.collision.x);
        assert!(!res.collision.y);
        assert_close(res.pos.x, 40.0);
        assert_close(res.pos.y, 40.0);
    }

    #[test]
    fn leading_edge_inside_a_line_tile_is_retested_on_the_first_step() {
        // Bottom edge starts in the slope row, under the line, and ends in
        // the empty row below
        let g = grid(16.0, &[&[0, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
        let (pos, delta, size) = (Vec2::new(20.0, 18.0), Vec2::new(0.0, 12.0), Vec2::new(4.0, 4.0));

        let res = trace(&g, pos, delta, size);
        assert!(res.collision.slope.is_some());
        assert!(!res.collision.y);
        assert_close(res.pos.x, 15.0);
        assert_close(res.pos.y, 25.0);
        assert_eq!(res.substeps, 1);

        let mut later = TraceResult::at(pos);
        super::axis::trace_step(&g, &mut later, pos, delta, size, false);
        assert!(!later.collision.any());
        assert_eq!(later.pos, Vec2::new(20.0, 30.0));
    }

    #[test]
    fn later_sub_steps_skip_the_previous_tile_retest() {
        // Same end point as above, but the slope row is entered on the first
        // sub-step (above the line) and left on the second
        let g = grid(16.0, &[&[0, 0, 0], &[0, 2, 0], &[0, 0, 0]]);
        let res = trace(&g, Vec2::new(20.0, 6.0), Vec2::new(0.0, 24.0), Vec2::new(4.0, 4.0));
        assert_eq!(res.substeps, 2);
        assert!(!res.collision.any());
        assert_eq!(res.pos, Vec2::new(20.0, 30.0));
    }

    #[test]
    fn one_way_line_catches_only_a_corner_that_started_in_front() {
        let g = grid(16.0, &[&[0, 0, 0], &[0, 0, 0], &[0, 12, 0], &[0, 0, 0]]);
        let size = Vec2::new(8.0, 8.0);

        // Bottom edge a hair under the line: still counts as in front
        let res = trace(&g, Vec2::new(18.0, 24.015625), Vec2::new(0.0, 2.0), size);
        assert!(res.collision.y);
        assert_eq!(res.hit_tile.1, 12);
        assert_close(res.pos.y, 24.0);

        // Half a pixel under: already behind it, falls through
        let res = trace(&g, Vec2::new(18.0, 24.5), Vec2::new(0.0, 2.0), size);
        assert!(!res.collision.any());
        assert_close(res.pos.y, 26.5);
    }

    #[test]
    fn huge_displacement_is_capped_in_sub_steps() {
        let g = grid(16.0, &[&[0, 0, 0, 0]]);
        let res = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(1e30, 0.0), Vec2::new(8.0, 8.0));
        assert_eq!(res.substeps, MAX_SUBSTEPS);
        assert!(res.pos.is_finite());
        assert!((res.pos.x - (MAX_SUBSTEPS - 1) as f32 * 16.0).abs() < 1.0);

        // Still no tunnelling
        let g = grid(64.0, &[&[0, 1, 0, 0, 0]]);
        let res = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(f32::MAX, 0.0), Vec2::new(16.0, 16.0));
        assert!(res.collision.x);
        assert_close(res.pos.x, 48.0);
        assert!(res.substeps <= MAX_SUBSTEPS);
    }

    #[test]
    fn stats_sum_calls_and_sub_steps() {
        let g = grid(16.0, &[&[0, 0, 0, 0]]);
        let short = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(8.0, 8.0));
        let long = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(40.0, 0.0), Vec2::new(8.0, 8.0));
        let skipped = trace(&g, Vec2::new(0.0, 0.0), Vec2::new(f32::NAN, 0.0), Vec2::new(8.0, 8.0));
        assert_eq!((short.substeps, long.substeps, skipped.substeps), (1, 3, 0));

        let total = [short, long, skipped]
            .iter()
            .map(TraceStats::of)
            .fold(TraceStats::default(), TraceStats::merge);
        assert_eq!(total, TraceStats { calls: 3, substeps: 4 });
    }
}
