//! TileGrid - collision layer of tile ids with a single tile size
//!
//! Row-major flat storage. Id 0 is air, 1 is solid, `2..=last_slope` are line
//! tiles resolved through the grid's slope table, anything above is solid.
//! Lookups outside the grid read as air.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::domain::slopes::SlopeTable;

pub type TileId = u32;

pub const TILE_EMPTY: TileId = 0;
pub const TILE_SOLID: TileId = 1;

/// How the tracer treats a tile id
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Empty,
    Solid,
    Slope,
}

/// Collision layer as stored in level JSON
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollisionLayer {
    pub tilesize: f32,
    pub data: Vec<Vec<TileId>>,
}

#[derive(Clone, Debug)]
pub struct TileGrid {
    tile_size: f32,
    width: u32,
    height: u32,
    cells: Vec<TileId>,
    slopes: Arc<SlopeTable>,
    last_slope: TileId,
}

impl TileGrid {
    /// Build from rows using the standard slope table
    pub fn new(tile_size: f32, rows: Vec<Vec<TileId>>) -> Result<Self, EngineError> {
        Self::with_slopes(tile_size, rows, Arc::new(SlopeTable::standard()))
    }

    pub fn with_slopes(
        tile_size: f32,
        rows: Vec<Vec<TileId>>,
        slopes: Arc<SlopeTable>,
    ) -> Result<Self, EngineError> {
        validate_tile_size(tile_size)?;

        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(EngineError::InvalidGrid(format!(
                "grid must have at least one cell (got {}x{})",
                width, height
            )));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::InvalidGrid(format!(
                    "row {} has {} cells, expected {}",
                    row_idx,
                    row.len(),
                    width
                )));
            }
            cells.extend(row);
        }

        let last_slope = slopes.last_slope();
        Ok(Self {
            tile_size,
            width: width as u32,
            height: height as u32,
            cells,
            slopes,
            last_slope,
        })
    }

    /// All-air grid of the given dimensions
    pub fn empty(tile_size: f32, width: u32, height: u32) -> Result<Self, EngineError> {
        let rows = vec![vec![TILE_EMPTY; width as usize]; height as usize];
        Self::new(tile_size, rows)
    }

    pub fn from_layer(layer: CollisionLayer, slopes: Arc<SlopeTable>) -> Result<Self, EngineError> {
        Self::with_slopes(layer.tilesize, layer.data, slopes)
    }

    /// Parse `{"tilesize": 16, "data": [[...], ...]}` with the standard slopes
    pub fn from_layer_json(json: &str) -> Result<Self, EngineError> {
        let layer: CollisionLayer = serde_json::from_str(json)?;
        Self::from_layer(layer, Arc::new(SlopeTable::standard()))
    }

    pub fn to_layer(&self) -> CollisionLayer {
        CollisionLayer {
            tilesize: self.tile_size,
            data: self
                .cells
                .chunks(self.width as usize)
                .map(|row| row.to_vec())
                .collect(),
        }
    }

    /// Swap the slope table; `last_slope` follows the new table
    pub fn set_slopes(&mut self, slopes: Arc<SlopeTable>) {
        self.last_slope = slopes.last_slope();
        self.slopes = slopes;
    }

    #[inline]
    pub fn tile_size(&self) -> f32 { self.tile_size }

    #[inline]
    pub fn width(&self) -> u32 { self.width }

    #[inline]
    pub fn height(&self) -> u32 { self.height }

    #[inline]
    pub fn last_slope(&self) -> TileId { self.last_slope }

    pub fn slopes(&self) -> &SlopeTable {
        &self.slopes
    }

    /// Width of the grid in pixels
    pub fn pixel_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    /// Height of the grid in pixels
    pub fn pixel_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    #[inline]
    pub fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && (col as u32) < self.width && (row as u32) < self.height
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// Tile id at (col, row); air outside the grid
    #[inline]
    pub fn tile(&self, col: i32, row: i32) -> TileId {
        if !self.in_bounds(col, row) {
            return TILE_EMPTY;
        }
        *fast!(self.cells, [self.index(col, row)])
    }

    /// Returns false when (col, row) is outside the grid
    pub fn set_tile(&mut self, col: i32, row: i32, id: TileId) -> bool {
        if !self.in_bounds(col, row) {
            return false;
        }
        let idx = self.index(col, row);
        fast!(self.cells, [idx] = id);
        true
    }

    /// Column/row containing the pixel coordinate
    #[inline]
    pub fn tile_coord(&self, px: f32) -> i32 {
        (px / self.tile_size).floor() as i32
    }

    pub fn tile_at_px(&self, x: f32, y: f32) -> TileId {
        if !(x.is_finite() && y.is_finite()) {
            return TILE_EMPTY;
        }
        self.tile(self.tile_coord(x), self.tile_coord(y))
    }

    pub fn set_tile_at_px(&mut self, x: f32, y: f32, id: TileId) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        let (col, row) = (self.tile_coord(x), self.tile_coord(y));
        self.set_tile(col, row, id)
    }

    #[inline]
    pub fn kind(&self, id: TileId) -> TileKind {
        if id == TILE_EMPTY {
            TileKind::Empty
        } else if id == TILE_SOLID || id > self.last_slope {
            TileKind::Solid
        } else {
            TileKind::Slope
        }
    }
}

fn validate_tile_size(tile_size: f32) -> Result<(), EngineError> {
    if !tile_size.is_finite() || tile_size <= 0.0 {
        return Err(EngineError::InvalidGrid(format!(
            "tile size must be positive and finite, got {}",
            tile_size
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_rows() {
        let err = TileGrid::new(8.0, vec![vec![0, 0, 0], vec![0, 0]]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidGrid(_)));
    }

    #[test]
    fn rejects_empty_and_bad_tile_size() {
        assert!(TileGrid::new(8.0, vec![]).is_err());
        assert!(TileGrid::new(0.0, vec![vec![0]]).is_err());
        assert!(TileGrid::new(f32::NAN, vec![vec![0]]).is_err());
    }

    #[test]
    fn out_of_range_reads_as_air() {
        let grid = TileGrid::new(8.0, vec![vec![1, 1], vec![1, 1]]).unwrap();
        assert_eq!(grid.tile(0, 0), TILE_SOLID);
        assert_eq!(grid.tile(-1, 0), TILE_EMPTY);
        assert_eq!(grid.tile(2, 0), TILE_EMPTY);
        assert_eq!(grid.tile(0, 5), TILE_EMPTY);
        assert_eq!(grid.tile_at_px(-0.5, 3.0), TILE_EMPTY);
    }

    #[test]
    fn classifies_ids_against_standard_slopes() {
        let grid = TileGrid::empty(8.0, 1, 1).unwrap();
        assert_eq!(grid.last_slope(), 55);
        assert_eq!(grid.kind(0), TileKind::Empty);
        assert_eq!(grid.kind(1), TileKind::Solid);
        assert_eq!(grid.kind(2), TileKind::Slope);
        assert_eq!(grid.kind(55), TileKind::Slope);
        assert_eq!(grid.kind(56), TileKind::Solid);
    }

    #[test]
    fn without_line_tiles_every_wall_id_is_solid() {
        let grid = TileGrid::with_slopes(8.0, vec![vec![0, 2, 12]], Arc::new(SlopeTable::none())).unwrap();
        assert!(grid.slopes().is_empty());
        assert_eq!(grid.last_slope(), TILE_SOLID);
        assert_eq!(grid.kind(grid.tile(1, 0)), TileKind::Solid);
        assert_eq!(grid.kind(grid.tile(2, 0)), TileKind::Solid);
    }

    #[test]
    fn pixel_edits_hit_the_right_cell() {
        let mut grid = TileGrid::empty(16.0, 4, 3).unwrap();
        assert!(grid.set_tile_at_px(33.0, 17.0, 7));
        assert_eq!(grid.tile(2, 1), 7);
        assert!(!grid.set_tile_at_px(64.0, 0.0, 1));
        assert_eq!(grid.to_layer().data[1][2], 7);
    }

    #[test]
    fn parses_collision_layer_json() {
        let grid = TileGrid::from_layer_json(r#"{"tilesize": 16, "data": [[0, 1], [2, 0]]}"#).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile(0, 1), 2);
        assert_eq!(grid.pixel_width(), 32.0);

        let err = TileGrid::from_layer_json("{\"tilesize\": 16}").unwrap_err();
        assert!(matches!(err, EngineError::Parse(_)));
    }
}
