//! Slope table - tile id -> line segment in unit-tile space
//!
//! Each line runs from `p1` to `p2`; the solid side is to the right of the
//! direction of travel along the line (y axis points down). Non-solid lines
//! are one-way: they only block bodies crossing them from the front.

use serde::{Deserialize, Serialize};

use crate::core::error::EngineError;
use crate::core::grid::{TileId, TILE_SOLID};
use crate::core::vec2::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlopeDef {
    pub p1: (f32, f32),
    pub p2: (f32, f32),
    pub solid: bool,
}

impl SlopeDef {
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32, solid: bool) -> Self {
        Self { p1: (x1, y1), p2: (x2, y2), solid }
    }

    /// Line start in pixels for the tile at (col, row)
    #[inline]
    pub fn start(&self, col: i32, row: i32, tile_size: f32) -> Vec2 {
        Vec2::new(
            (col as f32 + self.p1.0) * tile_size,
            (row as f32 + self.p1.1) * tile_size,
        )
    }

    /// Line direction (p2 - p1) in pixels
    #[inline]
    pub fn direction(&self, tile_size: f32) -> Vec2 {
        Vec2::new(
            (self.p2.0 - self.p1.0) * tile_size,
            (self.p2.1 - self.p1.1) * tile_size,
        )
    }
}

const H: f32 = 1.0 / 2.0;
const N: f32 = 1.0 / 3.0;
const M: f32 = 2.0 / 3.0;
const SOLID: bool = true;
const ONE_WAY: bool = false;

/// 48 standard line tiles: 15/22/45/67/75 degree inclines per quadrant plus
/// four one-way markers.
pub const STANDARD_SLOPES: [(TileId, SlopeDef); 48] = [
    // 15 NE
    (5, SlopeDef::new(0.0, 1.0, 1.0, M, SOLID)),
    (6, SlopeDef::new(0.0, M, 1.0, N, SOLID)),
    (7, SlopeDef::new(0.0, N, 1.0, 0.0, SOLID)),
    // 22 NE
    (3, SlopeDef::new(0.0, 1.0, 1.0, H, SOLID)),
    (4, SlopeDef::new(0.0, H, 1.0, 0.0, SOLID)),
    // 45 NE
    (2, SlopeDef::new(0.0, 1.0, 1.0, 0.0, SOLID)),
    // 67 NE
    (10, SlopeDef::new(H, 1.0, 1.0, 0.0, SOLID)),
    (21, SlopeDef::new(0.0, 1.0, H, 0.0, SOLID)),
    // 75 NE
    (32, SlopeDef::new(M, 1.0, 1.0, 0.0, SOLID)),
    (43, SlopeDef::new(N, 1.0, M, 0.0, SOLID)),
    (54, SlopeDef::new(0.0, 1.0, N, 0.0, SOLID)),
    // 15 NW
    (27, SlopeDef::new(0.0, 0.0, 1.0, N, SOLID)),
    (28, SlopeDef::new(0.0, N, 1.0, M, SOLID)),
    (29, SlopeDef::new(0.0, M, 1.0, 1.0, SOLID)),
    // 22 NW
    (25, SlopeDef::new(0.0, 0.0, 1.0, H, SOLID)),
    (26, SlopeDef::new(0.0, H, 1.0, 1.0, SOLID)),
    // 45 NW
    (24, SlopeDef::new(0.0, 0.0, 1.0, 1.0, SOLID)),
    // 67 NW
    (11, SlopeDef::new(0.0, 0.0, H, 1.0, SOLID)),
    (22, SlopeDef::new(H, 0.0, 1.0, 1.0, SOLID)),
    // 75 NW
    (33, SlopeDef::new(0.0, 0.0, N, 1.0, SOLID)),
    (44, SlopeDef::new(N, 0.0, M, 1.0, SOLID)),
    (55, SlopeDef::new(M, 0.0, 1.0, 1.0, SOLID)),
    // 15 SE
    (16, SlopeDef::new(1.0, N, 0.0, 0.0, SOLID)),
    (17, SlopeDef::new(1.0, M, 0.0, N, SOLID)),
    (18, SlopeDef::new(1.0, 1.0, 0.0, M, SOLID)),
    // 22 SE
    (14, SlopeDef::new(1.0, H, 0.0, 0.0, SOLID)),
    (15, SlopeDef::new(1.0, 1.0, 0.0, H, SOLID)),
    // 45 SE
    (13, SlopeDef::new(1.0, 1.0, 0.0, 0.0, SOLID)),
    // 67 SE
    (8, SlopeDef::new(H, 1.0, 0.0, 0.0, SOLID)),
    (19, SlopeDef::new(1.0, 1.0, H, 0.0, SOLID)),
    // 75 SE
    (30, SlopeDef::new(N, 1.0, 0.0, 0.0, SOLID)),
    (41, SlopeDef::new(M, 1.0, N, 0.0, SOLID)),
    (52, SlopeDef::new(1.0, 1.0, M, 0.0, SOLID)),
    // 15 SW
    (38, SlopeDef::new(1.0, M, 0.0, 1.0, SOLID)),
    (39, SlopeDef::new(1.0, N, 0.0, M, SOLID)),
    (40, SlopeDef::new(1.0, 0.0, 0.0, N, SOLID)),
    // 22 SW
    (36, SlopeDef::new(1.0, H, 0.0, 1.0, SOLID)),
    (37, SlopeDef::new(1.0, 0.0, 0.0, H, SOLID)),
    // 45 SW
    (35, SlopeDef::new(1.0, 0.0, 0.0, 1.0, SOLID)),
    // 67 SW
    (9, SlopeDef::new(1.0, 0.0, H, 1.0, SOLID)),
    (20, SlopeDef::new(H, 0.0, 0.0, 1.0, SOLID)),
    // 75 SW
    (31, SlopeDef::new(1.0, 0.0, M, 1.0, SOLID)),
    (42, SlopeDef::new(M, 0.0, N, 1.0, SOLID)),
    (53, SlopeDef::new(N, 0.0, 0.0, 1.0, SOLID)),
    // one-way: go N, go S, go E, go W
    (12, SlopeDef::new(0.0, 0.0, 1.0, 0.0, ONE_WAY)),
    (23, SlopeDef::new(1.0, 1.0, 0.0, 1.0, ONE_WAY)),
    (34, SlopeDef::new(1.0, 0.0, 1.0, 1.0, ONE_WAY)),
    (45, SlopeDef::new(0.0, 1.0, 0.0, 0.0, ONE_WAY)),
];

/// Immutable id -> SlopeDef lookup. Shared between grids through `Arc`.
#[derive(Clone, Debug, PartialEq)]
pub struct SlopeTable {
    defs: Vec<Option<SlopeDef>>,
    last_slope: TileId,
}

#[derive(Deserialize)]
struct SlopeBundle {
    slopes: Vec<SlopeEntry>,
}

#[derive(Deserialize)]
struct SlopeEntry {
    id: TileId,
    p1: (f32, f32),
    p2: (f32, f32),
    #[serde(default = "default_solid")]
    solid: bool,
}

fn default_solid() -> bool {
    true
}

impl SlopeTable {
    pub fn standard() -> Self {
        let mut defs = vec![None; 56];
        for (id, def) in STANDARD_SLOPES.iter() {
            defs[*id as usize] = Some(*def);
        }
        Self { defs, last_slope: 55 }
    }

    /// Table with no line tiles: every id above 1 is solid
    pub fn none() -> Self {
        Self { defs: Vec::new(), last_slope: TILE_SOLID }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, EngineError>
    where
        I: IntoIterator<Item = (TileId, SlopeDef)>,
    {
        let mut defs: Vec<Option<SlopeDef>> = Vec::new();
        let mut last_slope = TILE_SOLID;

        for (id, def) in entries {
            validate_entry(id, &def)?;
            let idx = id as usize;
            if idx >= defs.len() {
                defs.resize(idx + 1, None);
            }
            defs[idx] = Some(def);
            last_slope = last_slope.max(id);
        }

        Ok(Self { defs, last_slope })
    }

    /// Parse `{"slopes": [{"id": 2, "p1": [0, 1], "p2": [1, 0], "solid": true}]}`
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let bundle: SlopeBundle = serde_json::from_str(json)?;
        Self::from_entries(
            bundle
                .slopes
                .into_iter()
                .map(|e| (e.id, SlopeDef { p1: e.p1, p2: e.p2, solid: e.solid })),
        )
    }

    /// Largest id with a line definition (1 when the table is empty)
    #[inline]
    pub fn last_slope(&self) -> TileId {
        self.last_slope
    }

    #[inline]
    pub fn get(&self, id: TileId) -> Option<&SlopeDef> {
        self.defs.get(id as usize)?.as_ref()
    }

    pub fn len(&self) -> usize {
        self.defs.iter().filter(|d| d.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SlopeTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_entry(id: TileId, def: &SlopeDef) -> Result<(), EngineError> {
    if id <= TILE_SOLID {
        return Err(EngineError::InvalidSlope(format!(
            "slope id {} collides with the empty/solid ids",
            id
        )));
    }
    let points = [def.p1.0, def.p1.1, def.p2.0, def.p2.1];
    if points.iter().any(|v| !v.is_finite()) {
        return Err(EngineError::InvalidSlope(format!("slope {} has non-finite points", id)));
    }
    if def.p1 == def.p2 {
        return Err(EngineError::InvalidSlope(format!("slope {} has zero length", id)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_48_lines_up_to_55() {
        let table = SlopeTable::standard();
        assert_eq!(table.len(), 48);
        assert_eq!(table.last_slope(), 55);
        assert!(table.get(46).is_none());
        assert!(table.get(1).is_none());
        assert!(!table.get(12).unwrap().solid);
        assert!(table.get(2).unwrap().solid);
    }

    #[test]
    fn json_override_tracks_last_slope() {
        let table = SlopeTable::from_json(
            r#"{"slopes": [{"id": 2, "p1": [0, 1], "p2": [1, 0]}, {"id": 9, "p1": [0, 0], "p2": [1, 0], "solid": false}]}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.last_slope(), 9);
        assert!(table.get(2).unwrap().solid);
        assert!(!table.get(9).unwrap().solid);
    }

    #[test]
    fn rejects_bad_entries() {
        let err = SlopeTable::from_entries([(1, SlopeDef::new(0.0, 1.0, 1.0, 0.0, true))]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSlope(_)));

        let err = SlopeTable::from_entries([(3, SlopeDef::new(0.5, 0.5, 0.5, 0.5, true))]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSlope(_)));

        assert!(matches!(SlopeTable::from_json("[]"), Err(EngineError::Parse(_))));
    }

    #[test]
    fn empty_table_has_no_lines() {
        let table = SlopeTable::none();
        assert!(table.is_empty());
        assert_eq!(table.last_slope(), TILE_SOLID);
        assert!(table.get(2).is_none());
        assert!(!SlopeTable::standard().is_empty());
    }

    #[test]
    fn line_geometry_scales_with_tile_size() {
        let def = SlopeTable::standard().get(2).copied().unwrap();
        assert_eq!(def.start(3, 1, 16.0), Vec2::new(48.0, 32.0));
        assert_eq!(def.direction(16.0), Vec2::new(16.0, -16.0));
    }
}
