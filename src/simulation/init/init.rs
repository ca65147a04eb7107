use crate::core::grid::TileGrid;

use super::perf_stats::PerfStats;
use super::settings::SimSettings;
use super::WorldCore;

pub(super) fn create_world_core(grid: TileGrid, settings: SimSettings) -> WorldCore {
    log::debug!(
        "world created: {}x{} tiles of {}px",
        grid.width(),
        grid.height(),
        grid.tile_size()
    );

    WorldCore {
        grid,
        bodies: Vec::with_capacity(64),
        next_id: 1,
        settings,
        frame: 0,
        events: Vec::new(),
        perf_enabled: false,
        perf_stats: PerfStats::default(),
    }
}
