use serde::{Deserialize, Serialize};

/// Point-in-time statistics of a spatial hash.
///
/// Counts are gathered shard by shard and may be slightly stale while other
/// threads are mutating the grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    /// Side length of one grid cell
    pub cell_size: f64,
    /// Number of occupied cells
    pub cells: usize,
    /// Number of membership records across all cells
    pub nodes: usize,
    /// Idle scratch buffers held by the query pool
    pub pooled_buffers: usize,
}

impl GridStats {
    /// Average number of nodes per occupied cell.
    pub fn average_occupancy(&self) -> f64 {
        if self.cells == 0 {
            0.0
        } else {
            self.nodes as f64 / self.cells as f64
        }
    }
}
