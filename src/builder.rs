//! Grid builder for validated construction.

use crate::config::Config;
use crate::error::{GridError, Result};
use crate::grid::SpatialHash;
use crate::node::Node;

/// Builder for a [`SpatialHash`] with validated settings.
///
/// ```rust
/// use spatio_grid::{GridBuilder, SpatialHash, TrackedPoint};
///
/// let grid: SpatialHash<TrackedPoint<u64, f64>> = GridBuilder::new()
///     .cell_size(25.0)
///     .max_pooled_buffers(4)
///     .build()?;
/// assert_eq!(grid.cell_size(), 25.0);
/// # Ok::<(), spatio_grid::GridError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct GridBuilder {
    config: Config,
}

impl GridBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the side length of one grid cell.
    pub fn cell_size(mut self, cell_size: f64) -> Self {
        self.config.cell_size = cell_size;
        self
    }

    /// Set the capacity pre-allocated for fresh query buffers.
    pub fn buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    /// Set how many idle query buffers the pool may keep.
    pub fn max_pooled_buffers(mut self, count: usize) -> Self {
        self.config.max_pooled_buffers = count;
        self
    }

    /// Set the largest buffer capacity the pool will retain.
    pub fn max_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.max_buffer_capacity = capacity;
        self
    }

    /// Validate the configuration and build the grid.
    pub fn build<T: Node>(self) -> Result<SpatialHash<T>> {
        self.config.validate().map_err(GridError::InvalidConfig)?;
        Ok(SpatialHash::with_config(&self.config))
    }
}
