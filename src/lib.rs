//! Concurrent in-memory 2D spatial hash grid for tracking moving entities.
//!
//! Entities are bucketed into square cells of a fixed size. Radius and
//! rectangle queries only visit the cells they overlap, and moving an entity
//! only touches the grid when it crosses a cell boundary.
//!
//! ```rust
//! use spatio_grid::{SpatialHash, TrackedPoint};
//! use std::sync::Arc;
//!
//! let grid = SpatialHash::new(50.0);
//! let drones: Vec<_> = (0..4u32)
//!     .map(|i| Arc::new(TrackedPoint::new(i, i as f64 * 20.0, 0.0)))
//!     .collect();
//! grid.put_many(&drones);
//!
//! let nearby = grid.search(0.0, 0.0, 25.0);
//! assert_eq!(nearby.len(), 2);
//!
//! drones[0].set_position(500.0, 500.0);
//! grid.update(&drones[0]);
//! assert_eq!(grid.search(0.0, 0.0, 25.0).len(), 1);
//! ```

pub mod bucket;
pub mod builder;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod node;
pub mod pool;
pub mod table;
pub mod types;

pub use builder::GridBuilder;
pub use cell::{CellKey, CellRange, cell_index};
pub use config::Config;
pub use error::{GridError, Result};
pub use grid::SpatialHash;
pub use node::{Node, Scalar, TrackedPoint};
pub use types::GridStats;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, GridBuilder, GridError, Result, SpatialHash};

    pub use crate::{Node, Scalar, TrackedPoint};

    pub use std::sync::Arc;
}
