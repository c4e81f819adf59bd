//! The spatial hash grid.
//!
//! [`SpatialHash`] buckets nodes into square cells of a fixed size and answers
//! disc and rectangle queries by visiting only the cells the query overlaps.
//! All operations take `&self` and may be called from many threads at once;
//! share the grid behind an `Arc`.

use crate::cell::{CellKey, CellRange};
use crate::config::Config;
use crate::node::{Node, Scalar};
use crate::pool::BufferPool;
use crate::table::CellTable;
use crate::types::GridStats;
use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

/// Concurrent 2D spatial hash over caller-owned nodes.
///
/// # Consistency
///
/// - Each node must have a single writer: calls that move a node and the
///   `update`/`remove` calls for that node must not race each other.
/// - Queries racing with mutations of other nodes may or may not observe
///   those mutations.
/// - [`reset`](SpatialHash::reset) is not atomic with respect to operations
///   in flight on other threads.
///
/// # Example
///
/// ```rust
/// use spatio_grid::{SpatialHash, TrackedPoint};
/// use std::sync::Arc;
///
/// let grid = SpatialHash::new(100.0);
/// let node = Arc::new(TrackedPoint::new(1, 100.0, 100.0));
/// grid.put(&node);
///
/// node.set_position(300.0, 300.0);
/// grid.update(&node);
///
/// assert!(grid.search(100.0, 100.0, 50.0).is_empty());
/// assert_eq!(grid.search(300.0, 300.0, 50.0).len(), 1);
/// ```
pub struct SpatialHash<T: Node> {
    cell_size: f64,
    table: CellTable<T>,
    pool: BufferPool<Arc<T>>,
}

impl<T: Node> SpatialHash<T> {
    /// Create a grid with the given cell size and default pool settings.
    ///
    /// `cell_size` must be positive and finite; it is not checked here. Use
    /// [`GridBuilder`](crate::GridBuilder) for validated construction.
    pub fn new(cell_size: f64) -> Self {
        Self::with_config(&Config {
            cell_size,
            ..Config::default()
        })
    }

    /// Create a grid from a configuration without validating it.
    pub fn with_config(config: &Config) -> Self {
        log::debug!(
            "Creating spatial hash with cell size {} (pool: {} buffers of {})",
            config.cell_size,
            config.max_pooled_buffers,
            config.buffer_capacity
        );

        Self {
            cell_size: config.cell_size,
            table: CellTable::new(),
            pool: BufferPool::new(
                config.buffer_capacity,
                config.max_pooled_buffers,
                config.max_buffer_capacity,
            ),
        }
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    fn key_of(&self, x: T::Scalar, y: T::Scalar) -> CellKey {
        CellKey::from_position(x.as_f64(), y.as_f64(), self.cell_size)
    }

    /// Insert a node at its current position.
    ///
    /// Putting a node that is already indexed does not remove it from the
    /// cell it occupied before; use [`update`](SpatialHash::update) to move
    /// nodes.
    pub fn put(&self, node: &Arc<T>) {
        let (x, y) = (node.x(), node.y());
        self.table.insert(self.key_of(x, y), node);
        node.set_previous_position(x, y);
    }

    /// Insert every node yielded by `nodes`.
    pub fn put_many<'a, I>(&self, nodes: I)
    where
        I: IntoIterator<Item = &'a Arc<T>>,
        T: 'a,
    {
        for node in nodes {
            self.put(node);
        }
    }

    /// Remove a node from the cell of its current position.
    ///
    /// The node must not have been moved since its last put or update,
    /// otherwise the wrong cell is searched and its record stays behind.
    /// Returns whether a record was removed.
    pub fn remove(&self, node: &Arc<T>) -> bool {
        let key = self.key_of(node.x(), node.y());
        self.table.delete(key, node)
    }

    /// Re-index a node after its position changed.
    ///
    /// The node only changes bucket when its cell changed since the last
    /// put or update. Returns whether it migrated to another cell.
    pub fn update(&self, node: &Arc<T>) -> bool {
        let (x, y) = (node.x(), node.y());
        let (old_x, old_y) = node.previous_position();

        let key = self.key_of(x, y);
        let old_key = self.key_of(old_x, old_y);

        let migrated = key != old_key;
        if migrated {
            self.table.delete(old_key, node);
            self.table.insert(key, node);
            log::trace!(
                "Migrated node from cell {:?} to {:?}",
                old_key.cell_coords(),
                key.cell_coords()
            );
        }

        node.set_previous_position(x, y);
        migrated
    }

    /// Whether the node is registered in the cell it was last indexed under.
    pub fn contains(&self, node: &T) -> bool {
        let (x, y) = node.previous_position();
        self.table
            .get_if_present(self.key_of(x, y))
            .is_some_and(|bucket| bucket.contains(&node.id()))
    }

    /// All nodes within `radius` of `(x, y)`, boundary included.
    ///
    /// The result is exact: candidates from the overlapped cells are filtered
    /// by their squared Euclidean distance. Non-finite input or a negative
    /// radius yields an empty result.
    pub fn search(&self, x: T::Scalar, y: T::Scalar, radius: T::Scalar) -> Vec<Arc<T>> {
        let (cx, cy, radius) = (x.as_f64(), y.as_f64(), radius.as_f64());

        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) {
            log::warn!("Rejecting radius search with non-finite parameters");
            return Vec::new();
        }
        if radius < 0.0 {
            log::warn!("Rejecting radius search with negative radius {}", radius);
            return Vec::new();
        }

        let radius_sq = radius * radius;
        let range = CellRange::covering(
            cx - radius,
            cy - radius,
            cx + radius,
            cy + radius,
            self.cell_size,
        );

        self.collect(&range, |node| {
            let dx = node.x().as_f64() - cx;
            let dy = node.y().as_f64() - cy;
            dx * dx + dy * dy <= radius_sq
        })
    }

    /// All nodes registered in cells overlapping the `width` x `height`
    /// rectangle centered on `(x, y)`.
    ///
    /// No per-node filter is applied, so nodes sharing a cell with the
    /// rectangle are returned even when they lie outside it.
    pub fn query_rect(
        &self,
        x: T::Scalar,
        y: T::Scalar,
        width: T::Scalar,
        height: T::Scalar,
    ) -> Vec<Arc<T>> {
        let (cx, cy) = (x.as_f64(), y.as_f64());
        let (half_width, half_height) = (width.as_f64() / 2.0, height.as_f64() / 2.0);

        if ![cx, cy, half_width, half_height].iter().all(|v| v.is_finite()) {
            log::warn!("Rejecting rectangle query with non-finite parameters");
            return Vec::new();
        }

        let range = CellRange::covering(
            cx - half_width,
            cy - half_height,
            cx + half_width,
            cy + half_height,
            self.cell_size,
        );

        self.collect(&range, |_| true)
    }

    /// Remove every node from the grid.
    pub fn reset(&self) {
        log::debug!("Resetting spatial hash ({} cells)", self.table.len());
        self.table.clear();
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stats(&self) -> GridStats {
        GridStats {
            cell_size: self.cell_size,
            cells: self.table.len(),
            nodes: self.table.node_count(),
            pooled_buffers: self.pool.pooled(),
        }
    }

    /// Scanning the occupied cells is cheaper once the query range covers
    /// more cells than are occupied.
    fn should_scan_table(&self, range: &CellRange) -> bool {
        range.cell_count() > self.table.len() as u64
    }

    fn collect<F>(&self, range: &CellRange, mut keep: F) -> Vec<Arc<T>>
    where
        F: FnMut(&T) -> bool,
    {
        if range.is_empty() {
            return Vec::new();
        }

        let mut found = self.pool.acquire();
        let mut visit = |node: &Arc<T>| -> ControlFlow<()> {
            if keep(node.as_ref()) {
                found.push(Arc::clone(node));
            }
            ControlFlow::Continue(())
        };

        if self.should_scan_table(range) {
            let _ = self.table.for_each_bucket(|key, bucket| {
                let (cell_x, cell_y) = key.cell_coords();
                if range.contains(cell_x, cell_y) {
                    bucket.for_each(&mut visit)
                } else {
                    ControlFlow::Continue(())
                }
            });
        } else {
            for key in range.keys() {
                if let Some(bucket) = self.table.get_if_present(key) {
                    let _ = bucket.for_each(&mut visit);
                }
            }
        }

        self.pool.detach(found)
    }
}

impl<T: Node> fmt::Debug for SpatialHash<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialHash")
            .field("cell_size", &self.cell_size)
            .field("cells", &self.table.len())
            .finish()
    }
}
