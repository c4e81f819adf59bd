//! Cell table: the mapping from cell key to bucket.
//!
//! Buckets are created lazily on first insertion and pruned again as soon as
//! they become empty, so the table only holds currently occupied cells.
//!
//! Insertion into a bucket always happens while the table entry for its key
//! is write-locked, and pruning re-checks emptiness under that same lock. A
//! node can therefore never be added to a bucket that has already been
//! unlinked from the table.

use crate::bucket::{Bucket, FxBuildHasher};
use crate::cell::CellKey;
use crate::node::Node;
use dashmap::DashMap;
use std::ops::{ControlFlow, Deref};
use std::sync::Arc;

pub struct CellTable<T: Node> {
    cells: DashMap<CellKey, Bucket<T>, FxBuildHasher>,
}

impl<T: Node> CellTable<T> {
    pub fn new() -> Self {
        Self {
            cells: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Bucket for `key`, created and published atomically if absent.
    ///
    /// The returned guard holds the entry's shard write lock; drop it before
    /// touching the table again from the same thread.
    pub fn get_or_create(&self, key: CellKey) -> impl Deref<Target = Bucket<T>> + '_ {
        self.cells.entry(key).or_insert_with(|| {
            log::trace!("Creating bucket for cell {}", key.raw());
            Bucket::new()
        })
    }

    /// Bucket for `key` if the cell is occupied.
    pub fn get_if_present(&self, key: CellKey) -> Option<impl Deref<Target = Bucket<T>> + '_> {
        self.cells.get(&key)
    }

    /// Add `node` to the bucket of `key`.
    pub fn insert(&self, key: CellKey, node: &Arc<T>) {
        self.get_or_create(key).add(node);
    }

    /// Remove `node` from the bucket of `key`, pruning the bucket if that
    /// left it empty. Returns whether the node was present.
    pub fn delete(&self, key: CellKey, node: &T) -> bool {
        let removed = match self.get_if_present(key) {
            Some(bucket) => bucket.delete(node),
            None => return false,
        };

        if removed {
            self.prune(key);
        }
        removed
    }

    /// Drop the bucket of `key` if it is empty. Returns whether it was dropped.
    pub fn prune(&self, key: CellKey) -> bool {
        let pruned = self
            .cells
            .remove_if(&key, |_, bucket| bucket.is_empty())
            .is_some();
        if pruned {
            log::trace!("Pruned empty bucket for cell {}", key.raw());
        }
        pruned
    }

    /// Visit every bucket until the visitor breaks.
    pub fn for_each_bucket<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(CellKey, &Bucket<T>) -> ControlFlow<()>,
    {
        for entry in self.cells.iter() {
            visit(*entry.key(), entry.value())?;
        }
        ControlFlow::Continue(())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total membership records across all buckets.
    pub fn node_count(&self) -> usize {
        self.cells.iter().map(|entry| entry.value().len()).sum()
    }

    pub fn clear(&self) {
        self.cells.clear();
    }
}

impl<T: Node> Default for CellTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
