//! Membership set of a single grid cell.

use crate::node::Node;
use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::ops::ControlFlow;
use std::sync::Arc;

pub(crate) type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Concurrent identity-keyed set of nodes.
///
/// Iteration is weakly consistent: adds and deletes racing with
/// [`for_each`](Bucket::for_each) may or may not be observed by it.
pub struct Bucket<T: Node> {
    nodes: DashMap<T::Id, Arc<T>, FxBuildHasher>,
}

impl<T: Node> Bucket<T> {
    pub fn new() -> Self {
        Self {
            nodes: DashMap::with_hasher(FxBuildHasher::default()),
        }
    }

    /// Insert a node, replacing any entry with the same id.
    #[inline]
    pub fn add(&self, node: &Arc<T>) {
        self.nodes.insert(node.id(), Arc::clone(node));
    }

    /// Remove a node by id. Returns whether it was present.
    #[inline]
    pub fn delete(&self, node: &T) -> bool {
        self.nodes.remove(&node.id()).is_some()
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Visit every member until the visitor breaks.
    ///
    /// The visitor runs while a shard of this bucket is read-locked and must
    /// not mutate the same bucket.
    pub fn for_each<F>(&self, mut visit: F) -> ControlFlow<()>
    where
        F: FnMut(&Arc<T>) -> ControlFlow<()>,
    {
        for entry in self.nodes.iter() {
            visit(entry.value())?;
        }
        ControlFlow::Continue(())
    }
}

impl<T: Node> Default for Bucket<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::TrackedPoint;

    type Point = TrackedPoint<u32, f64>;

    #[test]
    fn test_add_overwrites_by_id() {
        let bucket = Bucket::new();
        let a = Arc::new(Point::new(1, 0.0, 0.0));
        let a_again = Arc::new(Point::new(1, 5.0, 5.0));

        bucket.add(&a);
        bucket.add(&a_again);

        assert_eq!(bucket.len(), 1);
        assert!(bucket.contains(&1));
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let bucket: Bucket<Point> = Bucket::new();
        let a = Arc::new(Point::new(1, 0.0, 0.0));

        assert!(!bucket.delete(&a));
        bucket.add(&a);
        assert!(bucket.delete(&a));
        assert!(!bucket.delete(&a));
        assert!(bucket.is_empty());
    }

    #[test]
    fn test_for_each_stops_early() {
        let bucket = Bucket::new();
        for id in 0..10 {
            bucket.add(&Arc::new(Point::new(id, 0.0, 0.0)));
        }

        let mut seen = 0;
        let flow = bucket.for_each(|_| {
            seen += 1;
            if seen == 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        assert_eq!(seen, 3);
        assert!(flow.is_break());

        let mut all = 0;
        let flow = bucket.for_each(|_| {
            all += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(all, 10);
        assert!(flow.is_continue());
    }
}
