//! The entity capability consumed by the index.
//!
//! The index never owns entities. Callers share them as `Arc<T>` where `T`
//! implements [`Node`], and the index keeps clones of those handles as
//! membership records. Positions are read through `&self`, so implementors
//! use interior mutability for both the live and the cached previous
//! position.

use num_traits::ToPrimitive;
use parking_lot::RwLock;
use std::fmt::Debug;
use std::hash::Hash;

/// Numeric coordinate type: any primitive integer or float.
pub trait Scalar: Copy + PartialOrd + Debug + ToPrimitive + Send + Sync + 'static {
    /// Lossy conversion used for all grid arithmetic.
    #[inline]
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl<T> Scalar for T where T: Copy + PartialOrd + Debug + ToPrimitive + Send + Sync + 'static {}

/// An entity that can be placed in a [`SpatialHash`](crate::SpatialHash).
///
/// `previous_position` and `set_previous_position` belong to the index: it
/// writes the position it indexed the node under, and reads it back on the
/// next [`update`](crate::SpatialHash::update) to detect cell changes.
/// Implementations must not call back into the index from these accessors.
pub trait Node: Send + Sync {
    type Id: Eq + Hash + Clone + Send + Sync;
    type Scalar: Scalar;

    /// Stable identity of this node.
    fn id(&self) -> Self::Id;

    /// Current X coordinate.
    fn x(&self) -> Self::Scalar;

    /// Current Y coordinate.
    fn y(&self) -> Self::Scalar;

    /// Position recorded by the index on the last put or update.
    fn previous_position(&self) -> (Self::Scalar, Self::Scalar);

    /// Record the position the node is currently indexed under.
    fn set_previous_position(&self, x: Self::Scalar, y: Self::Scalar);
}

#[derive(Debug, Clone, Copy)]
struct PointState<N> {
    x: N,
    y: N,
    old_x: N,
    old_y: N,
}

/// A thread-safe point entity.
///
/// # Example
///
/// ```rust
/// use spatio_grid::{SpatialHash, TrackedPoint};
/// use std::sync::Arc;
///
/// let grid = SpatialHash::new(100.0);
/// let truck = Arc::new(TrackedPoint::new("truck_001", 10.0, 10.0));
/// grid.put(&truck);
///
/// truck.set_position(450.0, 10.0);
/// grid.update(&truck);
///
/// assert!(grid.search(10.0, 10.0, 5.0).is_empty());
/// assert_eq!(grid.search(450.0, 10.0, 5.0).len(), 1);
/// ```
#[derive(Debug)]
pub struct TrackedPoint<Id, N> {
    id: Id,
    state: RwLock<PointState<N>>,
}

impl<Id, N: Scalar> TrackedPoint<Id, N> {
    /// Create a point whose cached previous position equals its position.
    pub fn new(id: Id, x: N, y: N) -> Self {
        Self {
            id,
            state: RwLock::new(PointState {
                x,
                y,
                old_x: x,
                old_y: y,
            }),
        }
    }

    /// Current position.
    pub fn position(&self) -> (N, N) {
        let state = self.state.read();
        (state.x, state.y)
    }

    /// Move the point. The index is not notified; call
    /// [`SpatialHash::update`](crate::SpatialHash::update) afterwards.
    pub fn set_position(&self, x: N, y: N) {
        let mut state = self.state.write();
        state.x = x;
        state.y = y;
    }
}

impl<Id, N> Node for TrackedPoint<Id, N>
where
    Id: Eq + Hash + Clone + Send + Sync,
    N: Scalar,
{
    type Id = Id;
    type Scalar = N;

    fn id(&self) -> Id {
        self.id.clone()
    }

    fn x(&self) -> N {
        self.state.read().x
    }

    fn y(&self) -> N {
        self.state.read().y
    }

    fn previous_position(&self) -> (N, N) {
        let state = self.state.read();
        (state.old_x, state.old_y)
    }

    fn set_previous_position(&self, x: N, y: N) {
        let mut state = self.state.write();
        state.old_x = x;
        state.old_y = y;
    }
}
