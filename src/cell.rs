//! Cell key derivation.
//!
//! Positions are quantized to integer cell coordinates with
//! `floor(coord / cell_size)` and the two coordinates are packed into a single
//! `i64` key. Cell coordinates are expected to fit in 16 bits; larger values
//! still produce a key but may alias another cell.

/// Packed identity of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(i64);

impl CellKey {
    /// Pack cell coordinates into a key: `(cell_x << 16) ^ cell_y`.
    #[inline]
    pub fn new(cell_x: i64, cell_y: i64) -> Self {
        Self((cell_x << 16) ^ cell_y)
    }

    /// Key of the cell containing `(x, y)`.
    #[inline]
    pub fn from_position(x: f64, y: f64, cell_size: f64) -> Self {
        Self::new(cell_index(x, cell_size), cell_index(y, cell_size))
    }

    /// The raw packed value.
    #[inline]
    pub fn raw(self) -> i64 {
        self.0
    }

    /// Unpack the cell coordinates. Exact while both coordinates fit in 16
    /// bits; aliased keys decode to one of the cells sharing the key.
    #[inline]
    pub fn cell_coords(self) -> (i64, i64) {
        let cell_y = (self.0 as u16) as i16 as i64;
        let cell_x = (self.0 ^ cell_y) >> 16;
        (cell_x, cell_y)
    }
}

/// Grid coordinate of `coord` along one axis.
///
/// Division is always performed in floating point so that cell boundaries sit
/// on exact multiples of `cell_size`, including for integral coordinates.
#[inline]
pub fn cell_index(coord: f64, cell_size: f64) -> i64 {
    (coord / cell_size).floor() as i64
}

/// Inclusive rectangle of cell coordinates covering an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub min_x: i64,
    pub max_x: i64,
    pub min_y: i64,
    pub max_y: i64,
}

impl CellRange {
    /// A range containing no cells.
    pub const EMPTY: CellRange = CellRange {
        min_x: 0,
        max_x: -1,
        min_y: 0,
        max_y: -1,
    };

    /// Cells overlapped by the box `[min_x, max_x] x [min_y, max_y]`.
    ///
    /// Non-finite bounds yield an empty range.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64, cell_size: f64) -> Self {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Self::EMPTY;
        }

        Self {
            min_x: cell_index(min_x, cell_size),
            max_x: cell_index(max_x, cell_size),
            min_y: cell_index(min_y, cell_size),
            max_y: cell_index(max_y, cell_size),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Number of cells in the range, saturating at `u64::MAX`.
    pub fn cell_count(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let width = (self.max_x as i128 - self.min_x as i128 + 1) as u128;
        let height = (self.max_y as i128 - self.min_y as i128 + 1) as u128;
        u64::try_from(width.saturating_mul(height)).unwrap_or(u64::MAX)
    }

    /// Whether the cell at `(cell_x, cell_y)` lies inside the range.
    #[inline]
    pub fn contains(&self, cell_x: i64, cell_y: i64) -> bool {
        (self.min_x..=self.max_x).contains(&cell_x) && (self.min_y..=self.max_y).contains(&cell_y)
    }

    /// Keys of every cell in the range, row by row.
    pub fn keys(&self) -> impl Iterator<Item = CellKey> + use<> {
        let CellRange {
            min_x,
            max_x,
            min_y,
            max_y,
        } = *self;
        (min_y..=max_y).flat_map(move |y| (min_x..=max_x).map(move |x| CellKey::new(x, y)))
    }
}
