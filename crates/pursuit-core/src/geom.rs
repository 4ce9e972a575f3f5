//! Geometry primitives: [`Cell`] and [`Dims`].
//!
//! Cells are addressed row-major: `row` grows down, `col` grows right, which
//! matches how a board is laid out on screen.

use std::fmt;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A discrete grid coordinate.
///
/// Ordering is row-major (`row` first, then `col`). Coordinates are signed so
/// that out-of-bounds queries (e.g. a pointer left of the board) can be
/// represented and rejected by bounds checks instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    /// Orthogonal unit steps in expansion order: +row, -row, +col, -col.
    ///
    /// Every search in this workspace enumerates neighbours in this order;
    /// tie-breaks between equal-cost cells depend on it.
    pub const STEPS: [Cell; 4] = [
        Cell::new(1, 0),
        Cell::new(-1, 0),
        Cell::new(0, 1),
        Cell::new(0, -1),
    ];

    /// Create a new cell.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Component-wise sum, or `None` if either coordinate overflows.
    #[inline]
    pub fn checked_add(self, d: Cell) -> Option<Cell> {
        Some(Self::new(self.row.checked_add(d.row)?, self.col.checked_add(d.col)?))
    }

    /// The orthogonal neighbours in [`Cell::STEPS`] order. Neighbours whose
    /// coordinates would overflow `i32` are skipped.
    #[inline]
    pub fn neighbors_4(self) -> impl Iterator<Item = Cell> {
        Self::STEPS.into_iter().filter_map(move |d| self.checked_add(d))
    }

    /// Manhattan (L1) distance to `other`, saturating at `i32::MAX`.
    #[inline]
    pub fn manhattan(self, other: Cell) -> i32 {
        let d = self.row.abs_diff(other.row).saturating_add(self.col.abs_diff(other.col));
        i32::try_from(d).unwrap_or(i32::MAX)
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(c: Cell) -> Self {
        (c.row, c.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Row and column count of a grid. Cells `[0, rows) x [0, cols)` are in bounds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: i32,
    pub cols: i32,
}

impl Dims {
    /// Create new dimensions. Negative values are clamped to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.rows.max(0) as usize * self.cols.max(0) as usize
    }

    /// Whether there are no cells at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether `c` lies inside `[0, rows) x [0, cols)`.
    #[inline]
    pub fn contains(self, c: Cell) -> bool {
        c.row >= 0 && c.row < self.rows && c.col >= 0 && c.col < self.cols
    }

    /// Flat row-major index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Cell) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.row as usize * self.cols as usize + c.col as usize)
    }

    /// Convert a flat index back to a cell.
    #[inline]
    pub fn cell(self, idx: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Iterate over every in-bounds cell in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Cell> {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}
