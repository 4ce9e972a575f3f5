//! The obstacle [`Grid`]: a fixed-size map of blocked flags.
//!
//! The grid is the single source of truth for traversability. It is owned by
//! the caller and passed explicitly to every search; it never resizes after
//! construction.

use std::fmt;

use crate::geom::{Cell, Dims};

/// Character used for blocked cells in the ASCII form.
pub const BLOCKED: char = '#';
/// Character used for free cells in the ASCII form.
pub const FREE: char = '.';

/// A rectangular obstacle map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr", into = "GridRepr"))]
pub struct Grid {
    dims: Dims,
    blocked: Vec<bool>,
}

impl Grid {
    /// Create a grid with every cell free.
    pub fn new(rows: i32, cols: i32) -> Self {
        let dims = Dims::new(rows, cols);
        Self {
            dims,
            blocked: vec![false; dims.len()],
        }
    }

    /// Parse a grid from text: one line per row, `#` blocked, `.` free.
    ///
    /// Leading and trailing blank lines are ignored so that indented raw
    /// string literals work. Every row must have the same width.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim)
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);
        let lines = &lines[..end];

        let cols = lines.first().map_or(0, |l| l.chars().count());
        let mut blocked = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != cols {
                return Err(GridError::Ragged {
                    row: row as i32,
                    expected: cols,
                    found: width,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    BLOCKED => blocked.push(true),
                    FREE => blocked.push(false),
                    _ => {
                        return Err(GridError::InvalidChar {
                            ch,
                            cell: Cell::new(row as i32, col as i32),
                        });
                    }
                }
            }
        }

        Ok(Self {
            dims: Dims::new(lines.len() as i32, cols as i32),
            blocked,
        })
    }

    /// Grid dimensions.
    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    /// Whether `c` is inside the grid.
    #[inline]
    pub fn contains(&self, c: Cell) -> bool {
        self.dims.contains(c)
    }

    /// Whether `c` is flagged blocked. Out-of-bounds cells report `false`.
    #[inline]
    pub fn is_blocked(&self, c: Cell) -> bool {
        self.dims.index(c).is_some_and(|i| self.blocked[i])
    }

    /// True iff `c` is in bounds and not blocked. Never fails for
    /// out-of-bounds input.
    #[inline]
    pub fn is_traversable(&self, c: Cell) -> bool {
        self.dims.index(c).is_some_and(|i| !self.blocked[i])
    }

    /// Flip the blocked flag of `c`.
    ///
    /// Returns `false` (and leaves the grid untouched) when `c` is out of
    /// bounds. Callers owning a replanning policy must mark it dirty whenever
    /// this returns `true`.
    pub fn toggle(&mut self, c: Cell) -> bool {
        let Some(i) = self.dims.index(c) else {
            return false;
        };
        self.blocked[i] = !self.blocked[i];
        true
    }

    /// Set the blocked flag of `c`. Returns `true` if the flag changed.
    pub fn set_blocked(&mut self, c: Cell, blocked: bool) -> bool {
        let Some(i) = self.dims.index(c) else {
            return false;
        };
        let changed = self.blocked[i] != blocked;
        self.blocked[i] = blocked;
        changed
    }

    /// Free every cell. Returns `true` if anything was blocked.
    pub fn clear(&mut self) -> bool {
        let changed = self.blocked.iter().any(|&b| b);
        self.blocked.fill(false);
        changed
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.blocked.iter().filter(|&&b| b).count()
    }

    /// Iterate over `(cell, blocked)` pairs in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Cell, bool)> + '_ {
        self.dims.iter().zip(self.blocked.iter().copied())
    }
}

/// Unchecked serialized form of [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    dims: Dims,
    blocked: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let GridRepr { dims, blocked } = repr;
        if dims.rows < 0 || dims.cols < 0 || blocked.len() != dims.len() {
            return Err(GridError::Size {
                rows: dims.rows,
                cols: dims.cols,
                cells: blocked.len(),
            });
        }
        Ok(Self { dims, blocked })
    }
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            dims: g.dims,
            blocked: g.blocked,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.dims.rows {
            for col in 0..self.dims.cols {
                let ch = if self.is_blocked(Cell::new(row, col)) {
                    BLOCKED
                } else {
                    FREE
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when building a grid from text or serialized data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row's width differs from the first row's.
    Ragged {
        row: i32,
        expected: usize,
        found: usize,
    },
    /// A character other than `#` or `.` was found.
    InvalidChar { ch: char, cell: Cell },
    /// Dimensions are negative or disagree with the number of cell flags.
    Size { rows: i32, cols: i32, cells: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidChar { ch, cell } => {
                write!(f, "grid contains invalid character \u{201c}{ch}\u{201d} at {cell}")
            }
            Self::Size { rows, cols, cells } => {
                write!(f, "grid: {rows}x{cols} does not fit {cells} cells")
            }
        }
    }
}

impl std::error::Error for GridError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::from_ascii("#.\n.#").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn short_cell_buffer_rejected() {
        let err = serde_json::from_str::<Grid>(r#"{"dims":{"rows":2,"cols":2},"blocked":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("2x2 does not fit 0 cells"));
    }

    #[test]
    fn negative_dims_rejected() {
        let json = r#"{"dims":{"rows":-1,"cols":0},"blocked":[]}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
    }

    #[test]
    fn size_error_from_repr() {
        let repr = GridRepr {
            dims: Dims::new(1, 3),
            blocked: vec![false; 2],
        };
        assert_eq!(
            Grid::try_from(repr),
            Err(GridError::Size {
                rows: 1,
                cols: 3,
                cells: 2
            })
        );
    }
}
