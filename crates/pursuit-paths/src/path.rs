use std::fmt;

use pursuit_core::Cell;

use crate::traits::Pather;

/// A complete route: cells from start to goal inclusive, each one orthogonal
/// step from the previous. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Cell>", into = "Vec<Cell>")
)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    /// Build a path from a cell sequence, checking it is non-empty and that
    /// consecutive cells are orthogonally adjacent.
    pub fn new(cells: Vec<Cell>) -> Result<Self, PathError> {
        if cells.is_empty() {
            return Err(PathError::Empty);
        }
        if let Some(i) = cells.windows(2).position(|w| !w[0].is_adjacent(w[1])) {
            return Err(PathError::Gap {
                index: i + 1,
                from: cells[i],
                to: cells[i + 1],
            });
        }
        Ok(Self { cells })
    }

    /// Wrap cells produced by predecessor reconstruction.
    pub(crate) fn from_trusted(cells: Vec<Cell>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the path has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (edges) along the path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len() - 1
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.cells[0]
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.cells[self.cells.len() - 1]
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<Cell> {
        self.cells.get(i).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Whether every cell of the path is traversable on `pather`.
    pub fn is_clear_on<P: Pather + ?Sized>(&self, pather: &P) -> bool {
        self.cells.iter().all(|&c| pather.is_traversable(c))
    }
}

impl TryFrom<Vec<Cell>> for Path {
    type Error = PathError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        Path::new(cells)
    }
}

impl From<Path> for Vec<Cell> {
    fn from(p: Path) -> Self {
        p.cells
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Why a cell sequence is not a valid [`Path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    Empty,
    /// `cells[index - 1]` and `cells[index]` are not orthogonally adjacent.
    Gap { index: usize, from: Cell, to: Cell },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("path: no cells"),
            Self::Gap { index, from, to } => {
                write!(f, "path: step {index} jumps from {from} to {to}")
            }
        }
    }
}

impl std::error::Error for PathError {}
