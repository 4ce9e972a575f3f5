//! Drag-to-edit support: toggling cells along a pointer stroke.

use crate::geom::Cell;
use crate::grid::Grid;

/// Tracks one pointer drag so that a cell is toggled at most once while the
/// pointer lingers on it.
#[derive(Debug, Clone, Default)]
pub struct Stroke {
    active: bool,
    last: Option<Cell>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a stroke is in progress.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a stroke on `cell` and toggle it.
    ///
    /// `None` (pointer outside the board) starts the stroke without editing.
    /// Returns `true` if the grid changed.
    pub fn begin(&mut self, grid: &mut Grid, cell: Option<Cell>) -> bool {
        self.active = true;
        self.last = None;
        self.toggle_new(grid, cell)
    }

    /// Continue the stroke onto `cell`. Only toggles when the pointer moved
    /// to a different cell than the last one edited. Returns `true` if the
    /// grid changed.
    pub fn extend(&mut self, grid: &mut Grid, cell: Option<Cell>) -> bool {
        if !self.active {
            return false;
        }
        self.toggle_new(grid, cell)
    }

    /// Finish the stroke.
    pub fn end(&mut self) {
        self.active = false;
        self.last = None;
    }

    fn toggle_new(&mut self, grid: &mut Grid, cell: Option<Cell>) -> bool {
        let Some(c) = cell else {
            return false;
        };
        if self.last == Some(c) {
            return false;
        }
        if grid.toggle(c) {
            self.last = Some(c);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lingering_on_a_cell_toggles_once() {
        let mut g = Grid::new(3, 3);
        let mut s = Stroke::new();
        let c = Cell::new(1, 1);
        assert!(s.begin(&mut g, Some(c)));
        assert!(!s.extend(&mut g, Some(c)));
        assert!(!s.extend(&mut g, Some(c)));
        assert!(g.is_blocked(c));
    }

    #[test]
    fn dragging_toggles_each_new_cell() {
        let mut g = Grid::new(3, 3);
        let mut s = Stroke::new();
        s.begin(&mut g, Some(Cell::new(0, 0)));
        assert!(s.extend(&mut g, Some(Cell::new(0, 1))));
        assert!(s.extend(&mut g, Some(Cell::new(0, 2))));
        // Coming back onto an earlier cell toggles it again.
        assert!(s.extend(&mut g, Some(Cell::new(0, 1))));
        s.end();
        assert_eq!(g.to_string(), "#.#\n...\n...\n");
    }

    #[test]
    fn outside_board_and_inactive_are_ignored() {
        let mut g = Grid::new(2, 2);
        let mut s = Stroke::new();
        assert!(!s.extend(&mut g, Some(Cell::new(0, 0))));
        assert!(!s.begin(&mut g, None));
        assert!(s.is_active());
        assert!(!s.extend(&mut g, Some(Cell::new(5, 5))));
        s.end();
        assert!(!s.is_active());
        assert_eq!(g.blocked_count(), 0);
    }

    #[test]
    fn new_stroke_forgets_last_cell() {
        let mut g = Grid::new(2, 2);
        let mut s = Stroke::new();
        let c = Cell::new(0, 0);
        s.begin(&mut g, Some(c));
        s.end();
        assert!(s.begin(&mut g, Some(c)));
        assert!(g.is_traversable(c));
    }
}
