use pursuit_core::{Cell, Dims, Grid};

/// Minimal pathfinding interface over a bounded 4-connected map.
pub trait Pather {
    /// Bounds of the map. Every cell the searches touch lies inside them.
    fn dims(&self) -> Dims;

    /// True iff `c` is in bounds and can be stood on.
    fn is_traversable(&self, c: Cell) -> bool;

    /// Append the traversable orthogonal neighbours of `c` into `buf`, in
    /// [`Cell::STEPS`] order. The caller clears `buf` before calling.
    fn neighbors(&self, c: Cell, buf: &mut Vec<Cell>) {
        buf.extend(c.neighbors_4().filter(|&n| self.is_traversable(n)));
    }
}

impl Pather for Grid {
    #[inline]
    fn dims(&self) -> Dims {
        Grid::dims(self)
    }

    #[inline]
    fn is_traversable(&self, c: Cell) -> bool {
        Grid::is_traversable(self, c)
    }
}
