//! Continuous movement along a planned path.

use pursuit_core::{Board, Cell};
use pursuit_paths::Path;

/// Distances at or below this are treated as "already there".
const EPSILON: f32 = 1e-6;

/// An agent moving smoothly from cell centre to cell centre.
///
/// The follower knows nothing about planning: it is handed the current path
/// and the plan generation every tick, and restarts from the first waypoint
/// whenever the generation changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    x: f32,
    y: f32,
    speed: f32,
    index: usize,
    generation: u64,
}

impl Follower {
    /// Place a follower at the centre of `cell`, moving at `speed` px/s.
    pub fn at_cell(board: &Board, cell: Cell, speed: f32) -> Self {
        let (x, y) = board.cell_center(cell);
        Self {
            x,
            y,
            speed,
            index: 0,
            generation: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// The cell under the follower, or `None` if it is off the board.
    pub fn cell(&self, board: &Board) -> Option<Cell> {
        board.pixel_to_cell(self.x, self.y)
    }

    /// Index of the waypoint last reached in the current path.
    #[inline]
    pub fn waypoint_index(&self) -> usize {
        self.index
    }

    /// Adopt plan `generation`, restarting from the first waypoint if it is
    /// new.
    pub fn sync(&mut self, generation: u64) {
        if generation != self.generation {
            self.generation = generation;
            self.index = 0;
        }
    }

    /// Move toward the next waypoint for `dt` seconds.
    ///
    /// Snaps exactly onto the waypoint when the remaining distance is within
    /// this tick's travel, then targets the following one on the next call.
    /// Returns `true` if a waypoint was reached.
    pub fn advance(&mut self, board: &Board, path: &Path, dt: f32) -> bool {
        let dt = dt.max(0.0);
        let Some(next) = path.get(self.index + 1) else {
            return false;
        };
        let (tx, ty) = board.cell_center(next);
        let (vx, vy) = (tx - self.x, ty - self.y);
        let dist = vx.hypot(vy);
        if dist <= EPSILON {
            self.index += 1;
            return true;
        }
        let step = self.speed * dt;
        if step >= dist {
            self.x = tx;
            self.y = ty;
            self.index += 1;
            return true;
        }
        self.x += vx / dist * step;
        self.y += vy / dist * step;
        false
    }

    /// Whether the last waypoint of `path` has been reached.
    pub fn arrived(&self, path: &Path) -> bool {
        self.index + 1 >= path.len()
    }
}
