//! One agent chasing a pointer over an editable board.
//!
//! [`Session`] wires the pieces together the way an interactive front end
//! would, minus the window: pointer presses edit the grid, the pointer
//! position is the target, and every tick runs the replanning gate followed
//! by the follower.

use pursuit_core::{Board, BoardConfig, Cell, ConfigError, Grid, Stroke};
use pursuit_paths::{Path, Replanner, TickReport};

use crate::follower::Follower;

/// Pointer input for one tick, in window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed at a position: starts an edit stroke.
    Press(f32, f32),
    /// Pointer moved to a position; extends the stroke if one is active.
    Move(f32, f32),
    /// Button released.
    Release,
    /// Pointer left the window.
    Leave,
}

pub struct Session {
    board: Board,
    grid: Grid,
    planner: Replanner,
    agent: Follower,
    stroke: Stroke,
    pointer: Option<(f32, f32)>,
}

impl Session {
    /// Create a session with an empty grid and the agent in the middle.
    pub fn new(config: &BoardConfig) -> Result<Self, ConfigError> {
        let board = Board::from_config(config)?;
        let grid = board.new_grid();
        let agent = Follower::at_cell(&board, board.spawn_cell(), config.agent_speed);
        Ok(Self {
            board,
            grid,
            planner: Replanner::new(),
            agent,
            stroke: Stroke::new(),
            pointer: None,
        })
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn agent(&self) -> &Follower {
        &self.agent
    }

    #[inline]
    pub fn planner(&self) -> &Replanner {
        &self.planner
    }

    /// The current path, if any.
    pub fn path(&self) -> Option<&Path> {
        self.planner.path()
    }

    /// Edit the grid directly, keeping the planner informed.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        let changed = self.grid.toggle(cell);
        if changed {
            self.planner.mark_dirty();
        }
        changed
    }

    /// Apply one pointer event.
    pub fn pointer(&mut self, event: PointerEvent) {
        let changed = match event {
            PointerEvent::Press(x, y) => {
                self.pointer = Some((x, y));
                let cell = self.board.pixel_to_cell(x, y);
                self.stroke.begin(&mut self.grid, cell)
            }
            PointerEvent::Move(x, y) => {
                self.pointer = Some((x, y));
                let cell = self.board.pixel_to_cell(x, y);
                self.stroke.extend(&mut self.grid, cell)
            }
            PointerEvent::Release => {
                self.stroke.end();
                false
            }
            PointerEvent::Leave => {
                self.pointer = None;
                self.stroke.end();
                false
            }
        };
        if changed {
            self.planner.mark_dirty();
        }
    }

    /// The raw target cell: whatever is under the pointer.
    pub fn target(&self) -> Option<Cell> {
        self.pointer.and_then(|(x, y)| self.board.pixel_to_cell(x, y))
    }

    /// Run one tick of `dt` seconds: replan if needed, then move the agent.
    ///
    /// The agent only moves while the pointer is over the board.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        let target = self.target();
        let report = self
            .planner
            .tick(&self.grid, self.agent.cell(&self.board), target);
        self.agent.sync(self.planner.generation());
        if target.is_some() {
            if let Some(path) = self.planner.path() {
                self.agent.advance(&self.board, path, dt);
            }
        }
        report
    }

    /// Render the grid with the path (`*`), agent (`@`) and goal (`X`).
    pub fn render(&self) -> String {
        let agent = self.agent.cell(&self.board);
        let goal = self.planner.goal();
        let path = self.planner.path();
        let mut out = String::new();
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                let c = Cell::new(row, col);
                let ch = if Some(c) == agent {
                    '@'
                } else if Some(c) == goal {
                    'X'
                } else if self.grid.is_blocked(c) {
                    '#'
                } else if path.is_some_and(|p| p.cells().contains(&c)) {
                    '*'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
