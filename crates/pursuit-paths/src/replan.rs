//! Level-triggered replanning.
//!
//! A [`Replanner`] holds the current plan for one agent and decides, once per
//! tick, whether the plan must be recomputed. A new search runs only when at
//! least one of three signals is raised:
//!
//! - the resolved goal differs from the goal of the last plan,
//! - the grid was edited since the last plan,
//! - there is no current path (including after a failed search).
//!
//! Otherwise the existing path is kept and no search runs.

use std::fmt;

use pursuit_core::{Cell, Grid};

use crate::astar::astar_with_stats;
use crate::nearest::nearest_free;
use crate::path::Path;

/// Which end of a plan request could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Goal => f.write_str("goal"),
        }
    }
}

/// Why a replan produced no path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanFailure {
    /// Both endpoints resolved, the search ran and exhausted the frontier.
    NoPath { start: Cell, goal: Cell },
    /// An endpoint was absent or no free cell could stand in for it.
    InvalidEndpoint(Endpoint),
}

impl fmt::Display for PlanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPath { start, goal } => write!(f, "no path from {start} to {goal}"),
            Self::InvalidEndpoint(e) => write!(f, "no free cell for the {e}"),
        }
    }
}

impl std::error::Error for PlanFailure {}

/// A resolved search request: both endpoints are traversable cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    pub start: Cell,
    pub goal: Cell,
}

impl PlanRequest {
    /// Resolve raw endpoints through [`nearest_free`].
    pub fn resolve(
        grid: &Grid,
        start: Option<Cell>,
        goal: Option<Cell>,
    ) -> Result<Self, PlanFailure> {
        let start = start
            .and_then(|c| nearest_free(grid, c))
            .ok_or(PlanFailure::InvalidEndpoint(Endpoint::Start))?;
        let goal = goal
            .and_then(|c| nearest_free(grid, c))
            .ok_or(PlanFailure::InvalidEndpoint(Endpoint::Goal))?;
        Ok(Self { start, goal })
    }

    /// Run A* for this request.
    pub fn search(&self, grid: &Grid) -> Result<Path, PlanFailure> {
        let (path, stats) = astar_with_stats(grid, self.start, self.goal);
        log::trace!("search {self:?}: {stats:?}");
        path.ok_or(PlanFailure::NoPath {
            start: self.start,
            goal: self.goal,
        })
    }
}

/// The three replanning signals observed in a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub target_changed: bool,
    pub grid_dirty: bool,
    pub no_current_path: bool,
}

impl Signals {
    /// Whether a replan is warranted.
    #[inline]
    pub fn any(self) -> bool {
        self.target_changed || self.grid_dirty || self.no_current_path
    }
}

/// What a call to [`Replanner::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickReport {
    /// No target this tick; the current path (if any) was left alone.
    Idle,
    /// Nothing relevant changed; the current path was kept.
    Kept,
    /// A new path was computed.
    Planned { steps: usize },
    /// A replan ran and produced no path.
    Failed(PlanFailure),
}

impl TickReport {
    /// Whether a replan happened this tick.
    pub fn replanned(self) -> bool {
        matches!(self, Self::Planned { .. } | Self::Failed(_))
    }
}

/// Owns the current plan and the replanning gate.
#[derive(Debug, Clone, Default)]
pub struct Replanner {
    path: Option<Path>,
    goal: Option<Cell>,
    grid_dirty: bool,
    generation: u64,
    last_failure: Option<PlanFailure>,
}

impl Replanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that the grid changed. Must be called after every successful
    /// edit of the grid this planner searches.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.grid_dirty = true;
    }

    /// Whether the grid changed since the last replan.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.grid_dirty
    }

    /// The current path, if any.
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// The resolved goal of the last replan.
    #[inline]
    pub fn goal(&self) -> Option<Cell> {
        self.goal
    }

    /// Incremented on every replan. Path followers reset their waypoint
    /// index when this changes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Why the last replan failed, if it did.
    #[inline]
    pub fn last_failure(&self) -> Option<PlanFailure> {
        self.last_failure
    }

    /// The signals raised by `resolved_goal` against the current state.
    pub fn signals(&self, resolved_goal: Option<Cell>) -> Signals {
        Signals {
            target_changed: resolved_goal != self.goal,
            grid_dirty: self.grid_dirty,
            no_current_path: self.path.is_none(),
        }
    }

    /// Advance one tick.
    ///
    /// `agent` is the agent's current cell and `target` the raw query cell
    /// (pointer), both possibly blocked or absent. A missing target means the
    /// pointer is off the board: nothing is replanned. Otherwise the target
    /// is resolved to its nearest free cell and the three signals decide
    /// whether to run a fresh search.
    pub fn tick(&mut self, grid: &Grid, agent: Option<Cell>, target: Option<Cell>) -> TickReport {
        let Some(target) = target else {
            return TickReport::Idle;
        };
        let goal = nearest_free(grid, target);
        let signals = self.signals(goal);
        if !signals.any() {
            return TickReport::Kept;
        }

        log::debug!(
            "replan #{}: agent={agent:?} target={target} goal={goal:?} {signals:?}",
            self.generation + 1
        );

        let outcome =
            PlanRequest::resolve(grid, agent, goal).and_then(|request| request.search(grid));

        self.generation += 1;
        self.goal = goal;
        self.grid_dirty = false;

        match outcome {
            Ok(path) => {
                let steps = path.steps();
                log::debug!("replan #{}: {steps} steps", self.generation);
                self.path = Some(path);
                self.last_failure = None;
                TickReport::Planned { steps }
            }
            Err(failure) => {
                log::debug!("replan #{}: {failure}", self.generation);
                self.path = None;
                self.last_failure = Some(failure);
                TickReport::Failed(failure)
            }
        }
    }

    /// Drop the current plan. The next tick with a target replans.
    pub fn reset(&mut self) {
        self.path = None;
        self.goal = None;
        self.last_failure = None;
    }
}
