//! Shortest-path search for 4-connected obstacle grids.
//!
//! - **A\*** with a Manhattan heuristic over a binary-heap frontier that uses
//!   lazy deletion instead of decrease-key ([`astar`], [`Frontier`])
//! - **Nearest free cell** breadth-first fallback for blocked endpoints
//!   ([`nearest_free`])
//! - **Replanning** gate that reruns the search only when the goal, the grid
//!   or the absence of a path calls for it ([`Replanner`])
//!
//! Everything is synchronous and single-threaded. The grid is borrowed for
//! the duration of each call; no search state outlives the call that
//! created it.

mod astar;
mod frontier;
mod nearest;
mod path;
pub mod replan;
mod traits;

pub use astar::{SearchStats, UNREACHABLE, astar, astar_with_stats};
pub use frontier::{Frontier, FrontierEntry};
pub use nearest::nearest_free;
pub use path::{Path, PathError};
pub use replan::{Endpoint, PlanFailure, PlanRequest, Replanner, Signals, TickReport};
pub use traits::Pather;
