//! Headless chase demo built on the pursuit crates.
//!
//! Demonstrates: board layout from a config, drag editing, nearest-free
//! endpoint resolution, A* replanning only when needed, and smooth
//! movement along the resulting path.

pub mod follower;
pub mod scatter;
pub mod session;

pub use follower::Follower;
pub use session::{PointerEvent, Session};
