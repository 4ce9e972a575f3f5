//! **pursuit-core** — core types for grid pursuit.
//!
//! This crate provides the data shared by the search crate and its callers:
//! cell coordinates, the obstacle grid, board geometry for resolving pixel
//! positions to cells, and drag-stroke editing.

pub mod board;
pub mod geom;
pub mod grid;
pub mod stroke;

pub use board::{Board, BoardConfig, ConfigError};
pub use geom::{Cell, Dims};
pub use grid::{Grid, GridError};
pub use stroke::Stroke;
