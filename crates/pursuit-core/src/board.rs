//! Board geometry: how a grid is laid out inside a pixel viewport.
//!
//! This is the coordinate-resolution layer between continuous positions
//! (pointer, agent) and grid cells. Positions outside the board resolve to
//! `None`, which every layer above treats as a normal input.

use std::fmt;

use crate::geom::{Cell, Dims};
use crate::grid::Grid;

/// Viewport and board parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    /// Viewport width in pixels.
    pub window_width: i32,
    /// Viewport height in pixels.
    pub window_height: i32,
    /// Side of a square cell in pixels.
    pub cell_size: i32,
    /// Fraction of the viewport the board occupies, in `(0, 1]`.
    pub scale: f64,
    /// Agent speed in pixels per second.
    pub agent_speed: f32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            window_width: 1024,
            window_height: 768,
            cell_size: 16,
            scale: 0.8,
            agent_speed: 220.0,
        }
    }
}

impl BoardConfig {
    /// Set the viewport size (builder).
    pub fn with_window(mut self, width: i32, height: i32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set the cell size (builder).
    pub fn with_cell_size(mut self, cell_size: i32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the board scale (builder).
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the agent speed (builder).
    pub fn with_agent_speed(mut self, speed: f32) -> Self {
        self.agent_speed = speed;
        self
    }
}

/// Errors produced when a [`BoardConfig`] cannot describe a board.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Cell size must be strictly positive.
    CellSize(i32),
    /// Scale must be in `(0, 1]`.
    Scale(f64),
    /// Window dimensions must be strictly positive.
    Window { width: i32, height: i32 },
    /// Agent speed must be finite and non-negative.
    AgentSpeed(f32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellSize(v) => write!(f, "board: cell size must be positive, got {v}"),
            Self::Scale(v) => write!(f, "board: scale must be in (0, 1], got {v}"),
            Self::Window { width, height } => {
                write!(f, "board: window must be non-empty, got {width}x{height}")
            }
            Self::AgentSpeed(v) => {
                write!(f, "board: agent speed must be finite and >= 0, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A board: a pixel rectangle centred in the viewport, divided into square
/// cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Board {
    left: i32,
    top: i32,
    width: i32,
    height: i32,
    cell_size: i32,
}

impl Board {
    /// Lay out a board from `config`.
    ///
    /// The board covers `scale` of the window, trimmed down to a whole
    /// number of cells (at least one in each direction) and centred.
    pub fn from_config(config: &BoardConfig) -> Result<Self, ConfigError> {
        let cs = config.cell_size;
        if cs <= 0 {
            return Err(ConfigError::CellSize(cs));
        }
        if !(config.scale > 0.0 && config.scale <= 1.0) {
            return Err(ConfigError::Scale(config.scale));
        }
        if config.window_width <= 0 || config.window_height <= 0 {
            return Err(ConfigError::Window {
                width: config.window_width,
                height: config.window_height,
            });
        }
        if !config.agent_speed.is_finite() || config.agent_speed < 0.0 {
            return Err(ConfigError::AgentSpeed(config.agent_speed));
        }

        let mut width = (f64::from(config.window_width) * config.scale) as i32;
        let mut height = (f64::from(config.window_height) * config.scale) as i32;
        width -= width % cs;
        height -= height % cs;
        width = width.max(cs);
        height = height.max(cs);

        Ok(Self {
            left: (config.window_width - width) / 2,
            top: (config.window_height - height) / 2,
            width,
            height,
            cell_size: cs,
        })
    }

    /// Left edge in pixels.
    #[inline]
    pub fn left(&self) -> i32 {
        self.left
    }

    /// Top edge in pixels.
    #[inline]
    pub fn top(&self) -> i32 {
        self.top
    }

    /// Board size in pixels as `(width, height)`.
    #[inline]
    pub fn size_px(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Grid dimensions covered by the board.
    pub fn dims(&self) -> Dims {
        Dims::new(self.height / self.cell_size, self.width / self.cell_size)
    }

    /// A fresh all-free grid matching the board.
    pub fn new_grid(&self) -> Grid {
        let d = self.dims();
        Grid::new(d.rows, d.cols)
    }

    /// The cell the agent starts in: the middle of the board.
    pub fn spawn_cell(&self) -> Cell {
        let d = self.dims();
        Cell::new(d.rows / 2, d.cols / 2)
    }

    /// Resolve a pixel position to a cell, or `None` outside the board.
    pub fn pixel_to_cell(&self, x: f32, y: f32) -> Option<Cell> {
        let rel_x = x - self.left as f32;
        let rel_y = y - self.top as f32;
        if !(rel_x >= 0.0 && rel_x < self.width as f32 && rel_y >= 0.0 && rel_y < self.height as f32)
        {
            return None;
        }
        let cs = self.cell_size as f32;
        Some(Cell::new((rel_y / cs) as i32, (rel_x / cs) as i32))
    }

    /// Pixel position of the centre of `cell`.
    pub fn cell_center(&self, cell: Cell) -> (f32, f32) {
        let x = self.left + cell.col * self.cell_size + self.cell_size / 2;
        let y = self.top + cell.row * self.cell_size + self.cell_size / 2;
        (x as f32, y as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let b = Board::from_config(&BoardConfig::default()).unwrap();
        assert_eq!(b.size_px(), (816, 608));
        assert_eq!((b.left(), b.top()), (104, 80));
        assert_eq!(b.dims(), Dims::new(38, 51));
        assert_eq!(b.spawn_cell(), Cell::new(19, 25));
    }

    #[test]
    fn tiny_window_still_has_one_cell() {
        let cfg = BoardConfig::default().with_window(10, 10);
        let b = Board::from_config(&cfg).unwrap();
        assert_eq!(b.dims(), Dims::new(1, 1));
        assert_eq!(b.new_grid().dims(), Dims::new(1, 1));
    }

    #[test]
    fn pixel_to_cell_maps_inside_and_rejects_outside() {
        let b = Board::from_config(&BoardConfig::default()).unwrap();
        assert_eq!(b.pixel_to_cell(104.0, 80.0), Some(Cell::new(0, 0)));
        assert_eq!(b.pixel_to_cell(104.0 + 17.0, 80.0 + 33.0), Some(Cell::new(2, 1)));
        assert_eq!(b.pixel_to_cell(103.9, 80.0), None);
        assert_eq!(b.pixel_to_cell(104.0 + 816.0, 100.0), None);
        assert_eq!(b.pixel_to_cell(200.0, 80.0 + 608.0), None);
        assert_eq!(b.pixel_to_cell(f32::NAN, 100.0), None);
    }

    #[test]
    fn cell_center_round_trips() {
        let b = Board::from_config(&BoardConfig::default()).unwrap();
        let c = Cell::new(5, 7);
        let (x, y) = b.cell_center(c);
        assert_eq!((x, y), (104.0 + 7.0 * 16.0 + 8.0, 80.0 + 5.0 * 16.0 + 8.0));
        assert_eq!(b.pixel_to_cell(x, y), Some(c));
    }

    #[test]
    fn invalid_configs_rejected() {
        let base = BoardConfig::default();
        assert_eq!(
            Board::from_config(&base.with_cell_size(0)),
            Err(ConfigError::CellSize(0))
        );
        assert_eq!(
            Board::from_config(&base.with_scale(0.0)),
            Err(ConfigError::Scale(0.0))
        );
        assert_eq!(
            Board::from_config(&base.with_scale(1.5)),
            Err(ConfigError::Scale(1.5))
        );
        assert!(matches!(
            Board::from_config(&base.with_window(0, 100)),
            Err(ConfigError::Window { .. })
        ));
        assert!(matches!(
            Board::from_config(&base.with_agent_speed(f32::INFINITY)),
            Err(ConfigError::AgentSpeed(_))
        ));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: BoardConfig = serde_json::from_str(r#"{"cell_size": 32}"#).unwrap();
        assert_eq!(cfg.cell_size, 32);
        assert_eq!(cfg.window_width, 1024);
        assert_eq!(cfg.scale, 0.8);
    }
}
