//! Random obstacle placement for demo boards.

use pursuit_core::{Cell, Grid};
use rand::{Rng, RngExt};

/// Block roughly `density` of the grid's cells, never touching `keep_free`.
/// Returns the number of cells blocked.
pub fn scatter_obstacles<R: Rng>(
    grid: &mut Grid,
    rng: &mut R,
    density: f64,
    keep_free: &[Cell],
) -> usize {
    let density = density.clamp(0.0, 1.0);
    let total = grid.dims().len();
    let target = (total as f64 * density) as usize;
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut placed = 0;
    let mut attempts = 0;
    while placed < target && attempts < total * 4 {
        attempts += 1;
        let c = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
        if keep_free.contains(&c) {
            continue;
        }
        if grid.set_blocked(c, true) {
            placed += 1;
        }
    }
    placed
}
