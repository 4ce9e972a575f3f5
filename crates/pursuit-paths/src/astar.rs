use pursuit_core::{Cell, Dims};

use crate::frontier::Frontier;
use crate::path::Path;
use crate::traits::Pather;

/// Sentinel for "no known cost".
pub const UNREACHABLE: i32 = i32::MAX;

const NO_PARENT: usize = usize::MAX;

/// Counters describing one A* run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Live entries popped from the frontier.
    pub expanded: usize,
    /// Entries pushed, the start included.
    pub pushed: usize,
    /// Stale entries discarded by the frontier.
    pub stale_skipped: usize,
    /// Largest frontier size reached.
    pub peak_frontier: usize,
}

/// Per-search bookkeeping, indexed by flat cell index. Lives for exactly one
/// call to [`astar`]; a new search always starts from a fresh state.
struct SearchState {
    dims: Dims,
    g: Vec<i32>,
    best_f: Vec<i32>,
    parent: Vec<usize>,
}

impl SearchState {
    fn new(dims: Dims) -> Self {
        let len = dims.len();
        Self {
            dims,
            g: vec![UNREACHABLE; len],
            best_f: vec![UNREACHABLE; len],
            parent: vec![NO_PARENT; len],
        }
    }

    fn best_f_at(&self, c: Cell) -> Option<i32> {
        let i = self.dims.index(c)?;
        let f = self.best_f[i];
        (f != UNREACHABLE).then_some(f)
    }

    fn reconstruct(&self, goal_idx: usize) -> Path {
        let mut cells = Vec::new();
        let mut i = goal_idx;
        while i != NO_PARENT {
            cells.push(self.dims.cell(i));
            i = self.parent[i];
        }
        cells.reverse();
        Path::from_trusted(cells)
    }
}

/// Shortest 4-connected path from `start` to `goal` using A*.
///
/// Uses the Manhattan heuristic with unit step cost, so the first time the
/// goal is popped its path is optimal. Returns the full path (both endpoints
/// included), or `None` if either endpoint is not traversable or the goal is
/// unreachable.
///
/// The result is deterministic: neighbours are generated +row, -row, +col,
/// -col and equal f-scores pop in insertion order.
pub fn astar<P: Pather + ?Sized>(pather: &P, start: Cell, goal: Cell) -> Option<Path> {
    astar_with_stats(pather, start, goal).0
}

/// Like [`astar`], also returning search counters.
pub fn astar_with_stats<P: Pather + ?Sized>(
    pather: &P,
    start: Cell,
    goal: Cell,
) -> (Option<Path>, SearchStats) {
    let mut stats = SearchStats::default();
    if !pather.is_traversable(start) || !pather.is_traversable(goal) {
        return (None, stats);
    }
    let dims = pather.dims();
    let (Some(start_idx), Some(goal_idx)) = (dims.index(start), dims.index(goal)) else {
        return (None, stats);
    };

    let h = |c: Cell| c.manhattan(goal);
    let mut state = SearchState::new(dims);
    let mut open = Frontier::new();

    state.g[start_idx] = 0;
    state.best_f[start_idx] = h(start);
    open.push(start, h(start));
    stats.pushed += 1;

    let mut nbuf = Vec::with_capacity(4);

    let found = loop {
        let Some(current) = open.pop_min(|c| state.best_f_at(c)) else {
            break false;
        };
        stats.expanded += 1;

        if current == goal {
            break true;
        }

        // Popped cells are always in bounds: only in-bounds cells are pushed.
        let Some(ci) = dims.index(current) else {
            continue;
        };
        let tentative_g = state.g[ci] + 1;

        nbuf.clear();
        pather.neighbors(current, &mut nbuf);

        for &n in nbuf.iter() {
            let Some(ni) = dims.index(n) else {
                continue;
            };
            if tentative_g >= state.g[ni] {
                continue;
            }
            let f = tentative_g + h(n);
            state.g[ni] = tentative_g;
            state.best_f[ni] = f;
            state.parent[ni] = ci;
            open.push(n, f);
            stats.pushed += 1;
        }
    };

    stats.stale_skipped = open.stale_skipped();
    stats.peak_frontier = open.peak_len();
    log::trace!(
        "astar {start} -> {goal}: found={found} expanded={} pushed={} stale={} peak={}",
        stats.expanded,
        stats.pushed,
        stats.stale_skipped,
        stats.peak_frontier
    );

    if !found {
        return (None, stats);
    }
    (Some(state.reconstruct(goal_idx)), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::Grid;

    fn grid(s: &str) -> Grid {
        Grid::from_ascii(s).unwrap()
    }

    fn assert_valid(g: &Grid, p: &Path, start: Cell, goal: Cell) {
        assert_eq!(p.start(), start);
        assert_eq!(p.goal(), goal);
        assert!(p.is_clear_on(g));
        for w in p.cells().windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not one step", w[0], w[1]);
        }
    }

    #[test]
    fn empty_5x5_corner_to_corner() {
        let g = Grid::new(5, 5);
        let (start, goal) = (Cell::new(0, 0), Cell::new(4, 4));
        let p = astar(&g, start, goal).unwrap();
        assert_eq!(p.len(), 9);
        assert_eq!(p.steps(), 8);
        assert_valid(&g, &p, start, goal);
        let expected: Vec<Cell> = [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (4, 1),
            (4, 2),
            (4, 3),
            (4, 4),
        ]
        .into_iter()
        .map(Cell::from)
        .collect();
        assert_eq!(p.cells(), expected.as_slice());
    }

    #[test]
    fn start_equals_goal() {
        let g = Grid::new(3, 3);
        let c = Cell::new(1, 1);
        let p = astar(&g, c, c).unwrap();
        assert_eq!(p.cells(), &[c]);
    }

    #[test]
    fn blocked_or_out_of_bounds_endpoints_rejected() {
        let g = grid("#..\n...\n..#");
        assert!(astar(&g, Cell::new(0, 0), Cell::new(1, 1)).is_none());
        assert!(astar(&g, Cell::new(1, 1), Cell::new(2, 2)).is_none());
        assert!(astar(&g, Cell::new(-1, 0), Cell::new(1, 1)).is_none());
        assert!(astar(&g, Cell::new(1, 1), Cell::new(3, 0)).is_none());

        let (p, stats) = astar_with_stats(&g, Cell::new(0, 0), Cell::new(1, 1));
        assert!(p.is_none());
        assert_eq!(stats, SearchStats::default());
    }

    #[test]
    fn full_wall_means_no_path() {
        let g = grid(
            "
            ..#..
            ..#..
            ..#..
            ..#..
            ",
        );
        let (p, stats) = astar_with_stats(&g, Cell::new(0, 0), Cell::new(3, 4));
        assert!(p.is_none());
        // Every cell on the start side was expanded before giving up.
        assert_eq!(stats.expanded, 8);
    }

    #[test]
    fn routes_around_obstacle() {
        let g = grid(
            "
            .....
            .###.
            .#...
            .#.#.
            ...#.
            ",
        );
        let (start, goal) = (Cell::new(2, 2), Cell::new(4, 2));
        let p = astar(&g, start, goal).unwrap();
        assert_valid(&g, &p, start, goal);
        // (2,2) -> (3,2) -> (4,2)
        assert_eq!(p.steps(), 2);

        let (start, goal) = (Cell::new(4, 0), Cell::new(4, 4));
        let p = astar(&g, start, goal).unwrap();
        assert_valid(&g, &p, start, goal);
        // Through the middle opening at (2, 3) rather than over the top.
        assert_eq!(p.steps(), 8);
        assert!(p.cells().contains(&Cell::new(2, 3)));
    }

    #[test]
    fn finds_the_single_gap() {
        let g = grid(
            "
            ..#..
            ..#..
            .....
            ..#..
            ",
        );
        let (start, goal) = (Cell::new(0, 0), Cell::new(0, 4));
        let p = astar(&g, start, goal).unwrap();
        assert_valid(&g, &p, start, goal);
        assert!(p.cells().contains(&Cell::new(2, 2)));
        assert_eq!(p.steps(), 8);
    }

    #[test]
    fn repeated_searches_are_identical() {
        let g = grid(
            "
            ........
            .##.###.
            ........
            .#.##.#.
            ........
            ",
        );
        let (start, goal) = (Cell::new(0, 0), Cell::new(4, 7));
        let first = astar(&g, start, goal).unwrap();
        for _ in 0..10 {
            assert_eq!(astar(&g, start, goal).unwrap(), first);
        }
    }

    #[test]
    fn ties_follow_neighbor_order() {
        // On an open grid with f ties broken FIFO, the +row neighbour is
        // generated first, so the path descends the first column.
        let g = Grid::new(3, 3);
        let p = astar(&g, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
        assert_eq!(
            p.cells(),
            &[
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(2, 1),
                Cell::new(2, 2),
            ]
        );
    }

    #[test]
    fn disconnected_regions() {
        let g = grid(
            "
            ...#...
            ...#...
            ####...
            .......
            ",
        );
        assert!(astar(&g, Cell::new(0, 0), Cell::new(3, 0)).is_none());
        assert!(astar(&g, Cell::new(0, 4), Cell::new(3, 0)).is_some());
    }
}
