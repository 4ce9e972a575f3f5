use std::collections::VecDeque;

use pursuit_core::Cell;

use crate::traits::Pather;

/// Find the traversable cell closest to `origin` (Manhattan distance).
///
/// Returns `origin` itself when it is traversable. Otherwise runs a
/// breadth-first expansion over the raw grid, walking through blocked cells
/// as freely as free ones, and returns the first free cell discovered.
/// Neighbours are visited +row, -row, +col, -col, which decides ties between
/// free cells at the same distance.
///
/// `origin` may lie outside the map; only in-bounds cells are ever queued.
/// Returns `None` when the map has no traversable cell reachable this way.
pub fn nearest_free<P: Pather + ?Sized>(pather: &P, origin: Cell) -> Option<Cell> {
    if pather.is_traversable(origin) {
        return Some(origin);
    }
    let dims = pather.dims();
    if dims.is_empty() {
        return None;
    }

    let mut seen = vec![false; dims.len()];
    if let Some(oi) = dims.index(origin) {
        seen[oi] = true;
    }
    let mut queue = VecDeque::from([origin]);

    while let Some(c) = queue.pop_front() {
        for n in c.neighbors_4() {
            let Some(ni) = dims.index(n) else {
                continue;
            };
            if seen[ni] {
                continue;
            }
            if pather.is_traversable(n) {
                return Some(n);
            }
            seen[ni] = true;
            queue.push_back(n);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pursuit_core::Grid;

    fn grid(s: &str) -> Grid {
        Grid::from_ascii(s).unwrap()
    }

    #[test]
    fn free_origin_returned_immediately() {
        let g = grid("...\n...\n...");
        assert_eq!(nearest_free(&g, Cell::new(1, 1)), Some(Cell::new(1, 1)));
    }

    #[test]
    fn tie_break_prefers_plus_row() {
        let g = grid(
            "
            ...
            .#.
            ...
            ",
        );
        assert_eq!(nearest_free(&g, Cell::new(1, 1)), Some(Cell::new(2, 1)));
    }

    #[test]
    fn tie_break_order_is_plus_row_minus_row_plus_col_minus_col() {
        // +row blocked: -row wins.
        let g = grid(
            "
            ...
            .#.
            .#.
            ",
        );
        assert_eq!(nearest_free(&g, Cell::new(1, 1)), Some(Cell::new(0, 1)));

        // +row and -row blocked: +col wins.
        let g = grid(
            "
            .#.
            .#.
            .#.
            ",
        );
        assert_eq!(nearest_free(&g, Cell::new(1, 1)), Some(Cell::new(1, 2)));

        // Only -col free.
        let g = grid(
            "
            ###
            .##
            ###
            ",
        );
        assert_eq!(nearest_free(&g, Cell::new(1, 1)), Some(Cell::new(1, 0)));
    }

    #[test]
    fn free_cell_two_steps_away_through_blocked_cells() {
        let g = grid(
            "
            #####
            #####
            #####
            #####
            ##.##
            ",
        );
        assert_eq!(nearest_free(&g, Cell::new(2, 2)), Some(Cell::new(4, 2)));
    }

    #[test]
    fn expansion_crosses_walls() {
        // Origin deep in a blocked region; the only free cell is in a corner.
        let g = grid(
            "
            ####.
            #####
            #####
            #####
            ",
        );
        assert_eq!(nearest_free(&g, Cell::new(3, 0)), Some(Cell::new(0, 4)));
    }

    #[test]
    fn equal_distance_ties_resolved_by_discovery_order() {
        // Two free cells at distance 2: (3, 2) via +row and (1, 0) via -row then -col.
        let g = grid(
            "
            ###
            .##
            ###
            ##.
            ",
        );
        // From (2, 1): layer 1 is (3,1) (1,1) (2,2) (2,0), all blocked.
        // Expanding (3,1) first discovers (3,2) before (1,1) discovers (1,0).
        assert_eq!(nearest_free(&g, Cell::new(2, 1)), Some(Cell::new(3, 2)));
    }

    #[test]
    fn fully_blocked_returns_none() {
        let g = grid("##\n##");
        assert_eq!(nearest_free(&g, Cell::new(0, 0)), None);
    }

    #[test]
    fn empty_grid_returns_none() {
        let g = Grid::new(0, 0);
        assert_eq!(nearest_free(&g, Cell::new(0, 0)), None);
    }

    #[test]
    fn origin_just_outside_resolves_to_edge() {
        let g = grid("...\n...");
        assert_eq!(nearest_free(&g, Cell::new(-1, 1)), Some(Cell::new(0, 1)));
        assert_eq!(nearest_free(&g, Cell::new(1, 3)), Some(Cell::new(1, 2)));
    }

    #[test]
    fn origin_far_outside_returns_none() {
        let g = grid("...\n...");
        assert_eq!(nearest_free(&g, Cell::new(-5, -5)), None);
    }

    #[test]
    fn origin_at_coordinate_limits_returns_none() {
        let g = Grid::new(3, 3);
        assert_eq!(nearest_free(&g, Cell::new(i32::MAX, 0)), None);
        assert_eq!(nearest_free(&g, Cell::new(i32::MIN, 0)), None);
        assert_eq!(nearest_free(&g, Cell::new(1, i32::MIN)), None);
        assert_eq!(nearest_free(&g, Cell::new(i32::MAX, i32::MAX)), None);
    }
}
