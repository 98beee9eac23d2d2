use crate::Coord;
use crate::grid::Grid;
use crate::grid::WrapMode;

/// The 8 Moore offsets, clockwise from north.
pub const MOORE_OFFSETS: [(Coord, Coord); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Count the live Moore neighbors of `(x, y)`.
///
/// Uses the same wrap policy as direct lookups: on a torus the offsets wrap
/// around the edges, on a plane anything off the board counts as dead. Never
/// fails, so a generation pass always completes. The result is in `[0, 8]`.
pub fn live_neighbors(grid: &Grid, x: Coord, y: Coord, mode: WrapMode) -> u8 {
    MOORE_OFFSETS
        .iter()
        .filter(|&&(dx, dy)| grid.get(x + dx, y + dy, mode))
        .count() as u8
}

#[cfg(test)]
mod tests {
    use super::live_neighbors;
    use crate::grid::Grid;
    use crate::grid::WrapMode;

    fn ring(width: usize, height: usize) -> Grid {
        let mut grid = Grid::new(width, height).unwrap();
        grid.fill(true);
        grid.set(1, 1, false, WrapMode::Plane).unwrap();

        grid
    }

    #[test]
    fn full_ring_counts_eight() {
        let grid = ring(3, 3);

        assert_eq!(live_neighbors(&grid, 1, 1, WrapMode::Plane), 8);
        assert_eq!(live_neighbors(&grid, 1, 1, WrapMode::Torus), 8);
    }

    #[test]
    fn plane_corner_sees_only_in_bounds_neighbors() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.fill(true);

        // 3 in-bounds neighbors, the other 5 lookups fall off the board
        assert_eq!(live_neighbors(&grid, 0, 0, WrapMode::Plane), 3);
    }

    #[test]
    fn torus_corner_sees_opposite_edges() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(3, 0, true, WrapMode::Plane).unwrap();
        grid.set(3, 3, true, WrapMode::Plane).unwrap();

        assert_eq!(live_neighbors(&grid, 0, 0, WrapMode::Plane), 0);
        assert_eq!(live_neighbors(&grid, 0, 0, WrapMode::Torus), 2);
    }

    #[test]
    fn counting_does_not_mutate() {
        let grid = ring(3, 3);
        let before = grid.clone();

        live_neighbors(&grid, 0, 0, WrapMode::Torus);

        assert_eq!(grid, before);
    }
}
