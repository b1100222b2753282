use crate::grid::{Grid, PaletteIndex};

/// Replace the 4-connected region of equal values around `(row, col)`.
///
/// Neighbours are visited with an explicit LIFO stack, so arbitrarily large
/// regions never recurse.  Diagonal cells are not connected.  A seed outside
/// the grid, or a fill with the value the seed already holds, is a no-op.
///
/// Returns the number of cells changed.
pub fn flood_fill(grid: &mut Grid, row: u32, col: u32, new_value: PaletteIndex) -> usize {
    let Some(old_value) = grid.get(row, col) else {
        return 0;
    };
    if old_value == new_value {
        return 0;
    }

    let rows = grid.rows();
    let cols = grid.cols();
    let mut filled = 0;
    let mut stack = vec![(row, col)];

    while let Some((r, c)) = stack.pop() {
        if grid.get(r, c) != Some(old_value) {
            continue;
        }
        grid.set(r, c, new_value);
        filled += 1;

        if r > 0 {
            stack.push((r - 1, c));
        }
        if r + 1 < rows {
            stack.push((r + 1, c));
        }
        if c > 0 {
            stack.push((r, c - 1));
        }
        if c + 1 < cols {
            stack.push((r, c + 1));
        }
    }

    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[PaletteIndex]]) -> Grid {
        Grid::from_rows(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn fills_uniform_grid() {
        let mut g = Grid::new(2, 2);
        assert_eq!(flood_fill(&mut g, 0, 0, 1), 4);
        assert_eq!(g.to_rows(), vec![vec![1, 1], vec![1, 1]]);
    }

    #[test]
    fn same_value_is_noop() {
        let mut g = grid(&[&[3, 3], &[3, 3]]);
        let before = g.clone();
        assert_eq!(flood_fill(&mut g, 1, 0, 3), 0);
        assert_eq!(g, before);
    }

    #[test]
    fn stops_at_region_boundary() {
        let mut g = grid(&[
            &[0, 0, 1, 0],
            &[0, 1, 1, 0],
            &[1, 0, 0, 0],
        ]);
        let n = flood_fill(&mut g, 0, 0, 7);
        assert_eq!(n, 3);
        assert_eq!(
            g.to_rows(),
            vec![vec![7, 7, 1, 0], vec![7, 1, 1, 0], vec![1, 0, 0, 0]]
        );
    }

    #[test]
    fn diagonals_are_not_connected() {
        let mut g = grid(&[&[0, 1], &[1, 0]]);
        flood_fill(&mut g, 0, 0, 2);
        assert_eq!(g.to_rows(), vec![vec![2, 1], vec![1, 0]]);
    }

    #[test]
    fn seed_outside_grid_is_ignored() {
        let mut g = Grid::new(2, 2);
        assert_eq!(flood_fill(&mut g, 5, 5, 1), 0);
        assert_eq!(g.count_of(0), 4);
    }

    #[test]
    fn fills_winding_corridor() {
        let mut g = grid(&[
            &[0, 1, 0, 0, 0],
            &[0, 1, 0, 1, 0],
            &[0, 0, 0, 1, 0],
            &[1, 1, 1, 1, 0],
        ]);
        let expected_zeros = g.count_of(0);
        assert_eq!(flood_fill(&mut g, 0, 0, 4), expected_zeros);
        assert_eq!(g.count_of(0), 0);
        assert_eq!(g.count_of(1), 8);
    }

    #[test]
    fn large_grid_does_not_overflow_stack() {
        let mut g = Grid::new(512, 512);
        assert_eq!(flood_fill(&mut g, 256, 256, 9), 512 * 512);
    }
}
