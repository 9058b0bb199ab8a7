//! Orthogonal-neighbour counting used to rank floor cells.

use crate::types::{CellState, Pos};

use super::config::EdgePolicy;
use super::grid::Grid;

/// Number of the four orthogonal neighbours of `pos` that are not `Empty`.
/// Neighbours off the grid count as empty.
pub fn connectivity_count(grid: &Grid, pos: Pos) -> u8 {
    let occupied =
        pos.neighbors().into_iter().filter(|&neighbor| !grid.get_or_empty(neighbor).is_empty());
    occupied.count() as u8
}

/// Floor cells eligible as special-room sites, in raster order.
pub fn candidate_floor_cells(grid: &Grid, policy: EdgePolicy) -> impl Iterator<Item = Pos> + '_ {
    let (last_x, last_y) = (grid.width() as i32 - 1, grid.height() as i32 - 1);
    grid.iter()
        .filter(|&(_, state)| state == CellState::Floor)
        .map(|(pos, _)| pos)
        .filter(move |pos| match policy {
            EdgePolicy::BoundsChecked => true,
            EdgePolicy::ClipLastRowAndColumn => pos.x < last_x && pos.y < last_y,
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn grid_from_rows(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows[0].len();
        let mut grid = Grid::new(width, height).expect("valid grid");
        for (row_index, row) in rows.iter().enumerate() {
            let y = (height - 1 - row_index) as i32;
            for (x, glyph) in row.chars().enumerate() {
                let state = match glyph {
                    '.' => CellState::Floor,
                    'S' => CellState::Start,
                    'B' => CellState::Boss,
                    _ => CellState::Empty,
                };
                grid.set(Pos::new(x as i32, y), state).expect("in bounds");
            }
        }
        grid
    }

    #[test]
    fn isolated_cell_has_no_connections() {
        let grid = grid_from_rows(&["   ", " . ", "   "]);
        assert_eq!(connectivity_count(&grid, Pos::new(1, 1)), 0);
    }

    #[test]
    fn surrounded_cell_has_four_connections_of_any_kind() {
        let grid = grid_from_rows(&[" B ", ".. ", " . "]);
        assert_eq!(connectivity_count(&grid, Pos::new(1, 1)), 3);

        let grid = grid_from_rows(&[" B ", "S..", " . "]);
        assert_eq!(connectivity_count(&grid, Pos::new(1, 1)), 4);
    }

    #[test]
    fn diagonals_do_not_count() {
        let grid = grid_from_rows(&[". .", " . ", ". ."]);
        assert_eq!(connectivity_count(&grid, Pos::new(1, 1)), 0);
    }

    #[test]
    fn off_grid_neighbours_count_as_empty() {
        let grid = grid_from_rows(&["..", ".."]);
        for x in 0..2 {
            for y in 0..2 {
                assert_eq!(connectivity_count(&grid, Pos::new(x, y)), 2);
            }
        }
    }

    #[test]
    fn clipping_drops_only_the_last_row_and_column() {
        let grid = grid_from_rows(&["...", "...", "..."]);
        let clipped: Vec<Pos> =
            candidate_floor_cells(&grid, EdgePolicy::ClipLastRowAndColumn).collect();
        assert_eq!(clipped, vec![Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 0), Pos::new(1, 1)]);
        assert_eq!(candidate_floor_cells(&grid, EdgePolicy::BoundsChecked).count(), 9);
    }

    #[test]
    fn only_floor_cells_are_candidates() {
        let grid = grid_from_rows(&["S.B"]);
        let cells: Vec<Pos> = candidate_floor_cells(&grid, EdgePolicy::BoundsChecked).collect();
        assert_eq!(cells, vec![Pos::new(1, 0)]);
    }

    proptest! {
        #[test]
        fn both_edge_policies_agree_on_every_clipped_candidate(
            width in 2_usize..=10,
            height in 2_usize..=10,
            cells in proptest::collection::vec(any::<bool>(), 100),
        ) {
            let mut grid = Grid::new(width, height).expect("valid grid");
            for x in 0..width {
                for y in 0..height {
                    if cells[y * 10 + x] {
                        grid.set(Pos::new(x as i32, y as i32), CellState::Floor).expect("in bounds");
                    }
                }
            }

            let full: Vec<Pos> = candidate_floor_cells(&grid, EdgePolicy::BoundsChecked).collect();
            let clipped: Vec<Pos> =
                candidate_floor_cells(&grid, EdgePolicy::ClipLastRowAndColumn).collect();

            // Clipping is a pure filter over the same raster sequence.
            let expected: Vec<Pos> = full
                .iter()
                .copied()
                .filter(|pos| pos.x < width as i32 - 1 && pos.y < height as i32 - 1)
                .collect();
            prop_assert_eq!(&clipped, &expected);

            for pos in &full {
                let count = connectivity_count(&grid, *pos);
                prop_assert!(count <= 4);
                let manual = pos
                    .neighbors()
                    .into_iter()
                    .filter(|n| grid.contains(*n) && grid.get(*n) != Ok(CellState::Empty))
                    .count() as u8;
                prop_assert_eq!(count, manual);
            }
        }
    }
}
