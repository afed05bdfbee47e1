//! The B3/S23 rule evaluator.
//!
//! Two equivalent strategies are provided: a full sweep over every cell and a
//! sparse sweep restricted to the frontier (live cells plus dead cells
//! adjacent to at least one live cell). For any grid `G`,
//! `next_generation(&G)` equals `G` with `next_diff(&G)` applied.

use crate::{Coord, Diff, Grid, Torus};
use ahash::AHashSet as HashSet;

/// A live cell survives iff it has 2 or 3 live neighbors;
/// a dead cell is born iff it has exactly 3.
fn should_live(alive: bool, live_neighbors: usize) -> bool {
    live_neighbors == 3 || (alive && live_neighbors == 2)
}

fn live_neighbor_count(grid: &Grid, torus: &Torus, row: usize, col: usize) -> usize {
    torus
        .neighbors_of(row, col)
        .iter()
        .filter(|&&(r, c)| grid.get(r, c))
        .count()
}

/// Computes the complete next generation by examining every cell.
pub fn next_generation(grid: &Grid) -> Grid {
    let (width, height) = grid.dimensions();
    let torus = Torus::new(width, height);
    let mut next = Grid::new(width, height);
    for row in 0..height {
        for col in 0..width {
            let count = live_neighbor_count(grid, &torus, row, col);
            next.set(row, col, should_live(grid.get(row, col), count));
        }
    }
    next
}

/// Computes the next generation as a diff, examining only the frontier.
///
/// Cells far from any live cell cannot change state, so only live cells and
/// their dead neighbors are evaluated. An entirely dead grid has an empty
/// frontier and yields an empty diff. The result is sorted row-major.
pub fn next_diff(grid: &Grid) -> Diff {
    let (width, height) = grid.dimensions();
    let torus = Torus::new(width, height);

    let mut frontier = HashSet::new();
    for (row, col) in grid.live_cells() {
        frontier.insert((row, col));
        frontier.extend(torus.neighbors_of(row, col));
    }

    let mut diff: Diff = frontier
        .into_iter()
        .filter(|&(row, col)| {
            let count = live_neighbor_count(grid, &torus, row, col);
            should_live(grid.get(row, col), count) != grid.get(row, col)
        })
        .collect();
    diff.sort_unstable();
    diff
}

/// Returns the coordinates whose liveness differs between two grids of equal
/// dimensions, sorted row-major.
///
/// # Panics
///
/// Panics if the grids have different dimensions.
pub fn grid_diff(a: &Grid, b: &Grid) -> Diff {
    assert_eq!(
        a.dimensions(),
        b.dimensions(),
        "Cannot diff grids of different dimensions"
    );
    let (width, height) = a.dimensions();
    let mut diff = Vec::new();
    for row in 0..height {
        for col in 0..width {
            if a.get(row, col) != b.get(row, col) {
                diff.push((row, col));
            }
        }
    }
    diff
}

/// Toggles every cell listed in the diff.
pub fn apply_diff(grid: &mut Grid, diff: &[Coord]) {
    for &(row, col) in diff {
        grid.toggle(row, col);
    }
}
