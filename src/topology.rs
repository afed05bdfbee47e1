use crate::Coord;

/// Toroidal coordinate space of a fixed-size grid.
///
/// Opposite bounds of the field are stitched together: leaving the right edge
/// re-enters the left, the row above row 0 is the last row, and so on. There
/// are no dead edges, so every cell has exactly 8 Moore neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Torus {
    width: usize,
    height: usize,
}

impl Torus {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "Torus dimensions must be non-zero");
        Self { width, height }
    }

    /// Normalizes a possibly out-of-range coordinate onto the torus.
    pub fn wrap(&self, row: usize, col: usize) -> Coord {
        (row % self.height, col % self.width)
    }

    /// Returns the 8 Moore neighbors of `(row, col)` with wraparound,
    /// in row-major order of the 3x3 block minus the center.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of range.
    pub fn neighbors_of(&self, row: usize, col: usize) -> [Coord; 8] {
        assert!(
            row < self.height && col < self.width,
            "Coordinate ({}, {}) is out of range for a {}x{} torus",
            row,
            col,
            self.height,
            self.width
        );
        let up = if row == 0 { self.height - 1 } else { row - 1 };
        let down = if row == self.height - 1 { 0 } else { row + 1 };
        let left = if col == 0 { self.width - 1 } else { col - 1 };
        let right = if col == self.width - 1 { 0 } else { col + 1 };
        [
            (up, left),
            (up, col),
            (up, right),
            (row, left),
            (row, right),
            (down, left),
            (down, col),
            (down, right),
        ]
    }
}
