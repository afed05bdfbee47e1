use rand::{Rng, SeedableRng};

/// A cell position as `(row, column)`, zero-based.
pub type Coord = (usize, usize);

/// A set of cell positions whose liveness differs between two generations,
/// sorted row-major. Applying the toggles of a diff computed against grid `A`
/// turns `A` into exactly the grid it was compared with.
pub type Diff = Vec<Coord>;

/// A fixed-size boolean matrix holding one generation of the simulation.
///
/// Cells are stored row-major in a flat vector; `true` means alive.
/// Dimensions are fixed at construction and never change for the grid's
/// lifetime. All accessors take pre-normalized in-range coordinates;
/// passing an out-of-range coordinate is a programming error and panics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Creates an all-dead grid of the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Creates a grid filled with a random soup of the given live-cell density.
    ///
    /// # Arguments
    ///
    /// * `width`, `height` - Grid dimensions.
    /// * `density` - Probability of each cell being alive, in `[0, 1]`.
    /// * `seed` - Optional seed for the random number generator.
    ///   If None, seeds from the OS.
    pub fn random(width: usize, height: usize, density: f64, seed: Option<u64>) -> Self {
        let mut rng = if let Some(x) = seed {
            rand_chacha::ChaCha8Rng::seed_from_u64(x)
        } else {
            rand_chacha::ChaCha8Rng::from_os_rng()
        };
        let mut grid = Self::new(width, height);
        for cell in grid.cells.iter_mut() {
            *cell = rng.random_bool(density);
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "Coordinate ({}, {}) is out of range for a {}x{} grid",
            row,
            col,
            self.height,
            self.width
        );
        row * self.width + col
    }

    /// Returns whether the cell at `(row, col)` is alive.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = alive;
    }

    /// Flips the cell at `(row, col)` and returns its new liveness.
    pub fn toggle(&mut self, row: usize, col: usize) -> bool {
        let idx = self.index(row, col);
        self.cells[idx] = !self.cells[idx];
        self.cells[idx]
    }

    /// Kills every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Counts the alive cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    /// Iterates over the coordinates of all alive cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| (i / self.width, i % self.width))
    }
}
