/// Painting capability consumed by the engine.
///
/// The engine forwards every cell whose liveness changed, so implementations
/// only repaint what moved. How cells are drawn (canvas, terminal, DOM) is
/// entirely up to the implementation; the engine never assumes a particular
/// dispatch mechanism. User input travels the other way: a front end maps its
/// click events onto [`crate::Engine::toggle_cell`].
pub trait Renderer {
    /// Paints the cell at `(row, col)` as alive.
    fn revive_cell(&mut self, row: usize, col: usize);

    /// Paints the cell at `(row, col)` as dead.
    fn kill_cell(&mut self, row: usize, col: usize);

    /// Visually clears the whole field.
    fn reset(&mut self);
}

/// A renderer that discards everything. Used for headless runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn revive_cell(&mut self, _row: usize, _col: usize) {}

    fn kill_cell(&mut self, _row: usize, _col: usize) {}

    fn reset(&mut self) {}
}
