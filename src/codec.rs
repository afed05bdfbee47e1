//! The canonical string form of a generation.
//!
//! A generation code is the row-major concatenation of `'1'`/`'0'` per cell,
//! so two grids are equal iff their codes are equal. Codes are what the
//! history ledger stores and compares; they are never persisted externally.

use crate::Grid;
use anyhow::{anyhow, Result};

/// Encodes a grid into its generation code.
///
/// The code has length `width * height`; recovering row boundaries on decode
/// requires knowing the width.
pub fn encode(grid: &Grid) -> String {
    let (width, height) = grid.dimensions();
    let mut code = String::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            code.push(if grid.get(row, col) { '1' } else { '0' });
        }
    }
    code
}

/// Decodes a generation code back into a grid of the given width.
///
/// # Errors
///
/// Returns an error if `width` is zero, the code length is not a non-zero
/// multiple of `width`, or the code contains a character other than
/// `'0'`/`'1'`. Malformed codes are a caller contract violation and are
/// never silently coerced.
pub fn decode(code: &str, width: usize) -> Result<Grid> {
    if width == 0 {
        return Err(anyhow!("Width must be non-zero"));
    }
    if code.is_empty() || code.len() % width != 0 {
        return Err(anyhow!(
            "Code length {} is not a non-zero multiple of width {}",
            code.len(),
            width
        ));
    }
    let height = code.len() / width;
    let mut grid = Grid::new(width, height);
    for (i, b) in code.bytes().enumerate() {
        match b {
            b'1' => grid.set(i / width, i % width, true),
            b'0' => {}
            _ => return Err(anyhow!("Invalid code character: '{}'", b as char)),
        }
    }
    Ok(grid)
}
