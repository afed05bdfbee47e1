//! The built-in pattern catalog.
//!
//! Presets are stored as B3/S23 RLE strings (the run-length encoded format
//! used by Golly and the LifeWiki) and decoded to origin-anchored coordinate
//! lists on lookup. The catalog is static configuration; placement and
//! repainting are the engine's job.

use crate::Coord;
use anyhow::{anyhow, Context, Result};

struct Preset {
    name: &'static str,
    rle: &'static str,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "block",
        rle: "x = 2, y = 2, rule = B3/S23\n2o$2o!",
    },
    Preset {
        name: "blinker",
        rle: "x = 3, y = 1, rule = B3/S23\n3o!",
    },
    Preset {
        name: "toad",
        rle: "x = 4, y = 2, rule = B3/S23\nb3o$3o!",
    },
    Preset {
        name: "beacon",
        rle: "x = 4, y = 4, rule = B3/S23\n2o$2o$2b2o$2b2o!",
    },
    Preset {
        name: "glider",
        rle: "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!",
    },
    Preset {
        name: "r-pentomino",
        rle: "x = 3, y = 3, rule = B3/S23\nb2o$2o$bo!",
    },
    Preset {
        name: "pulsar",
        rle: "x = 13, y = 13, rule = B3/S23\n2b3o3b3o2$o4bobo4bo$o4bobo4bo$o4bobo4bo$\
              2b3o3b3o2$2b3o3b3o$o4bobo4bo$o4bobo4bo$o4bobo4bo2$2b3o3b3o!",
    },
    Preset {
        name: "gosper-glider-gun",
        rle: "x = 36, y = 9, rule = B3/S23\n24bo$22bobo$12b2o6b2o12b2o$11bo3bo4b2o12b2o$\
              2o8bo5bo3b2o$2o8bo3bob2o4bobo$10bo5bo7bo$11bo3bo$12b2o!",
    },
];

/// Lists the available preset names.
pub fn names() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name).collect()
}

/// Returns the live cells of the named preset, anchored at the origin and
/// sorted row-major.
///
/// # Errors
///
/// Returns an error if the name is unknown.
pub fn cells(name: &str) -> Result<Vec<Coord>> {
    let preset = PRESETS
        .iter()
        .find(|p| p.name == name)
        .ok_or_else(|| anyhow!("Unknown preset: '{}'", name))?;
    cells_from_rle(preset.rle).with_context(|| format!("Preset '{}' is malformed", name))
}

/// Parses an RLE pattern into its live-cell coordinates.
///
/// Supports the header line `x = W, y = H[, rule = B3/S23]`, `#`-comment
/// lines, and run data made of counts, `b` (dead), `o` (alive), `$` (end of
/// row) and `!` (end of pattern).
fn cells_from_rle(data: &str) -> Result<Vec<Coord>> {
    let mut lines = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines.next().ok_or_else(|| anyhow!("Missing RLE header"))?;
    let mut parts = header.split(',').map(str::trim);

    let extract_value = |part: Option<&str>, expected_key: &str| -> Result<String> {
        let part = part.ok_or_else(|| anyhow!("Invalid header: missing \"{}\"", expected_key))?;
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| anyhow!("Invalid header: missing '=' in \"{}\"", part))?;
        if key.trim() != expected_key {
            return Err(anyhow!(
                "Invalid header: expected {}, got {}",
                expected_key,
                key.trim()
            ));
        }
        Ok(value.trim().to_string())
    };

    let width: usize = extract_value(parts.next(), "x")?.parse()?;
    let height: usize = extract_value(parts.next(), "y")?.parse()?;
    if let Some(part) = parts.next() {
        let rule = extract_value(Some(part), "rule")?;
        if rule != "B3/S23" {
            return Err(anyhow!("Only B3/S23 rule is supported"));
        }
    }

    let mut cells = Vec::new();
    let mut x = 0usize;
    let mut y = 0usize;
    let mut count = 0usize;

    'data: for line in lines {
        for b in line.bytes() {
            match b {
                b'0'..=b'9' => count = count * 10 + (b - b'0') as usize,
                b'b' => {
                    x += if count == 0 { 1 } else { count };
                    count = 0;
                }
                b'o' => {
                    let run = if count == 0 { 1 } else { count };
                    for i in 0..run {
                        if x + i >= width || y >= height {
                            return Err(anyhow!(
                                "Pattern data out of bounds: x = {}, y = {}",
                                x + i,
                                y
                            ));
                        }
                        cells.push((y, x + i));
                    }
                    x += run;
                    count = 0;
                }
                b'$' => {
                    y += if count == 0 { 1 } else { count };
                    x = 0;
                    count = 0;
                }
                b'!' => break 'data,
                b' ' => continue,
                _ => return Err(anyhow!("Invalid RLE character: '{}'", b as char)),
            }
            if x > width {
                return Err(anyhow!("Pattern data out of bounds: x = {}, y = {}", x, y));
            }
        }
    }
    Ok(cells)
}
