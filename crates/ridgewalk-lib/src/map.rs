//! Elevation map loading.
//!
//! Maps are plain text: one row per line, whitespace-separated integer
//! elevations. The first line of the file is the top of the map, so the last
//! line becomes `y = 0` once loaded.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::grid::ElevationGrid;
use crate::state::Position;

/// Parsed elevation rows, indexed by `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElevationMap {
    rows: Vec<Vec<i64>>,
    width: usize,
}

impl ElevationMap {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Rows indexed by `y` (`rows()[0]` is the last line of the file).
    pub fn rows(&self) -> &[Vec<i64>] {
        &self.rows
    }

    /// Build the search grid, resolving the goal against this map's size.
    pub fn into_grid(self, goal: GoalSpec, energy_budget: u64) -> Result<ElevationGrid> {
        let goal = goal.resolve(self.width, self.rows.len());
        ElevationGrid::new(self.rows, goal, energy_budget)
    }
}

/// Goal coordinate where each axis may default to the far edge of the map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalSpec {
    pub x: Option<usize>,
    pub y: Option<usize>,
}

impl GoalSpec {
    /// The top-right corner: last column and last row.
    pub fn far_corner() -> Self {
        Self::default()
    }

    pub fn at(x: usize, y: usize) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn resolve(self, width: usize, height: usize) -> Position {
        Position::new(
            self.x.unwrap_or(width.saturating_sub(1)),
            self.y.unwrap_or(height.saturating_sub(1)),
        )
    }
}

/// Parse map text into elevation rows.
pub fn parse_map(text: &str) -> Result<ElevationMap> {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    if lines.is_empty() || lines.iter().all(|line| line.trim().is_empty()) {
        return Err(Error::EmptyMap);
    }

    let mut rows: Vec<Vec<i64>> = Vec::with_capacity(lines.len());
    let mut width = 0;
    for (index, line) in lines.iter().enumerate() {
        let line_number = index + 1;
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<i64>().map_err(|_| Error::InvalidElevation {
                    line: line_number,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if row.is_empty() {
            return Err(Error::EmptyRow { line: line_number });
        }
        if index == 0 {
            width = row.len();
        } else if row.len() != width {
            return Err(Error::InconsistentWidth {
                line: line_number,
                expected: width,
                found: row.len(),
            });
        }
        rows.push(row);
    }

    // First line is the top row.
    rows.reverse();
    debug!(width, height = rows.len(), "parsed elevation map");
    Ok(ElevationMap { rows, width })
}

/// Parse a map from any reader.
pub fn read_map<R: Read>(mut reader: R) -> Result<ElevationMap> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_map(&text)
}

/// Load and parse a map file.
pub fn load_map(path: impl AsRef<Path>) -> Result<ElevationMap> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading elevation map");
    let text = fs::read_to_string(path).map_err(|source| Error::MapRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_map(&text)
}
