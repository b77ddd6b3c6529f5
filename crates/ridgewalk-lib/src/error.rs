use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the Ridgewalk library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when an elevation lookup targets a cell outside the grid. Search
    /// engines only query cells the grid produced, so this signals a bug.
    #[error("invalid position ({x}, {y}) is outside the elevation grid")]
    OutOfBounds { x: i64, y: i64 },

    /// Raised when a search is started from a cell outside the grid.
    #[error("start position ({x}, {y}) is outside the elevation grid")]
    StartOutOfBounds { x: usize, y: usize },

    /// Raised when the configured goal lies outside the grid.
    #[error("goal position ({x}, {y}) is outside the elevation grid")]
    GoalOutOfBounds { x: usize, y: usize },

    /// Raised when a grid or map contains no elevation data at all.
    #[error("map contains no elevation data")]
    EmptyMap,

    /// Raised when a grid row does not match the width of the first row.
    #[error("row {row} has {found} elevations, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a map line carries no elevation values.
    #[error("no data (or parse error) on line {line}")]
    EmptyRow { line: usize },

    /// Raised when a map line has a different number of values than the first line.
    #[error("inconsistent map width on line {line}: expected {expected} elements, saw {found}")]
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Raised when a map token is not an integer elevation.
    #[error("invalid elevation '{token}' on line {line}")]
    InvalidElevation { line: usize, token: String },

    /// Raised when an algorithm name cannot be resolved.
    #[error("unknown search algorithm: {name}")]
    UnknownAlgorithm { name: String },

    /// Raised when a map file cannot be read.
    #[error("failed to read map file {path}")]
    MapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
