//! Error types for grid editing and parsing.

use crate::Coord;

/// Why an [Engine](crate::Engine) operation was refused. A refused operation leaves the grid
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A search animation holds the lock
    #[error("an animation is in progress")]
    Animating,

    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),

    /// Start and End cannot be edited
    #[error("cell {0} is the start or end cell")]
    FixedCell(Coord),

    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
}

/// Errors from parsing the text form of a [CellGrid](crate::CellGrid).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseGridError {
    #[error("grid layout is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell {ch:?} at ({row}, {col})")]
    UnknownCell { row: usize, col: usize, ch: char },

    /// Start may only appear in the top-left corner
    #[error("start found at {0}")]
    MisplacedStart(Coord),

    /// End may only appear in the bottom-right corner
    #[error("end found at {0}")]
    MisplacedEnd(Coord),

    #[error("top-left corner is not the start")]
    MissingStart,

    #[error("bottom-right corner is not the end")]
    MissingEnd,
}
