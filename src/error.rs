//! Error types for map loading, coordinate parsing and algorithm selection.

use std::num::ParseIntError;

use thiserror::Error;

use crate::coordinate::Coordinate;

/// Configuration errors raised while building a map or a search problem. These are detected
/// before any search starts.
#[derive(Error, Debug)]
pub enum MapError {
    #[error("could not read map: {0}")]
    Io(#[from] std::io::Error),

    #[error("map contains no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    UnequalRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid cell {found:?} at row {row}, column {column}")]
    InvalidCell {
        found: char,
        row: usize,
        column: usize,
    },

    #[error("map of {height}x{width} cells exceeds the coordinate range")]
    TooLarge { width: usize, height: usize },

    #[error("start cell {row},{column} is not a free cell inside the map")]
    InvalidStartCell { row: i32, column: i32 },

    #[error("goal cell {row},{column} is not a free cell inside the map")]
    InvalidGoalCell { row: i32, column: i32 },

    #[error("start position {0} is not a free cell inside the map")]
    InvalidStart(Coordinate),

    #[error("goal position {0} is not a free cell inside the map")]
    InvalidGoal(Coordinate),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseCoordinateError {
    #[error("expected `row,column`, got {0:?}")]
    MissingSeparator(String),

    #[error("invalid coordinate component: {0}")]
    InvalidNumber(#[from] ParseIntError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AlgorithmError {
    #[error("unknown algorithm {0}, expected an index between 0 and 4")]
    OutOfRange(usize),
}

#[derive(Error, Debug)]
pub enum PathError {
    #[error("could not access path: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseCoordinateError,
    },
}

pub type Result<T> = std::result::Result<T, MapError>;
