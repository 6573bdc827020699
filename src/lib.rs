//! # grid_search
//!
//! State-space search over a grid map. The walker moves in 8 directions through a fine-grained
//! coordinate space in which one cell spans [CELL_SIZE] units; straight moves cross a whole
//! cell while diagonal moves cover [DIAGONAL_SIZE] units on both axes, so every move has about
//! the same length. Five strategies are available through [Algorithm]:
//!
//! - breadth-first search,
//! - depth-limited depth-first search,
//! - iterative-deepening depth-first search,
//! - best-first search with the straight-line distance heuristic,
//! - best-first search with the diagonal (octile) distance heuristic.
//!
//! ```
//! use grid_search::{Algorithm, CellMap, PathingGrid, SearchConfig};
//!
//! let map: CellMap = "...\n.#.\n...\n".parse().unwrap();
//! let grid = PathingGrid::from_cells(map, (0, 0), (2, 2)).unwrap();
//! let outcome = Algorithm::BreadthFirst.solve(&grid, &SearchConfig::default());
//! assert!(outcome.found());
//! ```
pub mod coordinate;
pub mod error;
pub mod heuristic;
pub mod map;
pub mod path_io;
pub mod pathing_grid;
pub mod search_node;
pub mod solver;

pub use coordinate::Coordinate;
pub use error::{AlgorithmError, MapError, ParseCoordinateError, PathError};
pub use heuristic::{DiagonalHeuristic, Heuristic, StraightLineHeuristic};
pub use map::CellMap;
pub use pathing_grid::PathingGrid;
pub use search_node::SearchNode;
pub use solver::{Algorithm, GridSolver, SearchConfig, SearchOutcome, SearchStats};

// Splitting a cell into 8119 units makes a diagonal move 5741 units along each axis. These
// values minimise the error of diagonal = side / sqrt(2) while keeping integer coordinates.
/// Units spanned by one cell along each axis.
pub const CELL_SIZE: i32 = 8119;
/// Units covered on each axis by one diagonal move.
pub const DIAGONAL_SIZE: i32 = 5741;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;
