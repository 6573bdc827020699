use core::fmt;

use log::info;

use crate::coordinate::Coordinate;
use crate::error::{MapError, Result};
use crate::map::CellMap;

/// A search problem: a [CellMap] together with a start and a goal that are both known to lie in
/// free cells. Every [SearchNode](crate::search_node::SearchNode) borrows the grid it was
/// created from.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    map: CellMap,
    start: Coordinate,
    goal: Coordinate,
}

impl PathingGrid {
    /// Validates `start` and `goal` against the map.
    pub fn new(map: CellMap, start: Coordinate, goal: Coordinate) -> Result<PathingGrid> {
        if !map.is_valid_position(&start) {
            return Err(MapError::InvalidStart(start));
        }
        if !map.is_valid_position(&goal) {
            return Err(MapError::InvalidGoal(goal));
        }
        info!("Searching from {} to {}", start, goal);
        Ok(PathingGrid { map, start, goal })
    }

    /// Like [new](Self::new), with start and goal given as `(row, column)` cell indices. The
    /// indices are checked against the map before they are converted to coordinates.
    pub fn from_cells(
        map: CellMap,
        start_cell: (i32, i32),
        goal_cell: (i32, i32),
    ) -> Result<PathingGrid> {
        let (row, column) = start_cell;
        if !map.is_free_cell(row, column) {
            return Err(MapError::InvalidStartCell { row, column });
        }
        let (row, column) = goal_cell;
        if !map.is_free_cell(row, column) {
            return Err(MapError::InvalidGoalCell { row, column });
        }
        PathingGrid::new(
            map,
            Coordinate::from_cell(start_cell.0, start_cell.1),
            Coordinate::from_cell(goal_cell.0, goal_cell.1),
        )
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn goal(&self) -> Coordinate {
        self.goal
    }

    pub fn map(&self) -> &CellMap {
        &self.map
    }

    /// Gives back the map, e.g. to record a found path on it for display.
    pub fn into_map(self) -> CellMap {
        self.map
    }

    pub fn is_valid_position(&self, coordinate: &Coordinate) -> bool {
        self.map.is_valid_position(coordinate)
    }

    /// Checks if start and goal are on the same connected component.
    pub fn reachable(&self) -> bool {
        self.map.reachable(&self.start, &self.goal)
    }

    /// Checks if start and goal are not on the same connected component, in which case no
    /// search can succeed.
    pub fn unreachable(&self) -> bool {
        !self.reachable()
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Start: {}; Goal: {}", self.start, self.goal)?;
        write!(f, "{}", self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_free_endpoints() {
        let map: CellMap = "..\n#.\n".parse().unwrap();
        let grid = PathingGrid::from_cells(map, (0, 0), (1, 1)).unwrap();
        assert_eq!(grid.start(), Coordinate::from_cell(0, 0));
        assert_eq!(grid.goal(), Coordinate::from_cell(1, 1));
        assert!(grid.reachable());
    }

    #[test]
    fn rejects_blocked_start() {
        let map: CellMap = "#.\n..\n".parse().unwrap();
        let err = PathingGrid::from_cells(map, (0, 0), (1, 1)).unwrap_err();
        assert!(matches!(err, MapError::InvalidStartCell { row: 0, column: 0 }));
        let map: CellMap = "#.\n..\n".parse().unwrap();
        let err = PathingGrid::new(map, Coordinate::new(10, 10), Coordinate::from_cell(1, 1))
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidStart(_)));
    }

    /// Cell indices far outside the map are rejected without computing their coordinates.
    #[test]
    fn rejects_huge_cell_indices() {
        let map: CellMap = "..\n..\n".parse().unwrap();
        let err = PathingGrid::from_cells(map, (300_000, 0), (0, 0)).unwrap_err();
        assert!(matches!(err, MapError::InvalidStartCell { row: 300_000, column: 0 }));
        let map: CellMap = "..\n..\n".parse().unwrap();
        let err = PathingGrid::from_cells(map, (0, 0), (1, i32::MAX)).unwrap_err();
        assert!(matches!(err, MapError::InvalidGoalCell { .. }));
        let map: CellMap = "..\n..\n".parse().unwrap();
        let err = PathingGrid::from_cells(map, (i32::MIN, 0), (0, 0)).unwrap_err();
        assert!(matches!(err, MapError::InvalidStartCell { .. }));
    }

    #[test]
    fn rejects_goal_outside_map() {
        let map: CellMap = "..\n..\n".parse().unwrap();
        let err = PathingGrid::from_cells(map, (0, 0), (2, 0)).unwrap_err();
        assert!(matches!(err, MapError::InvalidGoalCell { row: 2, column: 0 }));
        let map: CellMap = "..\n..\n".parse().unwrap();
        let err = PathingGrid::new(map, Coordinate::from_cell(0, 0), Coordinate::new(-1, 0))
            .unwrap_err();
        assert!(matches!(err, MapError::InvalidGoal(_)));
    }

    /// Asserts that a wall splitting the map is detected before searching.
    #[test]
    fn detects_separated_endpoints() {
        // |.#.|
        // |.#.|
        // |.#.|
        let map: CellMap = ".#.\n.#.\n.#.\n".parse().unwrap();
        let grid = PathingGrid::from_cells(map, (0, 0), (2, 2)).unwrap();
        assert!(grid.unreachable());
    }
}
