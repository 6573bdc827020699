use core::fmt;
use std::hash::{Hash, Hasher};

use smallvec::SmallVec;

use crate::coordinate::Coordinate;
use crate::pathing_grid::PathingGrid;
use crate::{CELL_SIZE, DIAGONAL_SIZE, N_SMALLVEC_SIZE};

/// Unit offsets of the 8 moves as `(row, column)`, in the order successors are generated:
/// N, S, E, W, NE, NW, SE, SW. Straight moves cross one cell; diagonal moves cover
/// [DIAGONAL_SIZE] units on both axes so that every move has about the same length.
pub const MOVES: [(i32, i32); 8] = [
    (-CELL_SIZE, 0),
    (CELL_SIZE, 0),
    (0, CELL_SIZE),
    (0, -CELL_SIZE),
    (-DIAGONAL_SIZE, DIAGONAL_SIZE),
    (-DIAGONAL_SIZE, -DIAGONAL_SIZE),
    (DIAGONAL_SIZE, DIAGONAL_SIZE),
    (DIAGONAL_SIZE, -DIAGONAL_SIZE),
];

/// Valid positions of `grid` one move away from `position`, in [MOVES] order.
pub(crate) fn successor_positions(
    grid: &PathingGrid,
    position: Coordinate,
) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
    MOVES
        .iter()
        .map(|&(d_row, d_column)| position.step(d_row, d_column))
        .filter(|p| grid.is_valid_position(p))
        .collect()
}

/// A state of the search: a position, the number of moves taken to reach it and the path of
/// positions from the start. Nodes compare and hash by position only, so two nodes reaching the
/// same coordinate along different paths are the same state.
#[derive(Clone, Debug)]
pub struct SearchNode<'g> {
    grid: &'g PathingGrid,
    position: Coordinate,
    depth: usize,
    path: Vec<Coordinate>,
}

impl<'g> SearchNode<'g> {
    /// The node at the start of `grid`, with depth 0.
    pub fn initial(grid: &'g PathingGrid) -> SearchNode<'g> {
        SearchNode {
            grid,
            position: grid.start(),
            depth: 0,
            path: vec![grid.start()],
        }
    }

    pub fn grid(&self) -> &'g PathingGrid {
        self.grid
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    pub fn into_path(self) -> Vec<Coordinate> {
        self.path
    }

    /// Rebuilds the node at the end of `path`, which must start at the grid's start.
    pub(crate) fn from_path(grid: &'g PathingGrid, path: Vec<Coordinate>) -> SearchNode<'g> {
        let position = path.last().copied().unwrap_or_else(|| grid.start());
        SearchNode {
            grid,
            position,
            depth: path.len().saturating_sub(1),
            path,
        }
    }

    /// The goal is reached when the position equals the goal coordinate exactly. Diagonal moves
    /// leave the walker off the cell centres, so a path reaching the goal has to cancel them out.
    pub fn is_goal(&self) -> bool {
        self.position == self.grid.goal()
    }

    /// Valid positions one move away, in [MOVES] order.
    pub fn successor_positions(&self) -> SmallVec<[Coordinate; N_SMALLVEC_SIZE]> {
        successor_positions(self.grid, self.position)
    }

    /// The node reached by moving to `position`, one level deeper.
    pub fn child(&self, position: Coordinate) -> SearchNode<'g> {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend_from_slice(&self.path);
        path.push(position);
        SearchNode {
            grid: self.grid,
            position,
            depth: self.depth + 1,
            path,
        }
    }

    pub fn successors(&self) -> SmallVec<[SearchNode<'g>; N_SMALLVEC_SIZE]> {
        self.successor_positions()
            .into_iter()
            .map(|p| self.child(p))
            .collect()
    }
}

impl PartialEq for SearchNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for SearchNode<'_> {}

impl Hash for SearchNode<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

impl fmt::Display for SearchNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (depth {})", self.position, self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::CellMap;
    use fxhash::FxHashSet;

    fn open_grid(start: (i32, i32), goal: (i32, i32)) -> PathingGrid {
        let map: CellMap = "...\n...\n...\n".parse().unwrap();
        PathingGrid::from_cells(map, start, goal).unwrap()
    }

    #[test]
    fn initial_node() {
        let grid = open_grid((0, 0), (2, 2));
        let node = SearchNode::initial(&grid);
        assert_eq!(node.depth(), 0);
        assert_eq!(node.position(), grid.start());
        assert_eq!(node.path(), &[grid.start()]);
        assert!(!node.is_goal());
    }

    #[test]
    fn goal_needs_the_exact_coordinate() {
        let grid = open_grid((0, 0), (2, 2));
        let root = SearchNode::initial(&grid);
        // Three diagonal moves end inside the goal cell, off its centre.
        let inside = root
            .child(grid.start().step(DIAGONAL_SIZE, DIAGONAL_SIZE))
            .child(grid.start().step(2 * DIAGONAL_SIZE, 2 * DIAGONAL_SIZE))
            .child(grid.start().step(3 * DIAGONAL_SIZE, 3 * DIAGONAL_SIZE));
        assert!(inside.position().same_cell(&grid.goal()));
        assert!(!inside.is_goal());
        let centre = root.child(grid.goal());
        assert!(centre.is_goal());
    }

    #[test]
    fn rebuilt_from_path() {
        let grid = open_grid((0, 0), (0, 2));
        let east = grid.start().step(0, CELL_SIZE);
        let node = SearchNode::from_path(&grid, vec![grid.start(), east, grid.goal()]);
        assert_eq!(node.depth(), 2);
        assert_eq!(node.position(), grid.goal());
        assert!(node.is_goal());
    }

    #[test]
    fn start_on_goal() {
        let grid = open_grid((1, 1), (1, 1));
        assert!(SearchNode::initial(&grid).is_goal());
    }

    #[test]
    fn successor_order() {
        let grid = open_grid((1, 1), (0, 0));
        let node = SearchNode::initial(&grid);
        let centre = grid.start();
        let expected = MOVES
            .iter()
            .map(|&(r, c)| centre.step(r, c))
            .collect::<Vec<_>>();
        let successors = node.successors();
        assert_eq!(
            successors.iter().map(|s| s.position()).collect::<Vec<_>>(),
            expected
        );
        assert_eq!(
            successors[0].position(),
            Coordinate::from_cell(0, 1),
            "north comes first"
        );
    }

    #[test]
    fn corner_successors_are_filtered() {
        let grid = open_grid((0, 0), (2, 2));
        let node = SearchNode::initial(&grid);
        let start = grid.start();
        let positions = node.successor_positions().into_vec();
        assert_eq!(
            positions,
            vec![
                start.step(CELL_SIZE, 0),
                start.step(0, CELL_SIZE),
                start.step(DIAGONAL_SIZE, DIAGONAL_SIZE),
            ]
        );
    }

    #[test]
    fn blocked_cells_are_filtered() {
        let map: CellMap = "###\n#.#\n###\n".parse().unwrap();
        let grid = PathingGrid::from_cells(map, (1, 1), (1, 1)).unwrap();
        assert!(SearchNode::initial(&grid).successors().is_empty());
    }

    #[test]
    fn children_extend_the_path() {
        let grid = open_grid((0, 0), (2, 2));
        let root = SearchNode::initial(&grid);
        let child = root.successors().into_iter().last().unwrap();
        let grandchild = child.successors().into_iter().next().unwrap();
        drop(child);
        assert_eq!(grandchild.depth(), 2);
        assert_eq!(grandchild.path().len(), grandchild.depth() + 1);
        assert_eq!(grandchild.path()[0], grid.start());
        assert_eq!(*grandchild.path().last().unwrap(), grandchild.position());
    }

    #[test]
    fn identity_is_by_position() {
        let grid = open_grid((0, 0), (2, 2));
        let root = SearchNode::initial(&grid);
        let east = root.child(grid.start().step(0, CELL_SIZE));
        let back = east.child(grid.start());
        assert_eq!(root, back);
        let mut seen = FxHashSet::default();
        assert!(seen.insert(root));
        assert!(!seen.insert(back));
    }
}
