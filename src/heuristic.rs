use std::cmp::Ordering;

use crate::search_node::SearchNode;

/// Scores search nodes for best-first search as `f = g + h`, where `g` is the number of moves
/// taken and `h` an estimate of the moves left.
pub trait Heuristic {
    /// Estimated number of moves from the node to the goal.
    fn estimate(&self, node: &SearchNode) -> i32;

    /// Every move costs one, so the cost so far is the depth.
    fn cost(&self, node: &SearchNode) -> i32 {
        node.depth() as i32
    }

    fn evaluation(&self, node: &SearchNode) -> i32 {
        self.cost(node) + self.estimate(node)
    }

    /// Orders by evaluation. Equal evaluations prefer the node estimated closer to the goal.
    fn compare(&self, a: &SearchNode, b: &SearchNode) -> Ordering {
        self.evaluation(a)
            .cmp(&self.evaluation(b))
            .then_with(|| self.estimate(a).cmp(&self.estimate(b)))
    }
}

/// Euclidean distance to the goal in cell steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct StraightLineHeuristic;

impl Heuristic for StraightLineHeuristic {
    fn estimate(&self, node: &SearchNode) -> i32 {
        node.position().straight_line_distance(&node.grid().goal())
    }
}

/// Octile distance to the goal, counting diagonal moves as single steps.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagonalHeuristic;

impl Heuristic for DiagonalHeuristic {
    fn estimate(&self, node: &SearchNode) -> i32 {
        node.position().diagonal_distance(&node.grid().goal())
    }
}
