use std::collections::VecDeque;

use fxhash::FxHashSet;
use log::trace;

use crate::search_node::SearchNode;
use crate::solver::{GridSolver, SearchStats};

/// Level-order search with a FIFO frontier. Positions are marked visited when they are enqueued,
/// so each position is expanded at most once and the first goal generated has minimal depth.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSolver;

impl GridSolver for BreadthFirstSolver {
    fn name(&self) -> &'static str {
        "breadth-first"
    }

    fn search<'g>(
        &self,
        initial: SearchNode<'g>,
        stats: &mut SearchStats,
    ) -> Option<SearchNode<'g>> {
        if initial.is_goal() {
            return Some(initial);
        }
        let mut visited = FxHashSet::default();
        visited.insert(initial.position());
        let mut frontier = VecDeque::new();
        frontier.push_back(initial);

        while let Some(node) = frontier.pop_front() {
            if !stats.try_expand() {
                return None;
            }
            trace!("Expanding {}", node);
            for position in node.successor_positions() {
                if !visited.insert(position) {
                    continue;
                }
                let child = node.child(position);
                if child.is_goal() {
                    return Some(child);
                }
                frontier.push_back(child);
            }
        }
        None
    }
}
