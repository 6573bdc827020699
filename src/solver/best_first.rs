use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fxhash::FxHashSet;
use log::trace;

use crate::heuristic::{DiagonalHeuristic, Heuristic, StraightLineHeuristic};
use crate::search_node::SearchNode;
use crate::solver::{GridSolver, SearchStats};

/// Frontier entry ordered by the heuristic's comparison, with insertion order settling the
/// remaining ties.
struct Candidate<'h, 'g, H> {
    heuristic: &'h H,
    sequence: usize,
    node: SearchNode<'g>,
}

impl<H: Heuristic> Eq for Candidate<'_, '_, H> {}

impl<H: Heuristic> PartialEq for Candidate<'_, '_, H> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<H: Heuristic> PartialOrd for Candidate<'_, '_, H> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<H: Heuristic> Ord for Candidate<'_, '_, H> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed, so the max-heap yields the best node and, among equals, the oldest one.
        self.heuristic
            .compare(&other.node, &self.node)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Best-first search ordered by `f = g + h`. A position is marked visited when it is dequeued
/// and is never reopened, even if a cheaper path to it turns up later. This differs from
/// textbook A*, so the returned path is not guaranteed to be the shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestFirstSolver<H> {
    pub heuristic: H,
}

pub type StraightLineSolver = BestFirstSolver<StraightLineHeuristic>;
pub type DiagonalSolver = BestFirstSolver<DiagonalHeuristic>;

impl<H: Heuristic> BestFirstSolver<H> {
    pub fn new(heuristic: H) -> BestFirstSolver<H> {
        BestFirstSolver { heuristic }
    }
}

impl<H: Heuristic> GridSolver for BestFirstSolver<H> {
    fn name(&self) -> &'static str {
        "best-first"
    }

    fn search<'g>(
        &self,
        initial: SearchNode<'g>,
        stats: &mut SearchStats,
    ) -> Option<SearchNode<'g>> {
        let mut frontier = BinaryHeap::new();
        let mut visited = FxHashSet::default();
        let mut sequence = 0;
        frontier.push(Candidate {
            heuristic: &self.heuristic,
            sequence,
            node: initial,
        });

        while let Some(Candidate { node, .. }) = frontier.pop() {
            if node.is_goal() {
                return Some(node);
            }
            // The same position may have been queued several times before its first expansion.
            if !visited.insert(node.position()) {
                continue;
            }
            if !stats.try_expand() {
                return None;
            }
            trace!("Expanding {} with f = {}", node, self.heuristic.evaluation(&node));
            for position in node.successor_positions() {
                if visited.contains(&position) {
                    continue;
                }
                sequence += 1;
                frontier.push(Candidate {
                    heuristic: &self.heuristic,
                    sequence,
                    node: node.child(position),
                });
            }
        }
        None
    }
}
