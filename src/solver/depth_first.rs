use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::coordinate::Coordinate;
use crate::search_node::{successor_positions, SearchNode};
use crate::solver::{GridSolver, SearchStats};
use crate::N_SMALLVEC_SIZE;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// How a depth-limited search ended.
enum DepthOutcome<'g> {
    Found(SearchNode<'g>),
    /// Some branch was pruned at the depth limit; a deeper search may still succeed.
    Cutoff,
    /// Every branch ended without reaching the limit.
    Exhausted,
    /// The expansion budget ran out.
    Aborted,
}

/// A node on the current path together with the successors still to be tried.
struct Frame {
    successors: SmallVec<[Coordinate; N_SMALLVEC_SIZE]>,
    next: usize,
}

/// Depth-first search from `initial` that never expands a node at depth `limit`. Only the
/// positions on the current path count as visited, so a position may be revisited from another
/// branch.
///
/// The current path lives in `on_path`, one entry per [Frame]: a position is inserted when its
/// frame is pushed and popped with it.
fn depth_limited<'g>(
    initial: SearchNode<'g>,
    limit: usize,
    stats: &mut SearchStats,
) -> DepthOutcome<'g> {
    if initial.is_goal() {
        return DepthOutcome::Found(initial);
    }
    if initial.depth() >= limit {
        return DepthOutcome::Cutoff;
    }
    if !stats.try_expand() {
        return DepthOutcome::Aborted;
    }
    trace!("Expanding {}", initial);

    let grid = initial.grid();
    let mut on_path: FxIndexSet<Coordinate> = initial.path().iter().copied().collect();
    let mut frames = vec![Frame {
        successors: initial.successor_positions(),
        next: 0,
    }];
    let mut cutoff = false;

    while let Some(frame) = frames.last_mut() {
        let Some(&position) = frame.successors.get(frame.next) else {
            frames.pop();
            on_path.pop();
            continue;
        };
        frame.next += 1;
        if on_path.contains(&position) {
            continue;
        }
        // The new node sits one move below the last position on the path.
        let depth = initial.depth() + frames.len();
        if position == grid.goal() {
            let path = on_path.iter().copied().chain([position]).collect();
            return DepthOutcome::Found(SearchNode::from_path(grid, path));
        }
        if depth >= limit {
            cutoff = true;
            continue;
        }
        if !stats.try_expand() {
            return DepthOutcome::Aborted;
        }
        trace!("Expanding {} (depth {})", position, depth);
        on_path.insert(position);
        frames.push(Frame {
            successors: successor_positions(grid, position),
            next: 0,
        });
    }

    if cutoff {
        DepthOutcome::Cutoff
    } else {
        DepthOutcome::Exhausted
    }
}

/// Depth-first search bounded by a maximum depth. Returns the first goal met in successor
/// order, which need not be the closest one.
#[derive(Clone, Copy, Debug)]
pub struct DepthLimitedSolver {
    pub limit: usize,
}

impl DepthLimitedSolver {
    pub fn new(limit: usize) -> DepthLimitedSolver {
        DepthLimitedSolver { limit }
    }
}

impl GridSolver for DepthLimitedSolver {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn search<'g>(
        &self,
        initial: SearchNode<'g>,
        stats: &mut SearchStats,
    ) -> Option<SearchNode<'g>> {
        match depth_limited(initial, self.limit, stats) {
            DepthOutcome::Found(node) => Some(node),
            _ => None,
        }
    }
}

/// Repeats depth-limited search with limits `0, 1, ..., max_depth`, finding a goal of minimal
/// depth while only keeping the current path in memory.
#[derive(Clone, Copy, Debug)]
pub struct IterativeDeepeningSolver {
    pub max_depth: usize,
}

impl IterativeDeepeningSolver {
    pub fn new(max_depth: usize) -> IterativeDeepeningSolver {
        IterativeDeepeningSolver { max_depth }
    }
}

impl GridSolver for IterativeDeepeningSolver {
    fn name(&self) -> &'static str {
        "iterative-deepening"
    }

    fn search<'g>(
        &self,
        initial: SearchNode<'g>,
        stats: &mut SearchStats,
    ) -> Option<SearchNode<'g>> {
        for limit in 0..=self.max_depth {
            debug!("Searching with depth limit {}", limit);
            match depth_limited(initial.clone(), limit, stats) {
                DepthOutcome::Found(node) => return Some(node),
                DepthOutcome::Cutoff => {}
                DepthOutcome::Exhausted => {
                    debug!("Search space exhausted below depth {}", limit);
                    return None;
                }
                DepthOutcome::Aborted => return None,
            }
        }
        None
    }
}
