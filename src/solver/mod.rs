use std::time::{Duration, Instant};

use log::{info, warn};

use crate::coordinate::Coordinate;
use crate::error::AlgorithmError;
use crate::heuristic::{DiagonalHeuristic, StraightLineHeuristic};
use crate::pathing_grid::PathingGrid;
use crate::search_node::SearchNode;

pub mod best_first;
pub mod breadth_first;
pub mod depth_first;

use best_first::BestFirstSolver;
use breadth_first::BreadthFirstSolver;
use depth_first::{DepthLimitedSolver, IterativeDeepeningSolver};

/// Depth bound used by both depth-first variants unless configured otherwise.
pub const DEFAULT_DEPTH_LIMIT: usize = 30;

/// Settings shared by all solvers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Limit of depth-limited search and the largest limit tried by iterative deepening.
    pub depth_limit: usize,
    /// Stops a search after this many expansions. [None] searches until the frontier is empty.
    pub max_expansions: Option<usize>,
    /// Answers "no path" without searching when start and goal lie on different components.
    pub check_components: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            depth_limit: DEFAULT_DEPTH_LIMIT,
            max_expansions: None,
            check_components: false,
        }
    }
}

impl SearchConfig {
    pub fn new() -> SearchConfig {
        SearchConfig::default()
    }

    pub fn with_depth_limit(mut self, depth_limit: usize) -> SearchConfig {
        self.depth_limit = depth_limit;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> SearchConfig {
        self.max_expansions = Some(max_expansions);
        self
    }

    pub fn with_component_check(mut self, check_components: bool) -> SearchConfig {
        self.check_components = check_components;
        self
    }
}

/// Counts the nodes whose successors were generated, and enforces the expansion budget.
#[derive(Clone, Debug, Default)]
pub struct SearchStats {
    expanded: usize,
    max_expansions: Option<usize>,
    budget_exhausted: bool,
}

impl SearchStats {
    pub fn new(max_expansions: Option<usize>) -> SearchStats {
        SearchStats {
            expanded: 0,
            max_expansions,
            budget_exhausted: false,
        }
    }

    /// Records an expansion. Returns [false], without counting, once the budget is spent; the
    /// caller must then stop searching.
    pub fn try_expand(&mut self) -> bool {
        if let Some(max) = self.max_expansions {
            if self.expanded >= max {
                if !self.budget_exhausted {
                    warn!("Expansion budget of {} nodes exhausted", max);
                }
                self.budget_exhausted = true;
                return false;
            }
        }
        self.expanded += 1;
        true
    }

    pub fn expanded(&self) -> usize {
        self.expanded
    }

    pub fn budget_exhausted(&self) -> bool {
        self.budget_exhausted
    }
}

/// Result of [GridSolver::solve]. A missing goal node means no path was found, which is a
/// regular outcome and distinct from a zero-length path.
#[derive(Clone, Debug)]
pub struct SearchOutcome<'g> {
    pub goal: Option<SearchNode<'g>>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl<'g> SearchOutcome<'g> {
    pub fn found(&self) -> bool {
        self.goal.is_some()
    }

    /// Number of moves of the found path.
    pub fn depth(&self) -> Option<usize> {
        self.goal.as_ref().map(SearchNode::depth)
    }

    pub fn path(&self) -> Option<&[Coordinate]> {
        self.goal.as_ref().map(SearchNode::path)
    }

    pub fn expanded(&self) -> usize {
        self.stats.expanded()
    }
}

pub trait GridSolver {
    fn name(&self) -> &'static str;

    /// Runs the search from `initial`, counting expansions in `stats`. Returns the first goal
    /// node found.
    fn search<'g>(
        &self,
        initial: SearchNode<'g>,
        stats: &mut SearchStats,
    ) -> Option<SearchNode<'g>>;

    /// Searches `grid` from its start, timing the run.
    fn solve<'g>(&self, grid: &'g PathingGrid, config: &SearchConfig) -> SearchOutcome<'g> {
        let mut stats = SearchStats::new(config.max_expansions);
        let before = Instant::now();
        let goal = if config.check_components && grid.unreachable() {
            info!("{} is not reachable from {}", grid.goal(), grid.start());
            None
        } else {
            self.search(SearchNode::initial(grid), &mut stats)
        };
        let elapsed = before.elapsed();
        match &goal {
            Some(node) => info!(
                "{}: reached {} after expanding {} nodes in {:.2?}",
                self.name(),
                node,
                stats.expanded(),
                elapsed
            ),
            None => info!(
                "{}: no path after expanding {} nodes in {:.2?}",
                self.name(),
                stats.expanded(),
                elapsed
            ),
        }
        SearchOutcome {
            goal,
            stats,
            elapsed,
        }
    }
}

/// The five available strategies, indexed 0 to 4 in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    BreadthFirst,
    DepthFirst,
    IterativeDeepening,
    StraightLine,
    Diagonal,
}

impl Algorithm {
    pub fn all() -> impl Iterator<Item = Self> {
        [
            Self::BreadthFirst,
            Self::DepthFirst,
            Self::IterativeDeepening,
            Self::StraightLine,
            Self::Diagonal,
        ]
        .into_iter()
    }

    pub fn from_index(index: usize) -> Result<Self, AlgorithmError> {
        Self::all()
            .nth(index)
            .ok_or(AlgorithmError::OutOfRange(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BreadthFirst => "Breadth-first search",
            Self::DepthFirst => "Depth-first search",
            Self::IterativeDeepening => "Iterative deepening depth-first search",
            Self::StraightLine => "Best-first search with straight-line distance",
            Self::Diagonal => "Best-first search with diagonal distance",
        }
    }

    pub fn solve<'g>(self, grid: &'g PathingGrid, config: &SearchConfig) -> SearchOutcome<'g> {
        match self {
            Self::BreadthFirst => BreadthFirstSolver.solve(grid, config),
            Self::DepthFirst => DepthLimitedSolver::new(config.depth_limit).solve(grid, config),
            Self::IterativeDeepening => {
                IterativeDeepeningSolver::new(config.depth_limit).solve(grid, config)
            }
            Self::StraightLine => BestFirstSolver::new(StraightLineHeuristic).solve(grid, config),
            Self::Diagonal => BestFirstSolver::new(DiagonalHeuristic).solve(grid, config),
        }
    }
}

impl TryFrom<usize> for Algorithm {
    type Error = AlgorithmError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Algorithm::from_index(index)
    }
}
