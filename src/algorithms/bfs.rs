use crate::algorithms::common::{
    validate_endpoints, Path, PathfindingAlgorithm, SearchError, SearchStats,
};
use crate::grid::{Grid, Position, MOVES};
use log::{debug, trace};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

/// Breadth-first search over the 8-connected grid.
///
/// Every move costs the same, so the first time the goal leaves the frontier
/// it has been reached by a shortest path. Among equally short paths the one
/// found first under [`MOVES`] order wins, which makes results deterministic.
#[derive(Debug, Default)]
pub struct BreadthFirstSearch {
    max_visits: Option<usize>,
    last_stats: SearchStats,
}

impl BreadthFirstSearch {
    pub fn new() -> Self {
        BreadthFirstSearch::default()
    }

    /// Stop with [`SearchError::BudgetExceeded`] once more than `limit`
    /// cells have been expanded.
    pub fn with_max_visits(limit: usize) -> Self {
        BreadthFirstSearch {
            max_visits: Some(limit),
            last_stats: SearchStats::default(),
        }
    }
}

impl PathfindingAlgorithm for BreadthFirstSearch {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<Path, SearchError> {
        self.last_stats = SearchStats::default();
        validate_endpoints(grid, start, goal)?;

        let mut frontier = VecDeque::from([start]);
        // A cell is marked visited when it is enqueued, not when it is
        // dequeued. Each cell enters the frontier at most once, which is what
        // bounds the search to one pass over the safe cells.
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut came_from: FxHashMap<Position, Position> = FxHashMap::default();
        self.last_stats.enqueued = 1;

        while let Some(current) = frontier.pop_front() {
            self.last_stats.expanded += 1;
            if let Some(limit) = self.max_visits {
                if self.last_stats.expanded > limit {
                    debug!("bfs: visit budget of {} exhausted", limit);
                    return Err(SearchError::BudgetExceeded { limit });
                }
            }

            if current == goal {
                debug!(
                    "bfs: goal {} reached after expanding {} cells",
                    goal, self.last_stats.expanded
                );
                return Ok(reconstruct(&came_from, start, goal));
            }

            for mv in MOVES {
                let next = current.step(mv);
                if grid.is_safe(next) && visited.insert(next) {
                    trace!("bfs: {} -> {} ({})", current, next, mv);
                    came_from.insert(next, current);
                    frontier.push_back(next);
                    self.last_stats.enqueued += 1;
                }
            }
        }

        debug!(
            "bfs: frontier exhausted after {} cells, {} unreachable",
            self.last_stats.expanded, goal
        );
        Err(SearchError::Unreachable { start, goal })
    }

    fn last_stats(&self) -> Option<SearchStats> {
        Some(self.last_stats)
    }
}

/// Walk predecessor links back from the goal, then flip to start-to-goal order.
fn reconstruct(came_from: &FxHashMap<Position, Position>, start: Position, goal: Position) -> Path {
    let mut cells = vec![goal];
    let mut cell = goal;
    while cell != start {
        match came_from.get(&cell) {
            Some(&prev) => {
                cells.push(prev);
                cell = prev;
            }
            None => break,
        }
    }
    cells.reverse();
    Path::from_cells(cells)
}
