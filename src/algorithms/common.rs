use crate::grid::{Grid, Move, Position};
use std::fmt;
use thiserror::Error;

/// Why a search produced no path. No partial path is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no path exists from {start} to {goal}")]
    Unreachable { start: Position, goal: Position },

    #[error("start {0} is outside the grid or blocked")]
    InvalidStart(Position),

    #[error("goal {0} is outside the grid or blocked")]
    InvalidGoal(Position),

    #[error("search gave up after expanding {limit} cells")]
    BudgetExceeded { limit: usize },
}

/// Ordered cells from start to goal, each one move from the previous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path(Vec<Position>);

impl Path {
    /// Wraps a cell sequence. The caller guarantees it is non-empty and
    /// that consecutive cells are adjacent.
    pub(crate) fn from_cells(cells: Vec<Position>) -> Self {
        debug_assert!(!cells.is_empty());
        Path(cells)
    }

    pub fn cells(&self) -> &[Position] {
        &self.0
    }

    pub fn start(&self) -> Position {
        self.0[0]
    }

    pub fn goal(&self) -> Position {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn move_count(&self) -> usize {
        self.0.len() - 1
    }

    /// Each step as (from, to, move).
    pub fn steps(&self) -> impl Iterator<Item = (Position, Position, Move)> + '_ {
        self.0.windows(2).filter_map(|pair| {
            Move::between(pair[0], pair[1]).map(|mv| (pair[0], pair[1], mv))
        })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Cells taken off the frontier.
    pub expanded: usize,
    /// Cells ever pushed onto the frontier, start included.
    pub enqueued: usize,
}

pub trait PathfindingAlgorithm {
    fn name(&self) -> &'static str;

    fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<Path, SearchError>;

    /// Stats of the last `find_path` call, if the algorithm tracks them.
    fn last_stats(&self) -> Option<SearchStats> {
        None
    }
}

/// Rejects unsafe endpoints before any search starts.
pub fn validate_endpoints(grid: &Grid, start: Position, goal: Position) -> Result<(), SearchError> {
    if !grid.is_safe(start) {
        return Err(SearchError::InvalidStart(start));
    }
    if !grid.is_safe(goal) {
        return Err(SearchError::InvalidGoal(goal));
    }
    Ok(())
}

/// Successors for the library-backed searches: safe neighbors at unit cost.
pub(crate) fn successors(grid: &Grid, pos: &Position) -> Vec<(Position, u32)> {
    grid.get_neighbors(*pos).map(|next| (next, 1)).collect()
}
