//! Slow, obviously-correct distance computations used to check the searches.

use crate::algorithms::common::{
    successors, validate_endpoints, Path, PathfindingAlgorithm, SearchError,
};
use crate::grid::{Grid, Position, MOVES};
use pathfinding::prelude::bfs;

/// Move-count distances from one source to every cell of a grid.
#[derive(Debug, Clone)]
pub struct DistanceTable {
    size: usize,
    distances: Vec<Option<usize>>,
}

impl DistanceTable {
    /// Distance to `pos`, or `None` if it is unreachable or off the grid.
    pub fn get(&self, pos: Position) -> Option<usize> {
        let size = self.size as i32;
        if !(0..size).contains(&pos.x) || !(0..size).contains(&pos.y) {
            return None;
        }
        self.distances[pos.y as usize * self.size + pos.x as usize]
    }

    pub fn reachable(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }
}

/// Relaxes every safe cell against its neighbors until nothing changes.
/// No frontier, no visited set: quadratic per sweep, but trivially correct.
pub fn distances_from(grid: &Grid, source: Position) -> DistanceTable {
    let size = grid.size;
    let mut table = DistanceTable {
        size,
        distances: vec![None; size * size],
    };
    if !grid.is_safe(source) {
        return table;
    }
    let index = |p: Position| p.y as usize * size + p.x as usize;
    table.distances[index(source)] = Some(0);

    let cells: Vec<Position> = grid.safe_cells().collect();
    let mut changed = true;
    while changed {
        changed = false;
        for &cell in &cells {
            let best = MOVES
                .into_iter()
                .map(|mv| cell.step(mv))
                .filter(|n| grid.is_safe(*n))
                .filter_map(|n| table.distances[index(n)])
                .min()
                .map(|d| d + 1);
            let current = table.distances[index(cell)];
            if let Some(candidate) = best {
                if current.map_or(true, |d| candidate < d) {
                    table.distances[index(cell)] = Some(candidate);
                    changed = true;
                }
            }
        }
    }
    table
}

/// Breadth-first search delegated to the `pathfinding` crate.
#[derive(Default)]
pub struct LibraryBfs;

impl LibraryBfs {
    pub fn new() -> Self {
        LibraryBfs
    }
}

impl PathfindingAlgorithm for LibraryBfs {
    fn name(&self) -> &'static str {
        "library-bfs"
    }

    fn find_path(
        &mut self,
        grid: &Grid,
        start: Position,
        goal: Position,
    ) -> Result<Path, SearchError> {
        validate_endpoints(grid, start, goal)?;
        bfs(
            &start,
            |p| successors(grid, p).into_iter().map(|(next, _)| next),
            |p| *p == goal,
        )
        .map(Path::from_cells)
        .ok_or(SearchError::Unreachable { start, goal })
    }
}
