//! Console narration of a planning run.
//!
//! Everything here is derived from the finished path; the free/blocked
//! neighbor lists are recomputed with `Grid::is_safe` and play no part in
//! the search.

use crate::algorithms::common::Path;
use crate::grid::{Grid, Position, MOVES};
use crate::scenario::Scenario;
use std::fmt::Write;

const RULE_WIDTH: usize = 50;

/// What the robot sees around one cell of its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborReport {
    pub position: Position,
    pub free: Vec<Position>,
    /// Obstacle cells only; cells off the grid are neither free nor blocked.
    pub blocked: Vec<Position>,
    pub next: Position,
}

impl NeighborReport {
    pub fn new(grid: &Grid, position: Position, next: Position) -> Self {
        let mut free = Vec::new();
        let mut blocked = Vec::new();
        for mv in MOVES {
            let cell = position.step(mv);
            if grid.is_safe(cell) {
                free.push(cell);
            } else if grid.is_obstacle(cell) {
                blocked.push(cell);
            }
        }
        NeighborReport {
            position,
            free,
            blocked,
            next,
        }
    }
}

/// One report per move along the path.
pub fn movement_log(grid: &Grid, path: &Path) -> Vec<NeighborReport> {
    path.cells()
        .windows(2)
        .map(|pair| NeighborReport::new(grid, pair[0], pair[1]))
        .collect()
}

fn list(cells: &[Position]) -> String {
    let inner: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
    format!("[{}]", inner.join(", "))
}

pub fn banner(scenario: &Scenario) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "   ROBOT PATH PLANNING");
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "   Grid size  : {} x {}", scenario.grid.size, scenario.grid.size);
    let _ = writeln!(out, "   Start      : {}", scenario.start);
    let _ = writeln!(out, "   Goal       : {}", scenario.goal);
    let _ = writeln!(out, "   Obstacles  : {}", list(&scenario.grid.sorted_obstacles()));
    if let Some(seed) = scenario.seed {
        let _ = writeln!(out, "   Seed       : {}", seed);
    }
    let _ = writeln!(out, "{}", rule);
    out
}

/// Step listing followed by the per-move neighbor log.
pub fn path_report(scenario: &Scenario, path: &Path) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Shortest path found!");
    let _ = writeln!(out, "Number of moves: {}\n", path.move_count());

    for (i, cell) in path.cells().iter().enumerate() {
        let label = if *cell == scenario.start {
            " <-- START"
        } else if *cell == scenario.goal {
            " <-- GOAL"
        } else {
            ""
        };
        let _ = writeln!(out, "   Step {}: {}{}", i, cell, label);
    }

    let rule = "-".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "   MOVEMENT LOG (what the robot does each step)");
    let _ = writeln!(out, "{}", rule);

    for (i, entry) in movement_log(&scenario.grid, path).iter().enumerate() {
        let _ = writeln!(out, "\n   Iteration {}:", i + 1);
        let _ = writeln!(out, "     Robot is at       : {}", entry.position);
        let _ = writeln!(out, "     Free neighbours   : {}", list(&entry.free));
        let _ = writeln!(out, "     Blocked neighbours: {}", list(&entry.blocked));
        let _ = writeln!(out, "     Robot moves to    : {}", entry.next);
    }

    let _ = writeln!(out, "\n   Robot arrived at the GOAL {}!", path.goal());
    out
}

/// Message for a search that ended without a path.
pub fn unreachable_report(start: Position, goal: Position) -> String {
    format!(
        "No path found!\nThe robot cannot reach the goal {} from {}!\n",
        goal, start
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bfs::BreadthFirstSearch;
    use crate::algorithms::common::PathfindingAlgorithm;

    fn reference() -> (Scenario, Path) {
        let grid = Grid::with_obstacles(
            4,
            [(1, 1), (1, 2), (2, 2)].into_iter().map(Position::from),
        )
        .unwrap();
        let scenario = Scenario::new(grid, Position::new(0, 0), Position::new(3, 3));
        let path = BreadthFirstSearch::new()
            .find_path(&scenario.grid, scenario.start, scenario.goal)
            .unwrap();
        (scenario, path)
    }

    #[test]
    fn neighbors_split_into_free_and_blocked() {
        let (scenario, _) = reference();
        let report = NeighborReport::new(&scenario.grid, Position::new(0, 0), Position::new(1, 0));
        assert_eq!(report.free, vec![Position::new(0, 1), Position::new(1, 0)]);
        assert_eq!(report.blocked, vec![Position::new(1, 1)]);

        let report = NeighborReport::new(&scenario.grid, Position::new(2, 1), Position::new(3, 2));
        assert_eq!(
            report.blocked,
            vec![Position::new(2, 2), Position::new(1, 1), Position::new(1, 2)]
        );
        assert_eq!(report.free.len(), 5);
    }

    #[test]
    fn movement_log_has_one_entry_per_move() {
        let (scenario, path) = reference();
        let log = movement_log(&scenario.grid, &path);
        assert_eq!(log.len(), path.move_count());
        assert_eq!(log[0].position, scenario.start);
        assert_eq!(log.last().unwrap().next, scenario.goal);
    }

    #[test]
    fn report_labels_endpoints() {
        let (scenario, path) = reference();
        let text = path_report(&scenario, &path);
        assert!(text.contains("Number of moves: 4"));
        assert!(text.contains("Step 0: (0, 0) <-- START"));
        assert!(text.contains("Step 4: (3, 3) <-- GOAL"));
        assert!(text.contains("Iteration 4:"));
        assert!(!text.contains("Iteration 5:"));
        assert!(text.contains("Robot arrived at the GOAL (3, 3)!"));

        let header = banner(&scenario);
        assert!(header.contains("Grid size  : 4 x 4"));
        assert!(header.contains("[(1, 1), (1, 2), (2, 2)]"));
    }

    #[test]
    fn unreachable_message() {
        let text = unreachable_report(Position::new(0, 0), Position::new(3, 3));
        assert!(text.starts_with("No path found!"));
        assert!(text.contains("cannot reach the goal (3, 3) from (0, 0)"));
    }
}
