use crate::config::Config;
use crate::error::{PlanError, PlanResult};
use crate::grid::{Grid, Position};
use log::{info, warn};
use rand::{Rng, SeedableRng};

/// Everything one planning run needs: the grid and both endpoints.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: Grid,
    pub start: Position,
    pub goal: Position,
    /// Seed used for random obstacles, kept for reproducibility.
    pub seed: Option<u64>,
}

impl Scenario {
    pub fn new(grid: Grid, start: Position, goal: Position) -> Self {
        Scenario {
            grid,
            start,
            goal,
            seed: None,
        }
    }

    /// Build the scenario described by the command line. Explicit obstacles
    /// come first, then `random_obstacles` more are scattered with a seeded RNG.
    pub fn from_config(config: &Config) -> PlanResult<Self> {
        let mut grid = Grid::with_obstacles(config.grid_size, config.obstacles.iter().copied())?;

        let seed = if config.random_obstacles > 0 {
            let seed = config.seed.unwrap_or_else(rand::random::<u64>);
            scatter_obstacles(&mut grid, config.start, config.goal, config.random_obstacles, seed)?;
            info!(
                "Placed random obstacles with seed {} (total obstacles: {})",
                seed,
                grid.obstacles().len()
            );
            Some(seed)
        } else {
            None
        };

        Ok(Scenario {
            grid,
            start: config.start,
            goal: config.goal,
            seed,
        })
    }
}

/// Place `count` obstacles on free cells that are neither start nor goal.
fn scatter_obstacles(
    grid: &mut Grid,
    start: Position,
    goal: Position,
    count: usize,
    seed: u64,
) -> PlanResult<()> {
    let size = grid.size as i32;
    let free = grid
        .safe_cells()
        .filter(|p| *p != start && *p != goal)
        .count();
    if count > free {
        return Err(PlanError::Scenario(format!(
            "cannot place {} random obstacles, only {} free cells",
            count, free
        )));
    }

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut placed = 0;
    let mut attempts = 0;
    let max_attempts = count * 20 + grid.size * grid.size;

    while placed < count && attempts < max_attempts {
        let pos = Position {
            x: rng.gen_range(0..size),
            y: rng.gen_range(0..size),
        };
        if pos != start && pos != goal && grid.add_obstacle(pos) {
            placed += 1;
        }
        attempts += 1;
    }

    if placed < count {
        warn!("Only placed {} of {} random obstacles", placed, count);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn config(args: &[&str]) -> Config {
        let mut argv = vec!["robot_path_planning"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn default_config_gives_reference_grid() {
        let scenario = Scenario::from_config(&Config::default()).unwrap();
        assert_eq!(scenario.grid.size, 4);
        assert_eq!(scenario.grid.obstacles().len(), 3);
        assert_eq!(scenario.seed, None);
    }

    #[test]
    fn random_obstacles_are_reproducible_and_avoid_endpoints() {
        let args = [
            "--grid-size",
            "12",
            "--random-obstacles",
            "30",
            "--seed",
            "42",
            "--goal",
            "11,11",
        ];
        let a = Scenario::from_config(&config(&args)).unwrap();
        let b = Scenario::from_config(&config(&args)).unwrap();

        assert_eq!(a.grid.sorted_obstacles(), b.grid.sorted_obstacles());
        assert_eq!(a.seed, Some(42));
        assert!(a.grid.is_safe(a.start));
        assert!(a.grid.is_safe(a.goal));
        // 3 default obstacles plus up to 30 random ones
        assert!(a.grid.obstacles().len() > 3);
        assert!(a.grid.obstacles().len() <= 33);
    }

    #[test]
    fn seed_without_random_obstacles_is_not_recorded() {
        let scenario = Scenario::from_config(&config(&["--seed", "9"])).unwrap();
        assert_eq!(scenario.seed, None);
        assert_eq!(scenario.grid.obstacles().len(), 3);
    }

    #[test]
    fn too_many_random_obstacles_is_an_error() {
        let result = Scenario::from_config(&config(&["--grid-size", "2", "--obstacle", "1,0", "--random-obstacles", "5"]));
        assert!(matches!(result, Err(PlanError::Scenario(_))));
    }
}
