use crate::algorithms::Algorithm;
use crate::grid::Position;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Shortest safe robot path on a 2D grid", long_about = None)]
pub struct Config {
    #[arg(long, default_value_t = 4)]
    pub grid_size: usize,

    /// Start cell as `x,y`
    #[arg(long, default_value = "0,0")]
    pub start: Position,

    /// Goal cell as `x,y`
    #[arg(long, default_value = "3,3")]
    pub goal: Position,

    /// Blocked cell as `x,y`; repeat for more
    #[arg(long = "obstacle", default_values = ["1,1", "1,2", "2,2"])]
    pub obstacles: Vec<Position>,

    /// Extra obstacles scattered at random, never on start or goal
    #[arg(long, default_value_t = 0)]
    pub random_obstacles: usize,

    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Algorithm::Bfs)]
    pub algorithm: Algorithm,

    /// Give up after expanding this many cells (bfs only)
    #[arg(long)]
    pub max_visits: Option<usize>,

    #[arg(long, default_value = "robot_path_plot.png")]
    pub output: PathBuf,

    /// Pixel size of one grid cell in the plot
    #[arg(long, default_value_t = 120)]
    pub cell_px: u32,

    #[arg(long, default_value_t = false)]
    pub no_render: bool,

    /// Also print the grid as text; shown even with `--quiet`
    #[arg(long, default_value_t = false)]
    pub print_grid: bool,

    /// Cross-check the path length against a brute-force distance table
    /// (cubic in the grid size)
    #[arg(long, default_value_t = false)]
    pub verify: bool,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config::parse_from(["robot_path_planning"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_the_reference_scenario() {
        let config = Config::default();
        assert_eq!(config.grid_size, 4);
        assert_eq!(config.start, Position::new(0, 0));
        assert_eq!(config.goal, Position::new(3, 3));
        assert_eq!(
            config.obstacles,
            vec![Position::new(1, 1), Position::new(1, 2), Position::new(2, 2)]
        );
        assert_eq!(config.algorithm, Algorithm::Bfs);
        assert_eq!(config.output, PathBuf::from("robot_path_plot.png"));
        assert!(!config.verify);
        assert!(!config.quiet);
    }

    #[test]
    fn obstacles_can_be_overridden() {
        let config = Config::parse_from([
            "robot_path_planning",
            "--grid-size",
            "6",
            "--obstacle",
            "2,3",
            "--obstacle",
            "(4, 4)",
            "--algorithm",
            "a-star",
        ]);
        assert_eq!(config.grid_size, 6);
        assert_eq!(config.obstacles, vec![Position::new(2, 3), Position::new(4, 4)]);
        assert_eq!(config.algorithm, Algorithm::AStar);
    }

    #[test]
    fn bad_positions_are_rejected() {
        assert!(Config::try_parse_from(["robot_path_planning", "--start", "nope"]).is_err());
    }
}
