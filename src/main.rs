use clap::Parser;
use log::{debug, error};

use robot_path_planning::algorithms::Algorithm;
use robot_path_planning::config::Config;
use robot_path_planning::planner::Planner;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    debug!("{:?}", config);

    let planner = match Planner::new(config.clone()) {
        Ok(planner) => planner,
        Err(e) => {
            error!("Failed to set up scenario: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if config.algorithm == Algorithm::All {
        let results = planner.run_all_algorithms();
        Planner::print_comparison_results(&results);
        return;
    }

    if let Err(e) = planner.run() {
        error!("Planning failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
