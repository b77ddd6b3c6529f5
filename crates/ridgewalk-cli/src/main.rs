use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ridgewalk_cli::output::{print_report, OutputFormat};
use ridgewalk_lib::{
    load_map, run_search, GoalSpec, Position, SearchAlgorithm, SearchReport, SearchRequest,
};

/// Exit code used when the search completes without reaching the goal.
const NO_PATH_EXIT_CODE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "ridgewalk",
    author,
    version,
    about = "Plan a route across an elevation map within an energy budget"
)]
struct Cli {
    /// Search algorithm to run.
    #[arg(value_enum)]
    algorithm: AlgorithmArg,

    /// Path to the elevation map file.
    map: PathBuf,

    /// Energy available for the whole route.
    #[arg(long, default_value_t = 100)]
    energy: u64,

    /// Starting X position.
    #[arg(long = "start-x", default_value_t = 0)]
    start_x: usize,

    /// Starting Y position.
    #[arg(long = "start-y", default_value_t = 0)]
    start_y: usize,

    /// Ending X position (defaults to the last column).
    #[arg(long = "end-x")]
    end_x: Option<usize>,

    /// Ending Y position (defaults to the last row).
    #[arg(long = "end-y")]
    end_y: Option<usize>,

    /// Stop after this many iterations.
    #[arg(long = "max-iterations")]
    max_iterations: Option<usize>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Only print details that do not depend on the heuristic.
    #[arg(long = "minimal-display")]
    minimal_display: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AlgorithmArg {
    #[value(name = "a-star", alias = "astar")]
    AStar,
    #[value(alias = "bbfs")]
    Bidirectional,
}

impl From<AlgorithmArg> for SearchAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => SearchAlgorithm::AStar,
            AlgorithmArg::Bidirectional => SearchAlgorithm::Bidirectional,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match handle_search(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(NO_PATH_EXIT_CODE),
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the requested search and print its report. Returns whether a path was found.
fn handle_search(cli: &Cli) -> Result<bool> {
    let map = load_map(&cli.map)
        .with_context(|| format!("failed to load elevation map from {}", cli.map.display()))?;
    let goal = GoalSpec {
        x: cli.end_x,
        y: cli.end_y,
    };
    let grid = map
        .into_grid(goal, cli.energy)
        .context("failed to build elevation grid")?;

    let start = Position::new(cli.start_x, cli.start_y);
    let request = SearchRequest {
        algorithm: cli.algorithm.into(),
        start,
        max_iterations: cli.max_iterations,
    };
    let result = run_search(&grid, &request)?;

    let report = SearchReport::from_result(&grid, &request, &result);
    print_report(&report, cli.format, cli.minimal_display).context("failed to write report")?;

    if !result.is_found() {
        eprintln!(
            "No path found from {} to {} within energy budget {}.",
            start,
            grid.goal(),
            grid.energy_budget()
        );
    }
    Ok(result.is_found())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
