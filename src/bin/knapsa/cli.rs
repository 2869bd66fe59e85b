use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use u_knapsack::report::DEFAULT_INSTANCE_FILE_NAME;
use u_knapsack::sa::StartSolution;

/// Greedy and simulated-annealing heuristics for 0/1 knapsack instances.
///
/// PATH may be a single instance file or a directory that is scanned
/// recursively for instance files.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Instance file, or directory of instances for batch mode.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Write CSV results to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Seed for the random source shared by every run.
    #[arg(short, long, default_value_t = u_knapsack::random::DEFAULT_SEED)]
    pub seed: u64,

    /// Override the penalty factor of the penalized objective.
    #[arg(short, long, value_name = "FLOAT")]
    pub penalty: Option<f64>,

    /// Annealing configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the starting solution of the annealing run.
    #[arg(long, value_enum, value_name = "START")]
    pub start: Option<StartArg>,

    /// Override the hard cap on annealing trials (0 = no cap).
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// File name that identifies instances in batch mode.
    #[arg(long, value_name = "NAME", default_value = DEFAULT_INSTANCE_FILE_NAME)]
    pub file_name: String,

    /// Treat every file under the directory as an instance.
    #[arg(long, conflicts_with = "file_name")]
    pub all_files: bool,

    /// Omit the CSV header row.
    #[arg(long)]
    pub no_header: bool,

    /// Log the greedy and annealing selections as bit strings.
    #[arg(long)]
    pub show_solutions: bool,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartArg {
    Empty,
    Greedy,
}

impl From<StartArg> for StartSolution {
    fn from(arg: StartArg) -> Self {
        match arg {
            StartArg::Empty => StartSolution::Empty,
            StartArg::Greedy => StartSolution::Greedy,
        }
    }
}
