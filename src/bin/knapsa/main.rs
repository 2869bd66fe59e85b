mod cli;
mod config;
mod error;
mod logging;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};
use u_knapsack::instance::{read_instance, Instance};
use u_knapsack::random::create_rng;
use u_knapsack::report::{
    discover_instances, run_batch, solve_instance, ReportWriter, SolveOutcome,
};
use u_knapsack::KnapsackError;

use crate::cli::Cli;
use crate::error::Result;

fn main() {
    if let Err(e) = run_app() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("knapsa v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let config = config::build_config(&cli)?;
    debug!("Effective annealing configuration: {:?}", config);

    let sink: Box<dyn Write> = match &cli.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| KnapsackError::Io {
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    let mut writer = ReportWriter::new(sink, !cli.no_header);
    let mut rng = create_rng(cli.seed);

    if cli.path.is_dir() {
        let file_name = (!cli.all_files).then_some(cli.file_name.as_str());
        let paths = discover_instances(&cli.path, file_name)?;
        info!("Found {} instances to process.", paths.len());

        let summary = run_batch::<i64, _, _, _>(
            &paths,
            &config,
            &mut rng,
            &mut writer,
            |path, outcome| {
                if cli.show_solutions {
                    print_solutions(path, outcome);
                }
            },
        )?;
        info!(
            "Processed {} instances, skipped {}.",
            summary.processed, summary.skipped
        );
    } else {
        let instance: Instance = read_instance(&cli.path)?;
        let outcome = solve_instance(
            cli.path.display().to_string(),
            &instance,
            &config,
            &mut rng,
        )?;
        writer.write(&outcome.report)?;
        if cli.show_solutions {
            print_solutions(&cli.path, &outcome);
        }
    }

    writer.flush()?;
    Ok(())
}

fn print_solutions(path: &Path, outcome: &SolveOutcome) {
    eprintln!("{}", path.display());
    eprintln!("best greedy sol: {}", outcome.greedy.solution);
    eprintln!("Greedy: {}", outcome.greedy.profit);
    eprintln!("best S.A sol: {}", outcome.annealing.best);
    eprintln!("S.A: {}", outcome.annealing.best_profit);
}
