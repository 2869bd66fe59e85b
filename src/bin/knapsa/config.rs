use std::fs;
use std::path::Path;

use tracing::debug;
use u_knapsack::sa::{Objective, SaConfig};

use crate::cli::Cli;
use crate::error::{CliError, Result};

/// Parses an annealing configuration; absent keys keep their defaults.
pub fn parse_config(content: &str, path: &Path) -> Result<SaConfig> {
    toml::from_str(content).map_err(|source| CliError::ConfigParsing {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the effective configuration: defaults, then the config file,
/// then command-line overrides.
pub fn build_config(cli: &Cli) -> Result<SaConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            debug!("Loading annealing configuration from {}", path.display());
            let content = fs::read_to_string(path)?;
            parse_config(&content, path)?
        }
        None => SaConfig::default(),
    };

    if let Some(factor) = cli.penalty {
        match config.objective {
            Objective::Penalized { .. } => config = config.with_penalty_factor(factor),
            Objective::Sentinel { .. } => {
                return Err(CliError::Config(
                    "--penalty requires the penalized objective".into(),
                ))
            }
        }
    }
    if let Some(start) = cli.start {
        config = config.with_start(start.into());
    }
    if let Some(max_iterations) = cli.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }

    config.validate().map_err(CliError::Config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use u_knapsack::sa::{EvaluationMode, StartSolution};

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config(
            "alpha = 0.95\niterations-per-temperature = 50\nevaluation = \"full\"\n",
            Path::new("sa.toml"),
        )
        .unwrap();
        assert!((config.alpha - 0.95).abs() < 1e-12);
        assert_eq!(config.iterations_per_temperature, Some(50));
        assert_eq!(config.evaluation, EvaluationMode::Full);
        assert!((config.initial_temperature - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn objective_table_is_tagged() {
        let config = parse_config(
            "[objective]\nkind = \"sentinel\"\ninfeasible-score = -5000.0\n",
            Path::new("sa.toml"),
        )
        .unwrap();
        assert_eq!(
            config.objective,
            Objective::Sentinel {
                infeasible_score: -5000.0
            }
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = parse_config("temperature = 3.0\n", Path::new("sa.toml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigParsing { .. }));
    }

    #[test]
    fn cli_overrides_apply_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sa.toml");
        fs::write(&path, "max-iterations = 10\nstart = \"empty\"\n").unwrap();

        let args: Vec<std::ffi::OsString> = vec![
            "knapsa".into(),
            "x.in".into(),
            "-c".into(),
            path.clone().into_os_string(),
            "--start".into(),
            "greedy".into(),
            "-p".into(),
            "20".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.max_iterations, 10);
        assert_eq!(config.start, StartSolution::Greedy);
        assert_eq!(
            config.objective,
            Objective::Penalized {
                penalty_factor: 20.0
            }
        );
    }

    #[test]
    fn invalid_override_is_rejected() {
        let cli = Cli::try_parse_from(["knapsa", "x.in", "-p", "0.1"]).unwrap();
        assert!(matches!(build_config(&cli), Err(CliError::Config(_))));
    }
}
