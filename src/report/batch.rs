//! Directory scanning and sequential batch runs.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::{info, warn};

use super::record::{solve_instance, ReportWriter, SolveOutcome};
use crate::error::{KnapsackError, Result};
use crate::instance::{read_instance, Amount};
use crate::sa::SaConfig;

/// File name of an instance in the benchmark directory layout.
pub const DEFAULT_INSTANCE_FILE_NAME: &str = "test.in";

/// Counts from [`run_batch`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// Recursively collects instance files under `root`, sorted by path.
///
/// With `file_name` set only files with exactly that name are taken;
/// with `None` every regular file is.
pub fn discover_instances(root: &Path, file_name: Option<&str>) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let io_err = |source| KnapsackError::Io {
            path: dir.clone(),
            source,
        };
        for entry in fs::read_dir(&dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let path = entry.path();
            let file_type = entry.file_type().map_err(io_err)?;
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_file()
                && file_name.is_none_or(|name| path.file_name().is_some_and(|f| f == name))
            {
                found.push(path);
            }
        }
    }

    found.sort();
    Ok(found)
}

/// Solves each instance in order, writing one row per success and handing
/// the full outcome to `on_solved`.
///
/// Unreadable or malformed instances are logged and skipped; a failure to
/// write a row aborts the batch.
pub fn run_batch<V, R, W, F>(
    paths: &[PathBuf],
    config: &SaConfig,
    rng: &mut R,
    writer: &mut ReportWriter<W>,
    mut on_solved: F,
) -> Result<BatchSummary>
where
    V: Amount,
    R: Rng,
    W: Write,
    F: FnMut(&Path, &SolveOutcome<V>),
{
    let mut summary = BatchSummary::default();

    for (index, path) in paths.iter().enumerate() {
        info!(
            "processing ({}/{}): {}",
            index + 1,
            paths.len(),
            path.display()
        );

        let instance = match read_instance::<V>(path) {
            Ok(instance) => instance,
            Err(e) => {
                warn!("skipping instance: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        let outcome = solve_instance(path.display().to_string(), &instance, config, rng)?;
        writer.write(&outcome.report)?;
        writer.flush()?;
        on_solved(path, &outcome);
        summary.processed += 1;
    }

    info!(
        processed = summary.processed,
        skipped = summary.skipped,
        "batch finished"
    );
    Ok(summary)
}
