//! Result reporting.
//!
//! Times the greedy and annealing phases per instance and emits one CSV
//! row each; batch mode walks a directory tree and processes instances
//! strictly one after another.

mod batch;
mod record;

pub use batch::{discover_instances, run_batch, BatchSummary, DEFAULT_INSTANCE_FILE_NAME};
pub use record::{solve_instance, InstanceReport, ReportWriter, SolveOutcome};
