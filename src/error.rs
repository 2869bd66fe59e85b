//! Error types.

use std::path::PathBuf;
use thiserror::Error;

pub use crate::instance::{ParseError, ParseErrorKind};

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KnapsackError>;

/// Errors surfaced by instance loading, engine configuration, and reporting.
///
/// Capacity overshoot during the search is not an error; it is a penalized
/// state handled inside the annealing engine.
#[derive(Debug, Error)]
pub enum KnapsackError {
    #[error("failed to read '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid instance file '{path}': {source}", path = path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// A value that is not a valid instance outside of file parsing
    /// (e.g. a negative weight passed to [`Instance::new`](crate::instance::Instance::new)).
    #[error("invalid instance: {0}")]
    Instance(ParseErrorKind),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),
}
