//! Plain-text instance format.
//!
//! ```text
//! N
//! 0 profit weight
//! 1 profit weight
//! ...
//! N-1 profit weight
//! capacity
//! ```
//!
//! Fields are whitespace separated. Carriage returns and blank lines are
//! ignored, as is anything after the capacity line.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::types::{Amount, Instance, Item, Totals};
use crate::error::{KnapsackError, Result};

/// What went wrong on an instance line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("missing item count")]
    MissingItemCount,

    #[error("missing {field}")]
    MissingField { field: &'static str },

    #[error("malformed {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("item id {found} out of sequence, expected {expected}")]
    IdMismatch { expected: usize, found: usize },

    #[error("negative {field}")]
    Negative { field: &'static str },

    #[error("expected {expected} items, found {found}")]
    TruncatedItems { expected: usize, found: usize },

    #[error("missing capacity")]
    MissingCapacity,

    #[error("total {field} does not fit the integer width")]
    Overflow { field: &'static str },
}

/// A parse failure located at a 1-based physical line.
///
/// Premature end of input is reported one line past the last line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

fn field<'a, I>(
    fields: &mut I,
    name: &'static str,
    line: usize,
) -> std::result::Result<&'a str, ParseError>
where
    I: Iterator<Item = &'a str>,
{
    fields
        .next()
        .ok_or_else(|| ParseError::new(line, ParseErrorKind::MissingField { field: name }))
}

fn number<T: std::str::FromStr>(
    text: &str,
    name: &'static str,
    line: usize,
) -> std::result::Result<T, ParseError> {
    text.parse().map_err(|_| {
        ParseError::new(
            line,
            ParseErrorKind::InvalidNumber {
                field: name,
                value: text.to_string(),
            },
        )
    })
}

fn amount<V: Amount>(
    text: &str,
    name: &'static str,
    line: usize,
) -> std::result::Result<V, ParseError> {
    let value: V = number(text, name, line)?;
    if value < V::ZERO {
        return Err(ParseError::new(line, ParseErrorKind::Negative { field: name }));
    }
    Ok(value)
}

/// Parses an instance from its text form.
///
/// # Examples
///
/// ```
/// use u_knapsack::instance::{parse_instance, Instance};
///
/// let instance: Instance = parse_instance("2\n0 10 5\n1 4 3\n7\n").unwrap();
/// assert_eq!(instance.len(), 2);
/// assert_eq!(instance.capacity(), 7);
/// ```
pub fn parse_instance<V: Amount>(input: &str) -> std::result::Result<Instance<V>, ParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, text)| (i + 1, text.trim_end_matches('\r')))
        .filter(|(_, text)| !text.trim().is_empty());
    let end_line = input.lines().count() + 1;

    let (line, text) = lines
        .next()
        .ok_or_else(|| ParseError::new(end_line, ParseErrorKind::MissingItemCount))?;
    let mut fields = text.split_whitespace();
    let count: usize = number(field(&mut fields, "item count", line)?, "item count", line)?;

    // The count is untrusted until the item lines back it up.
    let mut items = Vec::with_capacity(count.min(input.len()));
    let mut totals = Totals::<V>::default();
    for expected in 0..count {
        let (line, text) = lines.next().ok_or_else(|| {
            ParseError::new(
                end_line,
                ParseErrorKind::TruncatedItems {
                    expected: count,
                    found: expected,
                },
            )
        })?;
        let mut fields = text.split_whitespace();
        let id: usize = number(field(&mut fields, "id", line)?, "id", line)?;
        if id != expected {
            return Err(ParseError::new(
                line,
                ParseErrorKind::IdMismatch {
                    expected,
                    found: id,
                },
            ));
        }
        let profit = amount(field(&mut fields, "profit", line)?, "profit", line)?;
        let weight = amount(field(&mut fields, "weight", line)?, "weight", line)?;
        totals
            .add(profit, weight)
            .map_err(|kind| ParseError::new(line, kind))?;
        items.push(Item { id, profit, weight });
    }

    let (line, text) = lines
        .next()
        .ok_or_else(|| ParseError::new(end_line, ParseErrorKind::MissingCapacity))?;
    let mut fields = text.split_whitespace();
    let capacity = amount(field(&mut fields, "capacity", line)?, "capacity", line)?;

    Ok(Instance::from_items(items, capacity))
}

/// Reads and parses an instance file.
pub fn read_instance<V: Amount>(path: impl AsRef<Path>) -> Result<Instance<V>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| KnapsackError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_instance(&content).map_err(|source| KnapsackError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes an instance file in the format [`read_instance`] accepts.
pub fn write_instance<V: Amount>(path: impl AsRef<Path>, instance: &Instance<V>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, instance.to_string()).map_err(|source| KnapsackError::Io {
        path: path.to_path_buf(),
        source,
    })
}
