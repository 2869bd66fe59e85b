//! Knapsack instances.
//!
//! An [`Instance`] is loaded once, then shared read-only by the greedy
//! constructor and the annealing engine. Item identity is the position in
//! the item table.

mod parser;
mod types;

pub use parser::{parse_instance, read_instance, write_instance, ParseError, ParseErrorKind};
pub use types::{Amount, Instance, Item};
