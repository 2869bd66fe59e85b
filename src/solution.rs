//! Membership vectors.

use std::fmt;

/// Which items are in the knapsack, indexed by item id.
///
/// A solution may be over capacity; feasibility is a property judged
/// against an instance, not an invariant of this type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Solution {
    included: Vec<bool>,
}

impl Solution {
    /// The empty knapsack over `n` items.
    pub fn empty(n: usize) -> Self {
        Self {
            included: vec![false; n],
        }
    }

    pub fn from_included(included: Vec<bool>) -> Self {
        Self { included }
    }

    /// Number of items the vector covers (not the number selected).
    pub fn len(&self) -> usize {
        self.included.len()
    }

    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.included[id]
    }

    pub fn insert(&mut self, id: usize) {
        self.included[id] = true;
    }

    pub fn remove(&mut self, id: usize) {
        self.included[id] = false;
    }

    /// Toggles membership of `id` and returns the new state.
    pub fn flip(&mut self, id: usize) -> bool {
        let slot = &mut self.included[id];
        *slot = !*slot;
        *slot
    }

    /// Ids of the selected items, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.included
            .iter()
            .enumerate()
            .filter_map(|(i, &inc)| inc.then_some(i))
    }

    pub fn count(&self) -> usize {
        self.included.iter().filter(|&&inc| inc).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.included
    }
}

/// Renders the vector as a bit string, item 0 first.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &inc in &self.included {
            f.write_str(if inc { "1" } else { "0" })?;
        }
        Ok(())
    }
}
