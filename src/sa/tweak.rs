//! Bit-flip neighborhood move.

use rand::Rng;

use crate::solution::Solution;

/// Items whose membership a move toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    Single(usize),
    /// Two distinct items.
    Double(usize, usize),
}

impl Flip {
    /// Flipped ids in the order they were drawn.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        let (first, second) = match self {
            Flip::Single(a) => (a, None),
            Flip::Double(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    pub fn count(self) -> usize {
        match self {
            Flip::Single(_) => 1,
            Flip::Double(..) => 2,
        }
    }

    /// Toggles the same items again, so applying a flip twice is a no-op.
    pub fn apply(self, solution: &mut Solution) {
        for id in self.indices() {
            solution.flip(id);
        }
    }
}

/// Flips one uniformly drawn item and, with probability
/// `double_flip_probability`, a second distinct one.
///
/// A second draw that collides with the first is shifted to
/// `(first + 1) % n`. Returns `None` only for an empty solution.
pub fn tweak<R: Rng>(
    solution: &mut Solution,
    double_flip_probability: f64,
    rng: &mut R,
) -> Option<Flip> {
    let n = solution.len();
    if n == 0 {
        return None;
    }

    let first = rng.random_range(0..n);
    solution.flip(first);

    let roll: f64 = rng.random();
    if roll < double_flip_probability && n > 1 {
        let mut second = rng.random_range(0..n);
        if second == first {
            second = (first + 1) % n;
        }
        solution.flip(second);
        Some(Flip::Double(first, second))
    } else {
        Some(Flip::Single(first))
    }
}
