//! Mutable state of one annealing run.

use crate::eval::Evaluation;
use crate::instance::Amount;
use crate::solution::Solution;

/// Current and best-known solutions plus the temperature.
///
/// `current_eval` always matches `current`; the runner restores it by
/// undoing a rejected move rather than caching a stale value.
#[derive(Debug, Clone)]
pub(crate) struct SearchState<V> {
    pub current: Solution,
    pub current_eval: Evaluation<V>,
    pub current_score: f64,
    pub best: Solution,
    pub best_eval: Evaluation<V>,
    pub temperature: f64,
}

impl<V: Amount> SearchState<V> {
    /// Starts from `start`. It becomes the best-known solution only when it
    /// fits; otherwise the empty knapsack is the baseline.
    pub fn new(
        start: Solution,
        start_eval: Evaluation<V>,
        start_score: f64,
        capacity: V,
        temperature: f64,
    ) -> Self {
        let (best, best_eval) = if start_eval.is_feasible(capacity) {
            (start.clone(), start_eval)
        } else {
            (Solution::empty(start.len()), Evaluation::default())
        };
        Self {
            current: start,
            current_eval: start_eval,
            current_score: start_score,
            best,
            best_eval,
            temperature,
        }
    }

    /// Moves the current state to an evaluated neighbor already applied to
    /// `current`.
    pub fn accept(&mut self, eval: Evaluation<V>, score: f64) {
        self.current_eval = eval;
        self.current_score = score;
    }

    /// Records the current solution as best-known if it is feasible and
    /// strictly more profitable. Returns whether it was recorded.
    pub fn record_if_best(&mut self, capacity: V) -> bool {
        if self.current_eval.is_feasible(capacity)
            && self.current_eval.profit > self.best_eval.profit
        {
            self.best.clone_from(&self.current);
            self.best_eval = self.current_eval;
            true
        } else {
            false
        }
    }

    pub fn cool(&mut self, alpha: f64) {
        self.temperature *= alpha;
    }
}
