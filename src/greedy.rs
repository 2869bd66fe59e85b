//! Greedy construction by profit/weight ratio.
//!
//! Items are ranked by ratio (descending), ties broken by higher profit
//! and then lower weight, and packed in that order whenever they still
//! fit. The result is deterministic and always feasible.

use std::cmp::Ordering;

use crate::eval::Evaluation;
use crate::instance::{Amount, Instance, Item};
use crate::solution::Solution;

/// Output of [`GreedyConstructor::construct`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyResult<V = i64> {
    pub solution: Solution,
    pub profit: V,
    pub weight: V,
}

/// Ratio-ordered greedy constructor.
pub struct GreedyConstructor;

impl GreedyConstructor {
    /// Builds one feasible solution.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_knapsack::greedy::GreedyConstructor;
    /// use u_knapsack::instance::Instance;
    ///
    /// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap();
    /// let result = GreedyConstructor::construct(&instance);
    /// assert_eq!(result.profit, 160);
    /// assert_eq!(result.solution.selected().collect::<Vec<_>>(), vec![0, 1]);
    /// ```
    pub fn construct<V: Amount>(instance: &Instance<V>) -> GreedyResult<V> {
        let mut solution = Solution::empty(instance.len());
        let mut totals = Evaluation::<V>::default();
        let mut remaining = instance.capacity();

        for id in Self::ranking(instance) {
            let item = instance.item(id);
            if item.weight <= remaining {
                solution.insert(id);
                totals.toggle(item, true);
                remaining -= item.weight;
            }
        }

        GreedyResult {
            solution,
            profit: totals.profit,
            weight: totals.weight,
        }
    }

    /// Item ids in packing order.
    pub fn ranking<V: Amount>(instance: &Instance<V>) -> Vec<usize> {
        let mut ranked: Vec<(f64, &Item<V>)> =
            instance.items().iter().map(|it| (it.ratio(), it)).collect();
        ranked.sort_by(|(ra, a), (rb, b)| compare(*ra, a, *rb, b));
        ranked.into_iter().map(|(_, it)| it.id).collect()
    }
}

fn compare<V: Amount>(ratio_a: f64, a: &Item<V>, ratio_b: f64, b: &Item<V>) -> Ordering {
    ratio_b
        .total_cmp(&ratio_a)
        .then_with(|| b.profit.cmp(&a.profit))
        .then_with(|| a.weight.cmp(&b.weight))
}
