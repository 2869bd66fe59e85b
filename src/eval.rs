//! Solution evaluation.
//!
//! Raw profit/weight sums, the feasibility test, and the penalized score
//! that lets the annealing engine move through overweight states.

use crate::instance::{Amount, Instance, Item};
use crate::solution::Solution;

/// Ratio substituted when every item is weightless.
pub const DEFAULT_PROFIT_PER_WEIGHT: f64 = 1.0;

/// Total profit and weight of a candidate subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation<V = i64> {
    pub profit: V,
    pub weight: V,
}

impl<V: Amount> Evaluation<V> {
    pub fn is_feasible(&self, capacity: V) -> bool {
        is_feasible(self.weight, capacity)
    }

    /// Weight above capacity, zero when feasible.
    pub fn excess(&self, capacity: V) -> V {
        if self.weight > capacity {
            self.weight - capacity
        } else {
            V::ZERO
        }
    }

    /// Accounts for `item` having just been flipped to `included`.
    pub fn toggle(&mut self, item: &Item<V>, included: bool) {
        if included {
            self.profit += item.profit;
            self.weight += item.weight;
        } else {
            self.profit -= item.profit;
            self.weight -= item.weight;
        }
    }
}

/// Sums profit and weight over the included items.
pub fn evaluate<V: Amount>(instance: &Instance<V>, solution: &Solution) -> Evaluation<V> {
    solution
        .selected()
        .map(|id| instance.item(id))
        .fold(Evaluation::default(), |mut acc, item| {
            acc.profit += item.profit;
            acc.weight += item.weight;
            acc
        })
}

pub fn is_feasible<V: Amount>(weight: V, capacity: V) -> bool {
    weight <= capacity
}

/// `profit - coefficient * max(0, weight - capacity)`.
pub fn penalized_score<V: Amount>(evaluation: Evaluation<V>, coefficient: f64, capacity: V) -> f64 {
    evaluation.profit.to_f64() - coefficient * evaluation.excess(capacity).to_f64()
}

/// Penalty per unit of excess weight: the instance's average profit per
/// unit of weight scaled by `factor`.
///
/// # Examples
///
/// ```
/// use u_knapsack::eval::penalty_coefficient;
/// use u_knapsack::instance::Instance;
///
/// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap();
/// let coefficient = penalty_coefficient(&instance, 10.0);
/// assert!((coefficient - 280.0 / 60.0 * 10.0).abs() < 1e-9);
/// ```
pub fn penalty_coefficient<V: Amount>(instance: &Instance<V>, factor: f64) -> f64 {
    let (profit, weight) = instance.totals();
    let ratio = if weight > 0.0 {
        profit / weight
    } else {
        DEFAULT_PROFIT_PER_WEIGHT
    };
    ratio * factor
}

/// Profit of `solution` when it fits, `None` otherwise.
pub fn feasible_profit<V: Amount>(instance: &Instance<V>, solution: &Solution) -> Option<V> {
    let evaluation = evaluate(instance, solution);
    evaluation
        .is_feasible(instance.capacity())
        .then_some(evaluation.profit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario() -> Instance {
        Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap()
    }

    #[test]
    fn test_evaluate_sums_selected() {
        let instance = scenario();
        let sol = Solution::from_included(vec![false, true, true]);
        let eval = evaluate(&instance, &sol);
        assert_eq!(eval, Evaluation { profit: 220, weight: 50 });
        assert!(eval.is_feasible(instance.capacity()));
        assert_eq!(feasible_profit(&instance, &sol), Some(220));
    }

    #[test]
    fn test_overweight_is_penalized() {
        let instance = scenario();
        let sol = Solution::from_included(vec![true, true, true]);
        let eval = evaluate(&instance, &sol);
        assert_eq!(eval.excess(instance.capacity()), 10);
        assert_eq!(feasible_profit(&instance, &sol), None);

        let score = penalized_score(eval, 2.0, instance.capacity());
        assert!((score - (280.0 - 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_feasible_score_is_raw_profit() {
        let instance = scenario();
        let eval = evaluate(&instance, &Solution::from_included(vec![true, true, false]));
        assert!((penalized_score(eval, 1e6, instance.capacity()) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_penalty_coefficient_zero_weight_fallback() {
        let instance = Instance::new([(5i64, 0), (7, 0)], 0).unwrap();
        assert!((penalty_coefficient(&instance, 10.0) - 10.0).abs() < 1e-12);

        let empty = Instance::<i64>::new([], 3).unwrap();
        assert!((penalty_coefficient(&empty, 4.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_toggle_matches_rescan() {
        let instance = scenario();
        let mut sol = Solution::empty(3);
        let mut eval = Evaluation::default();
        for id in [2, 0, 2, 1] {
            let included = sol.flip(id);
            eval.toggle(instance.item(id), included);
            assert_eq!(eval, evaluate(&instance, &sol));
        }
    }

    proptest! {
        #[test]
        fn prop_evaluate_matches_brute_force(
            items in proptest::collection::vec((0i64..10_000, 0i64..10_000, any::<bool>()), 0..64),
            capacity in 0i64..100_000,
        ) {
            let instance = Instance::new(items.iter().map(|&(p, w, _)| (p, w)), capacity).unwrap();
            let sol = Solution::from_included(items.iter().map(|&(_, _, inc)| inc).collect());

            let mut profit = 0i64;
            let mut weight = 0i64;
            for &(p, w, inc) in &items {
                if inc {
                    profit += p;
                    weight += w;
                }
            }

            let eval = evaluate(&instance, &sol);
            prop_assert_eq!(eval.profit, profit);
            prop_assert_eq!(eval.weight, weight);
            prop_assert_eq!(eval.is_feasible(capacity), weight <= capacity);
        }
    }
}
