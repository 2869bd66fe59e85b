//! SA execution loop.

use rand::Rng;
use tracing::{debug, trace};

use super::config::{EvaluationMode, Objective, SaConfig, StartSolution};
use super::state::SearchState;
use super::tweak::{tweak, Flip};
use crate::error::{KnapsackError, Result};
use crate::eval::{evaluate, penalized_score, penalty_coefficient, Evaluation};
use crate::greedy::GreedyConstructor;
use crate::instance::{Amount, Instance};
use crate::solution::Solution;

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<V = i64> {
    /// Best feasible solution found (the empty knapsack if nothing better).
    pub best: Solution,

    pub best_profit: V,

    pub best_weight: V,

    /// Total number of trials (neighbor evaluations).
    pub iterations: usize,

    /// Number of cooling steps performed.
    pub temperature_steps: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves, including improvements.
    pub accepted_moves: usize,

    /// Number of moves with a strictly better score.
    pub improving_moves: usize,

    /// Best-known profit at the end of each temperature level.
    pub profit_history: Vec<V>,
}

/// Executes simulated annealing on a knapsack instance.
pub struct SaRunner;

impl SaRunner {
    /// Runs the engine with the caller's random source.
    ///
    /// The engine never reads global state: the same instance, config, and
    /// RNG state always reproduce the same result.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_knapsack::instance::Instance;
    /// use u_knapsack::random::create_rng;
    /// use u_knapsack::sa::{SaConfig, SaRunner};
    ///
    /// let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap();
    /// let mut rng = create_rng(42);
    /// let result = SaRunner::run(&instance, &SaConfig::default(), &mut rng).unwrap();
    /// assert_eq!(result.best_profit, 220);
    /// ```
    pub fn run<V: Amount, R: Rng>(
        instance: &Instance<V>,
        config: &SaConfig,
        rng: &mut R,
    ) -> Result<SaResult<V>> {
        config.validate().map_err(KnapsackError::Config)?;

        let n = instance.len();
        let capacity = instance.capacity();
        let scorer = Scorer::new(instance, config.objective);

        let start = match config.start {
            StartSolution::Empty => Solution::empty(n),
            StartSolution::Greedy => GreedyConstructor::construct(instance).solution,
        };
        let start_eval = evaluate(instance, &start);
        let start_score = scorer.score(start_eval, capacity);
        let mut state = SearchState::new(
            start,
            start_eval,
            start_score,
            capacity,
            config.initial_temperature,
        );

        let inner_loops = config.inner_loops(n);
        debug!(
            items = n,
            inner_loops,
            initial_temperature = config.initial_temperature,
            final_temperature = config.final_temperature,
            alpha = config.alpha,
            objective = ?config.objective,
            start = ?config.start,
            "starting annealing"
        );

        let mut profit_history = vec![state.best_eval.profit];
        if n == 0 {
            return Ok(finish(state, 0, 0, 0, 0, profit_history));
        }

        let mut iterations = 0usize;
        let mut temperature_steps = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;

        let capped = |iterations: usize| {
            config.max_iterations > 0 && iterations >= config.max_iterations
        };

        while state.temperature > config.final_temperature {
            for _ in 0..inner_loops {
                if capped(iterations) {
                    break;
                }

                let Some(flip) = tweak(&mut state.current, config.double_flip_probability, rng)
                else {
                    break;
                };
                let neighbor = match config.evaluation {
                    EvaluationMode::Incremental => {
                        apply_delta(instance, &state.current, state.current_eval, flip)
                    }
                    EvaluationMode::Full => evaluate(instance, &state.current),
                };
                let neighbor_score = scorer.score(neighbor, capacity);
                let delta = neighbor_score - state.current_score;

                let accept = delta >= 0.0 || metropolis(delta, state.temperature, rng);
                if accept {
                    if delta > 0.0 {
                        improving_moves += 1;
                    }
                    accepted_moves += 1;
                    state.accept(neighbor, neighbor_score);
                } else {
                    flip.apply(&mut state.current);
                }

                state.record_if_best(capacity);
                iterations += 1;
            }

            profit_history.push(state.best_eval.profit);
            trace!(
                temperature = state.temperature,
                current_score = state.current_score,
                best_profit = %state.best_eval.profit,
                "temperature level done"
            );

            if capped(iterations) {
                break;
            }

            state.cool(config.alpha);
            temperature_steps += 1;
        }

        debug!(
            iterations,
            temperature_steps,
            accepted_moves,
            best_profit = %state.best_eval.profit,
            "annealing finished"
        );

        Ok(finish(
            state,
            iterations,
            temperature_steps,
            accepted_moves,
            improving_moves,
            profit_history,
        ))
    }
}

fn finish<V: Amount>(
    state: SearchState<V>,
    iterations: usize,
    temperature_steps: usize,
    accepted_moves: usize,
    improving_moves: usize,
    profit_history: Vec<V>,
) -> SaResult<V> {
    SaResult {
        best_profit: state.best_eval.profit,
        best_weight: state.best_eval.weight,
        best: state.best,
        iterations,
        temperature_steps,
        final_temperature: state.temperature,
        accepted_moves,
        improving_moves,
        profit_history,
    }
}

/// Objective with its instance-dependent constant resolved once per run.
#[derive(Debug, Clone, Copy)]
enum Scorer {
    Penalized { coefficient: f64 },
    Sentinel { infeasible_score: f64 },
}

impl Scorer {
    fn new<V: Amount>(instance: &Instance<V>, objective: Objective) -> Self {
        match objective {
            Objective::Penalized { penalty_factor } => Scorer::Penalized {
                coefficient: penalty_coefficient(instance, penalty_factor),
            },
            Objective::Sentinel { infeasible_score } => Scorer::Sentinel { infeasible_score },
        }
    }

    fn score<V: Amount>(self, eval: Evaluation<V>, capacity: V) -> f64 {
        match self {
            Scorer::Penalized { coefficient } => penalized_score(eval, coefficient, capacity),
            Scorer::Sentinel { infeasible_score } => {
                if eval.is_feasible(capacity) {
                    eval.profit.to_f64()
                } else {
                    infeasible_score
                }
            }
        }
    }
}

/// Totals of `solution` (with `flip` already applied) derived from the
/// totals before the move.
fn apply_delta<V: Amount>(
    instance: &Instance<V>,
    solution: &Solution,
    mut eval: Evaluation<V>,
    flip: Flip,
) -> Evaluation<V> {
    for id in flip.indices() {
        eval.toggle(instance.item(id), solution.contains(id));
    }
    eval
}

/// Metropolis test for a worsening move: accept when
/// `temperature * ln(u) <= delta`, `u ~ U[0, 1)`.
fn metropolis<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
    let mut u: f64 = rng.random();
    if u <= 0.0 {
        u = f64::MIN_POSITIVE;
    }
    temperature * u.ln() <= delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::sa::DEFAULT_INFEASIBLE_SCORE;

    fn scenario() -> Instance {
        Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap()
    }

    fn medium(seed: u64) -> Instance {
        let mut rng = create_rng(seed);
        let pairs: Vec<(i64, i64)> = (0..60)
            .map(|_| (rng.random_range(1..1000), rng.random_range(1..1000)))
            .collect();
        let total: i64 = pairs.iter().map(|&(_, w)| w).sum();
        Instance::new(pairs, total / 3).unwrap()
    }

    fn fast() -> SaConfig {
        SaConfig::default()
            .with_initial_temperature(1000.0)
            .with_final_temperature(1.0)
            .with_alpha(0.95)
    }

    #[test]
    fn test_single_item() {
        let instance = Instance::new([(10i64, 5)], 5).unwrap();
        let result = SaRunner::run(&instance, &SaConfig::default(), &mut create_rng(42)).unwrap();
        assert_eq!(result.best_profit, 10);
        assert!(result.best.contains(0));
    }

    #[test]
    fn test_finds_optimum_greedy_misses() {
        let instance = scenario();
        let result = SaRunner::run(&instance, &SaConfig::default(), &mut create_rng(42)).unwrap();
        assert_eq!(result.best_profit, 220);
        assert_eq!(result.best.selected().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(result.best_weight, 50);
    }

    #[test]
    fn test_zero_capacity_keeps_empty_set() {
        let instance = Instance::new([(5i64, 1), (9, 2), (4, 7)], 0).unwrap();
        let result = SaRunner::run(&instance, &fast(), &mut create_rng(7)).unwrap();
        assert_eq!(result.best_profit, 0);
        assert_eq!(result.best.count(), 0);
        assert!(result.iterations > 0);
    }

    #[test]
    fn test_empty_instance_returns_immediately() {
        let instance = Instance::<i64>::new([], 10).unwrap();
        let result = SaRunner::run(&instance, &SaConfig::default(), &mut create_rng(1)).unwrap();
        assert_eq!(result.best_profit, 0);
        assert_eq!(result.iterations, 0);
        assert!(result.best.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SaConfig::default().with_alpha(2.0);
        let err = SaRunner::run(&scenario(), &config, &mut create_rng(1)).unwrap_err();
        assert!(matches!(err, KnapsackError::Config(_)));
    }

    #[test]
    fn test_best_is_feasible_and_consistent() {
        for seed in 0..5 {
            let instance = medium(seed);
            let result = SaRunner::run(&instance, &fast(), &mut create_rng(seed)).unwrap();
            let eval = evaluate(&instance, &result.best);
            assert_eq!(eval.profit, result.best_profit);
            assert_eq!(eval.weight, result.best_weight);
            assert!(eval.weight <= instance.capacity());
            assert!(result.best_profit >= 0);
        }
    }

    #[test]
    fn test_profit_history_non_decreasing() {
        let instance = medium(11);
        let result = SaRunner::run(&instance, &fast(), &mut create_rng(3)).unwrap();
        assert_eq!(result.profit_history.first(), Some(&0));
        assert_eq!(result.profit_history.last(), Some(&result.best_profit));
        for window in result.profit_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best profit history should be non-decreasing: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_incremental_matches_full_rescan() {
        let instance = medium(5);
        let incremental = SaRunner::run(&instance, &fast(), &mut create_rng(99)).unwrap();
        let full = SaRunner::run(
            &instance,
            &fast().with_evaluation(EvaluationMode::Full),
            &mut create_rng(99),
        )
        .unwrap();
        assert_eq!(incremental.best, full.best);
        assert_eq!(incremental.best_profit, full.best_profit);
        assert_eq!(incremental.accepted_moves, full.accepted_moves);
        assert_eq!(incremental.profit_history, full.profit_history);
    }

    #[test]
    fn test_same_seed_reproduces() {
        let instance = medium(8);
        let a = SaRunner::run(&instance, &fast(), &mut create_rng(4)).unwrap();
        let b = SaRunner::run(&instance, &fast(), &mut create_rng(4)).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.iterations, b.iterations);
    }

    #[test]
    fn test_max_iterations_limit() {
        let config = SaConfig::default().with_max_iterations(100);
        let result = SaRunner::run(&medium(2), &config, &mut create_rng(42)).unwrap();
        assert_eq!(result.iterations, 100);
        assert!(result.final_temperature > config.final_temperature);
    }

    #[test]
    fn test_iteration_count_follows_schedule() {
        // 1000 * 0.5^k > 100 holds for k = 0..=3.
        let config = SaConfig::default()
            .with_initial_temperature(1000.0)
            .with_final_temperature(100.0)
            .with_alpha(0.5)
            .with_iterations_per_temperature(25);
        let result = SaRunner::run(&scenario(), &config, &mut create_rng(1)).unwrap();
        assert_eq!(result.temperature_steps, 4);
        assert_eq!(result.iterations, 100);
        assert!(result.final_temperature <= 100.0);
    }

    #[test]
    fn test_greedy_start_never_worse_than_greedy() {
        let instance = medium(21);
        let greedy = GreedyConstructor::construct(&instance);
        let config = fast().with_start(StartSolution::Greedy);
        let result = SaRunner::run(&instance, &config, &mut create_rng(21)).unwrap();
        assert!(result.best_profit >= greedy.profit);
        assert_eq!(result.profit_history[0], greedy.profit);
    }

    #[test]
    fn test_sentinel_objective_finds_optimum() {
        let config = SaConfig::default().with_objective(Objective::Sentinel {
            infeasible_score: DEFAULT_INFEASIBLE_SCORE,
        });
        let result = SaRunner::run(&scenario(), &config, &mut create_rng(42)).unwrap();
        assert_eq!(result.best_profit, 220);
    }

    #[test]
    fn test_narrow_width_instance() {
        let instance = Instance::new([(60u32, 10), (100, 20), (120, 30)], 50).unwrap();
        let result = SaRunner::run(&instance, &SaConfig::default(), &mut create_rng(42)).unwrap();
        assert_eq!(result.best_profit, 220u32);
    }

    #[test]
    fn test_metropolis_extremes() {
        let mut rng = create_rng(0);
        let hot = (0..1000).filter(|_| metropolis(-1.0, 1e9, &mut rng)).count();
        assert!(hot > 990, "expected near-certain acceptance, got {hot}");
        let cold = (0..1000).filter(|_| metropolis(-1e6, 1e-3, &mut rng)).count();
        assert_eq!(cold, 0);
    }
}
