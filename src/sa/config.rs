//! SA configuration.

use serde::Deserialize;

/// Score the Metropolis rule compares.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "kebab-case")]
pub enum Objective {
    /// `profit - coefficient * excess`, with the coefficient derived from
    /// the instance's average profit per weight times `penalty_factor`.
    Penalized {
        /// Multiplier on the average ratio, at least 1. Typical: 10.
        penalty_factor: f64,
    },

    /// Raw profit for feasible states, `infeasible_score` for overweight
    /// ones.
    Sentinel {
        /// Score assigned to every overweight state. Typical: -1e9.
        infeasible_score: f64,
    },
}

impl Default for Objective {
    fn default() -> Self {
        Objective::Penalized {
            penalty_factor: DEFAULT_PENALTY_FACTOR,
        }
    }
}

/// Penalty factor applied when none is configured.
pub const DEFAULT_PENALTY_FACTOR: f64 = 10.0;

/// Sentinel score for [`Objective::Sentinel`] when none is configured.
pub const DEFAULT_INFEASIBLE_SCORE: f64 = -1_000_000_000.0;

/// Where the search starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StartSolution {
    /// The empty knapsack, independent of the greedy result.
    #[default]
    Empty,
    /// The greedy solution, which also seeds the best-known solution.
    Greedy,
}

/// How the profit/weight of a neighbor is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Adjust the current totals by the flipped items only.
    #[default]
    Incremental,
    /// Rescan every item after each move.
    Full,
}

/// Configuration for the annealing engine.
///
/// # Examples
///
/// ```
/// use u_knapsack::sa::{SaConfig, StartSolution};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(5000.0)
///     .with_final_temperature(0.5)
///     .with_alpha(0.98)
///     .with_iterations_per_temperature(200)
///     .with_start(StartSolution::Greedy);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SaConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// The search runs while the temperature is above this value.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1): `T_{k+1} = alpha * T_k`.
    pub alpha: f64,

    /// Trials per temperature level. `None` scales with the instance:
    /// `max(N / 2, 10)`.
    pub iterations_per_temperature: Option<usize>,

    /// Hard cap on total trials. 0 = no limit.
    pub max_iterations: usize,

    /// Probability that a move flips two items instead of one.
    pub double_flip_probability: f64,

    pub objective: Objective,

    pub start: StartSolution,

    pub evaluation: EvaluationMode,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10_000.0,
            final_temperature: 0.1,
            alpha: 0.99,
            iterations_per_temperature: None,
            max_iterations: 0,
            double_flip_probability: 0.10,
            objective: Objective::default(),
            start: StartSolution::default(),
            evaluation: EvaluationMode::default(),
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = Some(n);
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_double_flip_probability(mut self, p: f64) -> Self {
        self.double_flip_probability = p;
        self
    }

    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Shorthand for the penalized objective with the given factor.
    pub fn with_penalty_factor(self, penalty_factor: f64) -> Self {
        self.with_objective(Objective::Penalized { penalty_factor })
    }

    pub fn with_start(mut self, start: StartSolution) -> Self {
        self.start = start;
        self
    }

    pub fn with_evaluation(mut self, evaluation: EvaluationMode) -> Self {
        self.evaluation = evaluation;
        self
    }

    /// Trials per temperature level for an instance of `n` items.
    pub fn inner_loops(&self, n: usize) -> usize {
        self.iterations_per_temperature
            .unwrap_or_else(|| (n / 2).max(10))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) {
            return Err("initial_temperature must be positive".into());
        }
        if !(self.final_temperature > 0.0) {
            return Err("final_temperature must be positive".into());
        }
        if self.final_temperature >= self.initial_temperature {
            return Err("final_temperature must be less than initial_temperature".into());
        }
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(format!("alpha must be in (0, 1), got {}", self.alpha));
        }
        if self.iterations_per_temperature == Some(0) {
            return Err("iterations_per_temperature must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.double_flip_probability) {
            return Err(format!(
                "double_flip_probability must be in [0, 1], got {}",
                self.double_flip_probability
            ));
        }
        match self.objective {
            Objective::Penalized { penalty_factor } => {
                if !(penalty_factor >= 1.0) || !penalty_factor.is_finite() {
                    return Err(format!(
                        "penalty_factor must be a finite value >= 1, got {penalty_factor}"
                    ));
                }
            }
            Objective::Sentinel { infeasible_score } => {
                if !infeasible_score.is_finite() {
                    return Err("infeasible_score must be finite".into());
                }
            }
        }
        Ok(())
    }
}
