//! Simulated Annealing (SA) for the 0/1 knapsack.
//!
//! Starts from the empty knapsack (or the greedy solution), flips one or
//! two items per trial, and accepts worsening moves with the Metropolis
//! probability `exp(delta / T)` under geometric cooling. Overweight states
//! are part of the search space; only feasible states can become the best
//! solution.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"

mod config;
mod runner;
mod state;
mod tweak;

pub use config::{
    EvaluationMode, Objective, SaConfig, StartSolution, DEFAULT_INFEASIBLE_SCORE,
    DEFAULT_PENALTY_FACTOR,
};
pub use runner::{SaResult, SaRunner};
pub use tweak::{tweak, Flip};
