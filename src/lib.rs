//! Heuristics for the 0/1 knapsack problem.
//!
//! Two solvers share one immutable [`Instance`](instance::Instance):
//!
//! - **Greedy construction**: packs items by descending profit/weight
//!   ratio. Deterministic and always feasible.
//! - **Simulated Annealing (SA)**: bit-flip local search over a penalized
//!   objective that tolerates temporarily overweight solutions, tracking
//!   the best feasible solution seen.
//!
//! Supporting modules evaluate solutions, parse the plain-text instance
//! format, and report timed results as CSV.
//!
//! # Example
//!
//! ```
//! use u_knapsack::greedy::GreedyConstructor;
//! use u_knapsack::instance::Instance;
//! use u_knapsack::random::create_rng;
//! use u_knapsack::sa::{SaConfig, SaRunner};
//!
//! let instance = Instance::new([(60, 10), (100, 20), (120, 30)], 50).unwrap();
//! let greedy = GreedyConstructor::construct(&instance);
//! let sa = SaRunner::run(&instance, &SaConfig::default(), &mut create_rng(42)).unwrap();
//! assert_eq!(greedy.profit, 160);
//! assert!(sa.best_profit >= greedy.profit);
//! ```

pub mod error;
pub mod eval;
pub mod greedy;
pub mod instance;
pub mod random;
pub mod report;
pub mod sa;
pub mod solution;

pub use error::{KnapsackError, Result};
