//! Monte Carlo IRR distribution simulation

mod config;
mod irr;
mod monte_carlo;
mod percentile;
mod summary;

pub use config::{SimulationConfig, DEFAULT_SEED, DEFAULT_SIMS, DEFAULT_VOL};
pub use irr::{annualize, npv_at_rate, solve_irr, IrrSolution, MAX_RATE, MIN_RATE};
pub use monte_carlo::{simulate, MonteCarloIrr};
pub use percentile::{percentile, sorted_finite};
pub use summary::{DistributionSummary, TrialResult};
