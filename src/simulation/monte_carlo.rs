//! Monte Carlo IRR simulator
//!
//! Each trial multiplies every base cashflow by `1 + shock`, with shocks drawn
//! independently from Normal(0, vol), then solves the IRR of the shocked
//! schedule. The random generator is created per run from the configured
//! seed, so a simulator can be run repeatedly (or cloned across threads) and
//! always reproduces the same trial sequence.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;

use super::config::SimulationConfig;
use super::irr::{annualize, solve_irr, IrrSolution};
use super::summary::{DistributionSummary, TrialResult};
use crate::cashflow::CashflowSchedule;
use crate::error::{ConfigError, SimulationError};

/// Golden-ratio increment used to spread per-trial seeds in parallel runs
const TRIAL_SEED_STRIDE: u64 = 0x9e37_79b9_7f4a_7c15;

/// Monte Carlo simulation of a schedule's IRR under multiplicative noise
#[derive(Debug, Clone)]
pub struct MonteCarloIrr {
    schedule: CashflowSchedule,
    config: SimulationConfig,
    shock: Normal<f64>,
}

impl MonteCarloIrr {
    /// Validate the configuration and build the simulator
    pub fn new(schedule: CashflowSchedule, config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let shock = Normal::new(0.0, config.vol).map_err(|_| ConfigError::InvalidVolatility(config.vol))?;

        Ok(Self { schedule, config, shock })
    }

    pub fn schedule(&self) -> &CashflowSchedule {
        &self.schedule
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all trials sequentially from a single generator seeded with `config.seed`
    pub fn run(&self) -> DistributionSummary {
        log::debug!(
            "Running {} IRR trials over {} periods (vol={}, seed={})",
            self.config.sims,
            self.schedule.len(),
            self.config.vol,
            self.config.seed
        );

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let mut shocked = vec![0.0; self.schedule.len()];
        let raw: Vec<TrialResult> = (0..self.config.sims)
            .map(|trial| self.run_trial(trial, &mut rng, &mut shocked))
            .collect();

        self.summarize(raw)
    }

    /// Run trials on the rayon pool, each with its own generator
    ///
    /// Trial `i` is seeded from `config.seed` and `i`, so the result does not
    /// depend on thread count or scheduling. The sequence differs from `run`.
    pub fn run_parallel(&self) -> DistributionSummary {
        log::debug!(
            "Running {} IRR trials in parallel over {} periods (vol={}, seed={})",
            self.config.sims,
            self.schedule.len(),
            self.config.vol,
            self.config.seed
        );

        let raw: Vec<TrialResult> = (0..self.config.sims)
            .into_par_iter()
            .map_init(
                || vec![0.0; self.schedule.len()],
                |shocked, trial| {
                    let mut rng = StdRng::seed_from_u64(trial_seed(self.config.seed, trial));
                    self.run_trial(trial, &mut rng, shocked)
                },
            )
            .collect();

        self.summarize(raw)
    }

    fn run_trial(&self, trial: usize, rng: &mut StdRng, shocked: &mut [f64]) -> TrialResult {
        for (slot, (_, cf)) in shocked.iter_mut().zip(self.schedule.periods()) {
            *slot = cf * (1.0 + self.shock.sample(rng));
        }

        let result = match solve_irr(shocked) {
            IrrSolution::Converged(rate) => Some(annualize(rate, self.config.periods_per_year)),
            IrrSolution::NotConverged => None,
        }
        .filter(|rate| rate.is_finite());

        log::trace!("trial {}: {:?}", trial, result);
        result
    }

    fn summarize(&self, raw: Vec<TrialResult>) -> DistributionSummary {
        let summary = DistributionSummary::from_trials(raw);

        if summary.is_empty_distribution() {
            log::warn!("All {} IRR trials were undefined", summary.raw.len());
        } else {
            log::info!(
                "IRR simulation complete: {} defined, {} undefined, p50={:?}",
                summary.defined_count(),
                summary.undefined_count(),
                summary.p50
            );
        }

        summary
    }
}

fn trial_seed(master_seed: u64, trial: usize) -> u64 {
    master_seed ^ (trial as u64).wrapping_add(1).wrapping_mul(TRIAL_SEED_STRIDE)
}

/// Build and run a simulator in one call
pub fn simulate(cashflows: &[f64], config: SimulationConfig) -> Result<DistributionSummary, SimulationError> {
    let schedule = CashflowSchedule::new(cashflows.to_vec())?;
    Ok(MonteCarloIrr::new(schedule, config)?.run())
}
