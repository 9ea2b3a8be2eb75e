//! Scenario runner for batch simulations
//!
//! Holds one base schedule and runs it under many simulation configs,
//! typically a sweep over shock volatility.

use rayon::prelude::*;

use crate::cashflow::CashflowSchedule;
use crate::error::SimulationError;
use crate::simulation::{DistributionSummary, MonteCarloIrr, SimulationConfig};

/// Runs one schedule under several configurations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(schedule);
/// let configs = ScenarioRunner::volatility_sweep(SimulationConfig::default(), &[0.05, 0.15, 0.30]);
/// for (config, summary) in configs.iter().zip(runner.run_scenarios(&configs)?) {
///     println!("vol={} p50={:?}", config.vol, summary.p50);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    schedule: CashflowSchedule,
}

impl ScenarioRunner {
    pub fn new(schedule: CashflowSchedule) -> Self {
        Self { schedule }
    }

    /// Run a single simulation with the given config
    pub fn run(&self, config: SimulationConfig) -> Result<DistributionSummary, SimulationError> {
        Ok(MonteCarloIrr::new(self.schedule.clone(), config)?.run())
    }

    /// Run several configs in parallel; results follow the order of `configs`
    ///
    /// Every config is validated before any simulation starts.
    pub fn run_scenarios(&self, configs: &[SimulationConfig]) -> Result<Vec<DistributionSummary>, SimulationError> {
        let simulators = configs
            .iter()
            .map(|config| MonteCarloIrr::new(self.schedule.clone(), *config))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!("Running {} IRR scenarios", simulators.len());

        Ok(simulators.par_iter().map(|sim| sim.run()).collect())
    }

    /// One config per volatility, everything else taken from `base`
    pub fn volatility_sweep(base: SimulationConfig, vols: &[f64]) -> Vec<SimulationConfig> {
        vols.iter().map(|&vol| base.with_vol(vol)).collect()
    }

    pub fn schedule(&self) -> &CashflowSchedule {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> ScenarioRunner {
        ScenarioRunner::new(CashflowSchedule::new(vec![-100.0, 30.0, 40.0, 50.0, 20.0]).unwrap())
    }

    #[test]
    fn test_volatility_sweep_widens_spread() {
        let runner = runner();
        let base = SimulationConfig::default().with_sims(2000).with_seed(3);
        let configs = ScenarioRunner::volatility_sweep(base, &[0.0, 0.05, 0.30]);

        let results = runner.run_scenarios(&configs).unwrap();
        assert_eq!(results.len(), 3);

        let spread = |s: &DistributionSummary| s.p75.unwrap() - s.p25.unwrap();
        assert!(spread(&results[0]).abs() < 1e-12);
        // More noise should give a wider interquartile range
        assert!(spread(&results[2]) > spread(&results[1]));
    }

    #[test]
    fn test_scenarios_match_single_runs() {
        let runner = runner();
        let config = SimulationConfig::default().with_sims(100).with_vol(0.2);
        let batch = runner.run_scenarios(&[config]).unwrap();
        assert_eq!(batch[0], runner.run(config).unwrap());
    }

    #[test]
    fn test_invalid_config_fails_whole_batch() {
        let runner = runner();
        let configs = [SimulationConfig::default().with_sims(10), SimulationConfig::default().with_sims(0)];
        assert!(runner.run_scenarios(&configs).unwrap_err().is_invalid_configuration());
    }
}
