//! Simulation parameters

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::ConfigError;

pub const DEFAULT_SIMS: usize = 5000;
pub const DEFAULT_VOL: f64 = 0.15;
pub const DEFAULT_SEED: u64 = 42;

/// Parameters for one Monte Carlo IRR run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of independent trials
    #[serde(default = "default_sims")]
    pub sims: usize,

    /// Standard deviation of the multiplicative shock applied to each cashflow
    #[serde(default = "default_vol")]
    pub vol: f64,

    /// Seed for the random source
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Periods per year in the schedule (1 = annual cashflows, 12 = monthly).
    /// Trial IRRs are annualized with this.
    #[serde(default = "default_periods_per_year")]
    pub periods_per_year: u32,
}

fn default_sims() -> usize {
    DEFAULT_SIMS
}

fn default_vol() -> f64 {
    DEFAULT_VOL
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_periods_per_year() -> u32 {
    1
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            sims: DEFAULT_SIMS,
            vol: DEFAULT_VOL,
            seed: DEFAULT_SEED,
            periods_per_year: 1,
        }
    }
}

impl SimulationConfig {
    /// Defaults overlaid with IRR_SIMS, IRR_VOL, IRR_SEED and IRR_PERIODS_PER_YEAR
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let sims: usize = env::var("IRR_SIMS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.sims);

        let vol: f64 = env::var("IRR_VOL")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.vol);

        let seed: u64 = env::var("IRR_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.seed);

        let periods_per_year: u32 = env::var("IRR_PERIODS_PER_YEAR")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.periods_per_year);

        Self { sims, vol, seed, periods_per_year }
    }

    pub fn with_sims(mut self, sims: usize) -> Self {
        self.sims = sims;
        self
    }

    pub fn with_vol(mut self, vol: f64) -> Self {
        self.vol = vol;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_periods_per_year(mut self, periods_per_year: u32) -> Self {
        self.periods_per_year = periods_per_year;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sims < 1 {
            return Err(ConfigError::NoSimulations);
        }
        if !self.vol.is_finite() || self.vol < 0.0 {
            return Err(ConfigError::InvalidVolatility(self.vol));
        }
        if self.periods_per_year < 1 {
            return Err(ConfigError::InvalidPeriodsPerYear);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.sims, 5000);
        assert_eq!(config.vol, 0.15);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let base = SimulationConfig::default();
        assert_eq!(base.with_sims(0).validate(), Err(ConfigError::NoSimulations));
        assert!(matches!(
            base.with_vol(-0.1).validate(),
            Err(ConfigError::InvalidVolatility(_))
        ));
        assert!(base.with_vol(f64::NAN).validate().is_err());
        assert_eq!(
            base.with_periods_per_year(0).validate(),
            Err(ConfigError::InvalidPeriodsPerYear)
        );
        assert!(base.with_vol(0.0).validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: SimulationConfig = serde_json::from_str(r#"{"vol": 0.3}"#).unwrap();
        assert_eq!(config.vol, 0.3);
        assert_eq!(config.sims, DEFAULT_SIMS);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.periods_per_year, 1);
    }
}
