//! Serializable report of a simulation run for CLI and Lambda output

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::cashflow::CashflowSchedule;
use crate::simulation::{DistributionSummary, SimulationConfig, TrialResult};

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub generated_at: DateTime<Utc>,
    pub cashflows: Vec<f64>,
    pub sims: usize,
    pub vol: f64,
    pub seed: u64,
    pub periods_per_year: u32,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub mean: Option<f64>,
    pub defined_trials: usize,
    pub undefined_trials: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<TrialResult>>,
}

impl SimulationReport {
    pub fn new(
        schedule: &CashflowSchedule,
        config: &SimulationConfig,
        summary: &DistributionSummary,
        include_raw: bool,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            cashflows: schedule.as_slice().to_vec(),
            sims: config.sims,
            vol: config.vol,
            seed: config.seed,
            periods_per_year: config.periods_per_year,
            p25: summary.p25,
            p50: summary.p50,
            p75: summary.p75,
            mean: summary.mean(),
            defined_trials: summary.defined_count(),
            undefined_trials: summary.undefined_count(),
            raw: include_raw.then(|| summary.raw.clone()),
        }
    }
}

/// Format a rate as a percentage, or "N/A" when undefined
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.2}%", r * 100.0),
        None => "N/A".to_string(),
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IRR Monte Carlo ({})", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(f, "  Periods: {}  Sims: {}  Vol: {}  Seed: {}", self.cashflows.len(), self.sims, self.vol, self.seed)?;
        writeln!(f, "  P25: {}", format_rate(self.p25))?;
        writeln!(f, "  P50: {}", format_rate(self.p50))?;
        writeln!(f, "  P75: {}", format_rate(self.p75))?;
        write!(
            f,
            "  Defined trials: {}  Undefined trials: {}",
            self.defined_trials, self.undefined_trials
        )
    }
}
