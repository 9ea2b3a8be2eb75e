//! Distribution summary of simulated IRRs

use serde::{Deserialize, Serialize};

use super::percentile::{percentile, sorted_finite};

/// IRR of one shocked schedule, `None` when no rate could be found
pub type TrialResult = Option<f64>;

/// Quartiles of the finite trial IRRs plus every trial in run order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSummary {
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    /// All trial results, undefined ones included, in trial order
    pub raw: Vec<TrialResult>,
}

impl DistributionSummary {
    pub fn from_trials(raw: Vec<TrialResult>) -> Self {
        let sorted = sorted_finite(raw.iter().flatten().copied());

        Self {
            p25: percentile(&sorted, 25.0),
            p50: percentile(&sorted, 50.0),
            p75: percentile(&sorted, 75.0),
            raw,
        }
    }

    pub fn defined_count(&self) -> usize {
        self.raw.iter().filter(|r| r.is_some()).count()
    }

    pub fn undefined_count(&self) -> usize {
        self.raw.len() - self.defined_count()
    }

    /// True when no trial produced an IRR
    pub fn is_empty_distribution(&self) -> bool {
        self.defined_count() == 0
    }

    /// Mean of the defined trial IRRs
    pub fn mean(&self) -> Option<f64> {
        let defined = self.defined_count();
        if defined == 0 {
            return None;
        }
        let total: f64 = self.raw.iter().flatten().sum();
        Some(total / defined as f64)
    }
}
