//! Base cashflow schedule fed to the simulator

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SimulationError};

/// Noise floor below which a cashflow is treated as zero for sign checks
pub const SIGN_EPSILON: f64 = 1e-10;

/// Ordered cashflows, index = period (period 0 is usually the outlay)
///
/// Validated on construction and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct CashflowSchedule {
    flows: Vec<f64>,
}

impl CashflowSchedule {
    /// Build a schedule, rejecting short or non-finite input
    pub fn new(flows: Vec<f64>) -> Result<Self, SimulationError> {
        if flows.len() < 2 {
            return Err(ConfigError::TooFewPeriods(flows.len()).into());
        }
        if let Some((period, &value)) = flows.iter().enumerate().find(|(_, cf)| !cf.is_finite()) {
            return Err(ConfigError::NonFiniteCashflow { period, value }.into());
        }
        Ok(Self { flows })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Iterate `(period, cashflow)` pairs
    pub fn periods(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.flows.iter().copied().enumerate()
    }

    /// Whether the schedule has both an outflow and an inflow
    pub fn has_sign_change(&self) -> bool {
        has_sign_change(&self.flows)
    }
}

/// True when `cashflows` contains at least one positive and one negative value
pub fn has_sign_change(cashflows: &[f64]) -> bool {
    let has_positive = cashflows.iter().any(|&cf| cf > SIGN_EPSILON);
    let has_negative = cashflows.iter().any(|&cf| cf < -SIGN_EPSILON);
    has_positive && has_negative
}

impl TryFrom<Vec<f64>> for CashflowSchedule {
    type Error = SimulationError;

    fn try_from(flows: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(flows)
    }
}

impl From<CashflowSchedule> for Vec<f64> {
    fn from(schedule: CashflowSchedule) -> Self {
        schedule.flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_single_period() {
        let err = CashflowSchedule::new(vec![-100.0]).unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = CashflowSchedule::new(vec![-100.0, f64::NAN, 50.0]).unwrap_err();
        match err {
            SimulationError::InvalidConfiguration(ConfigError::NonFiniteCashflow { period, .. }) => {
                assert_eq!(period, 1)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_sign_change() {
        let conventional = CashflowSchedule::new(vec![-100.0, 60.0, 60.0]).unwrap();
        assert!(conventional.has_sign_change());

        let all_positive = CashflowSchedule::new(vec![100.0, 60.0, 60.0]).unwrap();
        assert!(!all_positive.has_sign_change());

        let all_zero = CashflowSchedule::new(vec![0.0, 0.0]).unwrap();
        assert!(!all_zero.has_sign_change());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CashflowSchedule = serde_json::from_str("[-100.0, 60.0, 60.0]").unwrap();
        assert_eq!(ok.len(), 3);
        assert!(!ok.is_empty());
        assert_eq!(ok.as_slice(), &[-100.0, 60.0, 60.0]);

        assert!(serde_json::from_str::<CashflowSchedule>("[-100.0]").is_err());
    }
}
