//! Error types for schedule loading and simulation setup
//!
//! Only malformed inputs surface as errors. A trial whose IRR cannot be
//! found is recorded as undefined in the summary, never raised here.

use thiserror::Error;

/// Reasons a schedule or configuration is rejected before any trial runs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cashflow schedule needs at least 2 periods, got {0}")]
    TooFewPeriods(usize),

    #[error("cashflow at period {period} is not finite ({value})")]
    NonFiniteCashflow { period: usize, value: f64 },

    #[error("number of simulations must be at least 1")]
    NoSimulations,

    #[error("volatility must be finite and non-negative, got {0}")]
    InvalidVolatility(f64),

    #[error("periods per year must be at least 1")]
    InvalidPeriodsPerYear,

    #[error("period {0} appears more than once in the schedule")]
    DuplicatePeriod(u32),

    #[error("period {0} is missing from the schedule")]
    MissingPeriod(usize),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    #[error("could not parse cashflow '{token}'")]
    Parse {
        token: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    #[error("failed to read cashflow file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse cashflow csv: {0}")]
    Csv(#[from] csv::Error),
}

impl SimulationError {
    /// True when the error came from input validation rather than I/O or parsing
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, SimulationError::InvalidConfiguration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_converts() {
        let err: SimulationError = ConfigError::TooFewPeriods(1).into();
        assert!(err.is_invalid_configuration());
        assert_eq!(
            err.to_string(),
            "invalid configuration: cashflow schedule needs at least 2 periods, got 1"
        );
    }

    #[test]
    fn test_io_error_is_not_configuration() {
        let err: SimulationError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(!err.is_invalid_configuration());
    }
}
