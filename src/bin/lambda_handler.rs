//! AWS Lambda handler for IRR Monte Carlo runs
//!
//! Accepts a JSON payload with the base cashflows and optional simulation
//! parameters and returns the simulation report. Invalid schedules or
//! parameters fail the invocation with the validation message.

use irr_montecarlo::{CashflowSchedule, MonteCarloIrr, SimulationConfig, SimulationReport};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Deserialize;

/// Input for one simulation
///
/// `sims`, `vol`, `seed` and `periods_per_year` sit at the top level of the
/// payload and fall back to the `SimulationConfig` defaults.
#[derive(Debug, Deserialize)]
pub struct SimulationRequest {
    /// Base cashflows, period 0 first
    pub cashflows: Vec<f64>,

    #[serde(flatten)]
    pub config: SimulationConfig,

    /// Run trials across the rayon pool
    #[serde(default)]
    pub parallel: bool,

    /// Return every trial result
    #[serde(default)]
    pub include_raw: bool,
}

async fn handler(event: LambdaEvent<SimulationRequest>) -> Result<SimulationReport, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    let schedule = CashflowSchedule::new(request.cashflows)?;
    let simulator = MonteCarloIrr::new(schedule, request.config)?;

    // Trials are CPU bound; keep them off the async worker
    let parallel = request.parallel;
    let include_raw = request.include_raw;
    let report = tokio::task::spawn_blocking(move || {
        let summary = if parallel {
            simulator.run_parallel()
        } else {
            simulator.run()
        };
        SimulationReport::new(simulator.schedule(), simulator.config(), &summary, include_raw)
    })
    .await?;

    log::info!(
        "Simulated {} trials over {} periods in {} ms",
        report.sims,
        report.cashflows.len(),
        start.elapsed().as_millis()
    );

    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use irr_montecarlo::simulation::{DEFAULT_SEED, DEFAULT_SIMS};

    #[test]
    fn test_request_uses_config_defaults() {
        let request: SimulationRequest =
            serde_json::from_str(r#"{"cashflows": [-100.0, 60.0, 60.0], "vol": 0.3}"#).unwrap();

        assert_eq!(request.cashflows, vec![-100.0, 60.0, 60.0]);
        assert_eq!(request.config.vol, 0.3);
        assert_eq!(request.config.sims, DEFAULT_SIMS);
        assert_eq!(request.config.seed, DEFAULT_SEED);
        assert_eq!(request.config.periods_per_year, 1);
        assert!(!request.parallel);
        assert!(!request.include_raw);
    }

    #[test]
    fn test_request_overrides_every_field() {
        let request: SimulationRequest = serde_json::from_str(
            r#"{"cashflows": [-1000.0, 100.0], "sims": 10, "vol": 0.0, "seed": 7,
                "periods_per_year": 12, "parallel": true, "include_raw": true}"#,
        )
        .unwrap();

        assert_eq!(
            request.config,
            SimulationConfig::default()
                .with_sims(10)
                .with_vol(0.0)
                .with_seed(7)
                .with_periods_per_year(12)
        );
        assert!(request.parallel);
        assert!(request.include_raw);
    }
}
