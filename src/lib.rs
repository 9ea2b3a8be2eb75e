//! IRR Monte Carlo - distribution of internal rates of return under cashflow uncertainty
//!
//! This library provides:
//! - Validated cashflow schedules loaded from CSV or inline text
//! - An IRR root-finder with explicit converged / not-converged results
//! - A seeded Monte Carlo simulator with sequential and parallel runs
//! - Scenario sweeps across shock volatilities
//! - Serializable reports for CLI and Lambda consumers

pub mod error;
pub mod cashflow;
pub mod simulation;
pub mod scenario;
pub mod report;

// Re-export commonly used types
pub use error::{ConfigError, SimulationError};
pub use cashflow::CashflowSchedule;
pub use simulation::{simulate, DistributionSummary, IrrSolution, MonteCarloIrr, SimulationConfig, TrialResult};
pub use scenario::ScenarioRunner;
pub use report::SimulationReport;
