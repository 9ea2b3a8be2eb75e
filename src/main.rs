//! IRR Monte Carlo CLI
//!
//! Runs the IRR distribution simulation for a cashflow schedule given inline
//! (`--cashflows -100,60,60`) or as a `period,cashflow` CSV file.
//! Defaults come from IRR_SIMS, IRR_VOL, IRR_SEED and IRR_PERIODS_PER_YEAR;
//! command-line flags override them.

use anyhow::{bail, Context, Result};
use clap::Parser;
use irr_montecarlo::cashflow::{load_schedule, parse_cashflows};
use irr_montecarlo::report::format_rate;
use irr_montecarlo::{MonteCarloIrr, ScenarioRunner, SimulationConfig, SimulationReport};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "irr-sim", version, about = "Monte Carlo IRR distribution for a cashflow schedule")]
struct Cli {
    /// Comma-separated cashflows, period 0 first (e.g. -100,60,60)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "csv")]
    cashflows: Option<String>,

    /// CSV file with a `period,cashflow` header
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Number of trials
    #[arg(long)]
    sims: Option<usize>,

    /// Standard deviation of the multiplicative shock
    #[arg(long)]
    vol: Option<f64>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Periods per year in the schedule (12 for monthly cashflows)
    #[arg(long)]
    periods_per_year: Option<u32>,

    /// Spread trials across the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Run one scenario per volatility instead of a single run (e.g. 0.05,0.15,0.3)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    sweep: Vec<f64>,

    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,

    /// Include every trial result in JSON output
    #[arg(long)]
    include_raw: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    let schedule = match (&cli.cashflows, &cli.csv) {
        (Some(text), _) => parse_cashflows(text).context("Invalid --cashflows")?,
        (None, Some(path)) => {
            load_schedule(path).with_context(|| format!("Failed to load schedule from {}", path.display()))?
        }
        (None, None) => bail!("either --cashflows or --csv is required"),
    };

    let mut config = SimulationConfig::from_env();
    if let Some(sims) = cli.sims {
        config.sims = sims;
    }
    if let Some(vol) = cli.vol {
        config.vol = vol;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(periods_per_year) = cli.periods_per_year {
        config.periods_per_year = periods_per_year;
    }

    if !cli.sweep.is_empty() {
        let runner = ScenarioRunner::new(schedule);
        let configs = ScenarioRunner::volatility_sweep(config, &cli.sweep);
        let summaries = runner.run_scenarios(&configs).context("Volatility sweep failed")?;

        let reports: Vec<SimulationReport> = configs
            .iter()
            .zip(&summaries)
            .map(|(c, s)| SimulationReport::new(runner.schedule(), c, s, cli.include_raw))
            .collect();

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        } else {
            println!("{:>8} {:>10} {:>10} {:>10} {:>10}", "Vol", "P25", "P50", "P75", "Undefined");
            println!("{}", "-".repeat(52));
            for report in &reports {
                println!(
                    "{:>8.4} {:>10} {:>10} {:>10} {:>10}",
                    report.vol,
                    format_rate(report.p25),
                    format_rate(report.p50),
                    format_rate(report.p75),
                    report.undefined_trials,
                );
            }
            println!("\nTotal time: {:?}", start.elapsed());
        }
        return Ok(());
    }

    let simulator = MonteCarloIrr::new(schedule, config).context("Invalid simulation configuration")?;
    let summary = if cli.parallel {
        simulator.run_parallel()
    } else {
        simulator.run()
    };
    let report = SimulationReport::new(simulator.schedule(), simulator.config(), &summary, cli.include_raw);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
        println!("\nTotal time: {:?}", start.elapsed());
    }

    Ok(())
}
