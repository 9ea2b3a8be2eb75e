//! Load cashflow schedules from CSV files or inline text
//!
//! CSV files carry a `period,cashflow` header. Rows may appear in any
//! order but the periods must cover 0..N-1 exactly once.

use super::CashflowSchedule;
use crate::error::{ConfigError, SimulationError};
use csv::Reader;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(alias = "Period")]
    period: u32,
    #[serde(alias = "Cashflow", alias = "amount")]
    cashflow: f64,
}

/// Load a schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> Result<CashflowSchedule, SimulationError> {
    let path = path.as_ref();
    log::debug!("Loading cashflow schedule from {}", path.display());
    let reader = Reader::from_path(path)?;
    rows_to_schedule(reader)
}

/// Load a schedule from any reader (e.g., string buffer, request body)
pub fn load_schedule_from_reader<R: std::io::Read>(reader: R) -> Result<CashflowSchedule, SimulationError> {
    rows_to_schedule(Reader::from_reader(reader))
}

fn rows_to_schedule<R: std::io::Read>(mut reader: Reader<R>) -> Result<CashflowSchedule, SimulationError> {
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row);
    }

    rows.sort_by_key(|row| row.period);

    let mut flows = Vec::with_capacity(rows.len());
    for (expected, row) in rows.iter().enumerate() {
        let period = row.period as usize;
        if period < expected {
            return Err(ConfigError::DuplicatePeriod(row.period).into());
        }
        if period > expected {
            return Err(ConfigError::MissingPeriod(expected).into());
        }
        flows.push(row.cashflow);
    }

    CashflowSchedule::new(flows)
}

/// Parse an inline list such as `-100,60,60` or `-100 60 60`
pub fn parse_cashflows(text: &str) -> Result<CashflowSchedule, SimulationError> {
    let flows = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|source| SimulationError::Parse {
                token: token.to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    CashflowSchedule::new(flows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inline() {
        let schedule = parse_cashflows("-100, 60,60").unwrap();
        assert_eq!(schedule.as_slice(), &[-100.0, 60.0, 60.0]);

        let spaced = parse_cashflows("-100 50 50 50").unwrap();
        assert_eq!(spaced.len(), 4);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_cashflows("-100,abc").unwrap_err();
        assert!(matches!(err, SimulationError::Parse { ref token, .. } if token == "abc"));
    }

    #[test]
    fn test_parse_single_value_is_invalid_configuration() {
        assert!(parse_cashflows("-100").unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn test_load_from_reader_reorders_periods() {
        let data = "period,cashflow\n2,60\n0,-100\n1,60\n";
        let schedule = load_schedule_from_reader(data.as_bytes()).unwrap();
        assert_eq!(schedule.as_slice(), &[-100.0, 60.0, 60.0]);
    }

    #[test]
    fn test_load_detects_gaps_and_duplicates() {
        let gap = "period,cashflow\n0,-100\n2,60\n";
        match load_schedule_from_reader(gap.as_bytes()) {
            Err(SimulationError::InvalidConfiguration(ConfigError::MissingPeriod(1))) => {}
            other => panic!("expected missing period, got {other:?}"),
        }

        let dup = "period,cashflow\n0,-100\n1,60\n1,60\n";
        match load_schedule_from_reader(dup.as_bytes()) {
            Err(SimulationError::InvalidConfiguration(ConfigError::DuplicatePeriod(1))) => {}
            other => panic!("expected duplicate period, got {other:?}"),
        }
    }

    #[test]
    fn test_load_bad_csv() {
        let data = "period,cashflow\n0,not_a_number\n";
        assert!(matches!(
            load_schedule_from_reader(data.as_bytes()),
            Err(SimulationError::Csv(_))
        ));
    }
}
