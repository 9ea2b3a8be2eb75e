//! Cashflow schedules and schedule loading

pub(crate) mod schedule;
pub mod loader;

pub use schedule::CashflowSchedule;
pub use loader::{load_schedule, load_schedule_from_reader, parse_cashflows};
