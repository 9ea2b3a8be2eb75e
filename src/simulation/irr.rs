//! Internal Rate of Return (IRR) root-finding
//!
//! The discounted-cashflow polynomial can have several real roots when the
//! cashflows change sign more than once. The solver scans the rate range for
//! sign changes, refines each bracket by bisection and keeps the root closest
//! to zero. Cells where the NPV turns without changing sign are refined to the
//! turning point, which exposes root pairs closer together than the grid and
//! roots where the curve only touches zero. Newton-Raphson is the last resort.

use crate::cashflow::schedule::has_sign_change;

/// Lowest periodic rate searched (-99%)
pub const MIN_RATE: f64 = -0.99;
/// Highest periodic rate searched (1000%)
pub const MAX_RATE: f64 = 10.0;

const TOLERANCE: f64 = 1e-10;
const MAX_ITERATIONS: usize = 1000;
/// Grid resolution of the bracket scan: steps of 0.01 across [MIN_RATE, MAX_RATE]
const SCAN_STEPS: usize = 1099;
const NEWTON_GUESS: f64 = 0.1;
/// NPV (relative to the largest cashflow) accepted as zero at a touching root
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Outcome of an IRR solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IrrSolution {
    /// Periodic rate at which NPV is zero
    Converged(f64),
    /// No real root in range, or the solver gave up
    NotConverged,
}

impl IrrSolution {
    pub fn rate(self) -> Option<f64> {
        match self {
            IrrSolution::Converged(rate) => Some(rate),
            IrrSolution::NotConverged => None,
        }
    }

    pub fn is_converged(self) -> bool {
        matches!(self, IrrSolution::Converged(_))
    }
}

/// Solve for the periodic IRR of `cashflows` (index = period)
///
/// # Returns
/// * `IrrSolution::Converged(rate)` - smallest-magnitude root in [MIN_RATE, MAX_RATE]
/// * `IrrSolution::NotConverged` - no sign change, non-finite input, or no root found
pub fn solve_irr(cashflows: &[f64]) -> IrrSolution {
    if cashflows.len() < 2 || cashflows.iter().any(|cf| !cf.is_finite()) {
        return IrrSolution::NotConverged;
    }

    // No sign change means no IRR (this also covers an all-zero schedule)
    if !has_sign_change(cashflows) {
        return IrrSolution::NotConverged;
    }

    let scale = cashflow_scale(cashflows);
    let mut best: Option<f64> = None;
    let mut keep = |root: f64| {
        if best.map_or(true, |b: f64| root.abs() < b.abs()) {
            best = Some(root);
        }
    };

    let mut low = MIN_RATE;
    let (mut npv_low, mut slope_low) = npv_and_derivative(cashflows, low);

    for step in 1..=SCAN_STEPS {
        let high = MIN_RATE + (MAX_RATE - MIN_RATE) * step as f64 / SCAN_STEPS as f64;
        let (npv_high, slope_high) = npv_and_derivative(cashflows, high);

        if npv_low == 0.0 {
            keep(low);
        } else if npv_low * npv_high < 0.0 {
            if let Some(root) = bisect(cashflows, low, high, npv_low, scale) {
                keep(root);
            }
        } else if slope_low * slope_high <= 0.0 {
            // NPV turns inside the cell: either two roots straddle the turning
            // point or the curve just touches zero there
            if let Some(turn) = turning_point(cashflows, low, high, slope_low) {
                let npv_turn = npv_at_rate(cashflows, turn);
                if npv_turn * npv_low < 0.0 {
                    let left = bisect(cashflows, low, turn, npv_low, scale);
                    let right = bisect(cashflows, turn, high, npv_turn, scale);
                    for root in [left, right].into_iter().flatten() {
                        keep(root);
                    }
                } else if npv_turn.abs() <= RESIDUAL_TOLERANCE * scale {
                    keep(turn);
                }
            }
        }

        low = high;
        npv_low = npv_high;
        slope_low = slope_high;
    }
    if npv_low == 0.0 {
        keep(low);
    }

    match best {
        Some(rate) => IrrSolution::Converged(rate),
        None => newton(cashflows, scale),
    }
}

/// Largest absolute cashflow, floored at 1, used to scale NPV tolerances
fn cashflow_scale(cashflows: &[f64]) -> f64 {
    cashflows.iter().map(|cf| cf.abs()).fold(0.0, f64::max).max(1.0)
}

/// Bisection on a bracket known to contain a sign change
fn bisect(cashflows: &[f64], mut low: f64, mut high: f64, mut npv_low: f64, scale: f64) -> Option<f64> {
    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < TOLERANCE * scale || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    None
}

/// Bisection on the NPV derivative for a cell whose end slopes differ in sign
fn turning_point(cashflows: &[f64], mut low: f64, mut high: f64, mut slope_low: f64) -> Option<f64> {
    if slope_low == 0.0 {
        return Some(low);
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let (_, slope_mid) = npv_and_derivative(cashflows, mid);

        if slope_mid == 0.0 || (high - low) / 2.0 < TOLERANCE {
            return Some(mid);
        }

        if slope_mid * slope_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            slope_low = slope_mid;
        }
    }

    None
}

/// Newton-Raphson from a fixed guess, accepted only on a negligible residual
fn newton(cashflows: &[f64], scale: f64) -> IrrSolution {
    let mut rate = NEWTON_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 {
            return IrrSolution::NotConverged;
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < TOLERANCE {
            let residual = npv_at_rate(cashflows, new_rate).abs();
            if residual <= RESIDUAL_TOLERANCE * scale {
                return IrrSolution::Converged(new_rate);
            }
            return IrrSolution::NotConverged;
        }

        rate = new_rate;
    }

    IrrSolution::NotConverged
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

/// Calculate NPV at a given periodic rate
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Convert a periodic rate to an annual rate
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    if periods_per_year <= 1 {
        return periodic_rate;
    }
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}
