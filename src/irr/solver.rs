//! Internal Rate of Return (IRR) by multi-seed Newton-Raphson
//!
//! Seeds are tried in a fixed order; the first one that converges wins.
//! A seed is abandoned when the derivative flattens out, when a step leaves
//! [-1, 100], or when its iteration budget runs out.

use crate::cashflow::{evaluate_npv, evaluate_npv_derivative};
use crate::config::SolverConfig;
use crate::error::{CalcResult, Diagnostic};
use serde::Serialize;

/// Seed rates tried, in order, after the caller's initial guess
pub const SEED_RATES: [f64; 10] = [0.01, 0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.50, 0.75, 1.00];

/// Steps beyond this range have left any economically meaningful rate
const MIN_RATE: f64 = -1.0;
const MAX_RATE: f64 = 100.0;

/// A converged IRR
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IrrSolution {
    /// Periodic rate that zeroes the NPV
    pub irr: f64,
    /// NPV re-evaluated at `irr`
    pub npv: f64,
    /// Seed the search started from
    pub seed: f64,
    /// Newton steps taken from that seed
    pub iterations: u32,
}

/// Why a single seed stopped
#[derive(Debug, Clone, Copy, PartialEq)]
enum SeedOutcome {
    Converged(IrrSolution),
    FlatDerivative,
    Diverged,
    Exhausted,
}

/// The full, ordered seed list for a configuration
pub fn seed_rates(config: &SolverConfig) -> impl Iterator<Item = f64> {
    std::iter::once(config.initial_guess).chain(SEED_RATES)
}

/// Run Newton-Raphson from one seed
fn newton_from_seed(cashflows: &[f64], seed: f64, config: &SolverConfig) -> CalcResult<SeedOutcome> {
    let mut rate = seed;

    for iteration in 0..config.max_iterations {
        let npv = evaluate_npv(cashflows, rate)?;
        let dnpv = evaluate_npv_derivative(cashflows, rate)?;

        if dnpv.abs() < config.precision {
            return Ok(SeedOutcome::FlatDerivative);
        }

        let next_rate = rate - npv / dnpv;
        log::trace!("seed {}: step {} rate {} -> {}", seed, iteration, rate, next_rate);

        if (next_rate - rate).abs() < config.precision {
            return Ok(SeedOutcome::Converged(IrrSolution {
                irr: next_rate,
                npv: evaluate_npv(cashflows, next_rate)?,
                seed,
                iterations: iteration + 1,
            }));
        }

        if !(MIN_RATE..=MAX_RATE).contains(&next_rate) {
            return Ok(SeedOutcome::Diverged);
        }

        rate = next_rate;
    }

    Ok(SeedOutcome::Exhausted)
}

/// Calculate the periodic IRR of a cash flow series
///
/// # Arguments
/// * `cashflows` - Cash flows by period (negative = outflow, positive = inflow)
/// * `config` - Initial guess, per-seed iteration budget and precision
///
/// # Returns
/// * `Ok(IrrSolution)` - rate from the first converging seed
/// * `Err(Diagnostic)` - `InsufficientData`, `InvalidCashFlowSign` or `ConvergenceFailure`
pub fn solve_irr(cashflows: &[f64], config: &SolverConfig) -> Result<IrrSolution, Diagnostic> {
    if cashflows.len() < 2 {
        return Err(Diagnostic::insufficient_data(cashflows.len()));
    }

    // No rate of return without both an outflow and an inflow
    let has_positive = cashflows.iter().any(|&cf| cf > 0.0);
    let has_negative = cashflows.iter().any(|&cf| cf < 0.0);
    if !has_positive || !has_negative {
        return Err(Diagnostic::invalid_cash_flow_sign());
    }

    let mut seeds_tried = 0;
    for seed in seed_rates(config) {
        seeds_tried += 1;
        match newton_from_seed(cashflows, seed, config) {
            Ok(SeedOutcome::Converged(solution)) => {
                log::debug!(
                    "IRR {} converged from seed {} in {} iterations",
                    solution.irr,
                    seed,
                    solution.iterations
                );
                return Ok(solution);
            }
            Ok(outcome) => log::debug!("seed {} abandoned: {:?}", seed, outcome),
            Err(err) => log::debug!("seed {} abandoned: {}", seed, err),
        }
    }

    Err(Diagnostic::convergence_failure(seeds_tried, config.max_iterations))
}
