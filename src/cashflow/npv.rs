//! Net present value of a periodic cash flow series and its rate derivative

use crate::error::{CalcError, CalcResult};

fn check_inputs(cashflows: &[f64], rate: f64) -> CalcResult<()> {
    if cashflows.is_empty() {
        return Err(CalcError::EmptySeries);
    }
    if rate <= -1.0 || rate.is_nan() {
        return Err(CalcError::InvalidRate { rate });
    }
    Ok(())
}

/// Calculate NPV at a given periodic rate
///
/// Σ cf[t] / (1 + rate)^t, with the first cash flow undiscounted.
///
/// # Errors
/// * `EmptySeries` - no cash flows
/// * `InvalidRate` - `rate <= -1`, where discounting divides by zero
pub fn evaluate_npv(cashflows: &[f64], rate: f64) -> CalcResult<f64> {
    check_inputs(cashflows, rate)?;

    Ok(cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum())
}

/// Calculate d(NPV)/d(rate) at a given periodic rate
///
/// Σ -t·cf[t] / (1 + rate)^(t+1) for t >= 1; the initial cash flow
/// does not depend on the rate. Same errors as `evaluate_npv`.
pub fn evaluate_npv_derivative(cashflows: &[f64], rate: f64) -> CalcResult<f64> {
    check_inputs(cashflows, rate)?;

    Ok(cashflows
        .iter()
        .enumerate()
        .skip(1)
        .map(|(t, &cf)| -(t as f64) * cf / (1.0 + rate).powi(t as i32 + 1))
        .sum())
}
