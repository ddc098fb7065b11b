//! Period normalization
//!
//! Converts an investment's initial outlay, its mixed monthly/annual
//! schedule and the terminal sale into one `CashFlowSeries`:
//! - target unit is monthly if any entry is monthly, otherwise annual
//! - annual entries spread evenly over their 12 months when the target is monthly
//! - monthly entries roll up into `ceil(period / 12)` when the target is annual
//! - sale proceeds are added (not assigned) at the holding period index

use super::CashFlowSeries;
use crate::error::{CalcError, CalcResult, ProjectPart};
use crate::project::{HoldingPeriodUnit, InitialInvestment, PeriodUnit, PeriodicCashFlow, SaleProceeds};
use std::collections::BTreeMap;

const MONTHS_PER_YEAR: u32 = 12;

/// Target unit for the whole schedule
///
/// A single monthly entry switches every entry to monthly granularity.
pub fn target_unit(cash_flows: &[PeriodicCashFlow]) -> PeriodUnit {
    if cash_flows.iter().any(|cf| cf.period_unit == PeriodUnit::Monthly) {
        PeriodUnit::Monthly
    } else {
        PeriodUnit::Annual
    }
}

/// Checked target-unit index; series never extend past `target.max_period()`
fn check_period(period: u64, target: PeriodUnit) -> CalcResult<u32> {
    let max = target.max_period();
    match u32::try_from(period) {
        Ok(index) if index <= max => Ok(index),
        _ => Err(CalcError::PeriodOutOfRange {
            period,
            max: u64::from(max),
        }),
    }
}

/// Accumulate each entry's net cash flow into target-unit periods
fn accumulate_periods(
    cash_flows: &[PeriodicCashFlow],
    target: PeriodUnit,
) -> CalcResult<BTreeMap<u32, f64>> {
    let mut by_period: BTreeMap<u32, f64> = BTreeMap::new();
    let months_per_year = u64::from(MONTHS_PER_YEAR);

    for cf in cash_flows {
        let net = cf.net_cash_flow();
        match (cf.period_unit, target) {
            (PeriodUnit::Annual, PeriodUnit::Monthly) => {
                let last_month = check_period(u64::from(cf.period) * months_per_year, target)?;
                let first_month = last_month.saturating_sub(MONTHS_PER_YEAR - 1);
                let monthly = net / MONTHS_PER_YEAR as f64;
                for month in first_month..=last_month {
                    *by_period.entry(month).or_insert(0.0) += monthly;
                }
            }
            (PeriodUnit::Monthly, PeriodUnit::Annual) => {
                let year = check_period(u64::from(cf.period.div_ceil(MONTHS_PER_YEAR)), target)?;
                *by_period.entry(year).or_insert(0.0) += net;
            }
            _ => {
                let period = check_period(u64::from(cf.period), target)?;
                *by_period.entry(period).or_insert(0.0) += net;
            }
        }
    }

    Ok(by_period)
}

/// Holding period expressed as a series index in the target unit
///
/// A fractional holding period lands in the period containing it.
///
/// # Errors
/// `InvalidHoldingPeriod` unless the holding period is positive and finite,
/// `PeriodOutOfRange` past `target.max_period()`.
pub fn holding_period_index(sale: &SaleProceeds, target: PeriodUnit) -> CalcResult<usize> {
    if !(sale.holding_period.is_finite() && sale.holding_period > 0.0) {
        return Err(CalcError::InvalidHoldingPeriod {
            holding_period: sale.holding_period,
        });
    }

    let months = MONTHS_PER_YEAR as f64;
    let converted = match (sale.holding_period_unit, target) {
        (HoldingPeriodUnit::Months, PeriodUnit::Annual) => (sale.holding_period / months).ceil(),
        (HoldingPeriodUnit::Years, PeriodUnit::Monthly) => sale.holding_period * months,
        _ => sale.holding_period,
    };
    // Float to int casts saturate, so an enormous period still fails the range check
    let index = check_period(converted.ceil() as u64, target)?;
    Ok(index as usize)
}

/// Build the zero-indexed cash flow series for a project
///
/// # Errors
/// `MissingProjectData` naming the first absent argument, `InvalidHoldingPeriod`
/// for a sale that is not in the future, and `PeriodOutOfRange` for a cash flow
/// or sale past the longest supported schedule.
pub fn build_cash_flow_series(
    initial_investment: Option<&InitialInvestment>,
    cash_flows: Option<&[PeriodicCashFlow]>,
    sale_proceeds: Option<&SaleProceeds>,
) -> CalcResult<CashFlowSeries> {
    let initial_investment = initial_investment.ok_or(CalcError::MissingProjectData {
        part: ProjectPart::InitialInvestment,
    })?;
    let cash_flows = cash_flows.ok_or(CalcError::MissingProjectData {
        part: ProjectPart::CashFlows,
    })?;
    let sale_proceeds = sale_proceeds.ok_or(CalcError::MissingProjectData {
        part: ProjectPart::SaleProceeds,
    })?;

    let target = target_unit(cash_flows);
    let by_period = accumulate_periods(cash_flows, target)?;
    let sale_index = holding_period_index(sale_proceeds, target)?;
    let max_period = by_period.keys().next_back().copied().unwrap_or(0) as usize;

    let mut values = vec![0.0; max_period.max(sale_index) + 1];
    values[0] = -initial_investment.total();
    // Index 0 is reserved for the initial outlay
    for (&period, &amount) in by_period.range(1u32..) {
        values[period as usize] = amount;
    }
    values[sale_index] += sale_proceeds.net_proceeds();

    log::debug!(
        "Built {} cash flow series: {} periods, sale at index {}",
        target.as_str(),
        values.len() - 1,
        sale_index
    );

    Ok(CashFlowSeries::new(values, target))
}
