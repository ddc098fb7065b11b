//! Discrete cash flow series produced by the period normalizer

use crate::project::PeriodUnit;
use serde::Serialize;
use std::ops::Deref;

/// Zero-indexed cash flows; index 0 is the initial outlay
///
/// Read-only once built. Dereferences to `[f64]` so it can be handed
/// straight to the evaluators and the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowSeries {
    values: Vec<f64>,
    period_unit: PeriodUnit,
}

impl CashFlowSeries {
    pub(crate) fn new(values: Vec<f64>, period_unit: PeriodUnit) -> Self {
        Self { values, period_unit }
    }

    /// Unit every index after 0 is expressed in
    pub fn period_unit(&self) -> PeriodUnit {
        self.period_unit
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Deref for CashFlowSeries {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values
    }
}
