//! Project IRR analysis
//!
//! Builds the cash flow series for a project, solves for its IRR and
//! classifies what went wrong (or what to be careful about) as a
//! `Diagnostic` on the returned `IrrResult`.

use crate::cashflow::{build_cash_flow_series, CashFlowSeries};
use crate::config::SolverConfig;
use crate::error::Diagnostic;
use crate::irr::{may_have_multiple_roots, solve_irr};
use crate::project::{
    InitialInvestment, PeriodUnit, PeriodicCashFlow, ProjectRecord, SaleProceeds, ValidatedProject,
};
use serde::Serialize;

/// Outcome of an IRR analysis
///
/// `irr` and `npv` are both present or both absent. A warning diagnostic
/// may accompany a result; an error diagnostic always accompanies a failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IrrResult {
    /// Periodic IRR in the unit of the solved series
    pub irr: Option<f64>,
    /// NPV at `irr`
    pub npv: Option<f64>,
    pub diagnostic: Option<Diagnostic>,
    /// Unit of the solved series, when one was built
    pub period_unit: Option<PeriodUnit>,
}

impl IrrResult {
    pub fn success(irr: f64, npv: f64, period_unit: PeriodUnit) -> Self {
        Self {
            irr: Some(irr),
            npv: Some(npv),
            diagnostic: None,
            period_unit: Some(period_unit),
        }
    }

    pub fn failure(diagnostic: Diagnostic, period_unit: Option<PeriodUnit>) -> Self {
        Self {
            irr: None,
            npv: None,
            diagnostic: Some(diagnostic),
            period_unit,
        }
    }

    pub fn with_diagnostic(mut self, diagnostic: Diagnostic) -> Self {
        self.diagnostic = Some(diagnostic);
        self
    }

    pub fn is_success(&self) -> bool {
        self.irr.is_some()
    }

    /// Annual effective IRR: (1 + r)^12 - 1 for a monthly series
    pub fn annualized_irr(&self) -> Option<f64> {
        let irr = self.irr?;
        match self.period_unit? {
            PeriodUnit::Annual => Some(irr),
            unit => Some((1.0 + irr).powi(unit.periods_per_year() as i32) - 1.0),
        }
    }
}

/// Solve an already-built series and classify the outcome
pub fn analyze_series(series: &CashFlowSeries, config: &SolverConfig) -> IrrResult {
    let unit = series.period_unit();
    let multiple_roots = may_have_multiple_roots(series);

    match solve_irr(series, config) {
        Ok(solution) => {
            let result = IrrResult::success(solution.irr, solution.npv, unit);
            if multiple_roots {
                log::warn!(
                    "IRR {:.6} found, but the cash flows change sign more than once",
                    solution.irr
                );
                result.with_diagnostic(Diagnostic::possible_multiple_roots())
            } else {
                result
            }
        }
        // A solver failure outranks the multiplicity warning
        Err(diagnostic) => IrrResult::failure(diagnostic, Some(unit)),
    }
}

fn analyze_parts(
    initial_investment: Option<&InitialInvestment>,
    cash_flows: Option<&[PeriodicCashFlow]>,
    sale_proceeds: Option<&SaleProceeds>,
    config: &SolverConfig,
) -> IrrResult {
    match build_cash_flow_series(initial_investment, cash_flows, sale_proceeds) {
        Ok(series) => analyze_series(&series, config),
        Err(err) => IrrResult::failure(Diagnostic::calculation(err), None),
    }
}

/// Compute IRR and NPV for a validated project
pub fn compute_project_irr(project: &ValidatedProject, config: &SolverConfig) -> IrrResult {
    analyze_parts(
        Some(project.initial_investment()),
        Some(project.cash_flows()),
        Some(project.sale_proceeds()),
        config,
    )
}

/// Compute IRR and NPV for a stored record without field-level validation
///
/// Missing sub-objects surface as a `Calculation` diagnostic.
pub fn compute_record_irr(record: &ProjectRecord, config: &SolverConfig) -> IrrResult {
    analyze_parts(
        record.initial_investment.as_ref(),
        record.cash_flows.as_deref(),
        record.sale_proceeds.as_ref(),
        config,
    )
}
