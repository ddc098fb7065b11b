//! Error and diagnostic types for the IRR engine
//!
//! Two layers:
//! - `CalcError`: structural misuse of the pure evaluators and normalizer
//! - `Diagnostic`: data-dependent outcomes attached to an `IrrResult`

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A specialized Result type for engine calculations
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised by the evaluators and the period normalizer
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "error", rename_all = "camelCase")]
pub enum CalcError {
    /// NPV or its derivative was evaluated over a zero-length series
    #[error("cash flow series is empty")]
    EmptySeries,

    /// Discount rate at or below -100%, where discounting is undefined
    #[error("discount rate {rate} is at or below -1")]
    InvalidRate { rate: f64 },

    /// A required part of the project record is absent
    #[error("project is missing its {part}")]
    MissingProjectData { part: ProjectPart },

    /// Sale date that is not a positive finite number of periods
    #[error("holding period must be a positive finite number, got {holding_period}")]
    InvalidHoldingPeriod { holding_period: f64 },

    /// A cash flow or the sale falls past the longest series the normalizer builds
    #[error("period {period} is past the last allowed period {max}")]
    PeriodOutOfRange { period: u64, max: u64 },
}

/// Parts of a project record the normalizer requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectPart {
    InitialInvestment,
    CashFlows,
    SaleProceeds,
}

impl fmt::Display for ProjectPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectPart::InitialInvestment => "initial investment",
            ProjectPart::CashFlows => "cash flow schedule",
            ProjectPart::SaleProceeds => "sale proceeds",
        };
        f.write_str(name)
    }
}

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Result is usable but should be interpreted with care
    Warning,
    /// No IRR could be produced
    Error,
}

/// Closed classification of everything that can accompany an `IrrResult`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "cause")]
pub enum DiagnosticKind {
    /// Fewer than two cash flows reached the solver
    InsufficientData,
    /// Series lacks either an outflow or an inflow
    InvalidCashFlowSign,
    /// Every seed was exhausted without meeting the precision threshold
    ConvergenceFailure,
    /// The cash flow series could not be built
    Calculation(CalcError),
    /// More than one sign change; other rates may also zero the NPV
    PossibleMultipleRoots,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::PossibleMultipleRoots => Severity::Warning,
            DiagnosticKind::InsufficientData
            | DiagnosticKind::InvalidCashFlowSign
            | DiagnosticKind::ConvergenceFailure
            | DiagnosticKind::Calculation(_) => Severity::Error,
        }
    }
}

/// A classified message attached to an `IrrResult`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    /// Create a diagnostic; severity follows from the kind
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        let severity = kind.severity();
        Self {
            kind,
            message: message.into(),
            severity,
        }
    }

    pub fn insufficient_data(len: usize) -> Self {
        Self::new(
            DiagnosticKind::InsufficientData,
            format!("at least 2 cash flows are required to compute IRR, got {}", len),
        )
    }

    pub fn invalid_cash_flow_sign() -> Self {
        Self::new(
            DiagnosticKind::InvalidCashFlowSign,
            "cash flows must contain at least one positive and one negative value",
        )
    }

    pub fn convergence_failure(seeds_tried: usize, max_iterations: u32) -> Self {
        Self::new(
            DiagnosticKind::ConvergenceFailure,
            format!(
                "IRR did not converge from {} seed rates within {} iterations each",
                seeds_tried, max_iterations
            ),
        )
    }

    pub fn calculation(err: CalcError) -> Self {
        let message = format!("could not build cash flow series: {}", err);
        Self::new(DiagnosticKind::Calculation(err), message)
    }

    pub fn possible_multiple_roots() -> Self {
        Self::new(
            DiagnosticKind::PossibleMultipleRoots,
            "cash flows change sign more than once; multiple IRR solutions may exist",
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}: {}", label, self.message)
    }
}
