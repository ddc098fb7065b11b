//! Property IRR - IRR and NPV engine for property investment schedules
//!
//! This library provides:
//! - Project records (initial investment, periodic cash flows, sale) with validation
//! - Period normalization of mixed monthly/annual schedules into one series
//! - NPV and NPV-derivative evaluation
//! - Multi-seed Newton-Raphson IRR solving with a root-multiplicity warning

pub mod error;
pub mod config;
pub mod project;
pub mod cashflow;
pub mod irr;
pub mod analysis;

// Re-export commonly used types
pub use error::{CalcError, Diagnostic, DiagnosticKind, Severity};
pub use config::SolverConfig;
pub use project::{InitialInvestment, PeriodicCashFlow, ProjectRecord, SaleProceeds, ValidatedProject};
pub use cashflow::{build_cash_flow_series, evaluate_npv, evaluate_npv_derivative, CashFlowSeries};
pub use irr::{may_have_multiple_roots, solve_irr, IrrSolution};
pub use analysis::{compute_project_irr, compute_record_irr, IrrResult};
