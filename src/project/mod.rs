//! Project record types, validation and loading

mod data;
mod validate;
pub mod loader;

pub use data::{
    HoldingPeriodUnit, InitialInvestment, PeriodUnit, PeriodicCashFlow, ProjectRecord,
    SaleProceeds, ValidatedProject, MAX_HOLDING_YEARS,
};
pub use validate::ValidationError;
pub use loader::{load_cash_flows, load_project, load_projects, LoadError};
