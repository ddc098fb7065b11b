//! Cash flow series construction and present value evaluation

mod npv;
mod normalize;
mod series;

pub use npv::{evaluate_npv, evaluate_npv_derivative};
pub use normalize::{build_cash_flow_series, holding_period_index, target_unit};
pub use series::CashFlowSeries;
