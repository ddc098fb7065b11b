//! Field-level validation turning a stored record into a `ValidatedProject`

use super::{
    HoldingPeriodUnit, InitialInvestment, PeriodicCashFlow, ProjectRecord, SaleProceeds,
    ValidatedProject, MAX_HOLDING_YEARS,
};
use thiserror::Error;

/// Why a project record was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("project is missing its {0}")]
    Missing(&'static str),

    #[error("cash flow schedule must contain at least one entry")]
    EmptySchedule,

    #[error("{field} must be a non-negative finite amount, got {value}")]
    InvalidAmount { field: String, value: f64 },

    #[error("cash flow #{index} has period {period}; periods start at 1")]
    InvalidPeriod { index: usize, period: u32 },

    #[error("cash flow #{index} has period {period}; the last allowed period is {max}")]
    PeriodTooLarge { index: usize, period: u32, max: u32 },

    #[error("holding period must be a positive finite number, got {0}")]
    InvalidHoldingPeriod(f64),

    #[error("holding period of {holding_period} exceeds {max_years} years")]
    HoldingPeriodTooLong { holding_period: f64, max_years: u32 },
}

fn check_amount(field: impl Into<String>, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount {
            field: field.into(),
            value,
        })
    }
}

fn check_investment(investment: &InitialInvestment) -> Result<(), ValidationError> {
    check_amount("purchasePrice", investment.purchase_price)?;
    check_amount("closingCosts", investment.closing_costs)?;
    check_amount("renovationCosts", investment.renovation_costs)?;
    check_amount("otherExpenses", investment.other_expenses)
}

fn check_cash_flow(index: usize, cf: &PeriodicCashFlow) -> Result<(), ValidationError> {
    if cf.period == 0 {
        return Err(ValidationError::InvalidPeriod { index, period: cf.period });
    }
    let max = cf.period_unit.max_period();
    if cf.period > max {
        return Err(ValidationError::PeriodTooLarge { index, period: cf.period, max });
    }
    check_amount(format!("cashFlows[{}].rentalIncome", index), cf.rental_income)?;
    check_amount(format!("cashFlows[{}].operatingExpenses", index), cf.operating_expenses)?;
    check_amount(format!("cashFlows[{}].debtService", index), cf.debt_service)?;
    check_amount(format!("cashFlows[{}].vacancyLoss", index), cf.vacancy_loss)
}

fn check_sale(sale: &SaleProceeds) -> Result<(), ValidationError> {
    check_amount("estimatedSalePrice", sale.estimated_sale_price)?;
    check_amount("sellingCosts", sale.selling_costs)?;
    if !(sale.holding_period.is_finite() && sale.holding_period > 0.0) {
        return Err(ValidationError::InvalidHoldingPeriod(sale.holding_period));
    }
    let years = match sale.holding_period_unit {
        HoldingPeriodUnit::Months => sale.holding_period / 12.0,
        HoldingPeriodUnit::Years => sale.holding_period,
    };
    if years > f64::from(MAX_HOLDING_YEARS) {
        return Err(ValidationError::HoldingPeriodTooLong {
            holding_period: sale.holding_period,
            max_years: MAX_HOLDING_YEARS,
        });
    }
    Ok(())
}

impl ProjectRecord {
    /// Check every field and hand back a `ValidatedProject`
    pub fn validate(self) -> Result<ValidatedProject, ValidationError> {
        let initial_investment = self
            .initial_investment
            .ok_or(ValidationError::Missing("initial investment"))?;
        let cash_flows = self
            .cash_flows
            .ok_or(ValidationError::Missing("cash flow schedule"))?;
        let sale_proceeds = self
            .sale_proceeds
            .ok_or(ValidationError::Missing("sale proceeds"))?;

        check_investment(&initial_investment)?;
        if cash_flows.is_empty() {
            return Err(ValidationError::EmptySchedule);
        }
        for (index, cf) in cash_flows.iter().enumerate() {
            check_cash_flow(index, cf)?;
        }
        check_sale(&sale_proceeds)?;

        Ok(ValidatedProject::from_parts(
            self.name,
            initial_investment,
            cash_flows,
            sale_proceeds,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::PeriodUnit;

    fn valid_record() -> ProjectRecord {
        ProjectRecord::new(
            "Elm St",
            InitialInvestment::new(90_000.0, 3_000.0, 5_000.0, 2_000.0),
            vec![
                PeriodicCashFlow::income(1, PeriodUnit::Annual, 3_000.0),
                PeriodicCashFlow::income(2, PeriodUnit::Annual, 3_500.0),
            ],
            SaleProceeds::new(125_000.0, 2_000.0, 2.0, HoldingPeriodUnit::Years),
        )
    }

    #[test]
    fn test_valid_record_passes() {
        let project = valid_record().validate().unwrap();
        assert_eq!(project.name(), "Elm St");
        assert_eq!(project.cash_flows().len(), 2);
        assert_eq!(project.initial_investment().total(), 100_000.0);
    }

    #[test]
    fn test_missing_sale_rejected() {
        let mut record = valid_record();
        record.sale_proceeds = None;
        assert_eq!(record.validate(), Err(ValidationError::Missing("sale proceeds")));
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let mut record = valid_record();
        record.cash_flows = Some(Vec::new());
        assert_eq!(record.validate(), Err(ValidationError::EmptySchedule));
    }

    #[test]
    fn test_negative_component_rejected() {
        let mut record = valid_record();
        if let Some(cash_flows) = record.cash_flows.as_mut() {
            cash_flows[1].debt_service = -10.0;
        }
        match record.validate() {
            Err(ValidationError::InvalidAmount { field, value }) => {
                assert_eq!(field, "cashFlows[1].debtService");
                assert_eq!(value, -10.0);
            }
            other => panic!("expected InvalidAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut record = valid_record();
        if let Some(cash_flows) = record.cash_flows.as_mut() {
            cash_flows[0].period = 0;
        }
        assert_eq!(
            record.validate(),
            Err(ValidationError::InvalidPeriod { index: 0, period: 0 })
        );
    }

    #[test]
    fn test_non_positive_holding_period_rejected() {
        let mut record = valid_record();
        if let Some(sale) = record.sale_proceeds.as_mut() {
            sale.holding_period = 0.0;
        }
        assert_eq!(record.validate(), Err(ValidationError::InvalidHoldingPeriod(0.0)));
    }

    #[test]
    fn test_period_past_limit_rejected() {
        let mut record = valid_record();
        if let Some(cash_flows) = record.cash_flows.as_mut() {
            cash_flows[1].period = 400_000_000;
        }
        assert_eq!(
            record.validate(),
            Err(ValidationError::PeriodTooLarge { index: 1, period: 400_000_000, max: 100 })
        );
    }

    #[test]
    fn test_monthly_limit_counts_months() {
        let mut record = valid_record();
        record.cash_flows = Some(vec![
            PeriodicCashFlow::income(1_200, PeriodUnit::Monthly, 100.0),
            PeriodicCashFlow::income(1_201, PeriodUnit::Monthly, 100.0),
        ]);
        assert_eq!(
            record.validate(),
            Err(ValidationError::PeriodTooLarge { index: 1, period: 1_201, max: 1_200 })
        );
    }

    #[test]
    fn test_holding_period_past_limit_rejected() {
        let mut record = valid_record();
        if let Some(sale) = record.sale_proceeds.as_mut() {
            sale.holding_period = 1.0e12;
        }
        assert_eq!(
            record.validate(),
            Err(ValidationError::HoldingPeriodTooLong { holding_period: 1.0e12, max_years: 100 })
        );

        // 1200 months is exactly the limit
        let mut record = valid_record();
        record.sale_proceeds = Some(SaleProceeds::new(1.0, 0.0, 1_200.0, HoldingPeriodUnit::Months));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_record() {
        let project = valid_record().validate().unwrap();
        let record = project.clone().into_record();
        assert_eq!(record.validate().unwrap(), project);
    }
}
