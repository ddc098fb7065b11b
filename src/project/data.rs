//! Project record structures matching the stored project format

use serde::{Deserialize, Serialize};

/// Longest schedule or holding period a project may span
pub const MAX_HOLDING_YEARS: u32 = 100;

/// Granularity of a periodic cash flow's period index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Monthly,
    Annual,
}

impl PeriodUnit {
    /// Number of periods of this unit in one year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PeriodUnit::Monthly => 12,
            PeriodUnit::Annual => 1,
        }
    }

    /// Last period index a series of this unit may reach
    pub fn max_period(&self) -> u32 {
        MAX_HOLDING_YEARS * self.periods_per_year()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Monthly => "monthly",
            PeriodUnit::Annual => "annual",
        }
    }
}

/// Unit the sale's holding period is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldingPeriodUnit {
    Months,
    Years,
}

/// Upfront costs of acquiring the property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialInvestment {
    pub purchase_price: f64,
    #[serde(default)]
    pub closing_costs: f64,
    #[serde(default)]
    pub renovation_costs: f64,
    #[serde(default)]
    pub other_expenses: f64,
}

impl InitialInvestment {
    pub fn new(purchase_price: f64, closing_costs: f64, renovation_costs: f64, other_expenses: f64) -> Self {
        Self {
            purchase_price,
            closing_costs,
            renovation_costs,
            other_expenses,
        }
    }

    /// Total upfront outlay, recomputed from the components on every call
    pub fn total(&self) -> f64 {
        self.purchase_price + self.closing_costs + self.renovation_costs + self.other_expenses
    }
}

/// Income and expenses for one period of the holding schedule
///
/// There is no stored net field: a `netCashFlow` key in an
/// input file is ignored and the net is always derived from the components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodicCashFlow {
    /// 1-based period index in `period_unit`
    pub period: u32,
    pub period_unit: PeriodUnit,
    #[serde(default)]
    pub rental_income: f64,
    #[serde(default)]
    pub operating_expenses: f64,
    #[serde(default)]
    pub debt_service: f64,
    #[serde(default)]
    pub vacancy_loss: f64,
}

impl PeriodicCashFlow {
    pub fn new(
        period: u32,
        period_unit: PeriodUnit,
        rental_income: f64,
        operating_expenses: f64,
        debt_service: f64,
        vacancy_loss: f64,
    ) -> Self {
        Self {
            period,
            period_unit,
            rental_income,
            operating_expenses,
            debt_service,
            vacancy_loss,
        }
    }

    /// Income-only entry, handy for schedules with no itemized expenses
    pub fn income(period: u32, period_unit: PeriodUnit, amount: f64) -> Self {
        Self::new(period, period_unit, amount, 0.0, 0.0, 0.0)
    }

    pub fn net_cash_flow(&self) -> f64 {
        self.rental_income - self.operating_expenses - self.debt_service - self.vacancy_loss
    }
}

/// Projected sale at the end of the holding period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleProceeds {
    pub estimated_sale_price: f64,
    #[serde(default)]
    pub selling_costs: f64,
    pub holding_period: f64,
    pub holding_period_unit: HoldingPeriodUnit,
}

impl SaleProceeds {
    pub fn new(
        estimated_sale_price: f64,
        selling_costs: f64,
        holding_period: f64,
        holding_period_unit: HoldingPeriodUnit,
    ) -> Self {
        Self {
            estimated_sale_price,
            selling_costs,
            holding_period,
            holding_period_unit,
        }
    }

    pub fn net_proceeds(&self) -> f64 {
        self.estimated_sale_price - self.selling_costs
    }
}

/// A project as stored, before any validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub initial_investment: Option<InitialInvestment>,
    #[serde(default)]
    pub cash_flows: Option<Vec<PeriodicCashFlow>>,
    #[serde(default)]
    pub sale_proceeds: Option<SaleProceeds>,
}

impl ProjectRecord {
    pub fn new(
        name: impl Into<String>,
        initial_investment: InitialInvestment,
        cash_flows: Vec<PeriodicCashFlow>,
        sale_proceeds: SaleProceeds,
    ) -> Self {
        Self {
            name: name.into(),
            initial_investment: Some(initial_investment),
            cash_flows: Some(cash_flows),
            sale_proceeds: Some(sale_proceeds),
        }
    }
}

/// A project whose fields passed validation
///
/// Only `ProjectRecord::validate` constructs this, so holding one proves
/// every sub-object is present and every field is in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedProject {
    name: String,
    initial_investment: InitialInvestment,
    cash_flows: Vec<PeriodicCashFlow>,
    sale_proceeds: SaleProceeds,
}

impl ValidatedProject {
    pub(super) fn from_parts(
        name: String,
        initial_investment: InitialInvestment,
        cash_flows: Vec<PeriodicCashFlow>,
        sale_proceeds: SaleProceeds,
    ) -> Self {
        Self {
            name,
            initial_investment,
            cash_flows,
            sale_proceeds,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_investment(&self) -> &InitialInvestment {
        &self.initial_investment
    }

    pub fn cash_flows(&self) -> &[PeriodicCashFlow] {
        &self.cash_flows
    }

    pub fn sale_proceeds(&self) -> &SaleProceeds {
        &self.sale_proceeds
    }

    /// Give the record back, e.g. to edit and re-validate it
    pub fn into_record(self) -> ProjectRecord {
        ProjectRecord::new(self.name, self.initial_investment, self.cash_flows, self.sale_proceeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_totals() {
        let investment = InitialInvestment::new(90_000.0, 3_000.0, 5_000.0, 2_000.0);
        assert_eq!(investment.total(), 100_000.0);

        let cf = PeriodicCashFlow::new(1, PeriodUnit::Annual, 12_000.0, 4_000.0, 4_500.0, 500.0);
        assert_eq!(cf.net_cash_flow(), 3_000.0);

        let sale = SaleProceeds::new(125_000.0, 2_000.0, 2.0, HoldingPeriodUnit::Years);
        assert_eq!(sale.net_proceeds(), 123_000.0);
    }

    #[test]
    fn test_stored_net_value_is_ignored() {
        let json = r#"{
            "period": 3,
            "periodUnit": "monthly",
            "rentalIncome": 1000,
            "operatingExpenses": 200,
            "debtService": 500,
            "vacancyLoss": 50,
            "netCashFlow": 999999
        }"#;
        let cf: PeriodicCashFlow = serde_json::from_str(json).unwrap();

        assert_eq!(cf.period_unit, PeriodUnit::Monthly);
        assert_eq!(cf.net_cash_flow(), 250.0);
    }

    #[test]
    fn test_record_with_missing_parts_deserializes() {
        let record: ProjectRecord = serde_json::from_str(r#"{"name": "draft"}"#).unwrap();
        assert_eq!(record.name, "draft");
        assert!(record.initial_investment.is_none());
        assert!(record.cash_flows.is_none());
        assert!(record.sale_proceeds.is_none());
    }

    #[test]
    fn test_periods_per_year() {
        assert_eq!(PeriodUnit::Monthly.periods_per_year(), 12);
        assert_eq!(PeriodUnit::Annual.periods_per_year(), 1);
        assert_eq!(PeriodUnit::Monthly.max_period(), 1_200);
        assert_eq!(PeriodUnit::Annual.max_period(), 100);
    }
}
