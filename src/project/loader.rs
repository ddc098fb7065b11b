//! Load project records from JSON files and cash flow schedules from CSV

use super::{PeriodUnit, PeriodicCashFlow, ProjectRecord, ValidationError};
use csv::Reader;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid cash flow CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown period unit '{unit}' in row {row}")]
    UnknownUnit { row: usize, unit: String },

    #[error("project '{name}' is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: ValidationError,
    },
}

/// Raw CSV row of a cash flow schedule
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Period")]
    period: u32,
    #[serde(rename = "PeriodUnit")]
    period_unit: String,
    #[serde(rename = "RentalIncome", default)]
    rental_income: f64,
    #[serde(rename = "OperatingExpenses", default)]
    operating_expenses: f64,
    #[serde(rename = "DebtService", default)]
    debt_service: f64,
    #[serde(rename = "VacancyLoss", default)]
    vacancy_loss: f64,
}

impl CsvRow {
    fn to_cash_flow(self, row: usize) -> Result<PeriodicCashFlow, LoadError> {
        let period_unit = match self.period_unit.trim().to_ascii_lowercase().as_str() {
            "monthly" => PeriodUnit::Monthly,
            "annual" => PeriodUnit::Annual,
            _ => {
                return Err(LoadError::UnknownUnit {
                    row,
                    unit: self.period_unit,
                })
            }
        };

        Ok(PeriodicCashFlow::new(
            self.period,
            period_unit,
            self.rental_income,
            self.operating_expenses,
            self.debt_service,
            self.vacancy_loss,
        ))
    }
}

/// Load a single project record from a JSON file
pub fn load_project<P: AsRef<Path>>(path: P) -> Result<ProjectRecord, LoadError> {
    let file = File::open(path)?;
    load_project_from_reader(BufReader::new(file))
}

pub fn load_project_from_reader<R: Read>(reader: R) -> Result<ProjectRecord, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a JSON array of project records
pub fn load_projects<P: AsRef<Path>>(path: P) -> Result<Vec<ProjectRecord>, LoadError> {
    let file = File::open(path)?;
    load_projects_from_reader(BufReader::new(file))
}

pub fn load_projects_from_reader<R: Read>(reader: R) -> Result<Vec<ProjectRecord>, LoadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Load a cash flow schedule from a CSV file
pub fn load_cash_flows<P: AsRef<Path>>(path: P) -> Result<Vec<PeriodicCashFlow>, LoadError> {
    let file = File::open(path)?;
    load_cash_flows_from_reader(file)
}

/// Load a cash flow schedule from any reader (e.g., string buffer)
pub fn load_cash_flows_from_reader<R: Read>(reader: R) -> Result<Vec<PeriodicCashFlow>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut cash_flows = Vec::new();

    for (i, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header is line 1
        cash_flows.push(row.to_cash_flow(i + 2)?);
    }

    Ok(cash_flows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::HoldingPeriodUnit;

    const PROJECT_JSON: &str = r#"{
        "name": "Elm St duplex",
        "initialInvestment": {
            "purchasePrice": 90000,
            "closingCosts": 3000,
            "renovationCosts": 5000,
            "otherExpenses": 2000
        },
        "cashFlows": [
            {"period": 1, "periodUnit": "annual", "rentalIncome": 12000,
             "operatingExpenses": 4000, "debtService": 5000, "vacancyLoss": 0},
            {"period": 2, "periodUnit": "annual", "rentalIncome": 12500,
             "operatingExpenses": 4000, "debtService": 5000, "vacancyLoss": 0}
        ],
        "saleProceeds": {
            "estimatedSalePrice": 125000,
            "sellingCosts": 2000,
            "holdingPeriod": 2,
            "holdingPeriodUnit": "years"
        }
    }"#;

    #[test]
    fn test_load_project_json() {
        let record = load_project_from_reader(PROJECT_JSON.as_bytes()).unwrap();
        assert_eq!(record.name, "Elm St duplex");

        let investment = record.initial_investment.as_ref().unwrap();
        assert_eq!(investment.total(), 100_000.0);

        let cash_flows = record.cash_flows.as_ref().unwrap();
        assert_eq!(cash_flows.len(), 2);
        assert_eq!(cash_flows[1].net_cash_flow(), 3_500.0);

        let sale = record.sale_proceeds.as_ref().unwrap();
        assert_eq!(sale.holding_period_unit, HoldingPeriodUnit::Years);
        assert_eq!(sale.net_proceeds(), 123_000.0);
    }

    #[test]
    fn test_load_project_array() {
        let json = format!("[{}, {{\"name\": \"empty\"}}]", PROJECT_JSON);
        let records = load_projects_from_reader(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[1].sale_proceeds.is_none());
    }

    #[test]
    fn test_load_cash_flows_csv() {
        let csv = "Period,PeriodUnit,RentalIncome,OperatingExpenses,DebtService,VacancyLoss\n\
                   1,Monthly,1000,200,500,50\n\
                   2,monthly,1000,200,500,50\n\
                   1,ANNUAL,12000,0,0,0\n";
        let cash_flows = load_cash_flows_from_reader(csv.as_bytes()).unwrap();

        assert_eq!(cash_flows.len(), 3);
        assert_eq!(cash_flows[0].period_unit, PeriodUnit::Monthly);
        assert_eq!(cash_flows[0].net_cash_flow(), 250.0);
        assert_eq!(cash_flows[2].period_unit, PeriodUnit::Annual);
    }

    #[test]
    fn test_unknown_unit_reports_row() {
        let csv = "Period,PeriodUnit,RentalIncome,OperatingExpenses,DebtService,VacancyLoss\n\
                   1,monthly,1000,0,0,0\n\
                   2,weekly,1000,0,0,0\n";
        match load_cash_flows_from_reader(csv.as_bytes()) {
            Err(LoadError::UnknownUnit { row, unit }) => {
                assert_eq!(row, 3);
                assert_eq!(unit, "weekly");
            }
            other => panic!("expected UnknownUnit, got {:?}", other),
        }
    }
}
