//! Property IRR CLI
//!
//! Loads project files, runs the IRR engine and prints the results.
//! Solver defaults can be set via IRR_INITIAL_GUESS, IRR_MAX_ITERATIONS
//! and IRR_PRECISION; command-line flags take precedence.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use property_irr::{
    build_cash_flow_series, compute_project_irr, evaluate_npv,
    project::{load_cash_flows, load_project, load_projects, LoadError, ValidatedProject},
    IrrResult, SolverConfig,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "property_irr", version, about = "IRR and NPV for property investments")]
struct Cli {
    #[command(flatten)]
    solver: SolverArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SolverArgs {
    /// First seed rate for Newton-Raphson
    #[arg(long, global = true)]
    initial_guess: Option<f64>,

    /// Maximum iterations per seed
    #[arg(long, global = true)]
    max_iterations: Option<u32>,

    /// Convergence threshold on the rate step
    #[arg(long, global = true)]
    precision: Option<f64>,
}

impl SolverArgs {
    fn to_config(&self) -> SolverConfig {
        let mut config = SolverConfig::from_env();
        if let Some(initial_guess) = self.initial_guess {
            config = config.with_initial_guess(initial_guess);
        }
        if let Some(max_iterations) = self.max_iterations {
            config = config.with_max_iterations(max_iterations);
        }
        if let Some(precision) = self.precision {
            config = config.with_precision(precision);
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Compute IRR and NPV for one project file
    Analyze {
        project: PathBuf,
        /// Replace the project's cash flow schedule with one loaded from CSV
        #[arg(long)]
        cash_flows: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Compute IRR for every project in a JSON array file
    Batch {
        projects: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print the normalized cash flow series for a project
    Series { project: PathBuf },
    /// NPV of a project's normalized series at a given periodic rate
    Npv {
        project: PathBuf,
        #[arg(long)]
        rate: f64,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectReport {
    name: String,
    #[serde(flatten)]
    result: Option<IrrResult>,
    annualized_irr: Option<f64>,
    error: Option<String>,
}

impl ProjectReport {
    fn from_result(name: &str, result: IrrResult) -> Self {
        Self {
            name: name.to_string(),
            annualized_irr: result.annualized_irr(),
            result: Some(result),
            error: None,
        }
    }

    fn invalid(name: &str, error: String) -> Self {
        Self {
            name: name.to_string(),
            result: None,
            annualized_irr: None,
            error: Some(error),
        }
    }
}

fn load_validated(path: &Path, cash_flows: Option<&Path>) -> Result<ValidatedProject> {
    let mut record = load_project(path)
        .with_context(|| format!("failed to load project {}", path.display()))?;
    if let Some(csv_path) = cash_flows {
        let schedule = load_cash_flows(csv_path)
            .with_context(|| format!("failed to load cash flows {}", csv_path.display()))?;
        log::info!("Loaded {} cash flows from {}", schedule.len(), csv_path.display());
        record.cash_flows = Some(schedule);
    }

    let name = record.name.clone();
    record
        .validate()
        .map_err(|source| LoadError::Invalid { name, source })
        .with_context(|| format!("project {} failed validation", path.display()))
}

fn print_report(report: &ProjectReport) {
    println!("Project: {}", report.name);

    if let Some(error) = &report.error {
        println!("  Invalid: {}", error);
        return;
    }
    let Some(result) = &report.result else {
        return;
    };

    match (result.irr, result.npv) {
        (Some(irr), Some(npv)) => {
            let unit = result.period_unit.map(|u| u.as_str()).unwrap_or("periodic");
            println!("  IRR ({}): {:.4}%", unit, irr * 100.0);
            if let Some(annual) = report.annualized_irr {
                println!("  IRR (annualized): {:.4}%", annual * 100.0);
            }
            println!("  NPV at IRR: {:.6}", npv);
        }
        _ => println!("  IRR: n/a"),
    }
    if let Some(diagnostic) = &result.diagnostic {
        println!("  {}", diagnostic);
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.solver.to_config();
    log::debug!("Solver config: {:?}", config);

    match cli.command {
        Command::Analyze { project, cash_flows, json } => {
            let validated = load_validated(&project, cash_flows.as_deref())?;
            let result = compute_project_irr(&validated, &config);
            let report = ProjectReport::from_result(validated.name(), result);
            if json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }
        Command::Batch { projects, json } => {
            let start = Instant::now();
            let records = load_projects(&projects)
                .with_context(|| format!("failed to load projects {}", projects.display()))?;
            log::info!("Loaded {} projects from {}", records.len(), projects.display());

            // Each analysis is independent; run them in parallel
            let reports: Vec<ProjectReport> = records
                .into_par_iter()
                .map(|record| {
                    let name = record.name.clone();
                    match record.validate() {
                        Ok(validated) => {
                            ProjectReport::from_result(&name, compute_project_irr(&validated, &config))
                        }
                        Err(err) => ProjectReport::invalid(&name, err.to_string()),
                    }
                })
                .collect();

            log::info!("Analyzed {} projects in {:?}", reports.len(), start.elapsed());
            if json {
                print_json(&reports)?;
            } else {
                for report in &reports {
                    print_report(report);
                }
            }
        }
        Command::Series { project } => {
            let validated = load_validated(&project, None)?;
            let series = build_cash_flow_series(
                Some(validated.initial_investment()),
                Some(validated.cash_flows()),
                Some(validated.sale_proceeds()),
            )?;
            println!("{:>6} {:>16}", "Period", "CashFlow");
            println!("{}", "-".repeat(23));
            for (period, cf) in series.iter().enumerate() {
                println!("{:>6} {:>16.2}", period, cf);
            }
            println!("({} periods, {})", series.len() - 1, series.period_unit().as_str());
        }
        Command::Npv { project, rate } => {
            let validated = load_validated(&project, None)?;
            let series = build_cash_flow_series(
                Some(validated.initial_investment()),
                Some(validated.cash_flows()),
                Some(validated.sale_proceeds()),
            )?;
            let npv = evaluate_npv(&series, rate)?;
            println!(
                "NPV at {:.4}% per {} period: {:.2}",
                rate * 100.0,
                series.period_unit().as_str(),
                npv
            );
        }
    }

    Ok(())
}
