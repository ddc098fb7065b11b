//! Solver configuration
//!
//! Defaults match the engine's published contract; `from_env` lets
//! batch runs tune the search without recompiling:
//!   IRR_INITIAL_GUESS, IRR_MAX_ITERATIONS, IRR_PRECISION

use serde::{Deserialize, Serialize};
use std::env;

/// Default first seed rate (10% per period)
pub const DEFAULT_INITIAL_GUESS: f64 = 0.10;

/// Default Newton-Raphson step budget per seed
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Default step-size convergence threshold
pub const DEFAULT_PRECISION: f64 = 1e-7;

fn default_initial_guess() -> f64 { DEFAULT_INITIAL_GUESS }
fn default_max_iterations() -> u32 { DEFAULT_MAX_ITERATIONS }
fn default_precision() -> f64 { DEFAULT_PRECISION }

/// Newton-Raphson search parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Seed tried before the fixed seed list
    #[serde(default = "default_initial_guess")]
    pub initial_guess: f64,

    /// Maximum Newton steps per seed
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Convergence threshold on |next - rate|, also the flat-derivative cutoff
    #[serde(default = "default_precision")]
    pub precision: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: DEFAULT_INITIAL_GUESS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl SolverConfig {
    pub fn with_initial_guess(mut self, initial_guess: f64) -> Self {
        self.initial_guess = initial_guess;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    /// Defaults overridden by environment variables where set and parseable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            initial_guess: lookup("IRR_INITIAL_GUESS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.initial_guess),
            max_iterations: lookup("IRR_MAX_ITERATIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_iterations),
            precision: lookup("IRR_PRECISION")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.precision),
        }
    }
}
