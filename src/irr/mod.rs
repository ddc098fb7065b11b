//! IRR root solving and root-multiplicity detection

mod multiplicity;
mod solver;

pub use multiplicity::{count_sign_changes, may_have_multiple_roots};
pub use solver::{seed_rates, solve_irr, IrrSolution, SEED_RATES};
