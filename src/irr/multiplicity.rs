//! Sign-change heuristic for non-unique IRR solutions
//!
//! By Descartes' rule of signs the NPV polynomial has at most as many
//! positive roots as the cash flows have sign changes.

/// Count transitions between positive and negative cash flows
///
/// Exact zeros carry no sign and leave the previous sign unchanged.
pub fn count_sign_changes(cashflows: &[f64]) -> usize {
    let mut changes = 0;
    let mut previous_positive: Option<bool> = None;

    for &cf in cashflows {
        if cf == 0.0 {
            continue;
        }
        let positive = cf > 0.0;
        if let Some(prev) = previous_positive {
            if prev != positive {
                changes += 1;
            }
        }
        previous_positive = Some(positive);
    }

    changes
}

/// True when more than one sign change means several rates may zero the NPV
pub fn may_have_multiple_roots(cashflows: &[f64]) -> bool {
    if cashflows.len() < 3 {
        return false;
    }
    count_sign_changes(cashflows) > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_conventional_investment() {
        assert!(!may_have_multiple_roots(&[-1000.0, 300.0, 400.0, 500.0]));
    }

    #[test]
    fn test_two_sign_changes() {
        // Mine-closure shape: outlay, income, cleanup cost
        assert!(may_have_multiple_roots(&[-1000.0, 2500.0, -1540.0]));
    }

    #[test]
    fn test_zeros_do_not_reset_sign() {
        assert_eq!(count_sign_changes(&[-100.0, 0.0, 0.0, 50.0, 0.0, 60.0]), 1);
        assert!(!may_have_multiple_roots(&[-100.0, 0.0, -20.0, 0.0, 200.0]));
        assert!(may_have_multiple_roots(&[-100.0, 0.0, 200.0, 0.0, -50.0]));
    }

    #[test]
    fn test_short_series_never_flagged() {
        assert!(!may_have_multiple_roots(&[]));
        assert!(!may_have_multiple_roots(&[-100.0, 110.0]));
    }

    proptest! {
        #[test]
        fn prop_single_outlay_then_inflows_not_flagged(
            outlay in 1.0f64..1.0e6,
            inflows in prop::collection::vec(0.0f64..1.0e5, 0..50)
        ) {
            let mut cashflows = vec![-outlay];
            cashflows.extend(inflows);
            prop_assert!(!may_have_multiple_roots(&cashflows));
        }
    }
}
