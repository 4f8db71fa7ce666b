//! Derived valuation/quality indicators.
//!
//! Each indicator is a pure function over nullable inputs: the result is
//! `None` exactly when a required input is missing or the formula is
//! undefined (zero or missing denominator). No indicator is ever synthesized
//! from a guessed value, and no formula produces an infinity sentinel.
//!
//! `engine::IndicatorSet` evaluates the whole table for one record.

pub mod earnings_streak;
pub mod engine;
pub mod enterprise_value;
pub mod ev_ratios;
pub mod fcf_yield;
pub mod gross_profitability;
pub mod net_cash;
pub mod peg;
pub mod price_book;

pub use earnings_streak::consecutive_earnings_growth;
pub use engine::IndicatorSet;
pub use enterprise_value::enterprise_value;
pub use ev_ratios::{ev_ebit, ev_fcf};
pub use fcf_yield::{fcf_yield, free_cash_flow};
pub use gross_profitability::gross_profitability;
pub use net_cash::net_cash_ratio;
pub use peg::peg_ratio;
pub use price_book::price_to_book;

/// Difference of two nullable values; `None` if either side is missing.
pub(crate) fn diff(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? - b?)
}

/// Division with null propagation and a zero-denominator guard.
pub(crate) fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub(crate) fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub(crate) const DEFAULT_EPSILON: f64 = 1e-10;
