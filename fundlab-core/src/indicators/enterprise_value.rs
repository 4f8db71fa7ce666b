//! Enterprise value (EV).
//!
//! Formula: market_cap + (total_debt − total_cash), i.e. market cap plus net
//! debt. Pure sum — no denominator, so the only null source is a missing
//! input.

use super::diff;

pub fn enterprise_value(
    market_cap: Option<f64>,
    total_debt: Option<f64>,
    total_cash: Option<f64>,
) -> Option<f64> {
    Some(market_cap? + diff(total_debt, total_cash)?)
}
