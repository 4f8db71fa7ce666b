//! Net-cash ratio.
//!
//! Formula: (total_cash − total_debt) / market_cap. Negative values mean net
//! debt.

use super::{diff, safe_div};

pub fn net_cash_ratio(
    total_cash: Option<f64>,
    total_debt: Option<f64>,
    market_cap: Option<f64>,
) -> Option<f64> {
    safe_div(diff(total_cash, total_debt), market_cap)
}
