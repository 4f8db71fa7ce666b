//! Free-cash-flow yield.
//!
//! Formula: (operating_cash_flow − capex) / market_cap.

use super::{diff, safe_div};

/// Free cash flow: operating_cash_flow − capex. Shared with the EV/FCF
/// ratio.
pub fn free_cash_flow(operating_cash_flow: Option<f64>, capex: Option<f64>) -> Option<f64> {
    diff(operating_cash_flow, capex)
}

pub fn fcf_yield(
    operating_cash_flow: Option<f64>,
    capex: Option<f64>,
    market_cap: Option<f64>,
) -> Option<f64> {
    safe_div(free_cash_flow(operating_cash_flow, capex), market_cap)
}
