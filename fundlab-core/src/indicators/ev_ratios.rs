//! Enterprise-value multiples: EV/EBIT and EV/FCF.
//!
//! Both take the already-derived enterprise value, so a missing EV input
//! surfaces here as a null EV rather than being recomputed.

use super::{fcf_yield::free_cash_flow, safe_div};

/// EV/EBIT: enterprise_value / ebit.
pub fn ev_ebit(enterprise_value: Option<f64>, ebit: Option<f64>) -> Option<f64> {
    safe_div(enterprise_value, ebit)
}

/// EV/FCF: enterprise_value / (operating_cash_flow − capex).
pub fn ev_fcf(
    enterprise_value: Option<f64>,
    operating_cash_flow: Option<f64>,
    capex: Option<f64>,
) -> Option<f64> {
    safe_div(enterprise_value, free_cash_flow(operating_cash_flow, capex))
}
