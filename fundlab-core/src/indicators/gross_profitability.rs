//! Gross profitability.
//!
//! Formula: gross_profit / total_assets.

use super::safe_div;

pub fn gross_profitability(gross_profit: Option<f64>, total_assets: Option<f64>) -> Option<f64> {
    safe_div(gross_profit, total_assets)
}
