//! Price-to-book ratio (PBR).
//!
//! Formula: market_cap / book_value.

use super::safe_div;

pub fn price_to_book(market_cap: Option<f64>, book_value: Option<f64>) -> Option<f64> {
    safe_div(market_cap, book_value)
}
