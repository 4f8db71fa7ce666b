//! Output row assembly — the fixed column contract of the artifact.
//!
//! Column order is a public contract parsed by position downstream: ticker
//! first, then descriptive metadata, then the raw blocks grouped by category
//! (alphabetical within each block), then the computed indicators
//! (alphabetical). Every row carries the full column set regardless of how
//! much data its fetch produced; absent values serialize as empty fields,
//! never as a literal "null", "NaN", or zero.

use crate::data::universe::Listing;
use crate::indicators::IndicatorSet;
use crate::record::RawRecord;

/// The ordered column set every output row satisfies.
pub const COLUMNS: [&str; 33] = [
    // identifier
    "ticker",
    // metadata
    "name",
    "market_category",
    "sector_33",
    "sector_17",
    // raw: fundamentals
    "book_value",
    "capex",
    "ebit",
    "gross_profit",
    "market_cap",
    "net_income",
    "operating_cash_flow",
    "total_assets",
    "total_cash",
    "total_debt",
    "total_revenue",
    // raw: valuation and dividend
    "dividend_yield",
    "earnings_growth",
    "payout_ratio",
    "price_to_sales",
    "trailing_pe",
    // raw: earnings history
    "earnings_y0",
    "earnings_y1",
    "earnings_y2",
    // computed indicators
    "consecutive_earnings_growth",
    "enterprise_value",
    "ev_ebit",
    "ev_fcf",
    "fcf_yield",
    "gross_profitability",
    "net_cash_ratio",
    "peg_ratio",
    "price_to_book",
];

/// One assembled output row: identifier + metadata + raw fields + derived
/// indicators. Assembled once, appended to the sink, never updated.
#[derive(Debug, Clone)]
pub struct OutputRow {
    pub ticker: String,
    pub name: Option<String>,
    pub market_category: Option<String>,
    pub sector_33: Option<String>,
    pub sector_17: Option<String>,
    pub raw: RawRecord,
    pub indicators: IndicatorSet,
}

impl OutputRow {
    /// Merge one identifier's pieces into a row. Pure and total: absent data
    /// stays `None` and nothing here can fail.
    pub fn assemble(listing: &Listing, raw: RawRecord, indicators: IndicatorSet) -> Self {
        Self {
            ticker: listing.ticker.clone(),
            name: listing.name.clone(),
            market_category: listing.market_category.clone(),
            sector_33: listing.sector_33.clone(),
            sector_17: listing.sector_17.clone(),
            raw,
            indicators,
        }
    }

    /// Serialize the row into one string per column, aligned with `COLUMNS`.
    pub fn fields(&self) -> Vec<String> {
        let raw = &self.raw;
        let ind = &self.indicators;
        vec![
            self.ticker.clone(),
            text(&self.name),
            text(&self.market_category),
            text(&self.sector_33),
            text(&self.sector_17),
            num(raw.book_value),
            num(raw.capex),
            num(raw.ebit),
            num(raw.gross_profit),
            num(raw.market_cap),
            num(raw.net_income),
            num(raw.operating_cash_flow),
            num(raw.total_assets),
            num(raw.total_cash),
            num(raw.total_debt),
            num(raw.total_revenue),
            num(raw.dividend_yield),
            num(raw.earnings_growth),
            num(raw.payout_ratio),
            num(raw.price_to_sales),
            num(raw.trailing_pe),
            num(raw.earnings_y0),
            num(raw.earnings_y1),
            num(raw.earnings_y2),
            flag(ind.consecutive_earnings_growth),
            num(ind.enterprise_value),
            num(ind.ev_ebit),
            num(ind.ev_fcf),
            num(ind.fcf_yield),
            num(ind.gross_profitability),
            num(ind.net_cash_ratio),
            num(ind.peg_ratio),
            num(ind.price_to_book),
        ]
    }
}

/// Null numeric fields serialize as empty, not "NaN"/"null"/0.
fn num(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
