//! Raw fundamental data for one security.
//!
//! Every numeric field is independently nullable: upstream data is partial
//! and unreliable, and a missing concept must stay missing rather than
//! degrade to a sentinel value. A record where *every* field is `None` is a
//! total failure; a record with at least one populated field is a partial
//! success and is still emitted downstream.

/// Extracted, possibly-partial fundamentals for one security.
///
/// Built once per identifier by the extractor and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub market_cap: Option<f64>,
    pub total_cash: Option<f64>,
    pub total_debt: Option<f64>,
    pub total_assets: Option<f64>,
    pub book_value: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub capex: Option<f64>,
    pub ebit: Option<f64>,
    pub gross_profit: Option<f64>,
    pub net_income: Option<f64>,
    pub total_revenue: Option<f64>,
    pub trailing_pe: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub earnings_growth: Option<f64>,
    /// Most recent annual net income.
    pub earnings_y0: Option<f64>,
    /// Previous year's annual net income.
    pub earnings_y1: Option<f64>,
    /// Annual net income two years back.
    pub earnings_y2: Option<f64>,
}

impl RawRecord {
    /// Number of numeric fields in the record.
    pub const FIELD_COUNT: usize = 19;

    fn fields(&self) -> [Option<f64>; Self::FIELD_COUNT] {
        [
            self.market_cap,
            self.total_cash,
            self.total_debt,
            self.total_assets,
            self.book_value,
            self.operating_cash_flow,
            self.capex,
            self.ebit,
            self.gross_profit,
            self.net_income,
            self.total_revenue,
            self.trailing_pe,
            self.price_to_sales,
            self.dividend_yield,
            self.payout_ratio,
            self.earnings_growth,
            self.earnings_y0,
            self.earnings_y1,
            self.earnings_y2,
        ]
    }

    /// Count of populated numeric fields.
    pub fn populated_count(&self) -> usize {
        self.fields().iter().filter(|f| f.is_some()).count()
    }

    /// True when every numeric field is null (a total failure).
    pub fn is_total_failure(&self) -> bool {
        self.populated_count() == 0
    }
}
