//! Indicator engine — evaluates the full formula table for one record.
//!
//! Each formula is evaluated independently: a missing input or undefined
//! denominator nulls only that indicator and is reported at warning level,
//! naming the identifier, the indicator, and the inputs that blocked it.

use super::{
    consecutive_earnings_growth, enterprise_value, ev_ebit, ev_fcf, fcf_yield,
    gross_profitability, net_cash_ratio, peg_ratio, price_to_book,
};
use crate::record::RawRecord;
use tracing::warn;

/// Derived valuation/quality metrics for one security. Computed once from a
/// completed `RawRecord`, immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndicatorSet {
    pub consecutive_earnings_growth: Option<bool>,
    pub enterprise_value: Option<f64>,
    pub ev_ebit: Option<f64>,
    pub ev_fcf: Option<f64>,
    pub fcf_yield: Option<f64>,
    pub gross_profitability: Option<f64>,
    pub net_cash_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
}

impl IndicatorSet {
    /// Evaluate every indicator for one record.
    pub fn compute(symbol: &str, raw: &RawRecord) -> Self {
        let ev = enterprise_value(raw.market_cap, raw.total_debt, raw.total_cash);

        let set = Self {
            consecutive_earnings_growth: consecutive_earnings_growth(
                raw.earnings_y0,
                raw.earnings_y1,
                raw.earnings_y2,
            ),
            enterprise_value: ev,
            ev_ebit: ev_ebit(ev, raw.ebit),
            ev_fcf: ev_fcf(ev, raw.operating_cash_flow, raw.capex),
            fcf_yield: fcf_yield(raw.operating_cash_flow, raw.capex, raw.market_cap),
            gross_profitability: gross_profitability(raw.gross_profit, raw.total_assets),
            net_cash_ratio: net_cash_ratio(raw.total_cash, raw.total_debt, raw.market_cap),
            peg_ratio: peg_ratio(raw.trailing_pe, raw.earnings_growth),
            price_to_book: price_to_book(raw.market_cap, raw.book_value),
        };

        set.log_gaps(symbol, raw);
        set
    }

    /// Warn once per null indicator, naming the inputs that blocked it.
    fn log_gaps(&self, symbol: &str, raw: &RawRecord) {
        let gaps: [(&str, bool, &[(&str, bool)]); 9] = [
            (
                "net_cash_ratio",
                self.net_cash_ratio.is_none(),
                &[
                    ("total_cash", raw.total_cash.is_none()),
                    ("total_debt", raw.total_debt.is_none()),
                    ("market_cap", raw.market_cap.is_none()),
                ],
            ),
            (
                "enterprise_value",
                self.enterprise_value.is_none(),
                &[
                    ("market_cap", raw.market_cap.is_none()),
                    ("total_debt", raw.total_debt.is_none()),
                    ("total_cash", raw.total_cash.is_none()),
                ],
            ),
            (
                "gross_profitability",
                self.gross_profitability.is_none(),
                &[
                    ("gross_profit", raw.gross_profit.is_none()),
                    ("total_assets", raw.total_assets.is_none()),
                ],
            ),
            (
                "fcf_yield",
                self.fcf_yield.is_none(),
                &[
                    ("operating_cash_flow", raw.operating_cash_flow.is_none()),
                    ("capex", raw.capex.is_none()),
                    ("market_cap", raw.market_cap.is_none()),
                ],
            ),
            (
                "price_to_book",
                self.price_to_book.is_none(),
                &[
                    ("market_cap", raw.market_cap.is_none()),
                    ("book_value", raw.book_value.is_none()),
                ],
            ),
            (
                "ev_ebit",
                self.ev_ebit.is_none(),
                &[
                    ("enterprise_value", self.enterprise_value.is_none()),
                    ("ebit", raw.ebit.is_none()),
                ],
            ),
            (
                "ev_fcf",
                self.ev_fcf.is_none(),
                &[
                    ("enterprise_value", self.enterprise_value.is_none()),
                    ("operating_cash_flow", raw.operating_cash_flow.is_none()),
                    ("capex", raw.capex.is_none()),
                ],
            ),
            (
                "peg_ratio",
                self.peg_ratio.is_none(),
                &[
                    ("trailing_pe", raw.trailing_pe.is_none()),
                    ("earnings_growth", raw.earnings_growth.is_none()),
                ],
            ),
            (
                "consecutive_earnings_growth",
                self.consecutive_earnings_growth.is_none(),
                &[
                    ("earnings_y0", raw.earnings_y0.is_none()),
                    ("earnings_y1", raw.earnings_y1.is_none()),
                    ("earnings_y2", raw.earnings_y2.is_none()),
                ],
            ),
        ];

        for (indicator, is_null, inputs) in gaps {
            if !is_null {
                continue;
            }
            let missing: Vec<&str> = inputs
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| *name)
                .collect();
            if missing.is_empty() {
                warn!(symbol, indicator, "indicator undefined (zero denominator)");
            } else {
                warn!(symbol, indicator, missing = ?missing, "indicator unavailable");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    fn full_record() -> RawRecord {
        RawRecord {
            market_cap: Some(45e9),
            total_cash: Some(3e9),
            total_debt: Some(1e9),
            total_assets: Some(50e9),
            book_value: Some(30e9),
            operating_cash_flow: Some(5e9),
            capex: Some(2e9),
            ebit: Some(4.3e9),
            gross_profit: Some(10e9),
            net_income: Some(3e9),
            total_revenue: Some(40e9),
            trailing_pe: Some(15.0),
            price_to_sales: Some(1.125),
            dividend_yield: Some(0.025),
            payout_ratio: Some(0.3),
            earnings_growth: Some(0.15),
            earnings_y0: Some(120.0),
            earnings_y1: Some(100.0),
            earnings_y2: Some(80.0),
        }
    }

    #[test]
    fn complete_record_populates_every_indicator() {
        let set = IndicatorSet::compute("7203", &full_record());

        assert_approx(set.net_cash_ratio.unwrap(), 2.0 / 45.0, DEFAULT_EPSILON);
        assert_eq!(set.enterprise_value, Some(43e9));
        assert_approx(set.ev_ebit.unwrap(), 10.0, DEFAULT_EPSILON);
        assert_approx(set.ev_fcf.unwrap(), 43.0 / 3.0, 1e-9);
        assert_approx(set.fcf_yield.unwrap(), 3.0 / 45.0, DEFAULT_EPSILON);
        assert_approx(set.gross_profitability.unwrap(), 0.2, DEFAULT_EPSILON);
        assert_approx(set.price_to_book.unwrap(), 1.5, DEFAULT_EPSILON);
        assert_approx(set.peg_ratio.unwrap(), 1.0, DEFAULT_EPSILON);
        assert_eq!(set.consecutive_earnings_growth, Some(true));
    }

    #[test]
    fn one_missing_input_nulls_only_dependent_indicators() {
        let raw = RawRecord {
            market_cap: None,
            ..full_record()
        };
        let set = IndicatorSet::compute("7203", &raw);

        // Everything that needs market_cap is null.
        assert_eq!(set.net_cash_ratio, None);
        assert_eq!(set.enterprise_value, None);
        assert_eq!(set.ev_ebit, None);
        assert_eq!(set.ev_fcf, None);
        assert_eq!(set.fcf_yield, None);
        assert_eq!(set.price_to_book, None);

        // Siblings with their inputs intact are untouched.
        assert!(set.gross_profitability.is_some());
        assert!(set.peg_ratio.is_some());
        assert_eq!(set.consecutive_earnings_growth, Some(true));
    }

    #[test]
    fn total_failure_record_yields_all_null_indicators() {
        let set = IndicatorSet::compute("9999", &RawRecord::default());
        assert_eq!(set, IndicatorSet::default());
    }
}
