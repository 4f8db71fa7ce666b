//! Raw-field extraction — maps the heterogeneous upstream payload onto the
//! fixed `RawRecord` schema.
//!
//! Extraction is driven by a declarative rule table rather than ad hoc
//! conditional access: each output field names an ordered list of
//! (module, key) lookups, and the first lookup that resolves to a numeric
//! value wins. This isolates upstream schema drift to one table and makes
//! the priority order explicit when a concept appears in more than one
//! reporting statement (e.g. EBIT in both the financial-data module and the
//! key-statistics summary — the statement-derived module wins).
//!
//! Extraction never fails: an absent, ambiguous, or non-numeric field is
//! null, and a missing response produces an all-null record.

use super::provider::RawResponse;
use crate::record::RawRecord;
use serde_json::Value;
use tracing::{info, warn};

/// One lookup location in the upstream payload.
#[derive(Debug, Clone, Copy)]
pub struct Lookup {
    pub module: &'static str,
    pub key: &'static str,
}

/// Extraction rule for one output field: lookups in priority order plus the
/// record slot the coerced value lands in.
struct FieldRule {
    column: &'static str,
    lookups: &'static [Lookup],
    assign: fn(&mut RawRecord, f64),
}

const fn lookup(module: &'static str, key: &'static str) -> Lookup {
    Lookup { module, key }
}

/// The full extraction table for the snapshot fields.
///
/// The three earnings-history fields are filled from the yearly earnings
/// series instead (see `extract`), not from a module lookup.
static FIELD_RULES: &[FieldRule] = &[
    FieldRule {
        column: "market_cap",
        lookups: &[lookup("summaryDetail", "marketCap")],
        assign: |r, v| r.market_cap = Some(v),
    },
    FieldRule {
        column: "total_cash",
        lookups: &[lookup("financialData", "totalCash")],
        assign: |r, v| r.total_cash = Some(v),
    },
    FieldRule {
        column: "total_debt",
        lookups: &[lookup("financialData", "totalDebt")],
        assign: |r, v| r.total_debt = Some(v),
    },
    FieldRule {
        column: "total_assets",
        lookups: &[
            lookup("financialData", "totalAssets"),
            lookup("defaultKeyStatistics", "totalAssets"),
        ],
        assign: |r, v| r.total_assets = Some(v),
    },
    FieldRule {
        column: "book_value",
        lookups: &[
            lookup("defaultKeyStatistics", "bookValue"),
            lookup("financialData", "bookValue"),
        ],
        assign: |r, v| r.book_value = Some(v),
    },
    FieldRule {
        column: "operating_cash_flow",
        lookups: &[lookup("financialData", "operatingCashflow")],
        assign: |r, v| r.operating_cash_flow = Some(v),
    },
    FieldRule {
        column: "capex",
        lookups: &[lookup("financialData", "capitalExpenditures")],
        assign: |r, v| r.capex = Some(v),
    },
    FieldRule {
        column: "ebit",
        lookups: &[
            lookup("financialData", "ebit"),
            lookup("defaultKeyStatistics", "ebit"),
        ],
        assign: |r, v| r.ebit = Some(v),
    },
    FieldRule {
        column: "gross_profit",
        lookups: &[lookup("financialData", "grossProfits")],
        assign: |r, v| r.gross_profit = Some(v),
    },
    FieldRule {
        column: "net_income",
        lookups: &[lookup("defaultKeyStatistics", "netIncomeToCommon")],
        assign: |r, v| r.net_income = Some(v),
    },
    FieldRule {
        column: "total_revenue",
        lookups: &[lookup("financialData", "totalRevenue")],
        assign: |r, v| r.total_revenue = Some(v),
    },
    FieldRule {
        column: "trailing_pe",
        lookups: &[lookup("summaryDetail", "trailingPE")],
        assign: |r, v| r.trailing_pe = Some(v),
    },
    FieldRule {
        column: "price_to_sales",
        lookups: &[lookup("summaryDetail", "priceToSalesTrailing12Months")],
        assign: |r, v| r.price_to_sales = Some(v),
    },
    FieldRule {
        column: "dividend_yield",
        lookups: &[lookup("summaryDetail", "dividendYield")],
        assign: |r, v| r.dividend_yield = Some(v),
    },
    FieldRule {
        column: "payout_ratio",
        lookups: &[lookup("summaryDetail", "payoutRatio")],
        assign: |r, v| r.payout_ratio = Some(v),
    },
    FieldRule {
        column: "earnings_growth",
        lookups: &[lookup("financialData", "earningsGrowth")],
        assign: |r, v| r.earnings_growth = Some(v),
    },
];

/// Coerce a raw payload value to a finite f64.
///
/// The upstream wraps most numbers as `{"raw": 123, "fmt": "123"}`; bare
/// numbers also occur. Anything else (strings, nulls, empty objects for
/// missing concepts) counts as absent.
pub fn coerce_numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Object(fields) => fields.get("raw").and_then(Value::as_f64),
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

/// Build a `RawRecord` from an upstream response.
///
/// `response` is `None` when the fetch itself failed; the record is then
/// entirely null. Missing fields are reported once at info level, malformed
/// (present but non-numeric) fields at warning level.
pub fn extract(symbol: &str, response: Option<&RawResponse>) -> RawRecord {
    let mut record = RawRecord::default();

    let Some(response) = response else {
        info!(symbol, "no upstream response, emitting all-null record");
        return record;
    };

    let mut missing: Vec<&str> = Vec::new();

    for rule in FIELD_RULES {
        let raw_value = rule
            .lookups
            .iter()
            .find_map(|l| response.field(l.module, l.key));

        match raw_value {
            Some(value) => match coerce_numeric(value) {
                Some(v) => (rule.assign)(&mut record, v),
                None => {
                    warn!(symbol, field = rule.column, value = %value, "non-numeric payload, treating as absent");
                    missing.push(rule.column);
                }
            },
            None => missing.push(rule.column),
        }
    }

    extract_earnings_history(symbol, response, &mut record, &mut missing);

    if !missing.is_empty() {
        info!(symbol, fields = ?missing, "fields unavailable upstream");
    }

    record
}

/// Fill `earnings_y0..y2` from the most recent three annual periods.
///
/// Periods are sorted most-recent-first; older periods are never used to
/// backfill a missing recent one.
fn extract_earnings_history(
    symbol: &str,
    response: &RawResponse,
    record: &mut RawRecord,
    missing: &mut Vec<&'static str>,
) {
    let mut periods: Vec<_> = response.earnings.iter().collect();
    periods.sort_by_key(|p| std::cmp::Reverse(p.year));

    let values: Vec<Option<f64>> = periods
        .iter()
        .take(3)
        .map(|p| {
            let v = coerce_numeric(&p.net_income);
            if v.is_none() {
                warn!(symbol, year = p.year, "non-numeric earnings period, treating as absent");
            }
            v
        })
        .collect();

    let slots: [(&'static str, fn(&mut RawRecord, f64)); 3] = [
        ("earnings_y0", |r, v| r.earnings_y0 = Some(v)),
        ("earnings_y1", |r, v| r.earnings_y1 = Some(v)),
        ("earnings_y2", |r, v| r.earnings_y2 = Some(v)),
    ];

    for (i, (column, assign)) in slots.into_iter().enumerate() {
        match values.get(i).copied().flatten() {
            Some(v) => assign(record, v),
            None => missing.push(column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::{EarningsPeriod, ModuleFields};
    use serde_json::json;

    fn response_with(module: &str, fields: &[(&str, Value)]) -> RawResponse {
        let mut response = RawResponse::default();
        let mut map = ModuleFields::new();
        for (key, value) in fields {
            map.insert((*key).to_string(), value.clone());
        }
        response.modules.insert(module.to_string(), map);
        response
    }

    #[test]
    fn missing_response_yields_total_failure() {
        let record = extract("7203", None);
        assert!(record.is_total_failure());
    }

    #[test]
    fn bare_numbers_and_raw_wrappers_both_coerce() {
        let response = response_with(
            "financialData",
            &[
                ("totalCash", json!(3_000_000_000.0)),
                ("totalDebt", json!({"raw": 1_000_000_000.0, "fmt": "1B"})),
            ],
        );
        let record = extract("7203", Some(&response));
        assert_eq!(record.total_cash, Some(3_000_000_000.0));
        assert_eq!(record.total_debt, Some(1_000_000_000.0));
        assert_eq!(record.market_cap, None);
    }

    #[test]
    fn non_numeric_payload_is_absent() {
        let response = response_with(
            "summaryDetail",
            &[
                ("marketCap", json!("Infinity")),
                ("trailingPE", json!({"fmt": "n/a"})),
                ("payoutRatio", json!(null)),
            ],
        );
        let record = extract("7203", Some(&response));
        assert_eq!(record.market_cap, None);
        assert_eq!(record.trailing_pe, None);
        assert_eq!(record.payout_ratio, None);
    }

    #[test]
    fn lookup_priority_order_wins() {
        // EBIT present in both modules: financialData takes precedence.
        let mut response = response_with("financialData", &[("ebit", json!(500.0))]);
        let mut stats = ModuleFields::new();
        stats.insert("ebit".into(), json!(999.0));
        response.modules.insert("defaultKeyStatistics".into(), stats);

        let record = extract("7203", Some(&response));
        assert_eq!(record.ebit, Some(500.0));
    }

    #[test]
    fn fallback_lookup_used_when_primary_absent() {
        let mut response = RawResponse::default();
        let mut stats = ModuleFields::new();
        stats.insert("bookValue".into(), json!(1_234.5));
        response.modules.insert("defaultKeyStatistics".into(), stats);

        let record = extract("7203", Some(&response));
        assert_eq!(record.book_value, Some(1_234.5));
    }

    #[test]
    fn earnings_history_picks_most_recent_three() {
        let mut response = RawResponse::default();
        // Deliberately unsorted, with four periods.
        response.earnings = vec![
            EarningsPeriod { year: 2021, net_income: json!(80.0) },
            EarningsPeriod { year: 2023, net_income: json!(120.0) },
            EarningsPeriod { year: 2020, net_income: json!(70.0) },
            EarningsPeriod { year: 2022, net_income: json!(100.0) },
        ];
        let record = extract("7203", Some(&response));
        assert_eq!(record.earnings_y0, Some(120.0));
        assert_eq!(record.earnings_y1, Some(100.0));
        assert_eq!(record.earnings_y2, Some(80.0));
    }

    #[test]
    fn short_earnings_history_leaves_older_slots_null() {
        let mut response = RawResponse::default();
        response.earnings = vec![EarningsPeriod { year: 2023, net_income: json!(120.0) }];
        let record = extract("7203", Some(&response));
        assert_eq!(record.earnings_y0, Some(120.0));
        assert_eq!(record.earnings_y1, None);
        assert_eq!(record.earnings_y2, None);
    }

    #[test]
    fn malformed_earnings_period_stays_null_without_backfill() {
        let mut response = RawResponse::default();
        response.earnings = vec![
            EarningsPeriod { year: 2023, net_income: json!("not reported") },
            EarningsPeriod { year: 2022, net_income: json!(100.0) },
            EarningsPeriod { year: 2021, net_income: json!(80.0) },
        ];
        let record = extract("7203", Some(&response));
        // y0 is malformed and must not be backfilled from 2022.
        assert_eq!(record.earnings_y0, None);
        assert_eq!(record.earnings_y1, Some(100.0));
        assert_eq!(record.earnings_y2, Some(80.0));
    }
}
