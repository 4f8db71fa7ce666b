//! Yahoo Finance fundamentals provider.
//!
//! Fetches the quoteSummary v10 payload (summary detail, financial data, key
//! statistics, earnings) for one symbol per request. Yahoo Finance has no
//! official API and is subject to unannounced format changes; format drift
//! surfaces as `FetchError::ResponseFormatChanged` and is not retried.

use super::provider::{
    EarningsPeriod, FetchError, FundamentalsProvider, ModuleFields, RawResponse,
};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const QUOTE_SUMMARY_MODULES: &str = "summaryDetail,financialData,defaultKeyStatistics,earnings";

/// Yahoo quoteSummary v10 envelope.
#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    result: Option<Vec<serde_json::Map<String, Value>>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

/// Yahoo Finance fundamentals provider.
pub struct YahooFundamentals {
    client: reqwest::blocking::Client,
}

impl YahooFundamentals {
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .expect("failed to build HTTP client");

        Self { client }
    }

    /// Build the quoteSummary URL for a symbol.
    fn quote_summary_url(symbol: &str) -> String {
        format!(
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/{symbol}\
             ?modules={QUOTE_SUMMARY_MODULES}"
        )
    }

    /// Map a local identifier to Yahoo's symbol format.
    ///
    /// Purely numeric tickers are Tokyo Stock Exchange codes and get the
    /// `.T` suffix; everything else passes through unchanged.
    pub fn yahoo_symbol(ticker: &str) -> String {
        if !ticker.is_empty() && ticker.bytes().all(|b| b.is_ascii_digit()) {
            debug!(ticker, "appending .T suffix for Tokyo exchange");
            format!("{ticker}.T")
        } else {
            ticker.to_string()
        }
    }

    /// Parse the envelope into a `RawResponse`.
    fn parse_response(symbol: &str, envelope: QuoteSummaryEnvelope) -> Result<RawResponse, FetchError> {
        let result = envelope.quote_summary.result.ok_or_else(|| {
            if let Some(err) = envelope.quote_summary.error {
                if err.code == "Not Found" {
                    FetchError::SymbolNotFound {
                        symbol: symbol.to_string(),
                    }
                } else {
                    FetchError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
                }
            } else {
                FetchError::ResponseFormatChanged("empty result with no error".into())
            }
        })?;

        let entry = result
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;

        let mut response = RawResponse::default();

        for (module, fields) in entry {
            if let Value::Object(fields) = fields {
                if module == "earnings" {
                    response.earnings = parse_yearly_earnings(&fields);
                }
                response.modules.insert(module, fields);
            }
        }

        Ok(response)
    }
}

impl Default for YahooFundamentals {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the annual earnings series out of the earnings module.
///
/// Shape: `financialsChart.yearly: [{date: 2023, earnings: {...}}, ...]`.
/// Net income values stay in raw payload form; coercion is the extractor's
/// job.
fn parse_yearly_earnings(fields: &ModuleFields) -> Vec<EarningsPeriod> {
    let yearly = fields
        .get("financialsChart")
        .and_then(|chart| chart.get("yearly"))
        .and_then(Value::as_array);

    let Some(yearly) = yearly else {
        return Vec::new();
    };

    yearly
        .iter()
        .filter_map(|period| {
            let year = period.get("date").and_then(Value::as_i64)?;
            let net_income = period.get("earnings").cloned().unwrap_or(Value::Null);
            Some(EarningsPeriod { year, net_income })
        })
        .collect()
}

impl FundamentalsProvider for YahooFundamentals {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fundamentals(&self, symbol: &str) -> Result<RawResponse, FetchError> {
        let yahoo_symbol = Self::yahoo_symbol(symbol);
        let url = Self::quote_summary_url(&yahoo_symbol);

        let resp = self.client.get(&url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout(e.to_string())
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }

        if !status.is_success() {
            return Err(FetchError::Upstream(format!("HTTP {status} for {symbol}")));
        }

        let envelope: QuoteSummaryEnvelope = resp.json().map_err(|e| {
            FetchError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_tickers_get_tokyo_suffix() {
        assert_eq!(YahooFundamentals::yahoo_symbol("7203"), "7203.T");
        assert_eq!(YahooFundamentals::yahoo_symbol("7203.T"), "7203.T");
        assert_eq!(YahooFundamentals::yahoo_symbol("AAPL"), "AAPL");
        assert_eq!(YahooFundamentals::yahoo_symbol(""), "");
    }

    #[test]
    fn parse_modules_and_earnings() {
        let payload = json!({
            "quoteSummary": {
                "result": [{
                    "summaryDetail": { "marketCap": {"raw": 45e9, "fmt": "45B"} },
                    "financialData": { "totalCash": {"raw": 3e9} },
                    "earnings": {
                        "financialsChart": {
                            "yearly": [
                                {"date": 2022, "earnings": {"raw": 100.0}},
                                {"date": 2023, "earnings": {"raw": 120.0}}
                            ]
                        }
                    }
                }],
                "error": null
            }
        });
        let envelope: QuoteSummaryEnvelope = serde_json::from_value(payload).unwrap();
        let response = YahooFundamentals::parse_response("7203", envelope).unwrap();

        assert!(response.modules.contains_key("summaryDetail"));
        assert!(response.modules.contains_key("financialData"));
        assert_eq!(response.earnings.len(), 2);
        assert_eq!(response.earnings[1].year, 2023);
    }

    #[test]
    fn not_found_error_maps_to_symbol_not_found() {
        let payload = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found"}
            }
        });
        let envelope: QuoteSummaryEnvelope = serde_json::from_value(payload).unwrap();
        let err = YahooFundamentals::parse_response("9999", envelope).unwrap_err();
        assert!(matches!(err, FetchError::SymbolNotFound { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn unexpected_error_code_is_format_drift() {
        let payload = json!({
            "quoteSummary": {
                "result": null,
                "error": {"code": "Internal", "description": "boom"}
            }
        });
        let envelope: QuoteSummaryEnvelope = serde_json::from_value(payload).unwrap();
        let err = YahooFundamentals::parse_response("7203", envelope).unwrap_err();
        assert!(matches!(err, FetchError::ResponseFormatChanged(_)));
    }

    #[test]
    fn empty_result_array_is_symbol_not_found() {
        let payload = json!({
            "quoteSummary": { "result": [], "error": null }
        });
        let envelope: QuoteSummaryEnvelope = serde_json::from_value(payload).unwrap();
        let err = YahooFundamentals::parse_response("9999", envelope).unwrap_err();
        assert!(matches!(err, FetchError::SymbolNotFound { .. }));
    }
}
