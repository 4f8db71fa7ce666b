//! Fundamentals provider trait and structured error types.
//!
//! The FundamentalsProvider trait abstracts over the upstream lookup (Yahoo
//! Finance, scripted stubs in tests) so the retry logic and the rest of the
//! pipeline depend only on a narrow single-identifier capability.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// One module of the upstream quote-summary payload: field name → raw value.
pub type ModuleFields = Map<String, Value>;

/// Raw upstream response for one security, before extraction.
///
/// The payload is heterogeneous: a set of named modules each carrying an
/// open-ended field map, plus an annual earnings series. Field selection and
/// numeric coercion happen in the extractor, not here.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// Module name → field map (e.g. "financialData" → { "totalCash": … }).
    pub modules: BTreeMap<String, ModuleFields>,
    /// Annual earnings periods, in whatever order the upstream reported them.
    pub earnings: Vec<EarningsPeriod>,
}

impl RawResponse {
    /// Look up a raw field value in a named module.
    pub fn field(&self, module: &str, key: &str) -> Option<&Value> {
        self.modules.get(module).and_then(|fields| fields.get(key))
    }
}

/// One annual reporting period of the upstream earnings series.
#[derive(Debug, Clone)]
pub struct EarningsPeriod {
    /// Fiscal year of the period.
    pub year: i64,
    /// Reported net income, still in raw payload form.
    pub net_income: Value,
}

/// Structured error types for upstream fetches.
///
/// The transient/permanent split drives the retry policy: transient errors
/// are retried with backoff, permanent errors fail the fetch immediately.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network unreachable: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("rate limited by provider")]
    RateLimited,

    #[error("upstream HTTP error: {0}")]
    Upstream(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),
}

impl FetchError {
    /// True for errors worth retrying (network, timeout, rate limiting,
    /// upstream server errors). Unknown symbols and format drift are not
    /// retryable: repeating the request cannot change the outcome.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FetchError::Network(_)
                | FetchError::Timeout(_)
                | FetchError::RateLimited
                | FetchError::Upstream(_)
        )
    }
}

/// Trait for fundamentals providers.
///
/// Implementations handle the specifics of one upstream source. The retry
/// layer sits above this trait — providers attempt each lookup exactly once.
pub trait FundamentalsProvider {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the raw fundamentals payload for one security.
    fn fundamentals(&self, symbol: &str) -> Result<RawResponse, FetchError>;
}
