//! Pipeline orchestrator — fetch → extract → compute → assemble, one
//! identifier at a time.
//!
//! Processing is strictly sequential and fault-isolated per identifier: a
//! fetch that exhausts its retries degrades to an all-null record, and every
//! identifier submitted produces exactly one output row. Nothing is dropped
//! silently.

use crate::data::extract::extract;
use crate::data::fetch::{FetchFailure, RetryingFetcher, Sleeper};
use crate::data::provider::FundamentalsProvider;
use crate::data::universe::Listing;
use crate::indicators::IndicatorSet;
use crate::row::OutputRow;
use tracing::{info, warn};

/// Outcome counts for one run. `rows.len()` always equals `summary.total`.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    /// Identifiers whose fetch succeeded (possibly with partial data).
    pub fetched: usize,
    /// Identifiers that produced an entirely null record.
    pub empty_records: usize,
    pub failures: Vec<FetchFailure>,
}

impl RunSummary {
    pub fn all_fetched(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Result of one full run: the assembled rows plus outcome counts.
#[derive(Debug)]
pub struct PipelineOutput {
    pub rows: Vec<OutputRow>,
    pub summary: RunSummary,
}

/// Process every listing, in order, into output rows.
pub fn run<P: FundamentalsProvider, S: Sleeper>(
    fetcher: &mut RetryingFetcher<P, S>,
    listings: &[Listing],
) -> PipelineOutput {
    let total = listings.len();
    info!(provider = fetcher.provider_name(), total, "starting run");
    let mut rows = Vec::with_capacity(total);
    let mut summary = RunSummary {
        total,
        ..RunSummary::default()
    };

    for (i, listing) in listings.iter().enumerate() {
        let ticker = listing.ticker.as_str();
        info!(ticker, index = i + 1, total, "processing");

        let response = match fetcher.fetch(ticker) {
            Ok(response) => {
                summary.fetched += 1;
                Some(response)
            }
            Err(failure) => {
                // Already logged by the fetcher; record and degrade to an
                // all-null record rather than dropping the identifier.
                summary.failures.push(failure);
                None
            }
        };

        let raw = extract(ticker, response.as_ref());
        if raw.is_total_failure() {
            summary.empty_records += 1;
            warn!(ticker, "no raw fields available, emitting null row");
        }

        let indicators = IndicatorSet::compute(ticker, &raw);
        rows.push(OutputRow::assemble(listing, raw, indicators));
    }

    info!(
        total,
        fetched = summary.fetched,
        failed = summary.failures.len(),
        empty = summary.empty_records,
        "run complete"
    );

    PipelineOutput { rows, summary }
}
