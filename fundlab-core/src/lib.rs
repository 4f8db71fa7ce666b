//! FundLab Core — per-security fundamentals acquisition and derivation.
//!
//! The pipeline turns an ordered list of security identifiers into one
//! consolidated CSV row per identifier:
//! - Data layer: provider abstraction, Yahoo Finance fundamentals provider,
//!   bounded exponential-backoff retry, declarative raw-field extraction,
//!   universe TSV reading
//! - Indicator engine: pure formulas over nullable inputs with strict
//!   null propagation
//! - Row assembly under a fixed column contract, and CSV export

pub mod data;
pub mod export;
pub mod indicators;
pub mod pipeline;
pub mod record;
pub mod row;

pub use data::{
    FetchError, FetchFailure, FundamentalsProvider, Listing, RawResponse, RetryingFetcher,
    Sleeper, ThreadSleeper, Universe, YahooFundamentals,
};
pub use export::{export_csv, save_artifact};
pub use indicators::IndicatorSet;
pub use pipeline::{run, PipelineOutput, RunSummary};
pub use record::RawRecord;
pub use row::{OutputRow, COLUMNS};
