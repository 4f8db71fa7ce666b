//! Data acquisition: provider abstraction, retrying fetch, raw-field
//! extraction, and the identifier universe.

pub mod extract;
pub mod fetch;
pub mod provider;
pub mod universe;
pub mod yahoo;

pub use extract::extract;
pub use fetch::{FetchFailure, FetchState, RetryingFetcher, Sleeper, ThreadSleeper};
pub use provider::{EarningsPeriod, FetchError, FundamentalsProvider, RawResponse};
pub use universe::{Listing, Universe, UniverseError};
pub use yahoo::YahooFundamentals;
