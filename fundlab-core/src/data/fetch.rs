//! Retrying fetcher — bounded exponential-backoff retry around one provider.
//!
//! Implemented as an explicit state machine so the retry behavior is
//! deterministic and unit-testable without real time passing: the delay is
//! injected through the `Sleeper` trait and the transient/permanent
//! classification comes from `FetchError::is_transient`.
//!
//! States: Attempting(n) → Succeeded on success; Attempting(n) → Backoff(n)
//! on a transient failure while attempts remain; Attempting(n) → Exhausted
//! on a transient failure at the last attempt, or immediately on a permanent
//! failure. Backoff(n) waits `base_delay * 2^n` then moves to
//! Attempting(n+1). Succeeded and Exhausted are terminal.

use super::provider::{FundamentalsProvider, RawResponse};
use std::time::Duration;
use tracing::{debug, error, warn};

/// Injectable delay, so tests can record backoff intervals instead of
/// actually sleeping.
pub trait Sleeper {
    fn sleep(&mut self, delay: Duration);
}

/// Production sleeper: blocks the current thread.
///
/// This blocks only the current identifier's processing — the pipeline is
/// sequential and nothing else is running.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Retry state. `Attempting(n)` and `Backoff(n)` carry the zero-based
/// attempt index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Attempting(u32),
    Backoff(u32),
    Succeeded,
    Exhausted,
}

/// Final failure after the retry budget is spent (or a permanent error).
///
/// The caller treats this as "no raw data available" for the identifier, not
/// as a reason to abort the run.
#[derive(Debug)]
pub struct FetchFailure {
    pub symbol: String,
    /// Number of attempts actually made.
    pub attempts: u32,
    /// Classification of the last error.
    pub transient: bool,
    pub message: String,
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fetch failed for {} after {} attempt(s): {}",
            self.symbol, self.attempts, self.message
        )
    }
}

/// Wraps a provider with bounded exponential-backoff retry.
pub struct RetryingFetcher<P, S> {
    provider: P,
    sleeper: S,
    max_attempts: u32,
    base_delay: Duration,
}

impl<P: FundamentalsProvider, S: Sleeper> RetryingFetcher<P, S> {
    /// Default policy: 3 attempts, backoff delays of 1s, 2s.
    pub fn new(provider: P, sleeper: S) -> Self {
        Self::with_policy(provider, sleeper, 3, Duration::from_secs(1))
    }

    pub fn with_policy(provider: P, sleeper: S, max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            provider,
            sleeper,
            // A policy of zero attempts could never return a response.
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch one symbol, masking transient upstream failures.
    pub fn fetch(&mut self, symbol: &str) -> Result<RawResponse, FetchFailure> {
        let mut state = FetchState::Attempting(0);

        loop {
            state = match state {
                FetchState::Attempting(n) => match self.provider.fundamentals(symbol) {
                    Ok(response) => {
                        state = FetchState::Succeeded;
                        debug!(symbol, attempts = n + 1, state = ?state, "fetch succeeded");
                        return Ok(response);
                    }
                    Err(err) => {
                        let transient = err.is_transient();
                        if transient && n + 1 < self.max_attempts {
                            warn!(
                                symbol,
                                attempt = n + 1,
                                max_attempts = self.max_attempts,
                                error = %err,
                                "transient fetch failure, retrying"
                            );
                            FetchState::Backoff(n)
                        } else {
                            let attempts = n + 1;
                            state = FetchState::Exhausted;
                            error!(symbol, attempts, state = ?state, error = %err, "fetch failed");
                            return Err(FetchFailure {
                                symbol: symbol.to_string(),
                                attempts,
                                transient,
                                message: err.to_string(),
                            });
                        }
                    }
                },
                FetchState::Backoff(n) => {
                    // 2^n time units: 1, 2, 4, ...
                    let delay = self.base_delay * 2u32.pow(n);
                    self.sleeper.sleep(delay);
                    FetchState::Attempting(n + 1)
                }
                // Terminal states return above and never re-enter the loop.
                FetchState::Succeeded | FetchState::Exhausted => {
                    unreachable!("terminal state inside retry loop")
                }
            };
        }
    }
}
