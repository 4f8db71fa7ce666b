//! FundLab CLI — export per-security fundamentals with derived valuation
//! indicators to a timestamped CSV artifact.
//!
//! Reads the identifier universe from a listed-issues TSV, fetches each
//! security's fundamentals from Yahoo Finance sequentially (with bounded
//! retry), computes the indicator set, and writes one row per identifier.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use fundlab_core::{pipeline, save_artifact, RetryingFetcher, ThreadSleeper, Universe, YahooFundamentals};

#[derive(Parser)]
#[command(
    name = "fundlab",
    about = "FundLab CLI — fundamentals screener data export"
)]
struct Cli {
    /// Path to the listed-issues TSV file (identifier universe).
    universe: PathBuf,

    /// Process only the first N identifiers.
    #[arg(long)]
    limit: Option<usize>,

    /// Keep ETF/ETN listings (excluded by default).
    #[arg(long, default_value_t = false)]
    include_etf: bool,

    /// Output directory for the CSV artifact.
    #[arg(long, default_value = "exports")]
    output_dir: PathBuf,

    /// Maximum fetch attempts per identifier.
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    max_attempts: u32,

    /// Base backoff delay in milliseconds (doubles per retry).
    #[arg(long, default_value_t = 1000)]
    base_delay_ms: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut universe = Universe::from_tsv_file(&cli.universe)
        .with_context(|| format!("failed to load universe from {}", cli.universe.display()))?;
    if !cli.include_etf {
        universe = universe.without_etf();
    }
    universe = universe.limit(cli.limit);

    if universe.is_empty() {
        bail!("universe is empty after filtering: {}", cli.universe.display());
    }

    let provider = YahooFundamentals::new();
    let mut fetcher = RetryingFetcher::with_policy(
        provider,
        ThreadSleeper,
        cli.max_attempts,
        Duration::from_millis(cli.base_delay_ms),
    );

    let output = pipeline::run(&mut fetcher, &universe.listings);

    // A sink failure is the only fatal error of a run.
    let path = save_artifact(&output.rows, &cli.output_dir)
        .with_context(|| format!("failed to write artifact under {}", cli.output_dir.display()))?;

    let summary = &output.summary;
    println!();
    println!("=== Export Summary ===");
    println!("Identifiers:    {}", summary.total);
    println!("Fetched:        {}", summary.fetched);
    println!("Fetch failures: {}", summary.failures.len());
    println!("Empty records:  {}", summary.empty_records);
    println!("Artifact:       {}", path.display());

    if !summary.all_fetched() {
        for failure in &summary.failures {
            eprintln!("WARNING: {failure}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_max_attempts() {
        let result = Cli::try_parse_from(["fundlab", "universe.tsv", "--max-attempts", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn accepts_default_arguments() {
        let cli = Cli::try_parse_from(["fundlab", "universe.tsv"]).unwrap();
        assert_eq!(cli.max_attempts, 3);
        assert_eq!(cli.base_delay_ms, 1000);
    }
}
