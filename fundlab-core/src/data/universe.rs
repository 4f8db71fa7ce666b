//! Universe — the listed-issues TSV that supplies the ordered identifier
//! sequence and per-security descriptive metadata.
//!
//! The file is the JPX listed-issues export: tab-separated with a header
//! row, columns addressed by position. Only five columns matter here:
//! ticker (1), issue name (2), market category (3), 33-sector (5), and
//! 17-sector (7).

use csv::ReaderBuilder;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Market-category label for exchange-traded funds/notes in the JPX export.
const ETF_MARKET_CATEGORY: &str = "ETF・ETN";

const TICKER_COLUMN: usize = 1;
const NAME_COLUMN: usize = 2;
const MARKET_COLUMN: usize = 3;
const SECTOR_33_COLUMN: usize = 5;
const SECTOR_17_COLUMN: usize = 7;

/// One listed security: identifier plus descriptive metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub ticker: String,
    pub name: Option<String>,
    pub market_category: Option<String>,
    pub sector_33: Option<String>,
    pub sector_17: Option<String>,
}

impl Listing {
    /// Bare listing with no metadata, for tests and ad hoc ticker lists.
    pub fn bare(ticker: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: None,
            market_category: None,
            sector_33: None,
            sector_17: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum UniverseError {
    #[error("failed to read universe file: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse universe TSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Ordered sequence of listings read from the TSV.
#[derive(Debug, Clone, Default)]
pub struct Universe {
    pub listings: Vec<Listing>,
}

impl Universe {
    /// Load a universe from a TSV file.
    pub fn from_tsv_file(path: &Path) -> Result<Self, UniverseError> {
        let file = std::fs::File::open(path)?;
        let universe = Self::from_tsv(file)?;
        info!(
            path = %path.display(),
            listings = universe.len(),
            "loaded universe"
        );
        Ok(universe)
    }

    /// Parse a universe from TSV content.
    ///
    /// Rows without a ticker column are skipped with a warning; metadata
    /// columns past the end of a short row are simply absent.
    pub fn from_tsv(reader: impl io::Read) -> Result<Self, UniverseError> {
        let mut tsv = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut listings = Vec::new();

        for (row, result) in tsv.records().enumerate() {
            let record = result?;
            let ticker = record.get(TICKER_COLUMN).map(str::trim).unwrap_or("");
            if ticker.is_empty() {
                warn!(row = row + 1, "row has no ticker, skipping");
                continue;
            }

            listings.push(Listing {
                ticker: ticker.to_string(),
                name: column(&record, NAME_COLUMN),
                market_category: column(&record, MARKET_COLUMN),
                sector_33: column(&record, SECTOR_33_COLUMN),
                sector_17: column(&record, SECTOR_17_COLUMN),
            });
        }

        Ok(Self { listings })
    }

    /// Drop ETF/ETN listings, keeping only individual stocks.
    pub fn without_etf(mut self) -> Self {
        let before = self.listings.len();
        self.listings
            .retain(|l| l.market_category.as_deref() != Some(ETF_MARKET_CATEGORY));
        let excluded = before - self.listings.len();
        if excluded > 0 {
            info!(kept = self.listings.len(), excluded, "filtered out ETF/ETN listings");
        }
        self
    }

    /// Keep only the first `n` listings, if a limit is given.
    pub fn limit(mut self, n: Option<usize>) -> Self {
        if let Some(n) = n {
            if n < self.listings.len() {
                self.listings.truncate(n);
                info!(limit = n, "limited universe");
            }
        }
        self
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

fn column(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TSV: &str = "\
date\tcode\tname\tmarket\tnote\tsector33\tnote2\tsector17\n\
20240101\t7203\tトヨタ自動車\tプライム（内国株式）\t-\t輸送用機器\t-\t自動車・輸送機\n\
20240101\t1306\tTOPIX連動型上場投資信託\tETF・ETN\t-\t-\t-\t-\n\
20240101\t9984\tソフトバンクグループ\tプライム（内国株式）\t-\t情報・通信業\t-\t情報通信・サービスその他\n";

    #[test]
    fn parses_listings_in_file_order() {
        let universe = Universe::from_tsv(SAMPLE_TSV.as_bytes()).unwrap();
        assert_eq!(universe.len(), 3);
        assert_eq!(universe.listings[0].ticker, "7203");
        assert_eq!(universe.listings[0].name.as_deref(), Some("トヨタ自動車"));
        assert_eq!(universe.listings[0].sector_33.as_deref(), Some("輸送用機器"));
        assert_eq!(
            universe.listings[0].sector_17.as_deref(),
            Some("自動車・輸送機")
        );
        assert_eq!(universe.listings[2].ticker, "9984");
    }

    #[test]
    fn etf_filter_drops_by_market_category() {
        let universe = Universe::from_tsv(SAMPLE_TSV.as_bytes()).unwrap().without_etf();
        assert_eq!(universe.len(), 2);
        assert!(universe.listings.iter().all(|l| l.ticker != "1306"));
    }

    #[test]
    fn limit_truncates_after_filtering() {
        let universe = Universe::from_tsv(SAMPLE_TSV.as_bytes())
            .unwrap()
            .without_etf()
            .limit(Some(1));
        assert_eq!(universe.len(), 1);
        assert_eq!(universe.listings[0].ticker, "7203");
    }

    #[test]
    fn no_limit_keeps_everything() {
        let universe = Universe::from_tsv(SAMPLE_TSV.as_bytes()).unwrap().limit(None);
        assert_eq!(universe.len(), 3);
    }

    #[test]
    fn short_rows_lose_metadata_not_ticker() {
        let tsv = "date\tcode\tname\n20240101\t7203\n";
        let universe = Universe::from_tsv(tsv.as_bytes()).unwrap();
        assert_eq!(universe.len(), 1);
        assert_eq!(universe.listings[0].ticker, "7203");
        assert_eq!(universe.listings[0].name, None);
        assert_eq!(universe.listings[0].market_category, None);
    }

    #[test]
    fn rows_without_ticker_are_skipped() {
        let tsv = "date\tcode\tname\n20240101\t\tnameless\n20240101\t7203\tトヨタ\n";
        let universe = Universe::from_tsv(tsv.as_bytes()).unwrap();
        assert_eq!(universe.len(), 1);
        assert_eq!(universe.listings[0].ticker, "7203");
    }
}
