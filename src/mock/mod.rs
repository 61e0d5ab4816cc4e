//! Seeded mock market data: trades, intraday prices, options chain.
//!
//! Everything here is a pure function of (seed, tickers, session date). The
//! same arguments always produce identical tables, which is what makes the
//! analytics layer testable without any market-data feed.

mod chain;
mod prices;
pub mod rng;
mod trades;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::model::{ChainRow, PricePoint, Trade};

pub use chain::generate_chain;
pub use prices::generate_prices;
pub use trades::generate_trades;

/// Minutes in one US equities session (09:30 to 16:00).
pub const SESSION_MINUTES: usize = 390;

/// Default trade count per generated session.
pub const DEFAULT_TRADES: usize = 1400;

pub fn default_tickers() -> Vec<String> {
    ["SPY", "QQQ", "AAPL", "MSFT", "NVDA", "TSLA", "AMZN", "META"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Spot anchor per ticker. Unknown tickers fall back to 100.
pub fn base_price(ticker: &str) -> f64 {
    match ticker {
        "SPY" => 512.0,
        "QQQ" => 438.0,
        "AAPL" => 182.0,
        "MSFT" => 418.0,
        "NVDA" => 760.0,
        "TSLA" => 196.0,
        "AMZN" => 176.0,
        "META" => 468.0,
        _ => 100.0,
    }
}

/// One-minute session grid starting at 09:30 on the given date.
pub fn session_grid(session_date: NaiveDate) -> Vec<NaiveDateTime> {
    let start = session_date.and_hms_opt(9, 30, 0).expect("valid session open");
    (0..SESSION_MINUTES)
        .map(|i| start + Duration::minutes(i as i64))
        .collect()
}

/// The three generated tables plus generation metadata.
#[derive(Debug, Clone)]
pub struct MockBundle {
    pub trades: Vec<Trade>,
    pub prices: Vec<PricePoint>,
    pub chain: Vec<ChainRow>,
    pub seed: u64,
    pub session_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
}

impl MockBundle {
    /// Generate all three tables. Trades, prices and chain use independent
    /// rng streams (seed, seed+7, seed+42) so each table is stable even if
    /// another one's row count changes.
    pub fn generate(seed: u64, tickers: &[String], session_date: NaiveDate) -> Self {
        Self {
            trades: generate_trades(seed, tickers, session_date, DEFAULT_TRADES),
            prices: generate_prices(seed + 7, tickers, session_date),
            chain: generate_chain(seed + 42, tickers, session_date),
            seed,
            session_date,
            generated_at: Utc::now(),
        }
    }
}

/// Memoized bundle store keyed by seed. Inputs are pure functions of the
/// seed, so entries never need invalidation.
#[derive(Default)]
pub struct BundleCache {
    inner: Mutex<HashMap<u64, Arc<MockBundle>>>,
}

impl BundleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_generate(&self, seed: u64, tickers: &[String]) -> Arc<MockBundle> {
        let mut cache = self.inner.lock().expect("bundle cache poisoned");
        cache
            .entry(seed)
            .or_insert_with(|| {
                Arc::new(MockBundle::generate(
                    seed,
                    tickers,
                    Utc::now().date_naive(),
                ))
            })
            .clone()
    }
}
