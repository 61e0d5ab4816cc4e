use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{OptionType, Sentiment, Side, Trade, TradeTag};

use super::rng::{normal, pick_weighted, round_to};
use super::{base_price, session_grid};

const EXPIRY_WEIGHTS: [(i64, f64); 5] = [
    (7, 0.18),
    (14, 0.22),
    (30, 0.30),
    (45, 0.20),
    (60, 0.10),
];

const TAG_WEIGHTS: [(TradeTag, f64); 3] = [
    (TradeTag::Sweep, 0.32),
    (TradeTag::Block, 0.20),
    (TradeTag::Split, 0.48),
];

/// Generate `n_trades` synthetic options trades over one session, sorted by
/// timestamp. Deterministic for a given (seed, tickers, session_date).
pub fn generate_trades(
    seed: u64,
    tickers: &[String],
    session_date: NaiveDate,
    n_trades: usize,
) -> Vec<Trade> {
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = session_grid(session_date);

    let mut trades = Vec::with_capacity(n_trades);
    for _ in 0..n_trades {
        let timestamp = grid[rng.random_range(0..grid.len())];
        let ticker = tickers[rng.random_range(0..tickers.len())].clone();
        let option_type = if rng.random_range(0.0..1.0) < 0.56 {
            OptionType::Call
        } else {
            OptionType::Put
        };
        let side = if rng.random_range(0.0..1.0) < 0.62 {
            Side::Buy
        } else {
            Side::Sell
        };
        let tag = *pick_weighted(&mut rng, &TAG_WEIGHTS);

        let spot = base_price(&ticker);
        let strike = round_to(spot * normal(&mut rng, 1.0, 0.06), 1);
        let expiry_days = *pick_weighted(&mut rng, &EXPIRY_WEIGHTS);
        let expiry = session_date + Duration::days(expiry_days);

        let size: u32 = rng.random_range(10..1200);
        let iv = round_to(normal(&mut rng, 0.42, 0.12).clamp(0.12, 0.95), 3);
        let delta = round_to(normal(&mut rng, 0.32, 0.18).clamp(0.05, 0.95), 2);
        let gamma = round_to(normal(&mut rng, 0.08, 0.04).clamp(0.005, 0.25), 3);
        let price = round_to(spot + normal(&mut rng, 0.0, spot * 0.003), 2);

        let premium = round_to(size as f64 * price * normal(&mut rng, 1.0, 0.08), 2).max(0.0);

        // CALL buys read bullish, PUTs bearish; any SELL flips bearish.
        let sentiment = match (option_type, side) {
            (_, Side::Sell) => Sentiment::Bearish,
            (OptionType::Call, _) => Sentiment::Bullish,
            (OptionType::Put, _) => Sentiment::Bearish,
        };

        trades.push(Trade {
            timestamp,
            ticker,
            option_type,
            side,
            premium,
            strike,
            expiry,
            price,
            size,
            iv,
            delta,
            gamma,
            tag,
            sentiment,
        });
    }

    trades.sort_by_key(|t| t.timestamp);
    trades
}
