use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{ChainRow, OptionType};

use super::rng::{normal, round_to};

const STRIKES_PER_EXPIRY: usize = 25;
const EXPIRY_DAYS: [i64; 4] = [7, 14, 30, 60];

/// Generate a synthetic options chain: for each ticker, 25 strikes spanning
/// spot +/- 20% across four expiries, one CALL and one PUT row each.
pub fn generate_chain(seed: u64, tickers: &[String], session_date: NaiveDate) -> Vec<ChainRow> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut rows =
        Vec::with_capacity(tickers.len() * EXPIRY_DAYS.len() * STRIKES_PER_EXPIRY * 2);
    for ticker in tickers {
        let spot: f64 = rng.random_range(80.0..780.0);
        let lo = spot * 0.8;
        let hi = spot * 1.2;
        let step = (hi - lo) / (STRIKES_PER_EXPIRY - 1) as f64;
        let strikes: Vec<f64> = (0..STRIKES_PER_EXPIRY)
            .map(|i| round_to(lo + i as f64 * step, 1))
            .collect();

        for days in EXPIRY_DAYS {
            let expiry = session_date + Duration::days(days);
            for &strike in &strikes {
                for call_put in [OptionType::Call, OptionType::Put] {
                    rows.push(ChainRow {
                        ticker: ticker.clone(),
                        spot: round_to(spot, 2),
                        strike,
                        expiry,
                        oi: rng.random_range(120..3200),
                        iv: round_to(normal(&mut rng, 0.38, 0.12).clamp(0.12, 0.9), 3),
                        gamma: round_to(normal(&mut rng, 0.05, 0.025).clamp(0.005, 0.22), 4),
                        volume: rng.random_range(20..1500),
                        call_put,
                    });
                }
            }
        }
    }
    rows
}
