use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::model::PricePoint;

use super::rng::{normal, round_to};
use super::{base_price, session_grid};

/// Generate one random-walk minute series per ticker over the session grid.
pub fn generate_prices(seed: u64, tickers: &[String], session_date: NaiveDate) -> Vec<PricePoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let grid = session_grid(session_date);

    let mut points = Vec::with_capacity(tickers.len() * grid.len());
    for ticker in tickers {
        let base = base_price(ticker);
        let drift = normal(&mut rng, 0.0004, 0.0001);
        let mut cum_noise = 0.0;
        for (i, timestamp) in grid.iter().enumerate() {
            cum_noise += normal(&mut rng, 0.0, 0.6);
            let price = round_to(base + cum_noise + i as f64 * drift, 2);
            points.push(PricePoint {
                timestamp: *timestamp,
                ticker: ticker.clone(),
                price,
            });
        }
    }
    points
}
