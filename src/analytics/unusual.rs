use chrono::Duration;
use serde::Serialize;

use crate::model::{TableData, Trade, TradeTag};

use super::stats::sample_std;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnusualScore {
    pub ticker: String,
    pub score: f64,
}

impl UnusualScore {
    pub fn table(rows: &[UnusualScore]) -> TableData {
        let mut table = TableData::new(vec!["ticker", "unusual_score"]);
        for r in rows {
            table.push_row(vec![r.ticker.clone(), r.score.to_string()]);
        }
        table
    }
}

/// Composite unusual-activity score per ticker, sorted descending.
///
/// Per-trade score = z + boosts, where z measures the premium against the
/// ticker's own mean but is scaled by the GLOBAL premium standard deviation.
/// The global denominator is intentional: it keeps scores comparable across
/// tickers with very different typical premium sizes. Boosts: +0.4 for expiry
/// within 7 days of the earliest expiry in the set, +0.35 for sweeps, and up
/// to +0.3 for out-of-the-money distance (capped at 20% of spot, x1.5).
///
/// With fewer than two trades the standard deviation is NaN and so are the
/// scores; that degenerate case is left as-is.
pub fn unusual_scores(trades: &[Trade]) -> Vec<UnusualScore> {
    if trades.is_empty() {
        return Vec::new();
    }

    let premiums: Vec<f64> = trades.iter().map(|t| t.premium).collect();
    let global_std = sample_std(&premiums);

    let min_expiry = trades
        .iter()
        .map(|t| t.expiry)
        .min()
        .expect("non-empty trades");
    let near_term_cutoff = min_expiry + Duration::days(7);

    // Per-ticker premium baseline, first-seen order.
    let mut baselines: Vec<(String, f64, usize)> = Vec::new();
    for t in trades {
        match baselines.iter_mut().find(|(k, _, _)| *k == t.ticker) {
            Some((_, sum, count)) => {
                *sum += t.premium;
                *count += 1;
            }
            None => baselines.push((t.ticker.clone(), t.premium, 1)),
        }
    }

    let mut scores: Vec<(String, f64, usize)> = baselines
        .iter()
        .map(|(k, _, _)| (k.clone(), 0.0, 0))
        .collect();

    for t in trades {
        let baseline = baselines
            .iter()
            .find(|(k, _, _)| *k == t.ticker)
            .map(|(_, sum, count)| sum / *count as f64)
            .unwrap_or(0.0);

        let z = (t.premium - baseline) / global_std;
        let near_term = if t.expiry <= near_term_cutoff { 0.4 } else { 0.0 };
        let sweep = if t.tag == TradeTag::Sweep { 0.35 } else { 0.0 };
        let otm = ((t.strike - t.price).abs() / t.price).clamp(0.0, 0.2) * 1.5;

        let entry = scores
            .iter_mut()
            .find(|(k, _, _)| *k == t.ticker)
            .expect("ticker seeded above");
        entry.1 += z + near_term + sweep + otm;
        entry.2 += 1;
    }

    let mut out: Vec<UnusualScore> = scores
        .into_iter()
        .map(|(ticker, sum, count)| UnusualScore {
            ticker,
            score: sum / count as f64,
        })
        .collect();

    out.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    out
}
