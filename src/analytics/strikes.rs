use serde::Serialize;

use crate::model::{TableData, Trade};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrikePremium {
    pub strike: f64,
    pub premium: f64,
}

impl StrikePremium {
    pub fn table(rows: &[StrikePremium]) -> TableData {
        let mut table = TableData::new(vec!["strike", "premium"]);
        for r in rows {
            table.push_row(vec![r.strike.to_string(), r.premium.to_string()]);
        }
        table
    }
}

/// Sum premium per strike and return the top `n` strikes by premium,
/// descending. Ties keep first-seen input order (stable sort).
pub fn top_strikes(trades: &[Trade], n: usize) -> Vec<StrikePremium> {
    let mut by_strike: Vec<StrikePremium> = Vec::new();
    for t in trades {
        match by_strike.iter_mut().find(|s| s.strike == t.strike) {
            Some(s) => s.premium += t.premium,
            None => by_strike.push(StrikePremium {
                strike: t.strike,
                premium: t.premium,
            }),
        }
    }

    by_strike.sort_by(|a, b| {
        b.premium
            .partial_cmp(&a.premium)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    by_strike.truncate(n);
    by_strike
}
