use serde::{Deserialize, Serialize};

use super::trade::{ChainRow, Trade};

/// A column-named tabular excerpt. The common currency between chat replies,
/// the export endpoints, and CSV serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    pub fn new<S: Into<String>>(columns: Vec<S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keep only the last `n` rows (tail of a time-ordered table).
    pub fn tail(mut self, n: usize) -> Self {
        if self.rows.len() > n {
            self.rows.drain(..self.rows.len() - n);
        }
        self
    }

    /// Keep only the first `n` rows.
    pub fn head(mut self, n: usize) -> Self {
        self.rows.truncate(n);
        self
    }

    pub fn from_trades(trades: &[Trade]) -> Self {
        let mut table = Self::new(vec![
            "timestamp",
            "ticker",
            "type",
            "side",
            "premium",
            "strike",
            "expiry",
            "price",
            "size",
            "iv",
            "delta",
            "gamma",
            "tag",
            "sentiment",
        ]);
        for t in trades {
            table.push_row(vec![
                t.timestamp.to_string(),
                t.ticker.clone(),
                t.option_type.as_str().to_string(),
                t.side.as_str().to_string(),
                t.premium.to_string(),
                t.strike.to_string(),
                t.expiry.to_string(),
                t.price.to_string(),
                t.size.to_string(),
                t.iv.to_string(),
                t.delta.to_string(),
                t.gamma.to_string(),
                t.tag.as_str().to_string(),
                t.sentiment.as_str().to_string(),
            ]);
        }
        table
    }

    pub fn from_chain(chain: &[ChainRow]) -> Self {
        let mut table = Self::new(vec![
            "ticker", "spot", "strike", "expiry", "oi", "iv", "gamma", "volume", "call_put",
        ]);
        for row in chain {
            table.push_row(vec![
                row.ticker.clone(),
                row.spot.to_string(),
                row.strike.to_string(),
                row.expiry.to_string(),
                row.oi.to_string(),
                row.iv.to_string(),
                row.gamma.to_string(),
                row.volume.to_string(),
                row.call_put.as_str().to_string(),
            ]);
        }
        table
    }
}
