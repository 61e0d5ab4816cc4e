use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::model::{TableData, Trade, TradeTag};

/// Sweep premium bucketed into 5-minute windows, pivoted to a ticker x window
/// matrix. `values[i][j]` is the premium for `tickers[i]` in `windows[j]`;
/// missing combinations are zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepHeatmap {
    pub tickers: Vec<String>,
    pub windows: Vec<NaiveDateTime>,
    pub values: Vec<Vec<f64>>,
}

impl SweepHeatmap {
    pub fn table(&self) -> TableData {
        let mut columns = vec!["ticker".to_string()];
        columns.extend(self.windows.iter().map(|w| w.to_string()));
        let mut table = TableData::new(columns);
        for (i, ticker) in self.tickers.iter().enumerate() {
            let mut row = vec![ticker.clone()];
            row.extend(self.values[i].iter().map(|v| v.to_string()));
            table.push_row(row);
        }
        table
    }
}

/// Restrict to sweep-tagged trades and sum premium per (ticker, 5-minute
/// window). Tickers keep first-seen order; windows are ascending.
pub fn sweep_heatmap(trades: &[Trade]) -> SweepHeatmap {
    let sweeps: Vec<&Trade> = trades
        .iter()
        .filter(|t| t.tag == TradeTag::Sweep)
        .collect();

    let mut tickers: Vec<String> = Vec::new();
    let mut windows: Vec<NaiveDateTime> = Vec::new();
    for t in &sweeps {
        if !tickers.contains(&t.ticker) {
            tickers.push(t.ticker.clone());
        }
        let w = floor_five_minutes(t.timestamp);
        if !windows.contains(&w) {
            windows.push(w);
        }
    }
    windows.sort();

    let mut values = vec![vec![0.0; windows.len()]; tickers.len()];
    for t in &sweeps {
        let row = tickers.iter().position(|k| *k == t.ticker).unwrap_or(0);
        let w = floor_five_minutes(t.timestamp);
        let col = windows.iter().position(|k| *k == w).unwrap_or(0);
        values[row][col] += t.premium;
    }

    SweepHeatmap {
        tickers,
        windows,
        values,
    }
}

fn floor_five_minutes(ts: NaiveDateTime) -> NaiveDateTime {
    let floored = ts.minute() - ts.minute() % 5;
    ts.with_minute(floored)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
