use std::collections::BTreeMap;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::model::{OptionType, TableData, Trade};

/// Premium flow for one minute bucket: call and put sums plus their net.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowMinute {
    pub minute: NaiveDateTime,
    pub call: f64,
    pub put: f64,
    pub net_flow: f64,
}

impl FlowMinute {
    pub fn table(rows: &[FlowMinute]) -> TableData {
        let mut table = TableData::new(vec!["minute", "call", "put", "net_flow"]);
        for r in rows {
            table.push_row(vec![
                r.minute.to_string(),
                r.call.to_string(),
                r.put.to_string(),
                r.net_flow.to_string(),
            ]);
        }
        table
    }
}

/// Floor timestamps to the minute, sum premium per (minute, type), and derive
/// net_flow = call - put with missing sides treated as zero. Output is
/// ordered by minute ascending.
pub fn flow_by_minute(trades: &[Trade]) -> Vec<FlowMinute> {
    let mut buckets: BTreeMap<NaiveDateTime, (f64, f64)> = BTreeMap::new();
    for trade in trades {
        let minute = floor_minute(trade.timestamp);
        let entry = buckets.entry(minute).or_insert((0.0, 0.0));
        match trade.option_type {
            OptionType::Call => entry.0 += trade.premium,
            OptionType::Put => entry.1 += trade.premium,
        }
    }

    buckets
        .into_iter()
        .map(|(minute, (call, put))| FlowMinute {
            minute,
            call,
            put,
            net_flow: call - put,
        })
        .collect()
}

fn floor_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}
