//! The mock computations backing the metric registry. Values are canned;
//! only the ticker and as-of timestamp vary the output.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::viz::{ChartSpec, SeriesKind};

use super::MetricResponse;

fn envelope(
    as_of: DateTime<Utc>,
    payload: serde_json::Value,
    chart_spec: Option<ChartSpec>,
    summary: String,
) -> MetricResponse {
    MetricResponse {
        ok: true,
        as_of: as_of.to_rfc3339(),
        payload,
        chart_spec,
        summary,
    }
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn round4(v: f64) -> f64 {
    (v * 10_000.0).round() / 10_000.0
}

/// Digit-grouped integer, e.g. 12543 -> "12,543".
fn thousands(v: u64) -> String {
    let digits = v.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn strikes_50_to_150() -> Vec<i64> {
    (50..=150).step_by(10).collect()
}

pub fn gex(ticker: &str, as_of: DateTime<Utc>) -> MetricResponse {
    let ticker = ticker.to_uppercase();
    let strikes = strikes_50_to_150();
    let base = if ticker.starts_with('G') { 1.2 } else { 1.0 };
    let values: Vec<f64> = strikes
        .iter()
        .map(|&s| round3(base * 1.5f64.powf((s - 100) as f64 / 50.0)))
        .collect();
    let total: f64 = values.iter().sum();

    let rows: Vec<serde_json::Value> = strikes
        .iter()
        .zip(&values)
        .map(|(s, g)| json!({ "strike": s, "gex": g }))
        .collect();

    let chart = ChartSpec::new(
        format!("{ticker} Net Gamma vs Strike"),
        strikes.iter().map(|s| s.to_string()).collect(),
    )
    .with_series("Net Gamma", SeriesKind::Bar, values.clone());

    let summary = format!(
        "{ticker} shows total net gamma of {total:.2} as of {}.",
        as_of.date_naive()
    );
    envelope(
        as_of,
        json!({ "rows": rows, "total_gex": total }),
        Some(chart),
        summary,
    )
}

pub fn iv_snapshot(ticker: &str, as_of: DateTime<Utc>) -> MetricResponse {
    let ticker = ticker.to_uppercase();
    let strikes = strikes_50_to_150();
    let values: Vec<f64> = strikes
        .iter()
        .map(|&s| round4(0.2 + 0.05 * ((100 - s) as f64).abs() / 100.0))
        .collect();

    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let max = values.iter().cloned().fold(f64::MIN, f64::max);
    let min = values.iter().cloned().fold(f64::MAX, f64::min);

    let chart = ChartSpec::new(
        format!("{ticker} Implied Volatility"),
        strikes.iter().map(|s| s.to_string()).collect(),
    )
    .with_series("IV", SeriesKind::Line, values.clone());

    let summary = format!(
        "{ticker} implied volatility ranges from {:.2}% to {:.2}%.",
        min * 100.0,
        max * 100.0
    );
    envelope(
        as_of,
        json!({
            "strikes": strikes,
            "iv": values,
            "summary_stats": { "mean_iv": mean, "max_iv": max, "min_iv": min },
        }),
        Some(chart),
        summary,
    )
}

pub fn options_volume_oi(ticker: &str, as_of: DateTime<Utc>) -> MetricResponse {
    let ticker = ticker.to_uppercase();
    let call_volume: u64 = 12_543;
    let put_volume: u64 = 8_342;
    let call_oi: u64 = 50_231;
    let put_oi: u64 = 44_211;
    let put_call_ratio = round3(put_volume as f64 / call_volume as f64);

    let chart = ChartSpec::new(
        format!("{ticker} Volume vs Open Interest"),
        vec!["Calls".to_string(), "Puts".to_string()],
    )
    .with_series(
        "Volume",
        SeriesKind::Bar,
        vec![call_volume as f64, put_volume as f64],
    )
    .with_series(
        "Open Interest",
        SeriesKind::Bar,
        vec![call_oi as f64, put_oi as f64],
    );

    let summary = format!(
        "{ticker} shows call volume {} vs put volume {} (PCR {put_call_ratio}).",
        thousands(call_volume),
        thousands(put_volume)
    );
    envelope(
        as_of,
        json!({
            "call_volume": call_volume,
            "put_volume": put_volume,
            "call_oi": call_oi,
            "put_oi": put_oi,
            "put_call_ratio": put_call_ratio,
        }),
        Some(chart),
        summary,
    )
}

pub fn trend_bias(ticker: &str, as_of: DateTime<Utc>) -> MetricResponse {
    let ticker = ticker.to_uppercase();
    let price = 142.35;
    let summary = format!("{ticker} trades at ${price:.2} with a bullish 50/200D crossover signal.");
    envelope(
        as_of,
        json!({
            "price": price,
            "sma_50": 138.24,
            "sma_200": 125.11,
            "trend_bias": "bullish",
        }),
        None,
        summary,
    )
}

pub fn vwap_intraday(ticker: &str, as_of: DateTime<Utc>) -> MetricResponse {
    let ticker = ticker.to_uppercase();
    let vwap = 133.57;
    let session_high = 138.2;
    let session_low = 129.4;
    let summary = format!(
        "{ticker} intraday VWAP sits at ${vwap:.2}, between a {session_low:.2}-{session_high:.2} range."
    );
    envelope(
        as_of,
        json!({
            "vwap": vwap,
            "session_high": session_high,
            "session_low": session_low,
        }),
        None,
        summary,
    )
}
