//! Fixed registry of canned metrics behind a uniform response envelope.
//!
//! This is the boundary façade: payloads are mock computations keyed only by
//! ticker and an inferred or explicit expiry. It is also the only layer that
//! rejects requests outright (unknown metric names).

mod canned;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::viz::ChartSpec;

/// The five supported metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "gex")]
    Gex,
    #[serde(rename = "iv_snapshot")]
    IvSnapshot,
    #[serde(rename = "options_volume_oi")]
    OptionsVolumeOi,
    #[serde(rename = "trend_50_200d")]
    TrendBias,
    #[serde(rename = "vwap_intraday")]
    VwapIntraday,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Gex,
        Metric::IvSnapshot,
        Metric::OptionsVolumeOi,
        Metric::TrendBias,
        Metric::VwapIntraday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Gex => "gex",
            Metric::IvSnapshot => "iv_snapshot",
            Metric::OptionsVolumeOi => "options_volume_oi",
            Metric::TrendBias => "trend_50_200d",
            Metric::VwapIntraday => "vwap_intraday",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Metric::Gex => "Net gamma exposure (per expiry)",
            Metric::IvSnapshot => "Implied vol snapshot",
            Metric::OptionsVolumeOi => "Options vol/OI summary",
            Metric::TrendBias => "50/200D trend bias",
            Metric::VwapIntraday => "Intraday VWAP",
        }
    }

    pub fn from_name(name: &str) -> Option<Metric> {
        Metric::ALL.iter().copied().find(|m| m.name() == name)
    }

    /// Metrics whose mock computation is expiry-keyed.
    pub fn wants_expiry(&self) -> bool {
        matches!(self, Metric::Gex | Metric::IvSnapshot)
    }
}

/// Uniform envelope every metric computation returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResponse {
    pub ok: bool,
    pub as_of: String,
    pub payload: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_spec: Option<ChartSpec>,
    pub summary: String,
}

/// Parse an ISO-8601-ish as-of override, falling back to now (UTC) on
/// absence or any parse failure.
pub fn coerce_as_of(as_of: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = as_of else {
        return Utc::now();
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.and_utc();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return dt.and_utc();
        }
    }
    Utc::now()
}

/// Nearest upcoming Friday strictly after `as_of`; a Friday as-of rolls to
/// the following week.
pub fn infer_expiry(as_of: DateTime<Utc>) -> String {
    let weekday = as_of.weekday().num_days_from_monday() as i64;
    let mut days_ahead = (4 - weekday).rem_euclid(7);
    if days_ahead == 0 {
        days_ahead = 7;
    }
    (as_of + chrono::Duration::days(days_ahead))
        .date_naive()
        .to_string()
}

/// Compute one metric. Expiry is inferred for expiry-keyed metrics when not
/// supplied; the effective parameters are echoed into `payload.parameters`.
pub fn compute_metric(
    metric: Metric,
    ticker: &str,
    expiry: Option<&str>,
    as_of: Option<&str>,
) -> MetricResponse {
    let as_of_dt = coerce_as_of(as_of);

    let effective_expiry = match (expiry, metric.wants_expiry()) {
        (Some(e), _) => Some(e.to_string()),
        (None, true) => Some(infer_expiry(as_of_dt)),
        (None, false) => None,
    };

    let mut response = match metric {
        Metric::Gex => canned::gex(ticker, as_of_dt),
        Metric::IvSnapshot => canned::iv_snapshot(ticker, as_of_dt),
        Metric::OptionsVolumeOi => canned::options_volume_oi(ticker, as_of_dt),
        Metric::TrendBias => canned::trend_bias(ticker, as_of_dt),
        Metric::VwapIntraday => canned::vwap_intraday(ticker, as_of_dt),
    };

    let params = response
        .payload
        .as_object_mut()
        .map(|obj| {
            obj.entry("parameters")
                .or_insert_with(|| serde_json::json!({}))
        })
        .and_then(|v| v.as_object_mut());
    if let Some(params) = params {
        params.insert("ticker".to_string(), serde_json::json!(ticker));
        params.insert("metric".to_string(), serde_json::json!(metric.name()));
        if let Some(e) = effective_expiry {
            params.insert("expiry".to_string(), serde_json::json!(e));
        }
    }

    response
}
