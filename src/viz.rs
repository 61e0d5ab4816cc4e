//! Chart specifications for tabular results. Pure data, ECharts-flavored:
//! a title, category x-axis values, and named series. No rendering happens
//! here; clients turn these into whatever plotting surface they have.

use serde::{Deserialize, Serialize};

use crate::analytics::{FlowMinute, GexSummary, StrikePremium, SweepHeatmap, UnusualScore};
use crate::model::PricePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Line,
    Bar,
    Heatmap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn new(title: impl Into<String>, x: Vec<String>) -> Self {
        Self {
            title: title.into(),
            x,
            series: Vec::new(),
        }
    }

    pub fn with_series(
        mut self,
        name: impl Into<String>,
        kind: SeriesKind,
        data: Vec<f64>,
    ) -> Self {
        self.series.push(Series {
            name: name.into(),
            kind,
            data,
        });
        self
    }
}

pub fn flow_timeseries(flow: &[FlowMinute]) -> ChartSpec {
    let x = flow.iter().map(|f| f.minute.to_string()).collect();
    ChartSpec::new("Call vs Put Premium Over Time", x)
        .with_series(
            "Calls",
            SeriesKind::Line,
            flow.iter().map(|f| f.call).collect(),
        )
        .with_series(
            "Puts",
            SeriesKind::Line,
            flow.iter().map(|f| f.put).collect(),
        )
        .with_series(
            "Net Flow",
            SeriesKind::Line,
            flow.iter().map(|f| f.net_flow).collect(),
        )
}

/// Net flow against the underlying's intraday price, sampled at the flow
/// minutes. Minutes without a matching price point carry the last seen price.
pub fn price_flow_overlay(flow: &[FlowMinute], prices: &[PricePoint], ticker: &str) -> ChartSpec {
    let series: Vec<&PricePoint> = prices.iter().filter(|p| p.ticker == ticker).collect();

    let mut last_price = series.first().map(|p| p.price).unwrap_or(0.0);
    let mut sampled = Vec::with_capacity(flow.len());
    for f in flow {
        if let Some(p) = series.iter().find(|p| p.timestamp == f.minute) {
            last_price = p.price;
        }
        sampled.push(last_price);
    }

    let x = flow.iter().map(|f| f.minute.to_string()).collect();
    ChartSpec::new("Flow vs Price", x)
        .with_series(
            "Net Flow",
            SeriesKind::Line,
            flow.iter().map(|f| f.net_flow).collect(),
        )
        .with_series(format!("{ticker} Price"), SeriesKind::Line, sampled)
}

pub fn top_strikes_bar(strikes: &[StrikePremium]) -> ChartSpec {
    let x = strikes.iter().map(|s| s.strike.to_string()).collect();
    ChartSpec::new("Top Strikes by Premium", x).with_series(
        "Premium",
        SeriesKind::Bar,
        strikes.iter().map(|s| s.premium).collect(),
    )
}

pub fn gex_by_strike(gex: &GexSummary) -> ChartSpec {
    let x = gex.by_strike.iter().map(|s| s.strike.to_string()).collect();
    ChartSpec::new("Gamma Exposure by Strike", x).with_series(
        "GEX",
        SeriesKind::Bar,
        gex.by_strike.iter().map(|s| s.gex).collect(),
    )
}

pub fn unusual_scores_bar(scores: &[UnusualScore]) -> ChartSpec {
    let x = scores.iter().map(|s| s.ticker.clone()).collect();
    ChartSpec::new("Unusual Activity Score", x).with_series(
        "Score",
        SeriesKind::Bar,
        scores.iter().map(|s| s.score).collect(),
    )
}

/// One heatmap series per ticker, sharing the window axis.
pub fn sweep_intensity(heatmap: &SweepHeatmap) -> ChartSpec {
    let x = heatmap.windows.iter().map(|w| w.to_string()).collect();
    let mut spec = ChartSpec::new("Sweep Intensity Heatmap", x);
    for (i, ticker) in heatmap.tickers.iter().enumerate() {
        spec = spec.with_series(ticker.clone(), SeriesKind::Heatmap, heatmap.values[i].clone());
    }
    spec
}
