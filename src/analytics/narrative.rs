use super::kpi::KpiSummary;

/// One-paragraph session summary. `flow_trend` is any signed measure of net
/// flow direction; positive reads bullish.
pub fn narrative_summary(kpis: &KpiSummary, top_ticker: &str, flow_trend: f64) -> String {
    let direction = if flow_trend > 0.0 { "bullish" } else { "bearish" };
    format!(
        "Flow is {direction} today with ${:.1}M in premium. Call/Put ratio is {:.2}, \
         while net delta sits at {:.2}M. Unusual activity is concentrated in {top_ticker}.",
        kpis.total_flow / 1e6,
        kpis.call_put_ratio,
        kpis.net_delta / 1e6,
    )
}
