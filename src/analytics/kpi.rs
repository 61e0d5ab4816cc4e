use serde::Serialize;

use crate::model::{OptionType, Trade};

use super::stats::percentile;

/// Session-level headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiSummary {
    pub total_flow: f64,
    pub call_put_ratio: f64,
    pub net_delta: f64,
    pub net_gamma: f64,
    pub unusual_count: u64,
}

impl KpiSummary {
    pub fn zero() -> Self {
        Self {
            total_flow: 0.0,
            call_put_ratio: 0.0,
            net_delta: 0.0,
            net_gamma: 0.0,
            unusual_count: 0,
        }
    }
}

/// Headline KPIs over a trade table.
///
/// The call/put ratio floors its denominator at 1 rather than treating zero
/// put premium as a special case; downstream consumers rely on that exact
/// behavior. Net greeks are signed by side (BUY +1, SELL -1) and scaled by
/// contract size x 100. The unusual count is the number of trades above the
/// 93rd premium percentile.
pub fn kpi_summary(trades: &[Trade]) -> KpiSummary {
    if trades.is_empty() {
        return KpiSummary::zero();
    }

    let mut total_flow = 0.0;
    let mut call_premium = 0.0;
    let mut put_premium = 0.0;
    let mut net_delta = 0.0;
    let mut net_gamma = 0.0;

    for t in trades {
        total_flow += t.premium;
        match t.option_type {
            OptionType::Call => call_premium += t.premium,
            OptionType::Put => put_premium += t.premium,
        }
        let signed = t.side.multiplier() * t.size as f64 * 100.0;
        net_delta += t.delta * signed;
        net_gamma += t.gamma * signed;
    }

    let call_put_ratio = call_premium / put_premium.max(1.0);

    let premiums: Vec<f64> = trades.iter().map(|t| t.premium).collect();
    let cutoff = percentile(&premiums, 0.93);
    let unusual_count = premiums.iter().filter(|&&p| p > cutoff).count() as u64;

    KpiSummary {
        total_flow,
        call_put_ratio,
        net_delta,
        net_gamma,
        unusual_count,
    }
}
