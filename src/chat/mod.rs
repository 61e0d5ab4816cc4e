//! Deterministic chat core: filter extraction, keyword intent routing with
//! optional LLM delegation, and dispatch into the analytics layer.
//!
//! `handle_chat` never fails for a well-formed message. A broken or absent
//! provider quietly leaves the deterministic route in charge.

pub mod context;
pub mod intent;
pub mod llm;

use serde::Serialize;

use crate::analytics::{
    compute_gex, flow_by_minute, top_strikes, unusual_scores,
};
use crate::mock::MockBundle;
use crate::model::{TableData, Trade, TradeTag};
use crate::viz::{self, ChartSpec};

pub use context::{extract_filters, ChatContext};
pub use intent::{classify, Intent};
pub use llm::{route_via_llm, LlmConfig, LlmRoute};

/// One chat turn's response bundle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatReply {
    pub intent: Intent,
    pub text: String,
    pub chart: Option<ChartSpec>,
    pub table: Option<TableData>,
    pub summary: Option<String>,
}

impl ChatReply {
    fn text_only(intent: Intent, text: String) -> Self {
        Self {
            intent,
            text,
            chart: None,
            table: None,
            summary: None,
        }
    }
}

/// Run one chat turn: update the context from explicit `key=value` filters,
/// classify the intent (delegating to the provider when configured), and
/// dispatch to exactly one analytics view.
pub async fn handle_chat(
    message: &str,
    bundle: &MockBundle,
    ctx: &mut ChatContext,
    llm_cfg: Option<&LlmConfig>,
) -> ChatReply {
    extract_filters(message, ctx);
    let mut intent = classify(message);

    if let Some(cfg) = llm_cfg {
        if let Some(route) = route_via_llm(cfg, message).await {
            if let Some(delegated) = Intent::parse(&route.intent) {
                intent = delegated;
                apply_params(&route.params, ctx);
            } else {
                tracing::debug!(intent = %route.intent, "unknown delegated intent, keeping deterministic route");
            }
        }
    }

    dispatch(intent, bundle, ctx)
}

/// Delegated params overwrite context fields the same way explicit filter
/// syntax does. Unknown keys are ignored.
fn apply_params(params: &serde_json::Map<String, serde_json::Value>, ctx: &mut ChatContext) {
    for (key, value) in params {
        match key.as_str() {
            "ticker" => {
                if let Some(t) = value.as_str() {
                    ctx.ticker = t.to_uppercase();
                }
            }
            "window" => {
                if let Some(w) = value.as_str() {
                    ctx.window = Some(w.to_string());
                }
            }
            "min_premium" => ctx.min_premium = value.as_f64().or(ctx.min_premium),
            "sweeps_only" => ctx.sweeps_only = value.as_bool().or(ctx.sweeps_only),
            _ => {}
        }
    }
}

fn filtered_trades<'a>(bundle: &'a MockBundle, ctx: &ChatContext) -> Vec<&'a Trade> {
    bundle
        .trades
        .iter()
        .filter(|t| t.ticker == ctx.ticker)
        .filter(|t| ctx.min_premium.is_none_or(|min| t.premium >= min))
        .filter(|t| !ctx.sweeps_only.unwrap_or(false) || t.tag == TradeTag::Sweep)
        .collect()
}

fn dispatch(intent: Intent, bundle: &MockBundle, ctx: &ChatContext) -> ChatReply {
    let ticker = ctx.ticker.clone();
    let filtered: Vec<Trade> = filtered_trades(bundle, ctx).into_iter().cloned().collect();

    match intent {
        Intent::SetFilter => {
            let min_premium = ctx
                .min_premium
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            let sweeps_only = ctx
                .sweeps_only
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            ChatReply::text_only(
                intent,
                format!(
                    "Updated filters. Ticker={ticker}, min_premium={min_premium}, sweeps_only={sweeps_only}."
                ),
            )
        }

        Intent::FlowSummary => {
            let flow = flow_by_minute(&filtered);
            let net: f64 = flow.iter().map(|f| f.net_flow).sum();
            let summary = format!(
                "Flow summary for {ticker}: net flow of ${:.1}M over the session.",
                net / 1e6
            );
            ChatReply {
                intent,
                text: summary.clone(),
                chart: Some(viz::flow_timeseries(&flow)),
                table: Some(crate::analytics::FlowMinute::table(&flow).tail(25)),
                summary: Some(summary),
            }
        }

        Intent::CallPut => {
            let flow = flow_by_minute(&filtered);
            ChatReply {
                intent,
                text: format!("Call vs Put premium for {ticker}."),
                chart: Some(viz::flow_timeseries(&flow)),
                table: Some(crate::analytics::FlowMinute::table(&flow).tail(30)),
                summary: None,
            }
        }

        Intent::TopStrikes => {
            let top = top_strikes(&filtered, 10);
            ChatReply {
                intent,
                text: format!("Top strikes by premium for {ticker}."),
                chart: Some(viz::top_strikes_bar(&top)),
                table: Some(crate::analytics::StrikePremium::table(&top)),
                summary: None,
            }
        }

        // The scanner is market-wide on purpose; the ticker filter does not
        // apply here.
        Intent::Unusual => {
            let scores = unusual_scores(&bundle.trades);
            let top10 = &scores[..scores.len().min(10)];
            ChatReply {
                intent,
                text: "Unusual activity scanner for the market.".to_string(),
                chart: Some(viz::unusual_scores_bar(top10)),
                table: Some(crate::analytics::UnusualScore::table(&scores).head(15)),
                summary: None,
            }
        }

        Intent::Gex => {
            let rows: Vec<_> = bundle
                .chain
                .iter()
                .filter(|r| r.ticker == ticker)
                .cloned()
                .collect();
            let gex = compute_gex(&rows);
            let summary = format!(
                "Gamma wall at {:.1}, flip near {:.1}.",
                gex.gamma_wall, gex.gamma_flip
            );
            ChatReply {
                intent,
                text: summary.clone(),
                chart: Some(viz::gex_by_strike(&gex)),
                table: Some(gex.table().head(20)),
                summary: Some(summary),
            }
        }

        Intent::PriceFlow => {
            let flow = flow_by_minute(&filtered);
            ChatReply {
                intent,
                text: format!("Price vs flow overlay for {ticker}."),
                chart: Some(viz::price_flow_overlay(&flow, &bundle.prices, &ticker)),
                table: Some(crate::analytics::FlowMinute::table(&flow).tail(20)),
                summary: None,
            }
        }

        Intent::ExportCsv => ChatReply {
            intent,
            text: "Export requested. Fetch /export/trades for the current table.".to_string(),
            chart: None,
            table: Some(TableData::from_trades(&filtered).head(200)),
            summary: None,
        },
    }
}
