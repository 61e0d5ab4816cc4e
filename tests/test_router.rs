mod common;

use optflow::chat::{classify, extract_filters, handle_chat, ChatContext, Intent, LlmConfig};
use optflow::mock::{default_tickers, MockBundle};

use common::session_date;

fn bundle() -> MockBundle {
    MockBundle::generate(7, &default_tickers(), session_date())
}

// ── Intent classification ───────────────────────────────────────────

#[test]
fn classification_priority_is_fixed() {
    assert_eq!(classify("ticker=AAPL"), Intent::SetFilter);
    assert_eq!(classify("set everything up"), Intent::SetFilter);
    // Export outranks gex even when both keywords appear.
    assert_eq!(classify("export the gamma table as csv"), Intent::ExportCsv);
    assert_eq!(classify("show me GEX"), Intent::Gex);
    assert_eq!(classify("where are the gamma walls"), Intent::Gex);
    assert_eq!(classify("anything unusual today?"), Intent::Unusual);
    assert_eq!(classify("top strikes please"), Intent::TopStrikes);
    assert_eq!(classify("call/put breakdown"), Intent::CallPut);
    assert_eq!(classify("price vs flow"), Intent::PriceFlow);
    assert_eq!(classify("how's the flow"), Intent::FlowSummary);
    assert_eq!(classify("hello there"), Intent::FlowSummary);
}

// ── Filter extraction ───────────────────────────────────────────────

#[test]
fn ticker_assignment_updates_context() {
    let mut ctx = ChatContext::default();
    extract_filters("ticker=AAPL", &mut ctx);
    assert_eq!(ctx.ticker, "AAPL");
}

#[test]
fn unmatched_fields_stay_sticky() {
    let mut ctx = ChatContext {
        min_premium: Some(50_000.0),
        ..ChatContext::default()
    };
    extract_filters("ticker=nvda", &mut ctx);
    assert_eq!(ctx.ticker, "NVDA");
    assert_eq!(ctx.min_premium, Some(50_000.0)); // preserved
    assert_eq!(ctx.sweeps_only, None);
}

#[test]
fn all_filter_kinds_parse() {
    let mut ctx = ChatContext::default();
    extract_filters(
        "set ticker=qqq window=15m min_premium=25000.5 sweeps_only=true",
        &mut ctx,
    );
    assert_eq!(ctx.ticker, "QQQ");
    assert_eq!(ctx.window.as_deref(), Some("15m"));
    assert_eq!(ctx.min_premium, Some(25000.5));
    assert_eq!(ctx.sweeps_only, Some(true));
}

#[test]
fn natural_ticker_mentions_do_not_update_context() {
    let mut ctx = ChatContext::default();
    extract_filters("show GEX for AAPL", &mut ctx);
    assert_eq!(ctx.ticker, "SPY");
}

// ── handle_chat dispatch ────────────────────────────────────────────

#[tokio::test]
async fn set_filter_confirms_without_chart_or_table() {
    let bundle = bundle();
    let mut ctx = ChatContext::default();
    let reply = handle_chat("ticker=AAPL min_premium=1000", &bundle, &mut ctx, None).await;

    assert_eq!(reply.intent, Intent::SetFilter);
    assert_eq!(ctx.ticker, "AAPL");
    assert!(reply.chart.is_none());
    assert!(reply.table.is_none());
    assert!(reply.text.contains("Ticker=AAPL"));
    assert!(reply.text.contains("min_premium=1000"));
}

#[tokio::test]
async fn gex_uses_the_context_ticker_not_the_message() {
    let bundle = bundle();
    let mut ctx = ChatContext::default(); // SPY
    let reply = handle_chat("show GEX for AAPL", &bundle, &mut ctx, None).await;

    assert_eq!(reply.intent, Intent::Gex);
    assert_eq!(ctx.ticker, "SPY"); // free-text mention must not rebind
    assert!(reply.text.starts_with("Gamma wall at"));
    assert!(reply.chart.is_some());
    assert!(reply.table.is_some());
}

#[tokio::test]
async fn default_intent_is_flow_summary() {
    let bundle = bundle();
    let mut ctx = ChatContext::default();
    let reply = handle_chat("good morning", &bundle, &mut ctx, None).await;

    assert_eq!(reply.intent, Intent::FlowSummary);
    assert!(reply.text.contains("Flow summary for SPY"));
    assert!(reply.summary.is_some());
}

#[tokio::test]
async fn export_reply_caps_the_table_at_200_rows() {
    let bundle = bundle();
    let mut ctx = ChatContext::default();
    let reply = handle_chat("export csv", &bundle, &mut ctx, None).await;

    assert_eq!(reply.intent, Intent::ExportCsv);
    let table = reply.table.expect("export carries a table");
    assert!(table.len() <= 200);
}

#[tokio::test]
async fn unusual_scanner_is_market_wide() {
    let bundle = bundle();
    let mut ctx = ChatContext {
        ticker: "AAPL".to_string(),
        ..ChatContext::default()
    };
    let reply = handle_chat("anything unusual?", &bundle, &mut ctx, None).await;

    let table = reply.table.expect("scanner carries a table");
    // More than one ticker shows up even with a ticker filter in context.
    let tickers: std::collections::HashSet<_> =
        table.rows.iter().map(|r| r[0].clone()).collect();
    assert!(tickers.len() > 1);
}

#[tokio::test]
async fn sweeps_only_filter_narrows_dispatch_input() {
    let bundle = bundle();
    let mut ctx = ChatContext::default();

    let all = handle_chat("export csv", &bundle, &mut ctx, None).await;
    let all_rows = all.table.expect("table").len();

    extract_filters("sweeps_only=true", &mut ctx);
    let sweeps = handle_chat("export csv", &bundle, &mut ctx, None).await;
    let sweep_rows = sweeps.table.expect("table").len();

    assert!(sweep_rows < all_rows);
}

#[tokio::test]
async fn broken_provider_leaves_the_keyword_route_in_charge() {
    let bundle = bundle();
    let mut ctx = ChatContext::default();
    // Nothing listens here; the delegation call fails on connect and the
    // turn must still resolve through the keyword rules without erroring.
    let cfg = LlmConfig {
        api_key: "test-key".to_string(),
        base_url: "http://127.0.0.1:9".to_string(),
        model: "test-model".to_string(),
    };

    let reply = handle_chat("show me GEX", &bundle, &mut ctx, Some(&cfg)).await;
    assert_eq!(reply.intent, Intent::Gex);
    assert!(reply.text.starts_with("Gamma wall at"));
    assert_eq!(ctx.ticker, "SPY"); // context untouched by the failed call
}

#[tokio::test]
async fn context_persists_across_turns() {
    let bundle = bundle();
    let mut ctx = ChatContext::default();

    handle_chat("ticker=NVDA", &bundle, &mut ctx, None).await;
    let reply = handle_chat("how's the flow", &bundle, &mut ctx, None).await;

    assert!(reply.text.contains("Flow summary for NVDA"));
}
