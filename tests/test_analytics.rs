mod common;

use chrono::Duration;

use optflow::analytics::{
    flow_by_minute, kpi_summary, narrative_summary, sweep_heatmap, top_strikes, unusual_scores,
};
use optflow::mock::{default_tickers, generate_trades};
use optflow::model::{OptionType, PricePoint, Side, TradeTag};
use optflow::viz;

use common::{session_date, trade, trade_at};

// ── flow_by_minute ──────────────────────────────────────────────────

#[test]
fn net_flow_sums_to_call_minus_put() {
    let trades = generate_trades(7, &default_tickers(), session_date(), 1400);

    let call_total: f64 = trades
        .iter()
        .filter(|t| t.option_type == OptionType::Call)
        .map(|t| t.premium)
        .sum();
    let put_total: f64 = trades
        .iter()
        .filter(|t| t.option_type == OptionType::Put)
        .map(|t| t.premium)
        .sum();

    let net: f64 = flow_by_minute(&trades).iter().map(|f| f.net_flow).sum();
    assert!((net - (call_total - put_total)).abs() < 1e-6);
}

#[test]
fn flow_buckets_by_minute_ascending() {
    let mut trades = vec![
        trade_at("SPY", 100.0, 5),
        trade_at("SPY", 50.0, 0),
        trade_at("SPY", 25.0, 5),
    ];
    trades[2].option_type = OptionType::Put;

    let flow = flow_by_minute(&trades);
    assert_eq!(flow.len(), 2);
    assert_eq!(flow[0].minute, common::session_open());
    assert_eq!(flow[0].call, 50.0);
    assert_eq!(flow[0].put, 0.0);
    assert_eq!(flow[1].call, 100.0);
    assert_eq!(flow[1].put, 25.0);
    assert_eq!(flow[1].net_flow, 75.0);
}

#[test]
fn flow_on_empty_input_is_empty() {
    assert!(flow_by_minute(&[]).is_empty());
}

// ── kpi_summary ─────────────────────────────────────────────────────

#[test]
fn kpis_on_empty_table_are_zero() {
    let kpis = kpi_summary(&[]);
    assert_eq!(kpis.total_flow, 0.0);
    assert_eq!(kpis.call_put_ratio, 0.0);
    assert_eq!(kpis.net_delta, 0.0);
    assert_eq!(kpis.net_gamma, 0.0);
    assert_eq!(kpis.unusual_count, 0);
}

#[test]
fn net_greeks_are_signed_by_side() {
    let mut buy = trade("SPY", 1000.0);
    buy.delta = 0.5;
    buy.gamma = 0.1;
    buy.size = 10;

    let mut sell = buy.clone();
    sell.side = Side::Sell;

    // Equal buy and sell legs cancel exactly.
    let kpis = kpi_summary(&[buy.clone(), sell]);
    assert_eq!(kpis.net_delta, 0.0);
    assert_eq!(kpis.net_gamma, 0.0);

    // One buy leg: delta x size x 100.
    let kpis = kpi_summary(&[buy]);
    assert_eq!(kpis.net_delta, 0.5 * 10.0 * 100.0);
    assert_eq!(kpis.net_gamma, 0.1 * 10.0 * 100.0);
}

#[test]
fn call_put_ratio_floors_denominator_at_one() {
    // All-call table: put premium is 0, so the ratio is call premium / 1.
    let trades = vec![trade("SPY", 500.0), trade("SPY", 250.0)];
    let kpis = kpi_summary(&trades);
    assert_eq!(kpis.call_put_ratio, 750.0);
}

// ── top_strikes ─────────────────────────────────────────────────────

#[test]
fn top_strikes_returns_n_sorted_descending() {
    let mut trades = Vec::new();
    for (i, premium) in [100.0, 500.0, 300.0, 200.0, 400.0].iter().enumerate() {
        let mut t = trade("SPY", *premium);
        t.strike = 100.0 + i as f64 * 10.0;
        trades.push(t);
    }

    let top = top_strikes(&trades, 3);
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].premium, 500.0);
    assert_eq!(top[1].premium, 400.0);
    assert_eq!(top[2].premium, 300.0);
}

#[test]
fn top_strikes_breaks_ties_by_input_order() {
    let mut a = trade("SPY", 100.0);
    a.strike = 110.0;
    let mut b = trade("SPY", 100.0);
    b.strike = 90.0;

    let top = top_strikes(&[a, b], 2);
    assert_eq!(top[0].strike, 110.0);
    assert_eq!(top[1].strike, 90.0);
}

// ── sweep_heatmap ───────────────────────────────────────────────────

#[test]
fn heatmap_keeps_only_sweeps_in_five_minute_windows() {
    let mut sweep_early = trade_at("SPY", 100.0, 2);
    sweep_early.tag = TradeTag::Sweep;
    let mut sweep_late = trade_at("SPY", 200.0, 7);
    sweep_late.tag = TradeTag::Sweep;
    let mut other_ticker = trade_at("QQQ", 50.0, 2);
    other_ticker.tag = TradeTag::Sweep;
    let block = trade_at("SPY", 999.0, 2); // not a sweep, must be excluded

    let heat = sweep_heatmap(&[sweep_early, sweep_late, other_ticker, block]);
    assert_eq!(heat.tickers, vec!["SPY".to_string(), "QQQ".to_string()]);
    assert_eq!(heat.windows.len(), 2);

    // SPY: 100 in window 0, 200 in window 1. QQQ: 50 then zero-filled.
    assert_eq!(heat.values[0], vec![100.0, 200.0]);
    assert_eq!(heat.values[1], vec![50.0, 0.0]);

    // Pivoted table: one row per ticker, one column per window after "ticker".
    let table = heat.table();
    assert_eq!(table.columns.len(), 3);
    assert_eq!(table.rows[1], vec!["QQQ", "50", "0"]);
}

#[test]
fn heatmap_without_sweeps_is_empty() {
    let heat = sweep_heatmap(&[trade("SPY", 100.0)]);
    assert!(heat.tickers.is_empty());
    assert!(heat.values.is_empty());
}

// ── unusual_scores ──────────────────────────────────────────────────

#[test]
fn sweep_boost_lifts_a_ticker() {
    // Two tickers, identical premium profiles, same expiry. Only the tag
    // differs, so the sweep boost fully decides the ordering.
    let a1 = trade("AAPL", 100.0);
    let a2 = trade("AAPL", 100.0);
    let mut b1 = trade("TSLA", 200.0);
    b1.tag = TradeTag::Sweep;
    let mut b2 = trade("TSLA", 200.0);
    b2.tag = TradeTag::Sweep;

    let scores = unusual_scores(&[a1, a2, b1, b2]);
    assert_eq!(scores[0].ticker, "TSLA");
    assert!((scores[0].score - scores[1].score - 0.35).abs() < 1e-9);
}

#[test]
fn near_term_expiry_boost_applies_within_seven_days() {
    // Distinct premiums keep the global std away from zero; one trade per
    // ticker keeps each z at exactly zero.
    let near = trade("AAPL", 100.0); // expiry at +30d = the set minimum
    let mut far = trade("TSLA", 200.0);
    far.expiry = session_date() + Duration::days(60);

    let scores = unusual_scores(&[near, far]);
    let aapl = scores.iter().find(|s| s.ticker == "AAPL").unwrap();
    let tsla = scores.iter().find(|s| s.ticker == "TSLA").unwrap();
    assert!((aapl.score - tsla.score - 0.4).abs() < 1e-9);
}

#[test]
fn unusual_scores_on_empty_input_is_empty() {
    assert!(unusual_scores(&[]).is_empty());
}

// ── narrative ───────────────────────────────────────────────────────

#[test]
fn narrative_direction_follows_flow_trend() {
    let kpis = kpi_summary(&[trade("SPY", 2_000_000.0)]);
    let up = narrative_summary(&kpis, "NVDA", 1.0);
    assert!(up.contains("bullish"));
    assert!(up.contains("NVDA"));

    let down = narrative_summary(&kpis, "NVDA", -1.0);
    assert!(down.contains("bearish"));

    // Zero trend reads bearish, not neutral.
    assert!(narrative_summary(&kpis, "NVDA", 0.0).contains("bearish"));
}

// ── chart specs ─────────────────────────────────────────────────────

#[test]
fn sweep_intensity_emits_one_series_per_ticker() {
    let mut spy = trade_at("SPY", 100.0, 2);
    spy.tag = TradeTag::Sweep;
    let mut qqq = trade_at("QQQ", 50.0, 7);
    qqq.tag = TradeTag::Sweep;

    let spec = viz::sweep_intensity(&sweep_heatmap(&[spy, qqq]));
    assert_eq!(spec.series.len(), 2);
    assert_eq!(spec.series[0].name, "SPY");
    assert_eq!(spec.series[1].name, "QQQ");
    assert_eq!(spec.x.len(), 2); // the two 5-minute windows
    assert_eq!(spec.series[0].data, vec![100.0, 0.0]);
}

#[test]
fn price_overlay_carries_the_last_seen_price_forward() {
    let flow = flow_by_minute(&[trade_at("SPY", 10.0, 0), trade_at("SPY", 10.0, 5)]);
    let prices = vec![PricePoint {
        timestamp: common::session_open(),
        ticker: "SPY".to_string(),
        price: 512.5,
    }];

    let spec = viz::price_flow_overlay(&flow, &prices, "SPY");
    let price_series = &spec.series[1];
    assert_eq!(price_series.name, "SPY Price");
    // No price point at the 09:35 minute, so 09:30's price carries over.
    assert_eq!(price_series.data, vec![512.5, 512.5]);
}
