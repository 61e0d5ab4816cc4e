use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};

use optflow::metrics::{coerce_as_of, compute_metric, infer_expiry, Metric};

// ── Registry ────────────────────────────────────────────────────────

#[test]
fn registry_has_exactly_five_metrics() {
    assert_eq!(Metric::ALL.len(), 5);
    for metric in Metric::ALL {
        assert_eq!(Metric::from_name(metric.name()), Some(metric));
        assert!(!metric.description().is_empty());
    }
}

#[test]
fn unknown_metric_name_is_rejected() {
    assert_eq!(Metric::from_name("sharpe"), None);
    assert_eq!(Metric::from_name(""), None);
    assert_eq!(Metric::from_name("GEX"), None); // names are lowercase
}

// ── as_of / expiry handling ─────────────────────────────────────────

#[test]
fn as_of_accepts_iso_timestamps() {
    let dt = coerce_as_of(Some("2026-05-01T10:30:00"));
    assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());

    let dt = coerce_as_of(Some("2026-05-01T10:30:00Z"));
    assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());

    let dt = coerce_as_of(Some("2026-05-01"));
    assert_eq!(dt.date_naive(), NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
}

#[test]
fn garbage_as_of_falls_back_to_now() {
    let before = Utc::now();
    let dt = coerce_as_of(Some("not a date"));
    assert!(dt >= before - Duration::seconds(5));
}

#[test]
fn inferred_expiry_is_the_next_friday() {
    // Walk one full week of as-of days; the inferred expiry must always be
    // a strictly-future Friday at most seven days out.
    let monday = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
    assert_eq!(monday.weekday(), Weekday::Mon);

    for offset in 0..7 {
        let as_of = (monday + Duration::days(offset))
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        let expiry: NaiveDate = infer_expiry(as_of).parse().unwrap();
        assert_eq!(expiry.weekday(), Weekday::Fri);
        let ahead = (expiry - as_of.date_naive()).num_days();
        assert!((1..=7).contains(&ahead), "offset {offset}: {ahead} days");
    }

    // A Friday as-of rolls a full week forward.
    let friday = monday + Duration::days(4);
    assert_eq!(friday.weekday(), Weekday::Fri);
    let expiry: NaiveDate = infer_expiry(friday.and_hms_opt(9, 0, 0).unwrap().and_utc())
        .parse()
        .unwrap();
    assert_eq!((expiry - friday).num_days(), 7);
}

// ── Canned computations ─────────────────────────────────────────────

#[test]
fn gex_metric_echoes_parameters_and_infers_expiry() {
    let resp = compute_metric(Metric::Gex, "spy", None, Some("2026-03-02T10:00:00"));
    assert!(resp.ok);

    let params = &resp.payload["parameters"];
    assert_eq!(params["ticker"], "spy");
    assert_eq!(params["metric"], "gex");
    let expiry: NaiveDate = params["expiry"].as_str().unwrap().parse().unwrap();
    assert_eq!(expiry.weekday(), Weekday::Fri);

    let rows = resp.payload["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 11); // strikes 50..=150 step 10
    let total: f64 = rows.iter().map(|r| r["gex"].as_f64().unwrap()).sum();
    assert!((total - resp.payload["total_gex"].as_f64().unwrap()).abs() < 1e-9);

    assert!(resp.chart_spec.is_some());
    assert!(resp.summary.contains("total net gamma"));
}

#[test]
fn gex_base_is_higher_for_g_tickers() {
    let gme = compute_metric(Metric::Gex, "GME", Some("2026-03-06"), None);
    let spy = compute_metric(Metric::Gex, "SPY", Some("2026-03-06"), None);
    let gme_total = gme.payload["total_gex"].as_f64().unwrap();
    let spy_total = spy.payload["total_gex"].as_f64().unwrap();
    assert!(gme_total > spy_total);
}

#[test]
fn iv_snapshot_stats_match_the_smile() {
    let resp = compute_metric(Metric::IvSnapshot, "aapl", None, None);
    let stats = &resp.payload["summary_stats"];
    // Smile bottoms at the 100 strike (0.2) and peaks at the 50 strike.
    assert!((stats["min_iv"].as_f64().unwrap() - 0.2).abs() < 1e-9);
    assert!((stats["max_iv"].as_f64().unwrap() - 0.225).abs() < 1e-9);
    assert!(resp.summary.contains('%'));
}

#[test]
fn non_expiry_metrics_do_not_infer_one() {
    let resp = compute_metric(Metric::VwapIntraday, "SPY", None, None);
    assert!(resp.payload["parameters"].get("expiry").is_none());
    assert!(resp.chart_spec.is_none());

    let resp = compute_metric(Metric::TrendBias, "SPY", None, None);
    assert_eq!(resp.payload["trend_bias"], "bullish");
}

#[test]
fn volume_metric_reports_put_call_ratio() {
    let resp = compute_metric(Metric::OptionsVolumeOi, "SPY", None, None);
    assert_eq!(resp.payload["put_call_ratio"].as_f64().unwrap(), 0.665);
    assert!(resp.summary.contains("12,543"));
}
