#![allow(dead_code)]

use chrono::{Duration, NaiveDate, NaiveDateTime};

use optflow::model::{ChainRow, OptionType, Sentiment, Side, Trade, TradeTag};

pub fn session_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

pub fn session_open() -> NaiveDateTime {
    session_date().and_hms_opt(9, 30, 0).unwrap()
}

/// A plain CALL BUY trade at the session open; tweak fields per test.
pub fn trade(ticker: &str, premium: f64) -> Trade {
    Trade {
        timestamp: session_open(),
        ticker: ticker.to_string(),
        option_type: OptionType::Call,
        side: Side::Buy,
        premium,
        strike: 100.0,
        expiry: session_date() + Duration::days(30),
        price: 100.0,
        size: 10,
        iv: 0.4,
        delta: 0.3,
        gamma: 0.05,
        tag: TradeTag::Split,
        sentiment: Sentiment::Bullish,
    }
}

pub fn trade_at(ticker: &str, premium: f64, minutes_in: i64) -> Trade {
    Trade {
        timestamp: session_open() + Duration::minutes(minutes_in),
        ..trade(ticker, premium)
    }
}

pub fn chain_row(ticker: &str, strike: f64, oi: u32, gamma: f64, call_put: OptionType) -> ChainRow {
    ChainRow {
        ticker: ticker.to_string(),
        spot: 100.0,
        strike,
        expiry: session_date() + Duration::days(7),
        oi,
        iv: 0.35,
        gamma,
        volume: 100,
        call_put,
    }
}
