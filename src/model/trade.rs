use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// CALL or PUT leg of an options trade or chain row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "CALL",
            OptionType::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// Signed multiplier used in net greek aggregation: BUY adds, SELL subtracts.
    pub fn multiplier(&self) -> f64 {
        match self {
            Side::Buy => 1.0,
            Side::Sell => -1.0,
        }
    }
}

/// Execution-style tag attached to a synthetic trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeTag {
    Sweep,
    Block,
    Split,
}

impl TradeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeTag::Sweep => "sweep",
            TradeTag::Block => "block",
            TradeTag::Split => "split",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
        }
    }
}

/// One synthetic options trade.
///
/// Invariants held by the generator: premium >= 0, delta in [0.05, 0.95],
/// gamma in [0.005, 0.25], iv in [0.12, 0.95], expiry >= session date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: NaiveDateTime,
    pub ticker: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub side: Side,
    pub premium: f64,
    pub strike: f64,
    pub expiry: NaiveDate,
    /// Underlying price at trade time.
    pub price: f64,
    pub size: u32,
    pub iv: f64,
    pub delta: f64,
    pub gamma: f64,
    pub tag: TradeTag,
    pub sentiment: Sentiment,
}

/// One point of a synthetic intraday price series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub ticker: String,
    pub price: f64,
}

/// One row of a synthetic options chain: (ticker, expiry, strike, call/put).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainRow {
    pub ticker: String,
    pub spot: f64,
    pub strike: f64,
    pub expiry: NaiveDate,
    pub oi: u32,
    pub iv: f64,
    pub gamma: f64,
    pub volume: u32,
    pub call_put: OptionType,
}
