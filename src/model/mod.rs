pub mod table;
pub mod trade;

pub use table::TableData;
pub use trade::{ChainRow, OptionType, PricePoint, Sentiment, Side, Trade, TradeTag};
