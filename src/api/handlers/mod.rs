pub mod ask;
pub mod chat;
pub mod export;
pub mod metric;
