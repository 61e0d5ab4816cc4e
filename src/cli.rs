use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Options-flow analytics demo: synthesize a mock session, query it through
/// a chat router, and serve the metric API.
#[derive(Parser)]
#[command(name = "optflow", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(long, default_value = "8000")]
        port: u16,

        /// Default seed for the mock data bundle
        #[arg(long, default_value = "7")]
        seed: u64,
    },

    /// Run one chat turn against a generated session and print the reply
    Chat {
        /// Free-text message, e.g. "show gex" or "ticker=AAPL"
        message: String,

        #[arg(long, default_value = "7")]
        seed: u64,

        /// Starting ticker context
        #[arg(long, default_value = "SPY")]
        ticker: String,

        /// Route via the configured completion provider instead of keywords only
        #[arg(long)]
        llm: bool,
    },

    /// Print session KPIs and the narrative summary
    Summary {
        #[arg(long, default_value = "7")]
        seed: u64,

        /// Restrict KPIs to one ticker (default: whole session)
        #[arg(long)]
        ticker: Option<String>,
    },

    /// Write one of the generated tables as CSV
    Export {
        /// Table name: trades, flow, chain, or gex
        table: String,

        /// Output file path
        #[arg(long, short = 'o')]
        output: PathBuf,

        #[arg(long, default_value = "7")]
        seed: u64,

        /// Restrict rows to one ticker
        #[arg(long)]
        ticker: Option<String>,
    },
}
