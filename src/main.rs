use anyhow::bail;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use optflow::analytics::{flow_by_minute, kpi_summary, narrative_summary, unusual_scores};
use optflow::chat::{self, ChatContext, LlmConfig};
use optflow::mock::{default_tickers, MockBundle};
use optflow::{api, cli, export};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("optflow=info")),
        )
        .init();

    let cli = cli::Cli::parse();

    match cli.command {
        cli::Command::Serve { host, port, seed } => api::serve(&host, port, seed).await,

        cli::Command::Chat {
            message,
            seed,
            ticker,
            llm,
        } => {
            let bundle = MockBundle::generate(seed, &default_tickers(), Utc::now().date_naive());
            let mut ctx = ChatContext {
                ticker: ticker.to_uppercase(),
                ..ChatContext::default()
            };

            let llm_cfg = if llm { LlmConfig::from_env() } else { None };
            if llm && llm_cfg.is_none() {
                tracing::warn!("--llm requested but OPTFLOW_AI_KEY is not set; using keyword routing");
            }

            let reply = chat::handle_chat(&message, &bundle, &mut ctx, llm_cfg.as_ref()).await;

            println!("[{}] {}", reply.intent.as_str(), reply.text);
            if let Some(table) = &reply.table {
                println!("{}", table.columns.join(","));
                for row in table.rows.iter().take(10) {
                    println!("{}", row.join(","));
                }
                if table.rows.len() > 10 {
                    println!("... {} rows total", table.rows.len());
                }
            }
            Ok(())
        }

        cli::Command::Summary { seed, ticker } => {
            let bundle = MockBundle::generate(seed, &default_tickers(), Utc::now().date_naive());
            let trades: Vec<_> = match &ticker {
                Some(t) => bundle
                    .trades
                    .iter()
                    .filter(|trade| trade.ticker == t.to_uppercase())
                    .cloned()
                    .collect(),
                None => bundle.trades.clone(),
            };

            let kpis = kpi_summary(&trades);
            let scores = unusual_scores(&bundle.trades);
            let top_ticker = scores
                .first()
                .map(|s| s.ticker.clone())
                .unwrap_or_else(|| "-".to_string());
            let flow_trend: f64 = flow_by_minute(&trades).iter().map(|f| f.net_flow).sum();

            println!("{}", narrative_summary(&kpis, &top_ticker, flow_trend));
            println!();
            println!("total_flow:     ${:.2}M", kpis.total_flow / 1e6);
            println!("call_put_ratio: {:.2}", kpis.call_put_ratio);
            println!("net_delta:      {:.2}M", kpis.net_delta / 1e6);
            println!("net_gamma:      {:.2}M", kpis.net_gamma / 1e6);
            println!("unusual_count:  {}", kpis.unusual_count);
            Ok(())
        }

        cli::Command::Export {
            table,
            output,
            seed,
            ticker,
        } => {
            let bundle = MockBundle::generate(seed, &default_tickers(), Utc::now().date_naive());
            let Some(data) = export::build_table(&bundle, &table, ticker.as_deref()) else {
                bail!("unknown table '{table}' (expected trades, flow, chain, or gex)");
            };
            let rows = data.len();
            export::write_csv_file(&data, &output)?;
            println!("wrote {rows} rows to {}", output.display());
            Ok(())
        }
    }
}
