//! CSV serialization for tabular results.

use std::path::Path;

use anyhow::{Context, Result};

use crate::analytics::{compute_gex, flow_by_minute};
use crate::mock::MockBundle;
use crate::model::TableData;

/// Serialize a table to CSV text with a header row. Quoting of embedded
/// delimiters is handled by the csv writer.
pub fn to_csv_string(table: &TableData) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&table.columns)
        .context("writing csv header")?;
    for row in &table.rows {
        writer.write_record(row).context("writing csv row")?;
    }
    let bytes = writer.into_inner().context("flushing csv writer")?;
    String::from_utf8(bytes).context("csv output was not utf-8")
}

/// Parse CSV text back into a table. Values come back as strings; numeric
/// typing is up to the caller.
pub fn parse_csv(input: &str) -> Result<TableData> {
    let mut reader = csv::Reader::from_reader(input.as_bytes());
    let columns: Vec<String> = reader
        .headers()
        .context("reading csv header")?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut table = TableData { columns, rows: Vec::new() };
    for record in reader.records() {
        let record = record.context("reading csv row")?;
        table.rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(table)
}

pub fn write_csv_file(table: &TableData, path: &Path) -> Result<()> {
    let text = to_csv_string(table)?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

/// Build one of the exportable views over a bundle, optionally scoped to a
/// ticker. None for an unknown table name.
pub fn build_table(bundle: &MockBundle, table: &str, ticker: Option<&str>) -> Option<TableData> {
    let keep = |t: &str| ticker.is_none_or(|want| t == want);

    match table {
        "trades" => {
            let rows: Vec<_> = bundle
                .trades
                .iter()
                .filter(|t| keep(&t.ticker))
                .cloned()
                .collect();
            Some(TableData::from_trades(&rows))
        }
        "flow" => {
            let rows: Vec<_> = bundle
                .trades
                .iter()
                .filter(|t| keep(&t.ticker))
                .cloned()
                .collect();
            Some(crate::analytics::FlowMinute::table(&flow_by_minute(&rows)))
        }
        "chain" => {
            let rows: Vec<_> = bundle
                .chain
                .iter()
                .filter(|r| keep(&r.ticker))
                .cloned()
                .collect();
            Some(TableData::from_chain(&rows))
        }
        "gex" => {
            let rows: Vec<_> = bundle
                .chain
                .iter()
                .filter(|r| keep(&r.ticker))
                .cloned()
                .collect();
            Some(compute_gex(&rows).table())
        }
        _ => None,
    }
}
