use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::ExportQuery;
use crate::export;

/// Download one of the exportable tables (trades, flow, chain, gex) as CSV.
pub async fn export_table(
    State(state): State<AppState>,
    Path(table): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, ApiError> {
    let bundle = {
        let inner = state.inner.read().await;
        let seed = query.seed.unwrap_or(inner.default_seed);
        inner.bundles.get_or_generate(seed, &inner.tickers)
    };

    let data = export::build_table(&bundle, &table, query.ticker.as_deref())
        .ok_or_else(|| ApiError::NotFound(format!("unknown table '{table}'")))?;

    let body = export::to_csv_string(&data)?;
    let disposition = format!("attachment; filename=\"{table}.csv\"");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
