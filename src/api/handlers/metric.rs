use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::ComputeMetricRequest;
use crate::metrics::{self, Metric, MetricResponse};

pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub async fn registry() -> Json<Value> {
    let mut metrics = serde_json::Map::new();
    for metric in Metric::ALL {
        metrics.insert(
            metric.name().to_string(),
            json!({ "desc": metric.description() }),
        );
    }
    Json(json!({ "metrics": metrics }))
}

pub async fn compute(
    State(_state): State<AppState>,
    Json(req): Json<ComputeMetricRequest>,
) -> Result<Json<MetricResponse>, ApiError> {
    let metric = Metric::from_name(&req.metric)
        .ok_or_else(|| ApiError::BadRequest("Unsupported metric".to_string()))?;

    let response = metrics::compute_metric(
        metric,
        &req.ticker,
        req.expiry.as_deref(),
        req.as_of.as_deref(),
    );
    Ok(Json(response))
}
