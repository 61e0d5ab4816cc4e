use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::{AskRequest, AskResponse};
use crate::metrics::{self, Metric};

const SYSTEM_PROMPT: &str = "You are a quant analyst. Choose one of the supported metrics \
(gex, iv_snapshot, options_volume_oi, trend_50_200d, vwap_intraday) based on the user's \
question and call the compute_metric tool. For gamma or IV you likely need an expiry; if \
the date is implicit (e.g. 'nearest weekly'), infer it.";

fn tool_schema() -> Value {
    let metric_names: Vec<&str> = Metric::ALL.iter().map(|m| m.name()).collect();
    json!([{
        "type": "function",
        "function": {
            "name": "compute_metric",
            "description": "Compute trading analytics metrics",
            "parameters": {
                "type": "object",
                "properties": {
                    "ticker": { "type": "string", "description": "Equity ticker symbol" },
                    "metric": { "type": "string", "enum": metric_names },
                    "expiry": { "type": "string", "description": "Options expiry in YYYY-MM-DD" },
                    "as_of": { "type": "string", "description": "ISO timestamp override" },
                },
                "required": ["ticker", "metric"],
            },
        },
    }])
}

/// Free-text question in, constrained tool call out, re-dispatched through
/// the same compute path the direct endpoint uses. Provider failures are
/// 502; a reply without a usable tool call is the client's 400.
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let cfg = {
        let inner = state.inner.read().await;
        inner
            .llm
            .clone()
            .ok_or_else(|| ApiError::Internal("completion provider not configured".to_string()))?
    };

    let body = json!({
        "model": cfg.model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": req.question },
        ],
        "tools": tool_schema(),
        "tool_choice": "auto",
    });

    let url = format!("{}/chat/completions", cfg.base_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .header("Authorization", format!("Bearer {}", cfg.api_key))
        .json(&body)
        .send()
        .await
        .map_err(|e| ApiError::Upstream(format!("completion request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        return Err(ApiError::Upstream(format!(
            "completion provider returned {status}: {text}"
        )));
    }

    let completion: Value = response
        .json()
        .await
        .map_err(|e| ApiError::Upstream(format!("unreadable completion response: {e}")))?;

    let arguments = completion
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("tool_calls"))
        .and_then(|t| t.get(0))
        .and_then(|t| t.get("function"))
        .and_then(|f| f.get("arguments"))
        .and_then(|a| a.as_str())
        .ok_or_else(|| ApiError::BadRequest("model did not request any tool calls".to_string()))?;

    let mut tool_args: Value = serde_json::from_str(arguments)
        .map_err(|_| ApiError::BadRequest("model returned invalid tool arguments".to_string()))?;

    let args = tool_args
        .as_object_mut()
        .ok_or_else(|| ApiError::BadRequest("model returned invalid tool arguments".to_string()))?;
    args.entry("metric")
        .or_insert_with(|| json!("options_volume_oi"));

    let metric_name = args
        .get("metric")
        .and_then(|m| m.as_str())
        .unwrap_or("options_volume_oi")
        .to_string();
    let metric = Metric::from_name(&metric_name)
        .ok_or_else(|| ApiError::BadRequest("Unsupported metric".to_string()))?;

    let ticker = args
        .get("ticker")
        .and_then(|t| t.as_str())
        .ok_or_else(|| ApiError::BadRequest("tool arguments missing ticker".to_string()))?
        .to_string();

    // Echo the inferred expiry into tool_args so the caller sees what ran.
    if metric.wants_expiry() && args.get("expiry").is_none() {
        args.insert(
            "expiry".to_string(),
            json!(metrics::infer_expiry(chrono::Utc::now())),
        );
    }

    let expiry = args
        .get("expiry")
        .and_then(|e| e.as_str())
        .map(|s| s.to_string());
    let as_of = args
        .get("as_of")
        .and_then(|a| a.as_str())
        .map(|s| s.to_string());

    let result = metrics::compute_metric(metric, &ticker, expiry.as_deref(), as_of.as_deref());

    Ok(Json(AskResponse {
        ok: true,
        tool_args,
        result_from_tool: result,
    }))
}
