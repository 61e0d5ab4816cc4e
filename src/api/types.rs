use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chat::{ChatContext, ChatReply};
use crate::metrics::MetricResponse;

// ── Request types ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ComputeMetricRequest {
    pub metric: String,
    pub ticker: String,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub as_of: Option<String>,
}

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Deserialize)]
pub struct ChatTurnRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub ticker: Option<String>,
}

// ── Response types ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AskResponse {
    pub ok: bool,
    pub tool_args: Value,
    pub result_from_tool: MetricResponse,
}

#[derive(Serialize)]
pub struct ChatTurnResponse {
    pub session_id: String,
    pub reply: ChatReply,
    pub context: ChatContext,
}
