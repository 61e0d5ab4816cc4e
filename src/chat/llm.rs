use serde::Deserialize;
use serde_json::{json, Value};

/// Completion-provider settings for the optional delegated routing path.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    /// Read provider settings from the environment. None when no key is set,
    /// which disables delegation entirely.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("OPTFLOW_AI_KEY").ok()?;
        if api_key.is_empty() {
            return None;
        }
        Some(Self {
            api_key,
            base_url: std::env::var("OPTFLOW_AI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: std::env::var("OPTFLOW_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
        })
    }
}

/// Routing decision returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmRoute {
    pub intent: String,
    #[serde(default)]
    pub params: serde_json::Map<String, Value>,
}

const SYSTEM_PROMPT: &str = "You are the optflow routing engine. Output STRICT JSON ONLY: \
{\"intent\":\"...\",\"params\":{}}. \
Valid intents: flow_summary, call_put, top_strikes, unusual, gex, price_flow, set_filter, export_csv.";

/// Ask the completion provider to route the message. Returns None on ANY
/// failure (transport, bad status, malformed JSON, missing intent), which
/// makes the caller keep its deterministic classification. Transport errors
/// never cross this boundary.
pub async fn route_via_llm(cfg: &LlmConfig, message: &str) -> Option<LlmRoute> {
    let body = json!({
        "model": cfg.model,
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": message },
        ],
        "temperature": 0,
    });

    let url = format!("{}/chat/completions", cfg.base_url.trim_end_matches('/'));
    let response = reqwest::Client::new()
        .post(&url)
        .header("Authorization", format!("Bearer {}", cfg.api_key))
        .json(&body)
        .send()
        .await
        .ok()?;

    if !response.status().is_success() {
        tracing::debug!(status = %response.status(), "llm routing request rejected");
        return None;
    }

    let payload: Value = response.json().await.ok()?;
    let content = payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()?;

    match serde_json::from_str::<LlmRoute>(content.trim()) {
        Ok(route) => Some(route),
        Err(err) => {
            tracing::debug!(%err, "llm routing output was not the expected JSON shape");
            None
        }
    }
}
