use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::api::types::{ChatTurnRequest, ChatTurnResponse};
use crate::chat;

/// One chat turn. The context is session-scoped: looked up (or created) by
/// session id, updated by the router, and stored back after the turn.
pub async fn chat_turn(
    State(state): State<AppState>,
    Json(req): Json<ChatTurnRequest>,
) -> Result<Json<ChatTurnResponse>, ApiError> {
    let session_id = req
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    // Snapshot what the turn needs, then release the lock: the delegated
    // routing path can block on the provider for a while.
    let (bundle, mut ctx, llm) = {
        let inner = state.inner.read().await;
        let seed = req.seed.unwrap_or(inner.default_seed);
        let bundle = inner.bundles.get_or_generate(seed, &inner.tickers);
        let ctx = inner
            .sessions
            .get(&session_id)
            .cloned()
            .unwrap_or_default();
        (bundle, ctx, inner.llm.clone())
    };

    let reply = chat::handle_chat(&req.message, &bundle, &mut ctx, llm.as_ref()).await;

    let mut inner = state.inner.write().await;
    inner.sessions.insert(session_id.clone(), ctx.clone());

    Ok(Json(ChatTurnResponse {
        session_id,
        reply,
        context: ctx,
    }))
}
