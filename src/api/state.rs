use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::chat::{ChatContext, LlmConfig};
use crate::mock::BundleCache;

#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

pub struct AppStateInner {
    /// Memoized mock bundles keyed by seed.
    pub bundles: BundleCache,
    /// One chat context per session id, mutated only by that session's turns.
    pub sessions: HashMap<String, ChatContext>,
    pub default_seed: u64,
    pub tickers: Vec<String>,
    pub llm: Option<LlmConfig>,
}

impl AppState {
    pub fn new(default_seed: u64, tickers: Vec<String>, llm: Option<LlmConfig>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(AppStateInner {
                bundles: BundleCache::new(),
                sessions: HashMap::new(),
                default_seed,
                tickers,
                llm,
            })),
        }
    }
}
