use std::sync::Arc;

use crate::config::Config;
use crate::matching::Matcher;
use crate::storage::ItemStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable item storage. Postgres by default, in-memory via `ITEM_STORE=memory`.
    pub store: Arc<dyn ItemStore>,
    /// Match engine over the same store.
    pub matcher: Matcher,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, config: Config) -> Self {
        let matcher = Matcher::new(store.clone(), config.matching.clone());
        Self {
            store,
            matcher,
            config,
        }
    }
}
