//! Application state shared across handlers.

use std::sync::Arc;

use todoinfo_graph::{FetchConfig, ListFetcher, TaskProvider};
use todoinfo_persistence::StatsStore;

use crate::config::ApiConfig;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// API configuration.
    pub config: Arc<ApiConfig>,
    /// Fetcher used for every account request.
    pub fetcher: Arc<ListFetcher>,
    /// Snapshot store backing the history endpoint.
    pub stats_store: Arc<StatsStore>,
}

impl AppState {
    /// Creates a new AppState with all components.
    pub fn new(
        config: ApiConfig,
        provider: Arc<dyn TaskProvider>,
        fetch_config: FetchConfig,
        stats_store: StatsStore,
    ) -> Self {
        Self {
            config: Arc::new(config),
            fetcher: Arc::new(ListFetcher::new(provider, fetch_config)),
            stats_store: Arc::new(stats_store),
        }
    }
}
