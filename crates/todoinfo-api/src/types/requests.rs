//! Request DTOs for the API.

use serde::Deserialize;

/// Default number of days returned by the history endpoint.
pub const DEFAULT_HISTORY_DAYS: u32 = 30;

/// Longest history window a request may ask for.
pub const MAX_HISTORY_DAYS: u32 = 366;

/// Query parameters for page data endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Return every task as upcoming instead of the next few.
    #[serde(default)]
    pub full: bool,
}

/// Query parameters for the history endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Number of days to look back.
    pub days: Option<u32>,
}
