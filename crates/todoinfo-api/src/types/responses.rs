//! Response DTOs for the API.

use serde::Serialize;

use todoinfo_persistence::TimeSeriesPoint;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// History response.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// Window the points were taken from.
    pub days: u32,
    /// One point per day with data, oldest first.
    pub points: Vec<TimeSeriesPoint>,
}
