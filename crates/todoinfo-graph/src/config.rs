//! Fetch configuration.

use std::time::Duration;

/// Launches allowed per pacing window.
pub const DEFAULT_MAX_REQUESTS_PER_WINDOW: usize = 4;

/// Deadline for one complete fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Rate and deadline settings for the concurrent list fetcher.
///
/// Fields are only set through the builders, which keep both limits at one
/// or more.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    max_requests_per_window: usize,
    window: Duration,
    max_in_flight: usize,
    timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_requests_per_window: DEFAULT_MAX_REQUESTS_PER_WINDOW,
            window: Duration::from_secs(1),
            max_in_flight: DEFAULT_MAX_REQUESTS_PER_WINDOW,
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl FetchConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the launches per window. Zero is treated as one.
    pub fn with_max_requests_per_window(mut self, max: usize) -> Self {
        self.max_requests_per_window = max.max(1);
        self
    }

    /// Sets the pacing window.
    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Sets the in-flight cap. Zero is treated as one.
    pub fn with_max_in_flight(mut self, max: usize) -> Self {
        self.max_in_flight = max.max(1);
        self
    }

    /// Sets the overall deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// How many list requests may be launched per window.
    pub fn max_requests_per_window(&self) -> usize {
        self.max_requests_per_window
    }

    /// Length of one pacing window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// How many list requests may be outstanding at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Deadline for a whole fetch, enumeration included.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}
