//! Concurrent task list fetcher.
//!
//! Every user list is fetched by its own tokio task. Launches are paced at
//! [`FetchConfig::max_requests_per_window`] per [`FetchConfig::window`] and a
//! semaphore caps how many requests are outstanding at once. The whole batch
//! runs under one [`FetchConfig::timeout`] deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use todoinfo_models::{TaskList, TaskListInfo};

use crate::config::FetchConfig;
use crate::error::{GraphError, Result};
use crate::provider::TaskProvider;

/// Lists that were fetched plus the first failure, if any.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Successfully fetched lists, in completion order.
    pub lists: Vec<TaskList>,
    /// First error observed.
    pub error: Option<GraphError>,
}

impl FetchOutcome {
    /// Returns true if every list was fetched.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Converts into a `Result`, discarding partial lists on failure.
    pub fn into_result(self) -> Result<Vec<TaskList>> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.lists),
        }
    }

    fn record_error(&mut self, err: GraphError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

type FetchJoinSet = JoinSet<(String, Result<TaskList>)>;

/// Stand-in deadline for timeouts too large to add to the clock.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

fn deadline_after(timeout: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(timeout).unwrap_or(now + FAR_FUTURE)
}

/// Fans out task requests for many lists against a [`TaskProvider`].
#[derive(Clone)]
pub struct ListFetcher {
    provider: Arc<dyn TaskProvider>,
    config: FetchConfig,
}

impl ListFetcher {
    /// Creates a fetcher over the given provider.
    pub fn new(provider: Arc<dyn TaskProvider>, config: FetchConfig) -> Self {
        Self { provider, config }
    }

    /// Returns the fetch configuration.
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Enumerates the account's lists and fetches the tasks of each user list.
    ///
    /// One deadline of [`FetchConfig::timeout`] covers enumeration and every
    /// list fetch. Enumeration failures are returned as errors. Per-list
    /// failures are reported in the outcome alongside the lists that succeeded.
    pub async fn fetch_all(&self, token: &str) -> Result<FetchOutcome> {
        let deadline = deadline_after(self.config.timeout());

        let infos = tokio::time::timeout_at(deadline, self.provider.list_task_lists(token))
            .await
            .map_err(|_| GraphError::Timeout(self.config.timeout()))??;

        Ok(self.fetch_lists_until(token, infos, deadline).await)
    }

    /// Fetches the tasks of every user list in `infos`.
    ///
    /// Lists with a well-known marker other than `"none"` are skipped.
    pub async fn fetch_lists(&self, token: &str, infos: Vec<TaskListInfo>) -> FetchOutcome {
        let deadline = deadline_after(self.config.timeout());
        self.fetch_lists_until(token, infos, deadline).await
    }

    async fn fetch_lists_until(
        &self,
        token: &str,
        infos: Vec<TaskListInfo>,
        deadline: Instant,
    ) -> FetchOutcome {
        let token: Arc<str> = Arc::from(token);
        let mut join_set = FetchJoinSet::new();
        let mut outcome = FetchOutcome::default();

        let run = self.dispatch_and_join(token, infos, &mut join_set, &mut outcome);
        if tokio::time::timeout_at(deadline, run).await.is_err() {
            let timeout = self.config.timeout();
            warn!(
                timeout_secs = timeout.as_secs(),
                pending = join_set.len(),
                "Task list fetch timed out"
            );
            join_set.abort_all();

            // Keep whatever finished before the abort landed.
            while let Some(joined) = join_set.join_next().await {
                if let Ok((_, Ok(list))) = joined {
                    outcome.lists.push(list);
                }
            }

            if let Some(previous) = outcome.error.replace(GraphError::Timeout(timeout)) {
                debug!(error = %previous, "Earlier fetch error superseded by timeout");
            }
        }

        info!(
            fetched = outcome.lists.len(),
            failed = outcome.error.is_some(),
            "Task list fetch finished"
        );
        outcome
    }

    async fn dispatch_and_join(
        &self,
        token: Arc<str>,
        infos: Vec<TaskListInfo>,
        join_set: &mut FetchJoinSet,
        outcome: &mut FetchOutcome,
    ) {
        let semaphore = Arc::new(Semaphore::new(self.config.max_in_flight()));
        let mut launched_in_window = 0;

        for info in infos {
            if !info.is_user_list() {
                debug!(
                    list = %info.display_name,
                    wellknown = %info.wellknown_list_name,
                    "Skipping well-known list"
                );
                continue;
            }

            if launched_in_window == self.config.max_requests_per_window() {
                tokio::time::sleep(self.config.window()).await;
                launched_in_window = 0;
            }
            launched_in_window += 1;

            let provider = Arc::clone(&self.provider);
            let token = Arc::clone(&token);
            let semaphore = Arc::clone(&semaphore);

            debug!(list = %info.display_name, "Launching task list fetch");
            join_set.spawn(async move {
                let name = info.display_name.clone();
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => provider
                        .list_tasks(&token, &info.id)
                        .await
                        .map(|tasks| info.into_task_list(tasks)),
                    Err(e) => Err(GraphError::Join(e.to_string())),
                };
                (name, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((_, Ok(list))) => outcome.lists.push(list),
                Ok((name, Err(err))) => {
                    warn!(list = %name, error = %err, "Failed to fetch task list");
                    outcome.record_error(err);
                }
                Err(err) => {
                    warn!(error = %err, "Task list worker failed");
                    outcome.record_error(err.into());
                }
            }
        }
    }
}

/// Enumerates and fetches every user list, failing if any list failed.
pub async fn get_tasks(
    provider: Arc<dyn TaskProvider>,
    token: &str,
    config: FetchConfig,
) -> Result<Vec<TaskList>> {
    ListFetcher::new(provider, config)
        .fetch_all(token)
        .await?
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use todoinfo_models::Task;

    #[derive(Default)]
    struct FakeProvider {
        lists: Vec<TaskListInfo>,
        failing: HashSet<String>,
        slow: HashSet<String>,
        enumerate_delay: Duration,
        delay: Duration,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn with_lists(count: usize) -> Self {
            Self {
                lists: (0..count)
                    .map(|i| TaskListInfo::new(format!("id-{}", i), format!("List {}", i)))
                    .collect(),
                delay: Duration::from_millis(300),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl TaskProvider for FakeProvider {
        async fn list_task_lists(&self, token: &str) -> Result<Vec<TaskListInfo>> {
            if token.is_empty() {
                return Err(GraphError::Unauthorized("empty token".into()));
            }
            tokio::time::sleep(self.enumerate_delay).await;
            Ok(self.lists.clone())
        }

        async fn list_tasks(&self, _token: &str, list_id: &str) -> Result<Vec<Task>> {
            self.calls.lock().unwrap().push(list_id.to_string());

            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);

            let delay = if self.slow.contains(list_id) {
                Duration::from_secs(3600)
            } else {
                self.delay
            };
            tokio::time::sleep(delay).await;

            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(list_id) {
                return Err(GraphError::Api {
                    code: "ErrorItemNotFound".into(),
                    message: format!("{} not found", list_id),
                });
            }
            Ok(vec![Task::new(format!("task of {}", list_id), Utc::now())])
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ten_lists_with_one_failure() {
        let mut provider = FakeProvider::with_lists(10);
        provider.failing.insert("id-7".into());
        let provider = Arc::new(provider);

        let fetcher = ListFetcher::new(provider.clone(), FetchConfig::default());
        let outcome = fetcher.fetch_all("token").await.unwrap();

        assert_eq!(outcome.lists.len(), 9);
        assert!(matches!(outcome.error, Some(GraphError::Api { .. })));
        assert!(!outcome.is_complete());
        assert!(provider.max_in_flight.load(Ordering::SeqCst) <= 4);
        assert_eq!(provider.calls.lock().unwrap().len(), 10);

        let names: HashSet<String> = outcome.lists.iter().map(|l| l.name.clone()).collect();
        assert!(!names.contains("List 7"));
        assert_eq!(names.len(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_launches_are_paced() {
        let provider = Arc::new(FakeProvider::with_lists(10));
        let fetcher = ListFetcher::new(provider, FetchConfig::default());

        let start = Instant::now();
        let outcome = fetcher.fetch_all("token").await.unwrap();

        // Batches launch at 0s, 1s and 2s.
        assert!(start.elapsed() >= Duration::from_secs(2));
        assert!(outcome.is_complete());
        assert_eq!(outcome.lists.len(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_cap_below_launch_rate() {
        let provider = Arc::new(FakeProvider {
            delay: Duration::from_secs(5),
            ..FakeProvider::with_lists(8)
        });
        let config = FetchConfig::new()
            .with_max_requests_per_window(4)
            .with_max_in_flight(2);
        let fetcher = ListFetcher::new(provider.clone(), config);

        let outcome = fetcher.fetch_all("token").await.unwrap();

        assert_eq!(outcome.lists.len(), 8);
        assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_skips_well_known_lists() {
        let mut provider = FakeProvider::with_lists(2);
        provider
            .lists
            .push(TaskListInfo::new("default", "Tasks").with_wellknown("defaultList"));
        provider
            .lists
            .push(TaskListInfo::new("flagged", "Flagged email").with_wellknown("flaggedEmails"));
        let provider = Arc::new(provider);

        let lists = get_tasks(provider.clone(), "token", FetchConfig::default())
            .await
            .unwrap();

        assert_eq!(lists.len(), 2);
        let calls = provider.calls.lock().unwrap();
        assert!(!calls.contains(&"default".to_string()));
        assert!(!calls.contains(&"flagged".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_tasks_fails_on_any_error() {
        let mut provider = FakeProvider::with_lists(3);
        provider.failing.insert("id-1".into());

        let err = get_tasks(Arc::new(provider), "token", FetchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, GraphError::Api { .. }));
    }

    #[tokio::test]
    async fn test_enumeration_error_propagates() {
        let provider = Arc::new(FakeProvider::with_lists(3));
        let fetcher = ListFetcher::new(provider, FetchConfig::default());

        let err = fetcher.fetch_all("").await.unwrap_err();
        assert!(err.is_auth_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_keeps_finished_lists() {
        let mut provider = FakeProvider::with_lists(3);
        provider.slow.insert("id-2".into());
        let provider = Arc::new(provider);

        let config = FetchConfig::new().with_timeout(Duration::from_secs(10));
        let outcome = ListFetcher::new(provider, config)
            .fetch_all("token")
            .await
            .unwrap();

        assert_eq!(outcome.lists.len(), 2);
        assert_eq!(outcome.error, Some(GraphError::Timeout(Duration::from_secs(10))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_covers_enumeration_and_lists() {
        let provider = Arc::new(FakeProvider {
            enumerate_delay: Duration::from_secs(9),
            delay: Duration::from_secs(9),
            ..FakeProvider::with_lists(1)
        });
        let config = FetchConfig::new().with_timeout(Duration::from_secs(10));

        let start = Instant::now();
        let outcome = ListFetcher::new(provider, config)
            .fetch_all("token")
            .await
            .unwrap();

        assert!(start.elapsed() >= Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(11));
        assert!(outcome.lists.is_empty());
        assert_eq!(outcome.error, Some(GraphError::Timeout(Duration::from_secs(10))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_enumeration_times_out() {
        let provider = Arc::new(FakeProvider {
            enumerate_delay: Duration::from_secs(20),
            ..FakeProvider::with_lists(2)
        });
        let config = FetchConfig::new().with_timeout(Duration::from_secs(10));

        let err = ListFetcher::new(provider.clone(), config)
            .fetch_all("token")
            .await
            .unwrap_err();

        assert_eq!(err, GraphError::Timeout(Duration::from_secs(10)));
        assert!(provider.calls.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_timeout_does_not_overflow() {
        let provider = Arc::new(FakeProvider::with_lists(2));
        let config = FetchConfig::new().with_timeout(Duration::from_secs(u64::MAX));

        let outcome = ListFetcher::new(provider, config)
            .fetch_all("token")
            .await
            .unwrap();
        assert!(outcome.is_complete());
    }

    #[tokio::test]
    async fn test_empty_input() {
        let provider = Arc::new(FakeProvider::default());
        let fetcher = ListFetcher::new(provider, FetchConfig::default());

        let outcome = fetcher.fetch_lists("token", Vec::new()).await;
        assert!(outcome.lists.is_empty());
        assert!(outcome.into_result().unwrap().is_empty());
    }
}
