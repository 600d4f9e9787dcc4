//! Microsoft Graph ToDo client.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};

use todoinfo_models::{Task, TaskListInfo};

use crate::error::{GraphError, Result};
use crate::provider::TaskProvider;

/// Graph v1.0 endpoint for the signed-in user's ToDo lists.
pub const GRAPH_TODO_LISTS_URL: &str = "https://graph.microsoft.com/v1.0/me/todo/lists";

/// Filter applied to task requests so only open tasks are returned.
const NOT_STARTED_FILTER: &str = "status eq 'notStarted'";

/// Asks Graph to report `dateTimeTimeZone` values in UTC.
const PREFER_UTC: &str = "outlook.timezone=\"UTC\"";

/// One page of a Graph collection response.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    value: Vec<T>,

    #[serde(rename = "@odata.nextLink", default)]
    next_link: Option<String>,

    // Delta queries end with a deltaLink instead of a nextLink.
    #[serde(rename = "@odata.deltaLink", default)]
    delta_link: Option<String>,
}

/// HTTP client for the Graph ToDo API.
#[derive(Clone)]
pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GraphClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphClient {
    /// Creates a client for the public Graph endpoint.
    pub fn new() -> Self {
        Self::with_base_url(GRAPH_TODO_LISTS_URL)
    }

    /// Creates a client rooted at a different lists URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the lists URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn lists_url(&self) -> String {
        format!("{}/microsoft.graph.delta()", self.base_url)
    }

    fn tasks_url(&self, list_id: &str) -> String {
        format!("{}/{}/tasks", self.base_url, list_id)
    }

    /// Fetches a single page and maps Graph error bodies.
    async fn get_page<T: DeserializeOwned>(
        &self,
        token: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<Page<T>> {
        let response = request
            .bearer_auth(token)
            .header("Accept", "application/json")
            .header("Prefer", PREFER_UTC)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GraphError::from_response(status.as_u16(), &text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GraphError::Decode(e.to_string()))
    }

    /// Collects every page of a collection, following `@odata.nextLink`.
    async fn get_all<T: DeserializeOwned>(
        &self,
        token: &str,
        first: reqwest::RequestBuilder,
    ) -> Result<Vec<T>> {
        let mut items = Vec::new();
        let mut page: Page<T> = self.get_page(token, first).await?;

        loop {
            trace!(count = page.value.len(), "Received Graph page");
            items.append(&mut page.value);

            match page.next_link.take() {
                Some(next) => {
                    page = self.get_page(token, self.client.get(next)).await?;
                }
                None => {
                    if page.delta_link.is_some() {
                        trace!("Reached end of delta collection");
                    }
                    break;
                }
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl TaskProvider for GraphClient {
    async fn list_task_lists(&self, token: &str) -> Result<Vec<TaskListInfo>> {
        let request = self.client.get(self.lists_url());
        let lists: Vec<TaskListInfo> = self.get_all(token, request).await?;
        debug!(count = lists.len(), "Enumerated task lists");
        Ok(lists)
    }

    async fn list_tasks(&self, token: &str, list_id: &str) -> Result<Vec<Task>> {
        let request = self
            .client
            .get(self.tasks_url(list_id))
            .query(&[("$filter", NOT_STARTED_FILTER)]);
        let tasks: Vec<Task> = self.get_all(token, request).await?;
        debug!(list_id = %list_id, count = tasks.len(), "Fetched tasks");
        Ok(tasks)
    }
}
