//! TaskProvider trait definition.
//!
//! The fetcher talks to Graph only through this trait so that tests and
//! alternative backends can stand in for the real HTTP client.

use async_trait::async_trait;

use todoinfo_models::{Task, TaskListInfo};

use crate::error::Result;

/// Source of task lists and their open tasks.
#[async_trait]
pub trait TaskProvider: Send + Sync {
    /// Enumerates every task list visible to the token's account.
    async fn list_task_lists(&self, token: &str) -> Result<Vec<TaskListInfo>>;

    /// Returns the not-started tasks of one list, in provider order.
    async fn list_tasks(&self, token: &str, list_id: &str) -> Result<Vec<Task>>;
}
