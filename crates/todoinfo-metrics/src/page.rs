//! Page data shaping for the web and example views.

use serde::Serialize;

use crate::metrics::Metrics;
use crate::rottenness::{Rottenness, TaskRottennessInfo};

/// Number of not-yet-rotten tasks shown after the rotten ones.
pub const UPCOMING_TASK_COUNT: usize = 3;

/// One row of the list age table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAgeView {
    pub title: String,
    pub age: u64,
    pub task_count: usize,
    pub oldest_task: String,
    pub oldest_task_age: u64,
}

/// A task as rendered on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub task_name: String,
    pub task_list: String,
    pub age: u64,
    pub rottenness: Rottenness,
    pub emoji: &'static str,
}

impl From<&TaskRottennessInfo> for TaskView {
    fn from(info: &TaskRottennessInfo) -> Self {
        Self {
            task_name: info.task_name.clone(),
            task_list: info.task_list.clone(),
            age: info.age,
            rottenness: info.rottenness,
            emoji: info.rottenness.emoji(),
        }
    }
}

/// Everything a page needs to render one account's task ages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageData {
    pub total_age: u64,
    pub list_ages: Vec<ListAgeView>,
    /// Tired and Zombie tasks, oldest first.
    pub rotten_tasks: Vec<TaskView>,
    /// The tasks following the rotten ones; all tasks when the full list is
    /// requested.
    pub upcoming_tasks: Vec<TaskView>,
}

impl PageData {
    /// Shapes page data from computed metrics.
    pub fn new(metrics: &Metrics, full_task_list: bool) -> Self {
        let list_ages = metrics.list_ages();
        let oldest = metrics.oldest_task_for_list();
        let rotten = metrics.rotten_tasks(Rottenness::Tired);
        let sorted = metrics.sorted_tasks();

        let upcoming = if full_task_list {
            sorted
        } else {
            let start = rotten.len();
            let end = (start + UPCOMING_TASK_COUNT).min(sorted.len());
            &sorted[start..end]
        };

        let list_ages = list_ages
            .ages
            .into_iter()
            .map(|entry| {
                let oldest_task = oldest.get(&entry.title);
                ListAgeView {
                    oldest_task: oldest_task.map(|t| t.task_name.clone()).unwrap_or_default(),
                    oldest_task_age: oldest_task.map_or(0, |t| t.age),
                    title: entry.title,
                    age: entry.age,
                    task_count: entry.task_count,
                }
            })
            .collect();

        Self {
            total_age: metrics.summary().total_age,
            list_ages,
            rotten_tasks: rotten.iter().map(TaskView::from).collect(),
            upcoming_tasks: upcoming.iter().map(TaskView::from).collect(),
        }
    }
}
