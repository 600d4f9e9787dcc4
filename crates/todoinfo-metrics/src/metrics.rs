//! The metrics engine.
//!
//! [`Metrics`] is built once per fetch from a snapshot of task lists and is
//! read-only afterwards. Every query is a pure function of that snapshot.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use todoinfo_models::TaskList;

use crate::rottenness::{Rottenness, TaskRottennessInfo};

/// Body substring that removes a task from every metric.
pub const EXCLUSION_MARKER: &str = "#todo-info-skip";

/// Aggregated age of one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAge {
    /// List title.
    pub title: String,
    /// Sum of task ages, in days.
    pub age: u64,
    /// Number of tasks counted.
    pub task_count: usize,
}

/// Per-list ages plus the overall total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAges {
    /// Sum of all task ages, in days.
    pub total_age: u64,
    /// Per-list entries, oldest first, then by title.
    pub ages: Vec<ListAge>,
}

/// The aggregate numbers persisted with each historical snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Sum of all task ages, in days.
    pub total_age: u64,
    /// Age of the oldest task, in days.
    pub max_age: u64,
    /// Number of tasks.
    pub task_count: usize,
}

/// Ranked and aggregated view over a set of task lists.
#[derive(Debug, Clone)]
pub struct Metrics {
    lists: Vec<TaskList>,
    sorted_tasks: Vec<TaskRottennessInfo>,
    now: DateTime<Utc>,
}

impl Metrics {
    /// Builds metrics as seen at the current time.
    pub fn new(task_lists: Vec<TaskList>) -> Self {
        Self::at(task_lists, Utc::now())
    }

    /// Builds metrics as seen at `now`.
    pub fn at(task_lists: Vec<TaskList>, now: DateTime<Utc>) -> Self {
        let lists = filter_tasks(task_lists);
        let sorted_tasks = sort_tasks(&lists, now);
        Self {
            lists,
            sorted_tasks,
            now,
        }
    }

    /// The lists after exclusion filtering, in input order.
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    /// The instant ages were computed against.
    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Sums ages per list and overall.
    ///
    /// Entries are sorted by age descending, ties broken by title ascending.
    /// Lists sharing a title are merged.
    pub fn list_ages(&self) -> ListAges {
        let mut per_list: BTreeMap<&str, (u64, usize)> = BTreeMap::new();

        for info in &self.sorted_tasks {
            let entry = per_list.entry(info.task_list.as_str()).or_default();
            entry.0 += info.age;
            entry.1 += 1;
        }
        // Empty lists still get a zero entry.
        for list in &self.lists {
            per_list.entry(list.name.as_str()).or_default();
        }

        let mut ages: Vec<ListAge> = per_list
            .into_iter()
            .map(|(title, (age, task_count))| ListAge {
                title: title.to_string(),
                age,
                task_count,
            })
            .collect();

        ages.sort_by(|a, b| b.age.cmp(&a.age).then_with(|| a.title.cmp(&b.title)));

        ListAges {
            total_age: ages.iter().map(|entry| entry.age).sum(),
            ages,
        }
    }

    /// All tasks, oldest first.
    pub fn sorted_tasks(&self) -> &[TaskRottennessInfo] {
        &self.sorted_tasks
    }

    /// The `n` oldest tasks, clamped to the number available.
    pub fn top_tasks_by_age(&self, n: usize) -> &[TaskRottennessInfo] {
        let n = n.min(self.sorted_tasks.len());
        &self.sorted_tasks[..n]
    }

    /// The oldest task of every list, keyed by list title.
    ///
    /// Ties go to the task that appears last in the list. Empty lists map to
    /// a default entry.
    pub fn oldest_task_for_list(&self) -> HashMap<String, TaskRottennessInfo> {
        let mut result = HashMap::with_capacity(self.lists.len());

        for list in &self.lists {
            let mut oldest = TaskRottennessInfo::default();
            let mut max_exact_age = Duration::zero();

            for task in &list.tasks {
                let info = TaskRottennessInfo::from_task(task, &list.name, self.now);
                if info.exact_age >= max_exact_age {
                    max_exact_age = info.exact_age;
                    oldest = info;
                }
            }

            result.insert(list.name.clone(), oldest);
        }

        result
    }

    /// Tasks at or beyond `min_level`, oldest first.
    ///
    /// `Fresh` returns every task. Other levels return the leading run of
    /// the sorted view whose age exceeds the level's threshold.
    pub fn rotten_tasks(&self, min_level: Rottenness) -> &[TaskRottennessInfo] {
        if min_level == Rottenness::Fresh {
            return &self.sorted_tasks;
        }

        let min_age = min_level.threshold_days();
        let end = self.sorted_tasks.partition_point(|task| task.age > min_age);
        &self.sorted_tasks[..end]
    }

    /// Totals recorded in historical snapshots.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_age: self.sorted_tasks.iter().map(|task| task.age).sum(),
            max_age: self.sorted_tasks.first().map_or(0, |task| task.age),
            task_count: self.sorted_tasks.len(),
        }
    }
}

/// Drops tasks carrying the exclusion marker.
fn filter_tasks(task_lists: Vec<TaskList>) -> Vec<TaskList> {
    task_lists
        .into_iter()
        .map(|mut list| {
            list.tasks
                .retain(|task| !task.body.content.contains(EXCLUSION_MARKER));
            list
        })
        .collect()
}

/// Flattens all tasks and sorts them by exact age, oldest first.
fn sort_tasks(lists: &[TaskList], now: DateTime<Utc>) -> Vec<TaskRottennessInfo> {
    let mut result: Vec<TaskRottennessInfo> = lists
        .iter()
        .flat_map(|list| {
            list.tasks
                .iter()
                .map(move |task| TaskRottennessInfo::from_task(task, &list.name, now))
        })
        .collect();

    result.sort_by(|a, b| b.exact_age.cmp(&a.exact_age));
    result
}
