//! Snapshot store for historical statistics.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use todoinfo_metrics::{ListAges, Metrics};

use crate::atomic::{read_json, write_json_atomic};
use crate::error::{PersistenceError, Result};

/// File name prefix shared by all snapshot files.
pub const SNAPSHOT_PREFIX: &str = "stats_";

/// Timestamp layout embedded in snapshot file names.
const FILE_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Account-wide totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_age: u64,
    pub task_count: usize,
}

/// Point-in-time statistics for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub global_stats: GlobalStats,
    pub list_ages: ListAges,
    pub task_count: usize,
    /// Age of the oldest task, in days.
    #[serde(default)]
    pub max_age: u64,
}

impl StatsSnapshot {
    /// Captures a snapshot of `metrics`, stamped with the metrics' clock.
    pub fn from_metrics(metrics: &Metrics) -> Self {
        let summary = metrics.summary();
        Self {
            timestamp: metrics.now(),
            global_stats: GlobalStats {
                total_age: summary.total_age,
                task_count: summary.task_count,
            },
            list_ages: metrics.list_ages(),
            task_count: summary.task_count,
            max_age: summary.max_age,
        }
    }

    /// File name this snapshot is stored under.
    pub fn file_name(&self) -> String {
        format!(
            "{}{}.json",
            SNAPSHOT_PREFIX,
            self.timestamp.format(FILE_TIME_FORMAT)
        )
    }
}

/// One day of history, used for graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    /// Largest `max_age` recorded that day.
    pub max_age: u64,
    /// Task count of the snapshot that recorded `max_age`.
    pub task_count: usize,
}

/// Stores snapshots as individual JSON files:
/// ```text
/// data_dir/
/// ├── stats_2024-06-14_09-30-00.json
/// └── stats_2024-06-15_12-00-00.json
/// ```
/// File names sort chronologically.
pub struct StatsStore {
    data_dir: PathBuf,
}

impl StatsStore {
    /// Creates a store over `data_dir`. The directory is created on first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the directory snapshots live in.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Saves a snapshot and returns the written path.
    ///
    /// A snapshot taken within the same second as an existing one replaces it.
    pub fn store(&self, snapshot: &StatsSnapshot) -> Result<PathBuf> {
        let path = self.data_dir.join(snapshot.file_name());
        write_json_atomic(&path, snapshot)?;
        debug!(path = %path.display(), "Stored stats snapshot");
        Ok(path)
    }

    /// Returns the most recent readable snapshot, if any.
    pub fn latest(&self) -> Result<Option<StatsSnapshot>> {
        for path in self.snapshot_files()?.iter().rev() {
            if let Some(snapshot) = load_or_warn(path) {
                return Ok(Some(snapshot));
            }
        }
        Ok(None)
    }

    /// Returns snapshots taken strictly between `from` and `to`, oldest first.
    pub fn history(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<StatsSnapshot>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|s| s.timestamp > from && s.timestamp < to)
            .collect())
    }

    /// Collapses the last `days` days of history into one point per day.
    ///
    /// Each point carries the day's largest `max_age`. Points are sorted by
    /// date. Snapshots taken exactly at `now` are included.
    pub fn time_series(&self, days: u32, now: DateTime<Utc>) -> Result<Vec<TimeSeriesPoint>> {
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let mut per_day: BTreeMap<NaiveDate, TimeSeriesPoint> = BTreeMap::new();

        for snapshot in self.load_all()? {
            if snapshot.timestamp <= cutoff || snapshot.timestamp > now {
                continue;
            }

            let date = snapshot.timestamp.date_naive();
            let point = TimeSeriesPoint {
                date,
                max_age: snapshot.max_age,
                task_count: snapshot.task_count,
            };
            per_day
                .entry(date)
                .and_modify(|existing| {
                    if point.max_age > existing.max_age {
                        *existing = point;
                    }
                })
                .or_insert(point);
        }

        Ok(per_day.into_values().collect())
    }

    /// Loads every readable snapshot, oldest first.
    fn load_all(&self) -> Result<Vec<StatsSnapshot>> {
        Ok(self
            .snapshot_files()?
            .iter()
            .filter_map(|path| load_or_warn(path))
            .collect())
    }

    /// Lists snapshot files sorted by name. A missing directory is empty.
    fn snapshot_files(&self) -> Result<Vec<PathBuf>> {
        if !self.data_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.data_dir).map_err(|source| PersistenceError::ReadError {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| PersistenceError::ReadError {
                path: self.data_dir.clone(),
                source,
            })?;

            let path = entry.path();
            let is_snapshot = path.is_file()
                && path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(SNAPSHOT_PREFIX));
            if is_snapshot {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

fn load_or_warn(path: &Path) -> Option<StatsSnapshot> {
    match read_json(path) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable snapshot");
            None
        }
    }
}
