//! Task age and rottenness classification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use todoinfo_models::Task;

/// Upper bound (inclusive) of the Fresh tier, in days.
const RIPE_TASK_DAY: u64 = 3;

/// Upper bound (inclusive) of the Ripe tier, in days.
const TIRED_TASK_DAY: u64 = 7;

/// Upper bound (inclusive) of the Tired tier, in days.
const ZOMBIE_TASK_DAY: u64 = 14;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Staleness tier of a task.
///
/// Ordered from least to most stale: `Fresh < Ripe < Tired < Zombie`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rottenness {
    /// Up to 3 days old.
    #[default]
    Fresh,
    /// 4 to 7 days old.
    Ripe,
    /// 8 to 14 days old.
    Tired,
    /// Older than 14 days.
    Zombie,
}

impl Rottenness {
    /// All tiers, least stale first.
    pub const ALL: [Rottenness; 4] = [
        Rottenness::Fresh,
        Rottenness::Ripe,
        Rottenness::Tired,
        Rottenness::Zombie,
    ];

    /// Classifies a day-age. Boundaries are inclusive on the lower tier.
    pub fn from_age(days: u64) -> Self {
        if days <= RIPE_TASK_DAY {
            Rottenness::Fresh
        } else if days <= TIRED_TASK_DAY {
            Rottenness::Ripe
        } else if days <= ZOMBIE_TASK_DAY {
            Rottenness::Tired
        } else {
            Rottenness::Zombie
        }
    }

    /// Age a task must exceed to reach this tier.
    pub fn threshold_days(&self) -> u64 {
        match self {
            Rottenness::Fresh => 0,
            Rottenness::Ripe => RIPE_TASK_DAY,
            Rottenness::Tired => TIRED_TASK_DAY,
            Rottenness::Zombie => ZOMBIE_TASK_DAY,
        }
    }

    /// Emoji shown next to a task.
    pub fn emoji(&self) -> &'static str {
        match self {
            Rottenness::Fresh => "😊",
            Rottenness::Ripe => "😏",
            Rottenness::Tired => "🥱",
            Rottenness::Zombie => "🤢",
        }
    }

    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rottenness::Fresh => "fresh",
            Rottenness::Ripe => "ripe",
            Rottenness::Tired => "tired",
            Rottenness::Zombie => "zombie",
        }
    }
}

impl fmt::Display for Rottenness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown rottenness level: {0} (expected fresh, ripe, tired or zombie)")]
pub struct ParseRottennessError(pub String);

impl FromStr for Rottenness {
    type Err = ParseRottennessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fresh" => Ok(Rottenness::Fresh),
            "ripe" => Ok(Rottenness::Ripe),
            "tired" => Ok(Rottenness::Tired),
            "zombie" => Ok(Rottenness::Zombie),
            other => Err(ParseRottennessError(other.to_string())),
        }
    }
}

/// Computes the whole-day age and the exact elapsed duration.
///
/// A reference time in the future clamps both values to zero.
pub fn compute_age(reference: DateTime<Utc>, now: DateTime<Utc>) -> (u64, Duration) {
    let delta = now - reference;
    if delta <= Duration::zero() {
        return (0, Duration::zero());
    }
    let days = delta.num_seconds() / SECONDS_PER_DAY;
    (days as u64, delta)
}

/// Age and tier of one task, annotated with its owning list.
#[derive(Debug, Clone, Serialize)]
pub struct TaskRottennessInfo {
    /// Task title.
    pub task_name: String,
    /// Name of the owning list.
    pub task_list: String,
    /// Age in whole days.
    pub age: u64,
    /// Staleness tier.
    pub rottenness: Rottenness,

    /// Exact elapsed time; only used as a sort key.
    #[serde(skip)]
    pub(crate) exact_age: Duration,
}

impl TaskRottennessInfo {
    /// Classifies a task of the given list as seen at `now`.
    pub fn from_task(task: &Task, list_name: &str, now: DateTime<Utc>) -> Self {
        let (age, exact_age) = compute_age(task.reference_time(), now);
        Self {
            task_name: task.title.clone(),
            task_list: list_name.to_string(),
            age,
            rottenness: Rottenness::from_age(age),
            exact_age,
        }
    }
}

impl Default for TaskRottennessInfo {
    fn default() -> Self {
        Self {
            task_name: String::new(),
            task_list: String::new(),
            age: 0,
            rottenness: Rottenness::Fresh,
            exact_age: Duration::zero(),
        }
    }
}

// The sub-day duration is a sort key, not part of the task's identity.
impl PartialEq for TaskRottennessInfo {
    fn eq(&self, other: &Self) -> bool {
        self.task_name == other.task_name
            && self.task_list == other.task_list
            && self.age == other.age
            && self.rottenness == other.rottenness
    }
}

impl Eq for TaskRottennessInfo {}
