//! Task age metrics for ToDo Info.
//!
//! This crate turns fetched task lists into ranked, aggregated views:
//! - **rottenness**: day-age computation and the four staleness tiers
//! - **metrics**: the [`Metrics`] value object with its query methods
//! - **page**: page data shaping for the web and example views
//! - **example**: a static example data set
//!
//! # Example
//!
//! ```
//! use chrono::{Duration, Utc};
//! use todoinfo_metrics::{Metrics, Rottenness};
//! use todoinfo_models::{Task, TaskList};
//!
//! let now = Utc::now();
//! let lists = vec![TaskList::new(
//!     "Home",
//!     vec![Task::new("Hang a painting", now - Duration::days(20))],
//! )];
//!
//! let metrics = Metrics::at(lists, now);
//! assert_eq!(metrics.list_ages().total_age, 20);
//! assert_eq!(metrics.rotten_tasks(Rottenness::Tired).len(), 1);
//! ```

pub mod example;
pub mod metrics;
pub mod page;
pub mod rottenness;

pub use example::example_task_lists;
pub use metrics::{ListAge, ListAges, Metrics, MetricsSummary, EXCLUSION_MARKER};
pub use page::{ListAgeView, PageData, TaskView, UPCOMING_TASK_COUNT};
pub use rottenness::{compute_age, ParseRottennessError, Rottenness, TaskRottennessInfo};
