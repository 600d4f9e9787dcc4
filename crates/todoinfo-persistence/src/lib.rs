//! Historical statistics storage for ToDo Info.
//!
//! Each fetch can be captured as a [`StatsSnapshot`] and written to its own
//! JSON file using atomic writes (write to temp file, then rename). The
//! [`StatsStore`] reads them back as history or as a per-day time series.
//!
//! # Example
//!
//! ```no_run
//! use todoinfo_metrics::{example_task_lists, Metrics};
//! use todoinfo_persistence::{StatsSnapshot, StatsStore};
//!
//! let store = StatsStore::new("/home/user/.todoinfo/data");
//! let metrics = Metrics::new(example_task_lists(chrono::Utc::now()));
//!
//! store.store(&StatsSnapshot::from_metrics(&metrics)).unwrap();
//! let latest = store.latest().unwrap();
//! ```

pub mod atomic;
pub mod error;
pub mod stats_store;

pub use error::{PersistenceError, Result};
pub use stats_store::{GlobalStats, StatsSnapshot, StatsStore, TimeSeriesPoint, SNAPSHOT_PREFIX};
