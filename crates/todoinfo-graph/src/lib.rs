//! Microsoft Graph access for ToDo Info.
//!
//! This crate provides:
//! - [`TaskProvider`]: the seam between the fetcher and a task source
//! - [`GraphClient`]: the reqwest-backed Graph implementation
//! - [`ListFetcher`]: paced, bounded fan-out over many task lists
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use todoinfo_graph::{get_tasks, FetchConfig, GraphClient};
//!
//! # async fn run(token: &str) -> todoinfo_graph::Result<()> {
//! let lists = get_tasks(Arc::new(GraphClient::new()), token, FetchConfig::default()).await?;
//! println!("fetched {} lists", lists.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod provider;

pub use client::{GraphClient, GRAPH_TODO_LISTS_URL};
pub use config::{FetchConfig, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_REQUESTS_PER_WINDOW};
pub use error::{GraphError, Result, INVALID_AUTHENTICATION_TOKEN};
pub use fetcher::{get_tasks, FetchOutcome, ListFetcher};
pub use provider::TaskProvider;
