//! REST API for ToDo Info.
//!
//! This crate serves the same data the CLI prints, as JSON:
//! - Page data for the caller's account (bearer token) or the example set
//! - Historical time series from the snapshot store
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todoinfo_api::{serve, ApiConfig, AppState};
//! use todoinfo_graph::{FetchConfig, GraphClient};
//! use todoinfo_persistence::StatsStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::default();
//!     let state = AppState::new(
//!         config.clone(),
//!         Arc::new(GraphClient::new()),
//!         FetchConfig::default(),
//!         StatsStore::new("/home/user/.todoinfo/data"),
//!     );
//!
//!     serve(config, state).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
pub mod types;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use router::{create_router, serve};
pub use state::AppState;
