//! Locations and environment for the CLI.
//!
//! All data lives under `~/.todoinfo/`:
//!
//! ```text
//! ~/.todoinfo/
//! └── data/         # History snapshots (stats_*.json)
//! ```
//!
//! # Environment Variables
//!
//! - `TODOINFO_STATE_DIR`: Override the base state directory
//! - `TODOINFO_DATA_DIR`: Override the snapshot directory
//! - `TODOINFO_TOKEN`: Graph access token used by `todoinfo stats`

use std::path::{Path, PathBuf};

/// Environment variable for custom state directory.
pub const STATE_DIR_ENV: &str = "TODOINFO_STATE_DIR";

/// Environment variable for custom snapshot directory.
pub const DATA_DIR_ENV: &str = "TODOINFO_DATA_DIR";

/// Environment variable holding the Graph access token.
pub const TOKEN_ENV: &str = "TODOINFO_TOKEN";

/// Default state directory name under home.
const DEFAULT_STATE_DIR: &str = ".todoinfo";

const DATA_SUBDIR: &str = "data";

/// Env files loaded at startup, highest priority first.
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Returns `~/.todoinfo`, or `.todoinfo` when no home directory is known.
pub fn default_state_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(DEFAULT_STATE_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR))
}

/// Returns the snapshot directory for a state directory.
///
/// `TODOINFO_DATA_DIR` wins when set.
pub fn data_dir(state_dir: &Path) -> PathBuf {
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| state_dir.join(DATA_SUBDIR))
}

/// Loads `.env.local` and `.env` from the working directory if present and
/// returns the files that were loaded.
///
/// Runs before logging is set up, so callers log the result. Variables
/// already set in the environment are never overridden, so the first file
/// to define a variable wins.
pub fn load_env_files() -> Vec<PathBuf> {
    ENV_FILES
        .iter()
        .filter_map(|file| dotenvy::from_filename(file).ok())
        .collect()
}
