//! API request handlers.

pub mod health;
pub mod history;
pub mod stats;

pub use health::*;
pub use history::*;
pub use stats::*;
