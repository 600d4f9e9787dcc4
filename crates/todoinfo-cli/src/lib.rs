//! ToDo Info CLI library.
//!
//! Argument parsing, command handlers and the plain-text renderers used by
//! the `todoinfo` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod graph;
pub mod render;
