//! Core data models for ToDo Info.
//!
//! This crate provides the plain data types shared by the Graph client,
//! the metrics engine and the presentation layers: tasks, task lists and
//! the list descriptors returned by the Microsoft Graph ToDo API.

pub mod list;
pub mod task;

// Re-export main types
pub use list::{TaskList, TaskListInfo, WELLKNOWN_NONE};
pub use task::{Task, TaskBody};
