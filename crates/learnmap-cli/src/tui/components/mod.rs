//! TUI components.

pub mod details;
pub mod graph;
