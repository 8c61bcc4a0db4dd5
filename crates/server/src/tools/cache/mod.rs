//! Cache-related MCP tools.

pub mod clear;
pub mod stats;

pub use clear::{CacheClearParams, clear_impl};
pub use stats::stats_impl;
