//! Provider access, result shaping and the search service for dualsearch.
//!
//! The server crate wires these together; everything here is usable without
//! MCP.

pub mod provider;
pub mod rapid;
pub mod service;
pub mod shape;

pub use provider::{ProviderError, RawResultItem, SearchProvider};
pub use rapid::{RapidClient, RapidConfig};
pub use service::{HealthReport, SearchService};
pub use shape::{ShapedPage, shape};
