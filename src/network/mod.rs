//! HTTP networking module
//!
//! Provides the shared HTTP client used by the search and completion clients.

mod client;

pub use client::{ApiResponse, HttpClient};
