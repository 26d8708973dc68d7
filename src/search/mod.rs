//! Search module
//!
//! Defines the SearchClient capability and its Tavily implementation.

mod models;
mod tavily;
mod traits;

pub use models::SearchResult;
pub use tavily::TavilySearch;
pub use traits::SearchClient;
