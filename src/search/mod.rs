use crate::error::SearchError;
use async_trait::async_trait;

mod duckduckgo;

pub use duckduckgo::{parse_result_links, DuckDuckGoSearch};

/// A web search returning candidate page URLs in result order.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>, SearchError>;
}
