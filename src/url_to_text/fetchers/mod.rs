use crate::error::FetchError;
use crate::model::FetchedPage;
use async_trait::async_trait;

mod request;

pub use request::RequestFetcher;

/// Retrieves a page and decodes it to text.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}
