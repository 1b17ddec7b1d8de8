pub mod http_fetcher;
pub mod urls;

use async_trait::async_trait;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;
pub use urls::SiteUrls;

/// Fetches raw page markup. Failures surface immediately as
/// [`ReaderError::Network`](crate::app::ReaderError::Network); there are no
/// retries and no caching.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String>;
}
