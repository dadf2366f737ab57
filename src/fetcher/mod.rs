pub mod http_fetcher;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

/// Transport used by the provider clients: one GET, the raw body back.
///
/// Implementations must fail on network errors, timeouts and non-2xx
/// statuses, and must not retry.
#[async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
