//! US newspaper provider (The New York Times Article Search and Most Popular APIs).

pub mod mapper;
pub mod params;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::app::{NewswireError, Result};
use crate::config::ProviderSettings;
use crate::domain::{FilterSet, ProviderKind};
use crate::fetcher::Fetcher;
use crate::providers::{decode, endpoint, NewsProvider, ProviderPage};

pub use mapper::{
    map_most_popular_article, map_most_popular_articles, map_search_article, map_search_articles,
    NyTimesMostPopularResponse, NyTimesResponse, NyTimesSearchResponse,
};
pub use params::{translate, NyTimesParams};

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com";

const SEARCH_PATH: &str = "svc/search/v2/articlesearch.json";
const MOST_POPULAR_PATH: &str = "svc/mostpopular/v2/viewed/1.json";

pub struct NyTimesClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: String,
    api_key: String,
}

impl NyTimesClient {
    /// Neither endpoint takes a page size, so none is stored.
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, settings: &ProviderSettings) -> Self {
        Self {
            fetcher,
            base_url: settings.base_url_or(DEFAULT_BASE_URL).to_string(),
            api_key: settings.api_key().to_string(),
        }
    }

    pub fn search_url(&self, params: &NyTimesParams) -> Result<Url> {
        self.url(SEARCH_PATH, params.to_query())
    }

    pub fn top_stories_url(&self) -> Result<Url> {
        self.url(MOST_POPULAR_PATH, Vec::new())
    }

    pub async fn fetch_top_stories(&self) -> Result<NyTimesResponse> {
        let url = self.top_stories_url()?;
        self.get(&url).await
    }

    pub async fn fetch_with_params(&self, params: &NyTimesParams) -> Result<NyTimesResponse> {
        let url = self.search_url(params)?;
        self.get(&url).await
    }

    fn url(&self, path: &str, mut query: Vec<(&'static str, String)>) -> Result<Url> {
        if !self.api_key.is_empty() {
            query.push(("api-key", self.api_key.clone()));
        }
        endpoint(&self.base_url, path, &query)
    }

    async fn get(&self, url: &Url) -> Result<NyTimesResponse> {
        let body = self.fetcher.fetch(url).await?;
        let value: Value = decode(&body)?;
        let response = NyTimesResponse::from_value(value)?;

        if let Some(message) = response.error_message() {
            return Err(NewswireError::Provider {
                provider: ProviderKind::NyTimes,
                message,
            });
        }
        Ok(response)
    }
}

fn to_page(response: NyTimesResponse) -> ProviderPage {
    let (articles, total) = response.into_articles();
    ProviderPage::new(articles, total)
}

#[async_trait]
impl NewsProvider for NyTimesClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NyTimes
    }

    async fn top_stories(&self) -> Result<ProviderPage> {
        Ok(to_page(self.fetch_top_stories().await?))
    }

    async fn search(&self, filters: &FilterSet) -> Result<ProviderPage> {
        let params = translate(filters);
        Ok(to_page(self.fetch_with_params(&params).await?))
    }
}
