//! Generic headlines provider (newsapi.org).

pub mod mapper;
pub mod params;

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::app::{NewswireError, Result};
use crate::config::ProviderSettings;
use crate::domain::{FilterSet, ProviderKind};
use crate::fetcher::Fetcher;
use crate::providers::{decode, endpoint, NewsProvider, ProviderPage};

pub use mapper::{map_article, map_articles, NewsApiResponse};
pub use params::{translate, NewsApiParams};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";

pub struct NewsApiClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl NewsApiClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, settings: &ProviderSettings, page_size: u32) -> Self {
        Self {
            fetcher,
            base_url: settings.base_url_or(DEFAULT_BASE_URL).to_string(),
            api_key: settings.api_key().to_string(),
            page_size,
        }
    }

    pub fn top_stories_url(&self) -> Result<Url> {
        let params = [
            ("country", "us".to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        self.url("top-headlines", &params)
    }

    pub fn search_url(&self, params: &NewsApiParams) -> Result<Url> {
        self.url("everything", &params.to_query())
    }

    pub async fn fetch_top_stories(&self) -> Result<NewsApiResponse> {
        let url = self.top_stories_url()?;
        self.get(&url).await
    }

    pub async fn fetch_with_params(&self, params: &NewsApiParams) -> Result<NewsApiResponse> {
        let url = self.search_url(params)?;
        self.get(&url).await
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let mut query = params.to_vec();
        if !self.api_key.is_empty() {
            query.push(("apiKey", self.api_key.clone()));
        }
        endpoint(&self.base_url, path, &query)
    }

    async fn get(&self, url: &Url) -> Result<NewsApiResponse> {
        let body = self.fetcher.fetch(url).await?;
        let response: NewsApiResponse = decode(&body)?;

        if response.is_error() {
            return Err(NewswireError::Provider {
                provider: ProviderKind::NewsApi,
                message: response
                    .message
                    .or(response.code)
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        Ok(response)
    }
}

fn to_page(response: NewsApiResponse) -> ProviderPage {
    let articles = map_articles(response.articles.as_deref().unwrap_or_default());
    let total = response.total_results.unwrap_or(articles.len() as u64);
    ProviderPage::new(articles, total)
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::NewsApi
    }

    async fn top_stories(&self) -> Result<ProviderPage> {
        Ok(to_page(self.fetch_top_stories().await?))
    }

    async fn search(&self, filters: &FilterSet) -> Result<ProviderPage> {
        let params = translate(filters);
        Ok(to_page(self.fetch_with_params(&params).await?))
    }
}
