//! UK newspaper provider (The Guardian Content API).

pub mod mapper;
pub mod params;

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::app::{NewswireError, Result};
use crate::config::ProviderSettings;
use crate::domain::{FilterSet, ProviderKind, Section};
use crate::fetcher::Fetcher;
use crate::providers::{decode, endpoint, NewsProvider, ProviderPage};

pub use mapper::{map_article, map_articles, Envelope, GuardianContentResponse, GuardianSectionResponse};
pub use params::{translate, GuardianParams};

pub const DEFAULT_BASE_URL: &str = "https://content.guardianapis.com";

pub struct GuardianClient {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    base_url: String,
    api_key: String,
    page_size: u32,
}

impl GuardianClient {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, settings: &ProviderSettings, page_size: u32) -> Self {
        Self {
            fetcher,
            base_url: settings.base_url_or(DEFAULT_BASE_URL).to_string(),
            api_key: settings.api_key().to_string(),
            page_size,
        }
    }

    pub fn search_url(&self, params: &GuardianParams) -> Result<Url> {
        self.url("search", params.to_query())
    }

    pub async fn fetch_top_stories(&self) -> Result<GuardianContentResponse> {
        self.fetch_with_params(&GuardianParams::top_stories(self.page_size))
            .await
    }

    pub async fn fetch_with_params(&self, params: &GuardianParams) -> Result<GuardianContentResponse> {
        let url = self.search_url(params)?;
        let body = self.fetcher.fetch(&url).await?;
        let envelope: Envelope<GuardianContentResponse> = decode(&body)?;
        let response = envelope.response;

        if response.status != "ok" {
            return Err(self.provider_error(response.message));
        }
        Ok(response)
    }

    pub async fn fetch_sections(&self) -> Result<GuardianSectionResponse> {
        let url = self.url("sections", Vec::new())?;
        let body = self.fetcher.fetch(&url).await?;
        let envelope: Envelope<GuardianSectionResponse> = decode(&body)?;
        let response = envelope.response;

        if response.status != "ok" {
            return Err(self.provider_error(response.message));
        }
        Ok(response)
    }

    fn url(&self, path: &str, mut query: Vec<(&'static str, String)>) -> Result<Url> {
        if !self.api_key.is_empty() {
            query.push(("api-key", self.api_key.clone()));
        }
        endpoint(&self.base_url, path, &query)
    }

    fn provider_error(&self, message: Option<String>) -> NewswireError {
        NewswireError::Provider {
            provider: ProviderKind::Guardian,
            message: message.unwrap_or_else(|| "unexpected response status".to_string()),
        }
    }
}

fn to_page(response: GuardianContentResponse) -> ProviderPage {
    let articles = map_articles(response.results.as_deref().unwrap_or_default());
    let total = response.total.unwrap_or(articles.len() as u64);
    ProviderPage::new(articles, total)
}

#[async_trait]
impl NewsProvider for GuardianClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Guardian
    }

    async fn top_stories(&self) -> Result<ProviderPage> {
        Ok(to_page(self.fetch_top_stories().await?))
    }

    async fn search(&self, filters: &FilterSet) -> Result<ProviderPage> {
        let params = translate(filters, self.page_size);
        Ok(to_page(self.fetch_with_params(&params).await?))
    }

    async fn sections(&self) -> Result<Vec<Section>> {
        Ok(self.fetch_sections().await?.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::fetcher::HttpFetcher;
    use mockito::Matcher;
    use serde_json::json;

    fn client(base_url: String) -> GuardianClient {
        let fetcher = Arc::new(HttpFetcher::new(&HttpConfig::default()).unwrap());
        let settings = ProviderSettings {
            api_key: Some("g-key".to_string()),
            base_url: Some(base_url),
        };
        GuardianClient::new(fetcher, &settings, 20)
    }

    fn search_body() -> String {
        json!({
            "response": {
                "status": "ok",
                "userTier": "developer",
                "total": 1234,
                "startIndex": 1,
                "pageSize": 20,
                "currentPage": 1,
                "pages": 62,
                "orderBy": "newest",
                "results": [{
                    "id": "politics/2025/mar/10/a",
                    "webPublicationDate": "2025-03-10T09:00:00Z",
                    "webTitle": "Budget vote",
                    "webUrl": "https://www.theguardian.com/politics/2025/mar/10/a",
                    "fields": { "headline": "Budget vote passes" },
                    "tags": []
                }]
            }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_search_sends_native_params() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "budget".into()),
                Matcher::UrlEncoded("section".into(), "politics|business".into()),
                Matcher::UrlEncoded("from-date".into(), "2025-03-01".into()),
                Matcher::UrlEncoded("order-by".into(), "newest".into()),
                Matcher::UrlEncoded("page-size".into(), "20".into()),
                Matcher::UrlEncoded("show-fields".into(), "headline,trailText,byline,thumbnail".into()),
                Matcher::UrlEncoded("show-tags".into(), "contributor".into()),
                Matcher::UrlEncoded("api-key".into(), "g-key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(search_body())
            .create_async()
            .await;

        let filters = FilterSet::new()
            .with_query("budget")
            .with_category("politics,business")
            .with_from("2025-03-01");
        let page = client(server.url()).search(&filters).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.total_results, 1234);
        assert_eq!(page.articles[0].title(), "Budget vote passes");
    }

    #[tokio::test]
    async fn test_sections_are_unwrapped() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/sections")
            .match_query(Matcher::UrlEncoded("api-key".into(), "g-key".into()))
            .with_status(200)
            .with_body(r#"{"response":{"status":"ok","total":1,"results":[{"id":"world","webTitle":"World news"}]}}"#)
            .create_async()
            .await;

        let sections = client(server.url()).sections().await.unwrap();
        assert_eq!(
            sections,
            vec![Section {
                id: "world".to_string(),
                web_title: "World news".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_error_status_is_a_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"response":{"status":"error","message":"Invalid authentication credentials"}}"#)
            .create_async()
            .await;

        let err = client(server.url()).top_stories().await.unwrap_err();
        assert!(matches!(
            err,
            NewswireError::Provider { provider: ProviderKind::Guardian, .. }
        ));
    }
}
