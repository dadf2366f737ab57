use serde::Deserialize;
use serde_json::Value;

use crate::domain::article::ArticleDraft;
use crate::domain::{ProviderKind, UnifiedArticle};

/// Top-level body of every NewsAPI endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsApiResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Option<Vec<Value>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewsApiResponse {
    pub fn is_error(&self) -> bool {
        self.status.eq_ignore_ascii_case("error")
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

/// Near-identity mapping; the source is replaced by the NewsAPI descriptor.
pub fn map_article(record: &Value) -> Option<UnifiedArticle> {
    let raw = match RawArticle::deserialize(record) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Skipping malformed NewsAPI article: {}", e);
            return None;
        }
    };

    let article = ArticleDraft {
        title: raw.title,
        url: raw.url,
        author: raw.author,
        description: raw.description,
        url_to_image: raw.url_to_image,
        published_at: raw.published_at,
        content: raw.content,
    }
    .finish(ProviderKind::NewsApi, record.clone());

    if article.is_none() {
        tracing::debug!("Skipping NewsAPI article without title or url");
    }
    article
}

pub fn map_articles(records: &[Value]) -> Vec<UnifiedArticle> {
    records.iter().filter_map(map_article).collect()
}
