use serde::Deserialize;
use serde_json::Value;

use crate::domain::article::{non_empty, ArticleDraft};
use crate::domain::{ProviderKind, Section, UnifiedArticle};

/// Every Content API body is wrapped in `{"response": ...}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub response: T,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianContentResponse {
    pub status: String,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub results: Option<Vec<Value>>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardianSectionResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<Section>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    web_title: Option<String>,
    web_url: Option<String>,
    web_publication_date: Option<String>,
    #[serde(default)]
    fields: Option<RawFields>,
    #[serde(default)]
    tags: Option<Vec<RawTag>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFields {
    headline: Option<String>,
    trail_text: Option<String>,
    byline: Option<String>,
    thumbnail: Option<String>,
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTag {
    #[serde(rename = "type")]
    kind: Option<String>,
    web_title: Option<String>,
}

pub fn map_article(record: &Value) -> Option<UnifiedArticle> {
    let raw = match RawArticle::deserialize(record) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Skipping malformed Guardian article: {}", e);
            return None;
        }
    };

    let contributor = raw
        .tags
        .unwrap_or_default()
        .into_iter()
        .find(|tag| tag.kind.as_deref() == Some("contributor"))
        .and_then(|tag| non_empty(tag.web_title));
    let fields = raw.fields.unwrap_or_default();

    let article = ArticleDraft {
        author: contributor.or_else(|| non_empty(fields.byline)),
        title: non_empty(fields.headline).or(raw.web_title),
        description: fields.trail_text,
        url: raw.web_url,
        url_to_image: fields.thumbnail,
        published_at: raw.web_publication_date,
        content: fields.body,
    }
    .finish(ProviderKind::Guardian, record.clone());

    if article.is_none() {
        tracing::debug!("Skipping Guardian article without title or url");
    }
    article
}

pub fn map_articles(records: &[Value]) -> Vec<UnifiedArticle> {
    records.iter().filter_map(map_article).collect()
}
