use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::domain::ProviderKind;

/// Canonical source attribution; always the provider's descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleSource {
    pub id: &'static str,
    pub name: &'static str,
}

/// Which provider produced an article, plus the record exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOrigin {
    pub provider_type: ProviderKind,
    pub original_data: Value,
}

/// Provider-independent article.
///
/// Only the provider mappers build these (through [`ArticleDraft`]); once built
/// an article is read-only. `title` and `url` are guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedArticle {
    source: ArticleSource,
    author: Option<String>,
    title: String,
    description: Option<String>,
    url: String,
    url_to_image: Option<String>,
    published_at: String,
    content: Option<String>,
    source_origin: SourceOrigin,
}

impl UnifiedArticle {
    pub fn source(&self) -> &ArticleSource {
        &self.source
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn url_to_image(&self) -> Option<&str> {
        self.url_to_image.as_deref()
    }

    /// Publication timestamp as the provider reported it.
    pub fn published_at(&self) -> &str {
        &self.published_at
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn source_origin(&self) -> &SourceOrigin {
        &self.source_origin
    }

    pub fn provider(&self) -> ProviderKind {
        self.source_origin.provider_type
    }

    /// Parsed publication time, `None` when the provider value is unreadable.
    pub fn published_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.published_at)
    }

    /// Title key used for cross-provider deduplication.
    pub fn dedup_key(&self) -> String {
        self.title.trim().to_lowercase()
    }
}

/// Field values collected by a mapper before the article is sealed.
#[derive(Debug, Default)]
pub(crate) struct ArticleDraft {
    pub title: Option<String>,
    pub url: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub url_to_image: Option<String>,
    pub published_at: Option<String>,
    pub content: Option<String>,
}

impl ArticleDraft {
    /// Seal the draft. Returns `None` when title or url is missing or blank.
    pub fn finish(self, provider: ProviderKind, original: Value) -> Option<UnifiedArticle> {
        let title = non_empty(self.title)?;
        let url = non_empty(self.url)?;

        Some(UnifiedArticle {
            source: ArticleSource {
                id: provider.id(),
                name: provider.display_name(),
            },
            author: non_empty(self.author),
            title,
            description: non_empty(self.description),
            url,
            url_to_image: non_empty(self.url_to_image),
            published_at: self.published_at.unwrap_or_default(),
            content: non_empty(self.content),
            source_origin: SourceOrigin {
                provider_type: provider,
                original_data: original,
            },
        })
    }
}

/// Treat blank strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse the timestamp shapes the providers emit: RFC 3339, NYT's `+0000`
/// offset form, and bare dates (taken as midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
pub(crate) fn test_article(provider: ProviderKind, title: &str, published_at: &str) -> UnifiedArticle {
    let original = serde_json::json!({ "title": title, "publishedAt": published_at });
    ArticleDraft {
        title: Some(title.to_string()),
        url: Some(format!(
            "https://example.com/{}/{}",
            provider.id(),
            title.trim().replace(' ', "-")
        )),
        published_at: Some(published_at.to_string()),
        ..Default::default()
    }
    .finish(provider, original)
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_finish_requires_title_and_url() {
        let draft = ArticleDraft {
            title: Some("  ".into()),
            url: Some("https://example.com/a".into()),
            ..Default::default()
        };
        assert!(draft.finish(ProviderKind::NewsApi, Value::Null).is_none());

        let draft = ArticleDraft {
            title: Some("Headline".into()),
            url: None,
            ..Default::default()
        };
        assert!(draft.finish(ProviderKind::NewsApi, Value::Null).is_none());
    }

    #[test]
    fn test_finish_uses_provider_descriptor() {
        let article = ArticleDraft {
            title: Some("Headline".into()),
            url: Some("https://example.com/a".into()),
            author: Some("".into()),
            ..Default::default()
        }
        .finish(ProviderKind::Guardian, serde_json::json!({"id": 1}))
        .unwrap();

        assert_eq!(article.source().id, "guardian");
        assert_eq!(article.source().name, "The Guardian");
        assert_eq!(article.author(), None);
        assert_eq!(article.provider(), ProviderKind::Guardian);
        assert_eq!(article.source_origin().original_data["id"], 1);
    }

    #[test]
    fn test_parse_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2025, 3, 10, 12, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2025-03-10T12:30:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-10T12:30:00+0000"), Some(expected));
        assert_eq!(
            parse_timestamp("2025-03-10"),
            Some(Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_dedup_key_folds_case_and_trims() {
        let a = test_article(ProviderKind::NewsApi, "Fed Raises Rates", "2025-01-01");
        let b = test_article(ProviderKind::NyTimes, "  fed RAISES rates ", "2025-01-01");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_serializes_unified_shape() {
        let article = test_article(ProviderKind::NewsApi, "Hello", "2025-01-01");
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["source"]["name"], "NewsAPI");
        assert_eq!(json["urlToImage"], Value::Null);
        assert_eq!(json["publishedAt"], "2025-01-01");
        assert_eq!(json["sourceOrigin"]["providerType"], "newsapi");
        assert_eq!(json["sourceOrigin"]["originalData"]["title"], "Hello");
    }
}
