//! Provider clients, native-parameter translators and schema mappers.
//!
//! Each provider module exposes the same three pieces:
//! - a `translate` function turning a [`FilterSet`] into the provider's
//!   native parameter bag
//! - a client doing exactly one GET per call and returning the raw decoded body
//! - a mapper converting raw records into [`UnifiedArticle`]s
//!
//! The [`NewsProvider`] trait ties them together for the aggregator.

pub mod guardian;
pub mod newsapi;
pub mod nytimes;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::app::Result;
use crate::domain::{FilterSet, ProviderKind, Section, UnifiedArticle};

pub use guardian::GuardianClient;
pub use newsapi::NewsApiClient;
pub use nytimes::NyTimesClient;

/// Mapped articles of one provider call plus the total the provider reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPage {
    pub articles: Vec<UnifiedArticle>,
    pub total_results: u64,
}

impl ProviderPage {
    pub fn new(articles: Vec<UnifiedArticle>, total_results: u64) -> Self {
        Self {
            articles,
            total_results,
        }
    }
}

/// One content provider as seen by the aggregator.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Latest stories in the provider's default recency order.
    async fn top_stories(&self) -> Result<ProviderPage>;

    /// Translate `filters`, issue the search call and map the result.
    async fn search(&self, filters: &FilterSet) -> Result<ProviderPage>;

    /// Category vocabulary; only the Guardian has one.
    async fn sections(&self) -> Result<Vec<Section>> {
        Ok(Vec::new())
    }
}

/// Build `{base}/{path}?params`. Plain concatenation keeps any path prefix
/// on the base (`https://newsapi.org/v2`), which `Url::join` would drop.
pub(crate) fn endpoint(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let url = if params.is_empty() {
        Url::parse(&raw)?
    } else {
        Url::parse_with_params(&raw, params)?
    };
    Ok(url)
}

/// Push `(name, value)` when the value is present.
pub(crate) fn push_opt(params: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        params.push((name, value.to_string()));
    }
}

pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = endpoint(
            "https://newsapi.org/v2/",
            "everything",
            &[("q", "rust lang".to_string())],
        )
        .unwrap();

        assert_eq!(url.path(), "/v2/everything");
        assert_eq!(url.query(), Some("q=rust+lang"));
    }

    #[test]
    fn test_endpoint_without_params_has_no_query() {
        let url = endpoint("https://content.guardianapis.com", "/sections", &[]).unwrap();
        assert_eq!(url.as_str(), "https://content.guardianapis.com/sections");
    }

    #[test]
    fn test_push_opt_skips_absent_values() {
        let mut params = Vec::new();
        push_opt(&mut params, "q", None);
        push_opt(&mut params, "from", Some("2025-01-01"));
        assert_eq!(params, vec![("from", "2025-01-01".to_string())]);
    }
}
