use serde::{Deserialize, Serialize};

use crate::domain::UnifiedArticle;

/// Merged result of one aggregation request.
///
/// For searches `total_results` is the sum of the totals each contributing
/// provider reported, counted before deduplication, so it can exceed
/// `articles.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedResponse {
    pub status: String,
    pub total_results: u64,
    pub articles: Vec<UnifiedArticle>,
    pub sources: Vec<String>,
}

impl UnifiedResponse {
    pub fn ok(total_results: u64, articles: Vec<UnifiedArticle>, sources: Vec<String>) -> Self {
        Self {
            status: "ok".to_string(),
            total_results,
            articles,
            sources,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// A section of the UK provider, used as the category vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub web_title: String,
}
