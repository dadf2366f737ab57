use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Requested result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Relevancy,
    Popularity,
    #[default]
    PublishedAt,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
            SortBy::Popularity => "popularity",
            SortBy::PublishedAt => "publishedAt",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevancy" | "relevance" => Ok(SortBy::Relevancy),
            "popularity" => Ok(SortBy::Popularity),
            "publishedat" | "newest" => Ok(SortBy::PublishedAt),
            other => Err(format!(
                "Invalid sort order: {}. Use relevancy, popularity or publishedAt",
                other
            )),
        }
    }
}

/// Provider-independent search intent.
///
/// Built by value: every `with_*` call consumes the set and returns a new one,
/// so a filter set handed to the aggregator is never changed underneath it.
/// Blank values are dropped on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sources: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    sort_by: SortBy,
}

fn clean(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        Self {
            query: clean(query),
            ..self
        }
    }

    /// Comma-joined category list.
    pub fn with_category(self, category: impl Into<String>) -> Self {
        Self {
            category: clean(category),
            ..self
        }
    }

    /// Comma-joined source id list.
    pub fn with_sources(self, sources: impl Into<String>) -> Self {
        Self {
            sources: clean(sources),
            ..self
        }
    }

    pub fn with_from(self, from: impl Into<String>) -> Self {
        Self {
            from: clean(from),
            ..self
        }
    }

    pub fn with_to(self, to: impl Into<String>) -> Self {
        Self {
            to: clean(to),
            ..self
        }
    }

    pub fn with_sort_by(self, sort_by: SortBy) -> Self {
        Self { sort_by, ..self }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn sources(&self) -> Option<&str> {
        self.sources.as_deref()
    }

    pub fn from_date(&self) -> Option<&str> {
        self.from.as_deref()
    }

    pub fn to_date(&self) -> Option<&str> {
        self.to.as_deref()
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    /// Individual categories, trimmed, blanks skipped.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        split_list(self.category())
    }

    /// Individual source ids, trimmed, blanks skipped.
    pub fn source_ids(&self) -> impl Iterator<Item = &str> {
        split_list(self.sources())
    }

    /// True when no narrowing filter is set (sort order aside).
    pub fn is_empty(&self) -> bool {
        self.query.is_none()
            && self.category.is_none()
            && self.sources.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_dropped() {
        let filters = FilterSet::new()
            .with_query("   ")
            .with_category("")
            .with_from(" 2025-01-01 ");

        assert_eq!(filters.query(), None);
        assert_eq!(filters.category(), None);
        assert_eq!(filters.from_date(), Some("2025-01-01"));
        assert!(!filters.is_empty());
    }

    #[test]
    fn test_with_returns_new_value() {
        let base = FilterSet::new().with_query("rates");
        let narrowed = base.clone().with_category("business");

        assert_eq!(base.category(), None);
        assert_eq!(narrowed.category(), Some("business"));
        assert_eq!(narrowed.query(), Some("rates"));
    }

    #[test]
    fn test_list_splitting() {
        let filters = FilterSet::new()
            .with_category("world, politics,,")
            .with_sources("guardian,nytimes");

        let categories: Vec<_> = filters.categories().collect();
        assert_eq!(categories, vec!["world", "politics"]);
        let sources: Vec<_> = filters.source_ids().collect();
        assert_eq!(sources, vec!["guardian", "nytimes"]);
    }

    #[test]
    fn test_default_sort_is_published_at() {
        assert_eq!(FilterSet::new().sort_by(), SortBy::PublishedAt);
        assert!(FilterSet::new().is_empty());
    }

    #[test]
    fn test_sort_by_parsing() {
        assert_eq!("publishedAt".parse::<SortBy>(), Ok(SortBy::PublishedAt));
        assert_eq!("relevancy".parse::<SortBy>(), Ok(SortBy::Relevancy));
        assert_eq!("Popularity".parse::<SortBy>(), Ok(SortBy::Popularity));
        assert!("random".parse::<SortBy>().is_err());
    }

    #[test]
    fn test_serializes_camel_case_without_empty_fields() {
        let filters = FilterSet::new().with_query("fed");
        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "query": "fed", "sortBy": "publishedAt" })
        );
    }
}
