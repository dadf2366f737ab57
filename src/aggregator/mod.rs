//! Fan-out over the providers and merge of their results.
//!
//! Every selected provider runs in its own task. All tasks are awaited to
//! completion; a provider error only removes that provider from the result.
//! Only a failed join (a panicking provider task) is reported to the caller.

pub mod policy;

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;

use crate::app::{NewswireError, Result};
use crate::domain::{FilterSet, ProviderKind, Section, UnifiedArticle, UnifiedResponse};
use crate::providers::{NewsProvider, ProviderPage};

pub use policy::{decide, Inclusion};

#[derive(Clone)]
enum Request {
    TopStories,
    Search(FilterSet),
}

pub struct Aggregator {
    providers: Vec<Arc<dyn NewsProvider>>,
}

impl Aggregator {
    /// `providers` are queried and merged in the given order.
    pub fn new(providers: Vec<Arc<dyn NewsProvider>>) -> Self {
        Self { providers }
    }

    pub fn provider_kinds(&self) -> Vec<ProviderKind> {
        self.providers.iter().map(|p| p.kind()).collect()
    }

    /// Latest stories from every provider, newest first.
    ///
    /// `total_results` is the number of merged articles; no deduplication.
    pub async fn fetch_all_top_stories(&self) -> Result<UnifiedResponse> {
        let selected = self.providers.clone();
        let fulfilled = fan_out(selected, Request::TopStories).await?;

        let sources = display_names(&fulfilled);
        let mut articles: Vec<UnifiedArticle> = fulfilled
            .into_iter()
            .flat_map(|(_, page)| page.articles)
            .collect();
        sort_newest_first(&mut articles);

        tracing::info!(
            "Top stories: {} articles from {:?}",
            articles.len(),
            sources
        );
        Ok(UnifiedResponse::ok(articles.len() as u64, articles, sources))
    }

    /// Search the providers chosen by [`decide`], newest first, one article
    /// per normalized title.
    ///
    /// `total_results` sums what each provider reported before
    /// deduplication.
    pub async fn search_all_sources(&self, filters: &FilterSet) -> Result<UnifiedResponse> {
        let inclusion = decide(filters);
        let selected: Vec<Arc<dyn NewsProvider>> = self
            .providers
            .iter()
            .filter(|p| inclusion.includes(p.kind()))
            .cloned()
            .collect();

        if selected.is_empty() {
            tracing::info!("Search: no provider matches {:?}", filters);
            return Ok(UnifiedResponse::ok(0, Vec::new(), Vec::new()));
        }

        let fulfilled = fan_out(selected, Request::Search(filters.clone())).await?;

        let sources = display_names(&fulfilled);
        let total: u64 = fulfilled.iter().map(|(_, page)| page.total_results).sum();
        let mut articles: Vec<UnifiedArticle> = fulfilled
            .into_iter()
            .flat_map(|(_, page)| page.articles)
            .collect();
        sort_newest_first(&mut articles);
        let articles = dedup_by_title(articles);

        tracing::info!(
            "Search: {} articles ({} reported) from {:?}",
            articles.len(),
            total,
            sources
        );
        Ok(UnifiedResponse::ok(total, articles, sources))
    }

    /// Guardian section list; empty when the call fails or no Guardian
    /// provider is configured.
    pub async fn guardian_sections(&self) -> Vec<Section> {
        let Some(guardian) = self
            .providers
            .iter()
            .find(|p| p.kind() == ProviderKind::Guardian)
        else {
            return Vec::new();
        };

        match guardian.sections().await {
            Ok(sections) => sections,
            Err(e) => {
                tracing::warn!("Failed to load Guardian sections: {}", e);
                Vec::new()
            }
        }
    }
}

/// Run `request` against every provider concurrently and wait for all of
/// them. Returns the fulfilled pages in provider order.
async fn fan_out(
    providers: Vec<Arc<dyn NewsProvider>>,
    request: Request,
) -> Result<Vec<(ProviderKind, ProviderPage)>> {
    let mut kinds = Vec::with_capacity(providers.len());
    let mut handles = Vec::with_capacity(providers.len());

    for provider in providers {
        let request = request.clone();
        kinds.push(provider.kind());

        let handle = tokio::spawn(async move {
            match &request {
                Request::TopStories => provider.top_stories().await,
                Request::Search(filters) => provider.search(filters).await,
            }
        });
        handles.push(handle);
    }

    let outcomes = join_all(handles).await;

    let mut fulfilled = Vec::new();
    for (kind, outcome) in kinds.into_iter().zip(outcomes) {
        match outcome {
            Ok(Ok(page)) => {
                tracing::debug!("{} returned {} articles", kind.display_name(), page.articles.len());
                fulfilled.push((kind, page));
            }
            Ok(Err(e)) => {
                tracing::warn!("{} request failed: {}", kind.display_name(), e);
            }
            Err(e) => {
                tracing::error!("Task join error: {}", e);
                return Err(NewswireError::Aggregation(format!(
                    "{} task did not complete: {}",
                    kind.display_name(),
                    e
                )));
            }
        }
    }

    Ok(fulfilled)
}

fn display_names(fulfilled: &[(ProviderKind, ProviderPage)]) -> Vec<String> {
    fulfilled
        .iter()
        .map(|(kind, _)| kind.display_name().to_string())
        .collect()
}

/// Stable sort, newest first; unreadable timestamps go last.
fn sort_newest_first(articles: &mut [UnifiedArticle]) {
    articles.sort_by_key(|a| Reverse(a.published_timestamp()));
}

/// Keep the first article of every normalized title.
fn dedup_by_title(articles: Vec<UnifiedArticle>) -> Vec<UnifiedArticle> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.dedup_key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::test_article;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Barrier;

    enum Outcome {
        Page(Vec<UnifiedArticle>, u64),
        Fail,
        Panic,
    }

    struct FakeProvider {
        kind: ProviderKind,
        outcome: Outcome,
        calls: AtomicUsize,
        rendezvous: Option<Arc<Barrier>>,
    }

    impl FakeProvider {
        fn new(kind: ProviderKind, outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                kind,
                outcome,
                calls: AtomicUsize::new(0),
                rendezvous: None,
            })
        }

        /// Answers only once every provider sharing `barrier` has been called.
        fn waiting(kind: ProviderKind, barrier: Arc<Barrier>) -> Arc<Self> {
            Arc::new(Self {
                kind,
                outcome: Outcome::Page(vec![test_article(kind, kind.id(), "2025-01-01")], 1),
                calls: AtomicUsize::new(0),
                rendezvous: Some(barrier),
            })
        }

        fn ok(kind: ProviderKind, dates: &[(&str, &str)], total: u64) -> Arc<Self> {
            let articles = dates
                .iter()
                .map(|(title, date)| test_article(kind, title, date))
                .collect();
            Self::new(kind, Outcome::Page(articles, total))
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn respond(&self) -> Result<ProviderPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Outcome::Page(articles, total) => Ok(ProviderPage::new(articles.clone(), *total)),
                Outcome::Fail => Err(NewswireError::Provider {
                    provider: self.kind,
                    message: "boom".to_string(),
                }),
                Outcome::Panic => panic!("provider task crashed"),
            }
        }
    }

    #[async_trait]
    impl NewsProvider for FakeProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn top_stories(&self) -> Result<ProviderPage> {
            if let Some(barrier) = &self.rendezvous {
                barrier.wait().await;
            }
            self.respond()
        }

        async fn search(&self, _filters: &FilterSet) -> Result<ProviderPage> {
            self.respond()
        }

        async fn sections(&self) -> Result<Vec<Section>> {
            self.respond().map(|_| {
                vec![Section {
                    id: "world".to_string(),
                    web_title: "World news".to_string(),
                }]
            })
        }
    }

    fn aggregator(providers: &[Arc<FakeProvider>]) -> Aggregator {
        Aggregator::new(
            providers
                .iter()
                .map(|p| p.clone() as Arc<dyn NewsProvider>)
                .collect(),
        )
    }

    fn dates(response: &UnifiedResponse) -> Vec<&str> {
        response.articles.iter().map(|a| a.published_at()).collect()
    }

    #[tokio::test]
    async fn test_top_stories_merge_newest_first() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-03")], 100);
        let guardian = FakeProvider::ok(ProviderKind::Guardian, &[("b", "2025-01-01")], 100);
        let nytimes = FakeProvider::ok(ProviderKind::NyTimes, &[("c", "2025-01-02")], 100);

        let response = aggregator(&[newsapi, guardian, nytimes])
            .fetch_all_top_stories()
            .await
            .unwrap();

        assert_eq!(response.status, "ok");
        assert_eq!(dates(&response), vec!["2025-01-03", "2025-01-02", "2025-01-01"]);
        assert_eq!(response.total_results, 3);
        assert_eq!(
            response.sources,
            vec!["NewsAPI", "The Guardian", "The New York Times"]
        );
    }

    #[tokio::test]
    async fn test_providers_are_called_concurrently() {
        let barrier = Arc::new(Barrier::new(3));
        let providers: Vec<Arc<FakeProvider>> = ProviderKind::ALL
            .iter()
            .map(|kind| FakeProvider::waiting(*kind, barrier.clone()))
            .collect();

        let response = tokio::time::timeout(
            Duration::from_secs(3),
            aggregator(&providers).fetch_all_top_stories(),
        )
        .await
        .expect("a provider waited on its siblings")
        .unwrap();

        assert_eq!(
            response.sources,
            vec!["NewsAPI", "The Guardian", "The New York Times"]
        );
        assert_eq!(response.articles.len(), 3);
    }

    #[tokio::test]
    async fn test_top_stories_partial_failure_keeps_survivors() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-02")], 10);
        let guardian = FakeProvider::new(ProviderKind::Guardian, Outcome::Fail);
        let nytimes = FakeProvider::ok(ProviderKind::NyTimes, &[("c", "2025-01-01")], 5);

        let response = aggregator(&[newsapi, guardian.clone(), nytimes])
            .fetch_all_top_stories()
            .await
            .unwrap();

        assert_eq!(guardian.calls(), 1);
        assert_eq!(response.sources, vec!["NewsAPI", "The New York Times"]);
        let titles: Vec<&str> = response.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(response.total_results, 2);
    }

    #[tokio::test]
    async fn test_top_stories_keep_duplicate_titles() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("Same", "2025-01-02")], 1);
        let nytimes = FakeProvider::ok(ProviderKind::NyTimes, &[("same", "2025-01-01")], 1);

        let response = aggregator(&[newsapi, nytimes]).fetch_all_top_stories().await.unwrap();
        assert_eq!(response.articles.len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_dates_sort_last_in_merge_order() {
        let newsapi = FakeProvider::ok(
            ProviderKind::NewsApi,
            &[("x", "not a date"), ("y", "2025-01-01")],
            2,
        );
        let guardian = FakeProvider::ok(ProviderKind::Guardian, &[("z", "")], 1);

        let response = aggregator(&[newsapi, guardian]).fetch_all_top_stories().await.unwrap();
        let titles: Vec<&str> = response.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["y", "x", "z"]);
    }

    #[tokio::test]
    async fn test_search_dedups_and_sums_totals() {
        let newsapi = FakeProvider::ok(
            ProviderKind::NewsApi,
            &[("Fed Raises Rates", "2025-01-02"), ("Other", "2025-01-01")],
            40,
        );
        let nytimes = FakeProvider::ok(ProviderKind::NyTimes, &[("  fed RAISES rates ", "2025-01-03")], 2);

        let response = aggregator(&[newsapi, nytimes])
            .search_all_sources(&FilterSet::new().with_query("fed"))
            .await
            .unwrap();

        assert_eq!(response.articles.len(), 2);
        // the newer NYT copy sorts first and wins
        assert_eq!(response.articles[0].provider(), ProviderKind::NyTimes);
        assert_eq!(response.articles[1].title(), "Other");
        assert_eq!(response.total_results, 42);
    }

    #[tokio::test]
    async fn test_guardian_source_invokes_only_guardian() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-01")], 1);
        let guardian = FakeProvider::ok(ProviderKind::Guardian, &[("b", "2025-01-01")], 1);
        let nytimes = FakeProvider::ok(ProviderKind::NyTimes, &[("c", "2025-01-01")], 1);
        let aggregator = aggregator(&[newsapi.clone(), guardian.clone(), nytimes.clone()]);

        let response = aggregator
            .search_all_sources(&FilterSet::new().with_sources("the-guardian"))
            .await
            .unwrap();

        assert_eq!(newsapi.calls(), 0);
        assert_eq!(nytimes.calls(), 0);
        assert_eq!(guardian.calls(), 1);
        assert_eq!(response.sources, vec!["The Guardian"]);
    }

    #[tokio::test]
    async fn test_category_with_query_skips_newsapi() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-01")], 1);
        let guardian = FakeProvider::ok(ProviderKind::Guardian, &[("b", "2025-01-01")], 1);
        let aggregator = aggregator(&[newsapi.clone(), guardian.clone()]);

        let filters = FilterSet::new()
            .with_sources("newsapi,guardian")
            .with_category("politics")
            .with_query("vote");
        let response = aggregator.search_all_sources(&filters).await.unwrap();

        assert_eq!(newsapi.calls(), 0);
        assert_eq!(response.sources, vec!["The Guardian"]);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_survivors() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-02")], 10);
        let guardian = FakeProvider::new(ProviderKind::Guardian, Outcome::Fail);
        let nytimes = FakeProvider::ok(ProviderKind::NyTimes, &[("c", "2025-01-01")], 5);
        let aggregator = aggregator(&[newsapi, guardian.clone(), nytimes]);

        let response = aggregator.search_all_sources(&FilterSet::new()).await.unwrap();

        assert_eq!(guardian.calls(), 1);
        assert_eq!(response.sources, vec!["NewsAPI", "The New York Times"]);
        assert!(response
            .articles
            .iter()
            .all(|a| a.provider() != ProviderKind::Guardian));
        assert_eq!(response.total_results, 15);
    }

    #[tokio::test]
    async fn test_total_failure_is_an_empty_success() {
        let providers: Vec<Arc<FakeProvider>> = ProviderKind::ALL
            .iter()
            .map(|kind| FakeProvider::new(*kind, Outcome::Fail))
            .collect();
        let aggregator = aggregator(&providers);

        let top = aggregator.fetch_all_top_stories().await.unwrap();
        assert_eq!(top.status, "ok");
        assert!(top.is_empty());
        assert!(top.sources.is_empty());
        assert_eq!(top.total_results, 0);

        let search = aggregator.search_all_sources(&FilterSet::new()).await.unwrap();
        assert!(search.is_empty());
        assert!(search.sources.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_source_queries_nobody() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-01")], 1);
        let aggregator = aggregator(&[newsapi.clone()]);

        let response = aggregator
            .search_all_sources(&FilterSet::new().with_sources("bbc-news"))
            .await
            .unwrap();
        assert_eq!(newsapi.calls(), 0);
        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn test_panicking_provider_is_fatal() {
        let newsapi = FakeProvider::ok(ProviderKind::NewsApi, &[("a", "2025-01-01")], 1);
        let guardian = FakeProvider::new(ProviderKind::Guardian, Outcome::Panic);

        let err = aggregator(&[newsapi, guardian])
            .fetch_all_top_stories()
            .await
            .unwrap_err();
        assert!(matches!(err, NewswireError::Aggregation(_)));
    }

    #[tokio::test]
    async fn test_sections_fall_back_to_empty() {
        let failing = FakeProvider::new(ProviderKind::Guardian, Outcome::Fail);
        assert!(aggregator(&[failing]).guardian_sections().await.is_empty());

        let no_guardian = FakeProvider::ok(ProviderKind::NewsApi, &[], 0);
        assert!(aggregator(&[no_guardian.clone()]).guardian_sections().await.is_empty());
        assert_eq!(no_guardian.calls(), 0);

        let guardian = FakeProvider::ok(ProviderKind::Guardian, &[], 0);
        let sections = aggregator(&[guardian]).guardian_sections().await;
        assert_eq!(sections[0].id, "world");
    }
}
