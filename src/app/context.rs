use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::app::error::Result;
use crate::config::Config;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::preferences::PreferenceStore;
use crate::providers::{GuardianClient, NewsApiClient, NewsProvider, NyTimesClient};

pub struct AppContext {
    pub config: Config,
    pub aggregator: Aggregator,
    pub preferences: PreferenceStore,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let preferences = PreferenceStore::default_location()?;
        Self::with_preferences(config, preferences)
    }

    pub fn with_preferences(config: Config, preferences: PreferenceStore) -> Result<Self> {
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.http)?);
        let aggregator = Aggregator::new(build_providers(&config, fetcher));

        Ok(Self {
            config,
            aggregator,
            preferences,
        })
    }
}

/// One client per provider, in merge order.
fn build_providers(config: &Config, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Vec<Arc<dyn NewsProvider>> {
    for (name, settings) in [
        ("newsapi", &config.newsapi),
        ("guardian", &config.guardian),
        ("nytimes", &config.nytimes),
    ] {
        if !settings.has_api_key() {
            tracing::warn!("No API key configured for {}; its requests will likely fail", name);
        }
    }

    let newsapi: Arc<dyn NewsProvider> =
        Arc::new(NewsApiClient::new(fetcher.clone(), &config.newsapi, config.page_size));
    let guardian: Arc<dyn NewsProvider> =
        Arc::new(GuardianClient::new(fetcher.clone(), &config.guardian, config.page_size));
    let nytimes: Arc<dyn NewsProvider> = Arc::new(NyTimesClient::new(fetcher, &config.nytimes));

    vec![newsapi, guardian, nytimes]
}
