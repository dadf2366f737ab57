//! # Newswire
//!
//! Aggregates news from three providers (NewsAPI, The Guardian and
//! The New York Times) into one unified article stream.
//!
//! ## Architecture
//!
//! ```text
//! FilterSet → policy → provider clients (concurrent) → mappers → merge/sort/dedup
//! ```
//!
//! - [`aggregator`]: decides which providers a request goes to, fans out and merges
//! - [`providers`]: per-provider client, parameter translator and schema mapper
//! - [`fetcher`]: HTTP transport
//!
//! ## Quick Start
//!
//! ```bash
//! # Top stories from every provider
//! newswire top
//!
//! # Search the Guardian and NYT politics sections
//! newswire search -q election -c politics -s guardian,nytimes
//!
//! # Save preferences and read the personalized feed
//! newswire prefs set --categories world,science
//! newswire feed --json
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires configuration, the
/// provider clients, the aggregator and the preference store together.
pub mod app;

/// Source-inclusion policy and the concurrent fan-out/merge.
pub mod aggregator;

/// Command-line interface using clap.
///
/// - `top` - Latest stories from all providers
/// - `search` - Filtered search
/// - `sections` - Guardian section list
/// - `sources` - Source catalogue
/// - `feed` - Personalized feed
/// - `prefs show|set|clear` - Manage feed preferences
pub mod cli;

/// Configuration loaded from `~/.config/newswire/config.toml` and the
/// environment.
pub mod config;

/// Core domain models.
///
/// - [`UnifiedArticle`](domain::UnifiedArticle): provider-independent article
/// - [`FilterSet`](domain::FilterSet): search intent
/// - [`UnifiedResponse`](domain::UnifiedResponse): merged result
pub mod domain;

/// HTTP fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): Async transport trait
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Personalized feed preferences stored as a JSON blob.
pub mod preferences;

/// NewsAPI, Guardian and NYT clients with their translators and mappers.
pub mod providers;
