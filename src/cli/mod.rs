pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{FilterSet, SortBy};

#[derive(Parser)]
#[command(name = "newswire")]
#[command(
    about = "Aggregated news from NewsAPI, The Guardian and The New York Times",
    long_about = None
)]
pub struct Cli {
    /// Config file (default: ~/.config/newswire/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the unified JSON response instead of a listing
    #[arg(long, global = true)]
    pub json: bool,

    /// Print at most this many articles
    #[arg(short, long, global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Latest stories from every provider
    Top,
    /// Search all matching providers
    Search(SearchArgs),
    /// List Guardian sections usable as categories
    Sections,
    /// List the available sources
    Sources,
    /// Personalized feed from the saved preferences
    Feed,
    /// Manage personalized feed preferences
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Free-text query
    #[arg(short, long)]
    pub query: Option<String>,

    /// Comma-separated categories (sections)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Comma-separated source ids (newsapi, guardian, nytimes)
    #[arg(short, long)]
    pub sources: Option<String>,

    /// Earliest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest publication date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// relevancy, popularity or publishedAt
    #[arg(long, default_value_t = SortBy::PublishedAt)]
    pub sort_by: SortBy,
}

impl SearchArgs {
    pub fn to_filters(&self) -> FilterSet {
        let mut filters = FilterSet::new().with_sort_by(self.sort_by);
        if let Some(query) = &self.query {
            filters = filters.with_query(query.as_str());
        }
        if let Some(category) = &self.category {
            filters = filters.with_category(category.as_str());
        }
        if let Some(sources) = &self.sources {
            filters = filters.with_sources(sources.as_str());
        }
        if let Some(from) = &self.from {
            filters = filters.with_from(from.as_str());
        }
        if let Some(to) = &self.to {
            filters = filters.with_to(to.as_str());
        }
        filters
    }

    /// No narrowing filter given; the sort order alone does not count.
    pub fn is_unfiltered(&self) -> bool {
        self.to_filters().is_empty()
    }
}

#[derive(Subcommand)]
pub enum PrefsAction {
    /// Show the saved preferences
    Show,
    /// Save preferences (both empty clears them)
    Set {
        /// Comma-separated categories
        #[arg(long)]
        categories: Option<String>,

        /// Comma-separated source ids
        #[arg(long)]
        sources: Option<String>,
    },
    /// Remove the saved preferences
    Clear,
}
