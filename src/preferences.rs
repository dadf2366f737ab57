//! Personalized feed preferences.
//!
//! A small JSON blob `{ "categories": "a,b", "sources": "x,y" }` kept in
//! `<data_dir>/newswire/personalizedFeedPreferences.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::app::{NewswireError, Result};
use crate::domain::{FilterSet, SortBy};

pub const PREFERENCES_FILE: &str = "personalizedFeedPreferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPreferences {
    /// Comma-joined category (section) names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<String>,
    /// Comma-joined source ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<String>,
}

impl FeedPreferences {
    pub fn new(categories: Option<String>, sources: Option<String>) -> Self {
        Self {
            categories: categories.filter(|c| !c.trim().is_empty()),
            sources: sources.filter(|s| !s.trim().is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.categories) && blank(&self.sources)
    }

    /// The search a personalized feed runs: the stored categories and
    /// sources, newest first.
    pub fn to_filters(&self) -> FilterSet {
        let mut filters = FilterSet::new().with_sort_by(SortBy::PublishedAt);
        if let Some(categories) = &self.categories {
            filters = filters.with_category(categories.as_str());
        }
        if let Some(sources) = &self.sources {
            filters = filters.with_sources(sources.as_str());
        }
        filters
    }
}

/// File-backed store for [`FeedPreferences`].
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at `<data_dir>/newswire/personalizedFeedPreferences.json`.
    pub fn default_location() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewswireError::Config("Could not find data directory".into()))?;
        Ok(Self::new(data_dir.join("newswire").join(PREFERENCES_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored preferences, `None` when nothing is saved or the blob is
    /// unreadable.
    pub fn load(&self) -> Result<Option<FeedPreferences>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<FeedPreferences>(&content) {
            Ok(prefs) if !prefs.is_empty() => Ok(Some(prefs)),
            Ok(_) => Ok(None),
            Err(e) => {
                tracing::warn!("Ignoring unreadable preferences at {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    /// Persist `prefs`; an empty set clears the stored blob instead.
    pub fn save(&self, prefs: &FeedPreferences) -> Result<()> {
        if prefs.is_empty() {
            return self.clear();
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)?;
        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
