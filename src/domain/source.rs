use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three upstream content providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    NewsApi,
    Guardian,
    NyTimes,
}

impl ProviderKind {
    /// All providers, in merge order.
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::NewsApi,
        ProviderKind::Guardian,
        ProviderKind::NyTimes,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ProviderKind::NewsApi => "newsapi",
            ProviderKind::Guardian => "guardian",
            ProviderKind::NyTimes => "nytimes",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ProviderKind::NewsApi => "NewsAPI",
            ProviderKind::Guardian => "The Guardian",
            ProviderKind::NyTimes => "The New York Times",
        }
    }

    /// Resolve a user-facing source id (as found in a `sources` filter) to a provider.
    ///
    /// Matching is case-insensitive and accepts the long-form slugs
    /// `the-guardian` and `the-new-york-times` alongside the canonical ids.
    pub fn from_source_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "newsapi" => Some(ProviderKind::NewsApi),
            "guardian" | "the-guardian" => Some(ProviderKind::Guardian),
            "nytimes" | "the-new-york-times" => Some(ProviderKind::NyTimes),
            _ => None,
        }
    }

    pub fn descriptor(self) -> SourceDescriptor {
        SourceDescriptor {
            id: self.id(),
            display_name: self.display_name(),
            kind: self,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Static description of a provider, as offered to source pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDescriptor {
    pub id: &'static str,
    pub display_name: &'static str,
    #[serde(rename = "type")]
    pub kind: ProviderKind,
}

pub fn all_sources() -> [SourceDescriptor; 3] {
    ProviderKind::ALL.map(ProviderKind::descriptor)
}
