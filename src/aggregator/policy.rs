use crate::domain::{FilterSet, ProviderKind};

/// Which providers a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inclusion {
    pub newsapi: bool,
    pub guardian: bool,
    pub nytimes: bool,
}

impl Inclusion {
    pub fn all() -> Self {
        Self {
            newsapi: true,
            guardian: true,
            nytimes: true,
        }
    }

    pub fn none() -> Self {
        Self {
            newsapi: false,
            guardian: false,
            nytimes: false,
        }
    }

    pub fn includes(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::NewsApi => self.newsapi,
            ProviderKind::Guardian => self.guardian,
            ProviderKind::NyTimes => self.nytimes,
        }
    }

    fn set(&mut self, kind: ProviderKind, included: bool) {
        match kind {
            ProviderKind::NewsApi => self.newsapi = included,
            ProviderKind::Guardian => self.guardian = included,
            ProviderKind::NyTimes => self.nytimes = included,
        }
    }
}

/// Decide the providers for one search.
///
/// - With `sources` set, only providers named by at least one id take part.
///   Unknown ids select nothing.
/// - Without it all three are candidates.
/// - NewsAPI cannot combine a category with free text, so a filter set
///   carrying both drops it even when it was selected explicitly.
pub fn decide(filters: &FilterSet) -> Inclusion {
    let mut inclusion = if filters.sources().is_some() {
        let mut selected = Inclusion::none();
        for kind in filters.source_ids().filter_map(ProviderKind::from_source_id) {
            selected.set(kind, true);
        }
        selected
    } else {
        Inclusion::all()
    };

    if filters.category().is_some() && filters.query().is_some() {
        inclusion.set(ProviderKind::NewsApi, false);
    }

    inclusion
}
