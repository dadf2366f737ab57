use crate::domain::{FilterSet, SortBy};
use crate::providers::push_opt;

/// Native `/everything` parameters.
///
/// NewsAPI has no section filter usable together with free text, so
/// categories are never carried over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsApiParams {
    pub q: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort_by: SortBy,
}

impl NewsApiParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "q", self.q.as_deref());
        push_opt(&mut query, "from", self.from.as_deref());
        push_opt(&mut query, "to", self.to.as_deref());
        query.push(("sortBy", self.sort_by.as_str().to_string()));
        query
    }
}

pub fn translate(filters: &FilterSet) -> NewsApiParams {
    NewsApiParams {
        q: filters.query().map(str::to_string),
        from: filters.from_date().map(str::to_string),
        to: filters.to_date().map(str::to_string),
        sort_by: filters.sort_by(),
    }
}
