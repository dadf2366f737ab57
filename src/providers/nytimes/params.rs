use chrono::{DateTime, NaiveDate};

use crate::domain::{FilterSet, SortBy};
use crate::providers::push_opt;

/// Native Article Search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NyTimesParams {
    pub q: Option<String>,
    /// `YYYYMMDD`
    pub begin_date: Option<String>,
    /// `YYYYMMDD`
    pub end_date: Option<String>,
    /// Boolean section filter, e.g. `section.name:("Arts" OR "Books")`.
    pub fq: Option<String>,
    pub sort: Option<&'static str>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl NyTimesParams {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "q", self.q.as_deref());
        push_opt(&mut query, "begin_date", self.begin_date.as_deref());
        push_opt(&mut query, "end_date", self.end_date.as_deref());
        push_opt(&mut query, "fq", self.fq.as_deref());
        push_opt(&mut query, "sort", self.sort);
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            query.push(("page_size", page_size.to_string()));
        }
        query
    }
}

pub fn translate(filters: &FilterSet) -> NyTimesParams {
    // Only `from` is mapped: the window is the single day ending on it.
    // Article Search rejects begin_date == end_date, so it opens a day early.
    let from = filters.from_date().and_then(calendar_date);
    let begin_date = from.and_then(|d| d.pred_opt()).map(compact);
    let end_date = from.map(compact);

    NyTimesParams {
        q: filters.query().map(str::to_string),
        begin_date,
        end_date,
        fq: section_filter(filters),
        sort: sort_order(filters.sort_by()),
        page: None,
        page_size: None,
    }
}

/// `section.name:"A"` for one category, `section.name:("A" OR "B")` for more.
fn section_filter(filters: &FilterSet) -> Option<String> {
    let sections: Vec<&str> = filters.categories().collect();
    match sections.as_slice() {
        [] => None,
        [single] => Some(format!("section.name:\"{}\"", single)),
        many => {
            let quoted: Vec<String> = many.iter().map(|s| format!("\"{}\"", s)).collect();
            Some(format!("section.name:({})", quoted.join(" OR ")))
        }
    }
}

fn sort_order(sort_by: SortBy) -> Option<&'static str> {
    match sort_by {
        SortBy::PublishedAt => Some("newest"),
        SortBy::Relevancy => Some("relevance"),
        SortBy::Popularity => None,
    }
}

/// The calendar day as written, offset ignored.
fn calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let date = DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%z"))
        .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok();

    if date.is_none() {
        tracing::warn!("Ignoring unparseable from date for NYT search: {}", value);
    }
    date
}

fn compact(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}
