use crate::domain::FilterSet;
use crate::providers::push_opt;

pub const SHOW_FIELDS: &str = "headline,trailText,byline,thumbnail";
pub const SHOW_TAGS: &str = "contributor";
pub const ORDER_NEWEST: &str = "newest";

/// Native `/search` parameters of the Content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardianParams {
    pub q: Option<String>,
    /// Section ids joined with `|`, the API's OR operator.
    pub section: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub order_by: &'static str,
    pub page_size: u32,
    pub page: Option<u32>,
    pub show_fields: &'static str,
    pub show_tags: &'static str,
}

impl GuardianParams {
    /// Parameters of the top-stories listing: newest first, nothing else.
    pub fn top_stories(page_size: u32) -> Self {
        Self {
            q: None,
            section: None,
            from_date: None,
            to_date: None,
            order_by: ORDER_NEWEST,
            page_size,
            page: None,
            show_fields: SHOW_FIELDS,
            show_tags: SHOW_TAGS,
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_opt(&mut query, "q", self.q.as_deref());
        push_opt(&mut query, "section", self.section.as_deref());
        push_opt(&mut query, "from-date", self.from_date.as_deref());
        push_opt(&mut query, "to-date", self.to_date.as_deref());
        query.push(("order-by", self.order_by.to_string()));
        query.push(("page-size", self.page_size.to_string()));
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        query.push(("show-fields", self.show_fields.to_string()));
        query.push(("show-tags", self.show_tags.to_string()));
        query
    }
}

/// Map a filter set onto Guardian search parameters. Ordering is always
/// newest first regardless of the requested sort.
pub fn translate(filters: &FilterSet, page_size: u32) -> GuardianParams {
    let sections: Vec<&str> = filters.categories().collect();

    GuardianParams {
        q: filters.query().map(str::to_string),
        section: (!sections.is_empty()).then(|| sections.join("|")),
        from_date: filters.from_date().map(str::to_string),
        to_date: filters.to_date().map(str::to_string),
        ..GuardianParams::top_stories(page_size)
    }
}
