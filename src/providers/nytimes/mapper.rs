use serde::Deserialize;
use serde_json::Value;

use crate::domain::article::{non_empty, ArticleDraft};
use crate::domain::{ProviderKind, UnifiedArticle};

/// Image formats of the Most Popular API, best first.
const PREFERRED_FORMATS: [&str; 3] = ["mediumThreeByTwo440", "mediumThreeByTwo210", "Standard Thumbnail"];

/// The two body shapes the NYT endpoints return.
#[derive(Debug, Clone)]
pub enum NyTimesResponse {
    Search(NyTimesSearchResponse),
    MostPopular(NyTimesMostPopularResponse),
}

impl NyTimesResponse {
    /// Classify a decoded body: `results` together with `num_results` means
    /// the Most Popular shape, anything else is read as Article Search.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        if is_most_popular(&value) {
            Ok(Self::MostPopular(serde_json::from_value(value)?))
        } else {
            Ok(Self::Search(serde_json::from_value(value)?))
        }
    }

    /// Error reported inside a 2xx body, if any.
    pub fn error_message(&self) -> Option<String> {
        let (status, errors, fault) = match self {
            Self::Search(r) => (r.status.as_deref(), &r.errors, r.fault.as_ref()),
            Self::MostPopular(r) => (r.status.as_deref(), &r.errors, None),
        };

        if let Some(fault) = fault {
            let message = fault
                .get("faultstring")
                .and_then(Value::as_str)
                .unwrap_or("request fault");
            return Some(message.to_string());
        }
        if status.is_some_and(|s| s.eq_ignore_ascii_case("error")) {
            return Some(if errors.is_empty() {
                "unknown error".to_string()
            } else {
                errors.join("; ")
            });
        }
        None
    }

    /// Map the records with the mapper matching the shape.
    pub fn into_articles(self) -> (Vec<UnifiedArticle>, u64) {
        match self {
            Self::Search(r) => {
                let body = r.response.unwrap_or_default();
                let articles = map_search_articles(body.docs.as_deref());
                let total = body.metadata.and_then(|m| m.hits).unwrap_or(articles.len() as u64);
                (articles, total)
            }
            Self::MostPopular(r) => {
                let articles = map_most_popular_articles(r.results.as_deref().unwrap_or_default());
                (articles, r.num_results)
            }
        }
    }
}

pub fn is_most_popular(value: &Value) -> bool {
    value.get("results").is_some() && value.get("num_results").is_some()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NyTimesSearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<SearchBody>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub fault: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchBody {
    /// The search endpoint answers `null` here when nothing matched.
    #[serde(default)]
    pub docs: Option<Vec<Value>>,
    #[serde(default, alias = "meta")]
    pub metadata: Option<SearchMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMetadata {
    #[serde(default)]
    pub hits: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NyTimesMostPopularResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub num_results: u64,
    #[serde(default)]
    pub results: Option<Vec<Value>>,
    #[serde(default)]
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSearchArticle {
    #[serde(rename = "abstract")]
    summary: Option<String>,
    web_url: Option<String>,
    snippet: Option<String>,
    lead_paragraph: Option<String>,
    #[serde(default)]
    multimedia: Option<Value>,
    #[serde(default)]
    headline: Option<RawHeadline>,
    pub_date: Option<String>,
    #[serde(default)]
    byline: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawHeadline {
    main: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawByline {
    Text(String),
    Structured {
        #[serde(default)]
        original: Option<String>,
        #[serde(default)]
        person: Option<Vec<RawPerson>>,
    },
}

#[derive(Debug, Deserialize)]
struct RawPerson {
    firstname: Option<String>,
    lastname: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPopularArticle {
    url: Option<String>,
    title: Option<String>,
    #[serde(rename = "abstract")]
    summary: Option<String>,
    byline: Option<String>,
    published_date: Option<String>,
    #[serde(default)]
    media: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawMedia {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "media-metadata", default)]
    metadata: Option<Vec<RawMediaMetadata>>,
}

#[derive(Debug, Deserialize)]
struct RawMediaMetadata {
    url: Option<String>,
    format: Option<String>,
}

/// Article Search record. `None` when title or url is unusable.
pub fn map_search_article(record: &Value) -> Option<UnifiedArticle> {
    let raw = match RawSearchArticle::deserialize(record) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Skipping malformed NYT search article: {}", e);
            return None;
        }
    };

    let summary = non_empty(raw.summary);
    let article = ArticleDraft {
        author: raw.byline.as_ref().and_then(search_author),
        title: raw.headline.and_then(|h| h.main),
        description: summary.clone().or(raw.snippet),
        url: raw.web_url,
        url_to_image: raw.multimedia.as_ref().and_then(search_image),
        published_at: raw.pub_date,
        content: non_empty(raw.lead_paragraph).or(summary),
    }
    .finish(ProviderKind::NyTimes, record.clone());

    if article.is_none() {
        tracing::debug!("Skipping NYT search article without title or url");
    }
    article
}

/// A missing or null docs list maps to no articles.
pub fn map_search_articles(docs: Option<&[Value]>) -> Vec<UnifiedArticle> {
    docs.unwrap_or_default()
        .iter()
        .filter_map(map_search_article)
        .collect()
}

/// Most Popular record. `None` when title or url is unusable.
pub fn map_most_popular_article(record: &Value) -> Option<UnifiedArticle> {
    let raw = match RawPopularArticle::deserialize(record) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::debug!("Skipping malformed NYT most-popular article: {}", e);
            return None;
        }
    };

    let article = ArticleDraft {
        author: raw.byline.as_deref().map(strip_by_prefix).map(str::to_string),
        title: raw.title,
        description: raw.summary.clone(),
        url: raw.url,
        url_to_image: raw.media.as_ref().and_then(most_popular_image),
        published_at: raw.published_date,
        content: raw.summary,
    }
    .finish(ProviderKind::NyTimes, record.clone());

    if article.is_none() {
        tracing::debug!("Skipping NYT most-popular article without title or url");
    }
    article
}

pub fn map_most_popular_articles(records: &[Value]) -> Vec<UnifiedArticle> {
    records.iter().filter_map(map_most_popular_article).collect()
}

/// `multimedia.default.url`, else `multimedia.thumbnail.url`.
fn search_image(multimedia: &Value) -> Option<String> {
    ["default", "thumbnail"].iter().find_map(|key| {
        multimedia
            .get(key)
            .and_then(|image| image.get("url"))
            .and_then(Value::as_str)
            .filter(|url| !url.trim().is_empty())
            .map(str::to_string)
    })
}

fn search_author(byline: &Value) -> Option<String> {
    match RawByline::deserialize(byline).ok()? {
        RawByline::Text(text) => non_empty(Some(text)),
        RawByline::Structured { original, person } => non_empty(original).or_else(|| {
            let first = person?.into_iter().next()?;
            let name = format!(
                "{} {}",
                first.firstname.unwrap_or_default(),
                first.lastname.unwrap_or_default()
            );
            non_empty(Some(name.trim().to_string()))
        }),
    }
}

fn most_popular_image(media: &Value) -> Option<String> {
    let media = Vec::<RawMedia>::deserialize(media).ok()?;
    let image = media
        .into_iter()
        .find(|item| item.kind.as_deref() == Some("image"))?;
    let metadata = image.metadata?;

    PREFERRED_FORMATS
        .iter()
        .find_map(|format| {
            metadata
                .iter()
                .find(|meta| meta.format.as_deref() == Some(*format))
        })
        .or_else(|| metadata.first())
        .and_then(|meta| meta.url.clone())
}

/// Drop a leading "By " (any case) from a byline.
fn strip_by_prefix(byline: &str) -> &str {
    let has_prefix = byline
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("by"))
        && byline[2..].starts_with(char::is_whitespace);

    if has_prefix {
        byline[2..].trim()
    } else {
        byline.trim()
    }
}
