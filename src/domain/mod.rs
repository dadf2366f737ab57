pub mod article;
pub mod filters;
pub mod response;
pub mod source;

pub use article::{parse_timestamp, ArticleSource, SourceOrigin, UnifiedArticle};
pub use filters::{FilterSet, SortBy};
pub use response::{Section, UnifiedResponse};
pub use source::{all_sources, ProviderKind, SourceDescriptor};
