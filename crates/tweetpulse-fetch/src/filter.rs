//! Search filters submitted to the external search capability.

use std::fmt;

/// A search constraint for one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFilter {
    /// Match tweets containing the topic as a keyword.
    Keyword(String),
    /// Match tweets tagged with the topic. Stored without the leading `#`.
    Hashtag(String),
}

impl SearchFilter {
    /// Builds the filters for `topic` in the order they are tried:
    /// keyword first, then hashtag.
    #[must_use]
    pub fn for_topic(topic: &str) -> [SearchFilter; 2] {
        let tag = topic.strip_prefix('#').unwrap_or(topic);
        [
            SearchFilter::Keyword(topic.to_owned()),
            SearchFilter::Hashtag(tag.to_owned()),
        ]
    }

    /// Query string in the search API's syntax.
    #[must_use]
    pub fn query(&self) -> String {
        match self {
            SearchFilter::Keyword(keyword) => keyword.clone(),
            SearchFilter::Hashtag(tag) => format!("#{tag}"),
        }
    }

    /// Short label for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            SearchFilter::Keyword(_) => "keyword",
            SearchFilter::Hashtag(_) => "hashtag",
        }
    }
}

impl fmt::Display for SearchFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.query())
    }
}
