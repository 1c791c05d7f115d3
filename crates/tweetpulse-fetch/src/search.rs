//! The external tweet-search capability.

use async_trait::async_trait;

use crate::credentials::Credential;
use crate::error::SearchError;
use crate::filter::SearchFilter;

/// One item returned by a search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItem {
    pub full_text: String,
}

impl SearchItem {
    #[must_use]
    pub fn new(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
        }
    }
}

/// One page of results plus the cursor for the page after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub items: Vec<SearchItem>,
    /// `None` when this is the last page for the filter.
    pub next_cursor: Option<String>,
}

impl SearchPage {
    /// A page with more results behind `next_cursor`.
    #[must_use]
    pub fn new(items: Vec<SearchItem>, next_cursor: impl Into<String>) -> Self {
        Self {
            items,
            next_cursor: Some(next_cursor.into()),
        }
    }

    /// The final page for a filter.
    #[must_use]
    pub fn last(items: Vec<SearchItem>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }
}

/// Searches for recent tweets matching a filter.
///
/// Implementations return at most `max_results` items. `cursor` is the
/// `next_cursor` of the previous page for the same filter, or `None` for the
/// first page. An empty page means the source is exhausted for this filter.
#[async_trait]
pub trait SearchClient {
    async fn search(
        &self,
        filter: &SearchFilter,
        max_results: usize,
        cursor: Option<&str>,
        credential: &Credential,
    ) -> Result<SearchPage, SearchError>;
}
