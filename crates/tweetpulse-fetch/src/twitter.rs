//! HTTP client for the X/Twitter v2 recent-search endpoint.
//!
//! Wraps `reqwest` with bearer-token auth, typed status handling, and a
//! randomized pre-request delay. `meta.next_token` is surfaced as the page
//! cursor and sent back as `pagination_token`. Retrying is left to the
//! accumulator, which rotates credentials between attempts.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::credentials::Credential;
use crate::error::SearchError;
use crate::filter::SearchFilter;
use crate::search::{SearchClient, SearchItem, SearchPage};

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2/";
const SEARCH_PATH: &str = "tweets/search/recent";

/// The endpoint rejects `max_results` outside `10..=100`.
const MIN_PAGE_SIZE: usize = 10;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<TweetData>>,
    #[serde(default)]
    errors: Vec<ApiProblem>,
    #[serde(default)]
    meta: Option<SearchMeta>,
}

#[derive(Debug, Deserialize)]
struct SearchMeta {
    #[serde(default)]
    next_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    text: String,
    #[serde(default)]
    note_tweet: Option<NoteTweet>,
}

/// Long-form posts carry their untruncated body here.
#[derive(Debug, Deserialize)]
struct NoteTweet {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiProblem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl TweetData {
    fn into_full_text(self) -> String {
        self.note_tweet.map_or(self.text, |note| note.text)
    }
}

/// Search client for the recent-search API.
///
/// Use [`TwitterSearchClient::new`] for production or
/// [`TwitterSearchClient::with_base_url`] to point at a mock server in tests.
pub struct TwitterSearchClient {
    client: Client,
    base_url: Url,
    request_delay_min_ms: u64,
    request_delay_max_ms: u64,
}

impl TwitterSearchClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, SearchError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs)
    }

    /// Creates a client with a custom base URL.
    ///
    /// The pre-request delay defaults to zero; see
    /// [`TwitterSearchClient::with_request_delay`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SearchError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tweetpulse/0.1 (topic-fetch)")
            .build()?;

        // Exactly one trailing slash so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| SearchError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            request_delay_min_ms: 0,
            request_delay_max_ms: 0,
        })
    }

    /// Sleep a random duration in `min_ms..=max_ms` before every request.
    #[must_use]
    pub fn with_request_delay(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.request_delay_min_ms = min_ms.min(max_ms);
        self.request_delay_max_ms = max_ms.max(min_ms);
        self
    }

    fn search_url(
        &self,
        filter: &SearchFilter,
        page_size: usize,
        pagination_token: Option<&str>,
    ) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| SearchError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("query", &filter.query())
            .append_pair("max_results", &page_size.to_string())
            .append_pair("tweet.fields", "note_tweet");
        if let Some(token) = pagination_token {
            url.query_pairs_mut().append_pair("pagination_token", token);
        }
        Ok(url)
    }

    fn jitter_ms(&self) -> u64 {
        if self.request_delay_max_ms == 0 {
            return 0;
        }
        rand::rng().random_range(self.request_delay_min_ms..=self.request_delay_max_ms)
    }
}

#[async_trait]
impl SearchClient for TwitterSearchClient {
    async fn search(
        &self,
        filter: &SearchFilter,
        max_results: usize,
        cursor: Option<&str>,
        credential: &Credential,
    ) -> Result<SearchPage, SearchError> {
        let page_size = max_results.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE);
        let url = self.search_url(filter, page_size, cursor)?;

        let delay_ms = self.jitter_ms();
        if delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        }

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(credential.expose())
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(SearchError::RateLimited { retry_after_secs });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SearchError::Unauthorized {
                status: status.as_u16(),
            });
        }

        if !status.is_success() {
            return Err(SearchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
                context: format!("search({filter})"),
                source: e,
            })?;

        let next_cursor = parsed.meta.and_then(|m| m.next_token);
        match parsed.data {
            Some(tweets) => Ok(SearchPage {
                items: tweets
                    .into_iter()
                    .take(max_results)
                    .map(|t| SearchItem::new(t.into_full_text()))
                    .collect(),
                next_cursor,
            }),
            None if !parsed.errors.is_empty() => {
                let message = parsed
                    .errors
                    .iter()
                    .map(|p| {
                        p.detail
                            .as_deref()
                            .or(p.title.as_deref())
                            .unwrap_or("unknown error")
                    })
                    .collect::<Vec<_>>()
                    .join("; ");
                Err(SearchError::Api(message))
            }
            None => Ok(SearchPage::last(Vec::new())),
        }
    }
}
