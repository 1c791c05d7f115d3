//! Bounded fetch-and-filter accumulation over the search capability.
//!
//! Runs the keyword filter, then the hashtag filter, requesting batches of
//! at most [`MAX_BATCH_SIZE`] until the target is met or both sources are
//! exhausted. Each filter is paged forward with the cursor returned by the
//! previous page. Every call draws a fresh credential from the rotation
//! strategy. A failed call is retried in place with another credential.

use std::time::Duration;

use tokio::time::Instant;
use tweetpulse_core::AppConfig;

use crate::credentials::{CredentialPool, RotationStrategy};
use crate::error::{FetchError, SearchError};
use crate::filter::SearchFilter;
use crate::language::{LanguageDetector, ENGLISH};
use crate::output::{OutputDocument, RetainedTweet};
use crate::search::{SearchClient, SearchItem, SearchPage};

/// Upper bound on items requested per call.
pub const MAX_BATCH_SIZE: usize = 50;

/// Tweets must be strictly longer than this many characters.
pub const MIN_TEXT_CHARS: usize = 20;

/// Tuning knobs for [`Accumulator`].
#[derive(Debug, Clone)]
pub struct AccumulatorConfig {
    pub max_batch_size: usize,
    pub min_text_chars: usize,
    /// Pause after each successful batch that leaves the target unmet.
    pub batch_delay: Duration,
    /// Additional attempts after the first failure of a batch. `None` retries forever.
    pub max_retries_per_batch: Option<u32>,
    /// Deadline for a single search call. `None` waits indefinitely.
    pub call_timeout: Option<Duration>,
    /// Wall-clock budget for a whole run. No new batch starts once it is spent;
    /// whatever was retained by then is kept. `None` means no budget.
    pub run_timeout: Option<Duration>,
}

impl Default for AccumulatorConfig {
    fn default() -> Self {
        Self {
            max_batch_size: MAX_BATCH_SIZE,
            min_text_chars: MIN_TEXT_CHARS,
            batch_delay: Duration::from_millis(500),
            max_retries_per_batch: Some(10),
            call_timeout: Some(Duration::from_secs(30)),
            run_timeout: Some(Duration::from_secs(200)),
        }
    }
}

impl AccumulatorConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            max_retries_per_batch: config.max_retries,
            call_timeout: Some(Duration::from_secs(config.request_timeout_secs)),
            run_timeout: config.run_timeout_secs.map(Duration::from_secs),
            ..Self::default()
        }
    }
}

/// Ordered tweets retained so far in one run.
#[derive(Debug, Default)]
pub(crate) struct FetchState {
    tweets: Vec<RetainedTweet>,
}

impl FetchState {
    fn len(&self) -> usize {
        self.tweets.len()
    }

    fn remaining(&self, target: usize) -> usize {
        target.saturating_sub(self.tweets.len())
    }

    fn is_satisfied(&self, target: usize) -> bool {
        self.tweets.len() >= target
    }

    /// Snapshot truncated to `target`, or `None` if nothing was retained.
    fn into_document(mut self, target: usize) -> Option<OutputDocument> {
        if self.tweets.is_empty() {
            return None;
        }
        self.tweets.truncate(target);
        Some(OutputDocument::success(self.tweets))
    }
}

/// Keeps items longer than `min_text_chars` that `detector` classifies as English.
///
/// Order is preserved and duplicates are kept.
pub fn retain_qualifying<D>(
    items: Vec<SearchItem>,
    detector: &D,
    min_text_chars: usize,
) -> Vec<RetainedTweet>
where
    D: LanguageDetector + ?Sized,
{
    items
        .into_iter()
        .filter(|item| item.full_text.chars().count() > min_text_chars)
        .filter(|item| detector.detect(&item.full_text) == ENGLISH)
        .map(|item| RetainedTweet {
            text: item.full_text,
        })
        .collect()
}

pub struct Accumulator<S, D, R> {
    search: S,
    detector: D,
    pool: CredentialPool,
    rotation: R,
    config: AccumulatorConfig,
}

impl<S, D, R> Accumulator<S, D, R>
where
    S: SearchClient,
    D: LanguageDetector,
    R: RotationStrategy,
{
    #[must_use]
    pub fn new(
        search: S,
        detector: D,
        pool: CredentialPool,
        rotation: R,
        config: AccumulatorConfig,
    ) -> Self {
        Self {
            search,
            detector,
            pool,
            rotation,
            config,
        }
    }

    #[must_use]
    pub fn search_client(&self) -> &S {
        &self.search
    }

    /// Collects up to `target_count` English tweets about `topic`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Usage`] if `topic` is blank or `target_count` is zero,
    ///   before any search call is made.
    /// - [`FetchError::NoResults`] if no tweet qualified across both filters.
    pub async fn accumulate(
        &mut self,
        topic: &str,
        target_count: usize,
    ) -> Result<OutputDocument, FetchError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(FetchError::Usage(
                "topic is required as a command-line argument".to_owned(),
            ));
        }
        if target_count == 0 {
            return Err(FetchError::Usage(
                "target count must be greater than zero".to_owned(),
            ));
        }

        tracing::info!(topic, target = target_count, "starting fetch");

        let deadline = self.config.run_timeout.map(|budget| Instant::now() + budget);
        let mut state = FetchState::default();
        for filter in SearchFilter::for_topic(topic) {
            if state.is_satisfied(target_count) {
                break;
            }
            self.drain_filter(&filter, target_count, deadline, &mut state)
                .await;
        }

        let collected = state.len();
        match state.into_document(target_count) {
            Some(document) => {
                tracing::info!(
                    topic,
                    collected,
                    kept = document.tweets.len(),
                    "fetch complete"
                );
                Ok(document)
            }
            None => {
                tracing::error!(topic, "no English tweets found");
                Err(FetchError::NoResults {
                    topic: topic.to_owned(),
                })
            }
        }
    }

    /// Pages through one filter until it is exhausted, the target is met, or
    /// the run deadline passes.
    async fn drain_filter(
        &mut self,
        filter: &SearchFilter,
        target: usize,
        deadline: Option<Instant>,
        state: &mut FetchState,
    ) {
        let mut cursor: Option<String> = None;
        while !state.is_satisfied(target) {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                tracing::warn!(
                    filter = %filter,
                    accumulated = state.len(),
                    "run time budget spent; no further batches"
                );
                return;
            }

            let batch_size = state.remaining(target).min(self.config.max_batch_size);

            let Some(page) = self
                .fetch_batch(filter, batch_size, cursor.as_deref())
                .await
            else {
                tracing::warn!(
                    filter = %filter,
                    accumulated = state.len(),
                    "giving up on filter after repeated search failures"
                );
                return;
            };

            let SearchPage { items, next_cursor } = page;
            if items.is_empty() {
                tracing::debug!(filter = %filter, "source exhausted");
                return;
            }

            let received = items.len();
            let kept = retain_qualifying(items, &self.detector, self.config.min_text_chars);
            tracing::debug!(filter = %filter, received, kept = kept.len(), "batch filtered");
            state.tweets.extend(kept);

            tracing::info!(
                filter = %filter,
                accumulated = state.len(),
                target,
                "fetched English tweets so far"
            );

            if state.is_satisfied(target) {
                return;
            }

            match next_cursor {
                None => {
                    tracing::debug!(filter = %filter, "last page reached");
                    return;
                }
                Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                    tracing::warn!(
                        filter = %filter,
                        "page cursor did not advance; treating source as exhausted"
                    );
                    return;
                }
                Some(next) => cursor = Some(next),
            }

            if !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }
    }

    /// One batch, retried with a new credential on every failure.
    ///
    /// Returns `None` once `max_retries_per_batch` is exceeded.
    async fn fetch_batch(
        &mut self,
        filter: &SearchFilter,
        batch_size: usize,
        cursor: Option<&str>,
    ) -> Option<SearchPage> {
        let mut failures = 0u32;
        loop {
            match self.call_search(filter, batch_size, cursor).await {
                Ok(page) => return Some(page),
                Err(err) => {
                    failures += 1;
                    tracing::warn!(
                        filter = %filter,
                        attempt = failures,
                        error = %err,
                        "search call failed; retrying with another credential"
                    );
                    if self
                        .config
                        .max_retries_per_batch
                        .is_some_and(|max| failures > max)
                    {
                        return None;
                    }
                }
            }
        }
    }

    async fn call_search(
        &mut self,
        filter: &SearchFilter,
        batch_size: usize,
        cursor: Option<&str>,
    ) -> Result<SearchPage, SearchError> {
        let credential = self.rotation.select(&self.pool);
        let call = self.search.search(filter, batch_size, cursor, credential);
        match self.config.call_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(SearchError::Timeout {
                    timeout_ms: limit.as_millis(),
                })),
            None => call.await,
        }
    }
}

#[cfg(test)]
#[path = "accumulator_test.rs"]
mod tests;
