//! Aggregate per-tweet emotions into counts, percentages and a dominant label.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::EmotionError;
use crate::lexicon::{classify, Emotion};

/// Aggregated emotions for one batch of tweets.
///
/// Both maps always hold all eight emotions, zero counts included.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionReport {
    pub total: usize,
    pub emotion_counts: BTreeMap<Emotion, usize>,
    pub emotion_percentages: BTreeMap<Emotion, f64>,
    pub dominant: Emotion,
}

/// Classify every text and aggregate.
///
/// The dominant emotion is the highest count, first in [`Emotion::ALL`]
/// order on ties.
///
/// # Errors
///
/// Returns [`EmotionError::NoTweets`] if `texts` is empty.
pub fn tally<'a, I>(texts: I) -> Result<EmotionReport, EmotionError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut emotion_counts: BTreeMap<Emotion, usize> =
        Emotion::ALL.iter().map(|&e| (e, 0)).collect();
    let mut total = 0usize;

    for text in texts {
        *emotion_counts.entry(classify(text)).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return Err(EmotionError::NoTweets);
    }

    #[allow(clippy::cast_precision_loss)]
    let emotion_percentages = emotion_counts
        .iter()
        .map(|(&emotion, &count)| (emotion, count as f64 / total as f64 * 100.0))
        .collect();

    let mut dominant = Emotion::ALL[0];
    for emotion in Emotion::ALL {
        if emotion_counts[&emotion] > emotion_counts[&dominant] {
            dominant = emotion;
        }
    }

    tracing::debug!(total, dominant = %dominant, "emotion tally complete");

    Ok(EmotionReport {
        total,
        emotion_counts,
        emotion_percentages,
        dominant,
    })
}

/// Success payload of `POST /analyze`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    pub total_tweets: usize,
    pub emotion_counts: BTreeMap<Emotion, usize>,
    pub emotion_percentages: BTreeMap<Emotion, f64>,
    pub dominant: Emotion,
}

impl AnalysisResponse {
    #[must_use]
    pub fn new(topic: Option<String>, report: EmotionReport) -> Self {
        Self {
            success: true,
            topic,
            total_tweets: report.total,
            emotion_counts: report.emotion_counts,
            emotion_percentages: report.emotion_percentages,
            dominant: report.dominant,
        }
    }
}
