//! Emotion tally over collected tweets.
//!
//! Classifies each tweet into one of eight emotions with a word lexicon and
//! aggregates counts, percentages and the dominant emotion in the shape the
//! `/analyze` endpoint returns.

pub mod error;
pub mod lexicon;
pub mod report;

pub use error::EmotionError;
pub use lexicon::{classify, Emotion};
pub use report::{tally, AnalysisResponse, EmotionReport};
