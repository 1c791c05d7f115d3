use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmotionError {
    #[error("no tweets to analyze")]
    NoTweets,
}
