//! The JSON document a fetch run produces.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// A tweet that passed the length and language filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetainedTweet {
    pub text: String,
}

/// `{ "success": bool, "tweets": [{ "text": ... }] }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDocument {
    pub success: bool,
    pub tweets: Vec<RetainedTweet>,
}

impl OutputDocument {
    #[must_use]
    pub fn success(tweets: Vec<RetainedTweet>) -> Self {
        Self {
            success: true,
            tweets,
        }
    }

    /// Tweet bodies in document order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.tweets.iter().map(|t| t.text.as_str())
    }
}

/// Writes `document` as pretty-printed JSON, replacing any existing file.
///
/// # Errors
///
/// Returns [`FetchError::Serialize`] if encoding fails or [`FetchError::Io`]
/// if the file cannot be written.
pub async fn write_document(path: &Path, document: &OutputDocument) -> Result<(), FetchError> {
    let body = serde_json::to_string_pretty(document)?;
    tokio::fs::write(path, body)
        .await
        .map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads a document previously written by [`write_document`].
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be read or
/// [`FetchError::Deserialize`] if it is not a valid document.
pub async fn read_document(path: &Path) -> Result<OutputDocument, FetchError> {
    let body = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FetchError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|source| FetchError::Deserialize {
        context: path.display().to_string(),
        source,
    })
}
