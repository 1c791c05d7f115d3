//! Topic-driven tweet collection.
//!
//! Searches recent tweets by keyword and then by hashtag, keeps English
//! posts longer than 20 characters, and accumulates them up to a target
//! count. The search service and language classifier are injected as
//! capabilities so runs can be driven by deterministic fakes.

pub mod accumulator;
pub mod credentials;
pub mod error;
pub mod filter;
pub mod language;
pub mod output;
pub mod search;
pub mod twitter;

pub use accumulator::{retain_qualifying, Accumulator, AccumulatorConfig};
pub use credentials::{
    select_random, Credential, CredentialPool, RandomRotation, RotationStrategy,
    RoundRobinRotation,
};
pub use error::{FetchError, SearchError};
pub use filter::SearchFilter;
pub use language::{LanguageDetector, WhatlangDetector, ENGLISH};
pub use output::{read_document, write_document, OutputDocument, RetainedTweet};
pub use search::{SearchClient, SearchItem, SearchPage};
pub use twitter::TwitterSearchClient;
