//! `analyze` command: tally emotions in a fetched tweet file.

use std::path::Path;

use tweetpulse_core::AppConfig;
use tweetpulse_emotion::AnalysisResponse;
use tweetpulse_fetch::{read_document, OutputDocument};

pub(crate) fn analyze_document(
    document: &OutputDocument,
    topic: Option<String>,
) -> anyhow::Result<AnalysisResponse> {
    if !document.success {
        anyhow::bail!("tweet file reports an unsuccessful fetch");
    }
    let report = tweetpulse_emotion::tally(document.texts())?;
    Ok(AnalysisResponse::new(topic, report))
}

/// Read a tweet file and print the emotion report as JSON on stdout.
///
/// # Errors
///
/// Returns an error if the file is missing or malformed, reports failure,
/// or holds no tweets.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    input: Option<&Path>,
    topic: Option<String>,
) -> anyhow::Result<()> {
    let path = input.unwrap_or(config.output_path.as_path());
    let document = read_document(path).await?;
    let response = analyze_document(&document, topic)?;

    tracing::info!(
        path = %path.display(),
        total = response.total_tweets,
        dominant = %response.dominant,
        "analysis complete"
    );
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
