//! `fetch` command: collect English tweets for a topic into a JSON file.

use std::path::Path;

use tweetpulse_core::{AppConfig, RotationKind};
use tweetpulse_fetch::{
    write_document, Accumulator, AccumulatorConfig, CredentialPool, RandomRotation,
    RotationStrategy, RoundRobinRotation, TwitterSearchClient, WhatlangDetector,
};

/// Returns the trimmed topic, or a usage error when it is missing or blank.
pub(crate) fn resolve_topic(topic: Option<&str>) -> anyhow::Result<&str> {
    match topic.map(str::trim) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => anyhow::bail!("topic is required as a command-line argument"),
    }
}

pub(crate) fn build_rotation(kind: RotationKind) -> Box<dyn RotationStrategy> {
    match kind {
        RotationKind::Random => Box::new(RandomRotation::from_os_rng()),
        RotationKind::RoundRobin => Box::new(RoundRobinRotation::new()),
    }
}

/// Run one fetch for an already resolved topic and write the document to disk.
///
/// The output file is written only when at least one tweet was collected.
///
/// # Errors
///
/// Returns an error when no API key is configured, when the run found no
/// English tweets, or when the write fails.
pub(crate) async fn run_fetch(
    config: &AppConfig,
    topic: &str,
    count: Option<usize>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let target = count.unwrap_or(config.target_count);
    let output_path = output.map_or_else(|| config.output_path.clone(), Path::to_path_buf);

    let pool = CredentialPool::new(config.require_api_keys()?.iter().cloned())?;
    let search =
        TwitterSearchClient::with_base_url(&config.search_base_url, config.request_timeout_secs)?
            .with_request_delay(config.request_delay_min_ms, config.request_delay_max_ms);

    tracing::debug!(
        rotation = %config.rotation,
        keys = pool.len(),
        "search client ready"
    );

    let mut accumulator = Accumulator::new(
        search,
        WhatlangDetector,
        pool,
        build_rotation(config.rotation),
        AccumulatorConfig::from_app_config(config),
    );

    let document = accumulator.accumulate(topic, target).await?;
    write_document(&output_path, &document).await?;

    tracing::info!(
        topic,
        path = %output_path.display(),
        count = document.tweets.len(),
        "wrote tweet file"
    );
    println!(
        "fetched {} English tweets for '{topic}' into {}",
        document.tweets.len(),
        output_path.display()
    );
    Ok(())
}
