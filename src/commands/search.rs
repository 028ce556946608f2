use std::io::Write;
use std::sync::Arc;

use crate::api::{VideoSource, YouTubeClient};
use crate::config::{clamp_max_results, youtube_api_key};
use crate::error::{Error, Result};
use crate::fetcher::fetch_details;
use crate::format::print_videos;
use crate::input::resolve_query;

pub async fn run(query: Option<String>, search: Option<String>, max_results: u32) -> Result<()> {
    // Checked first so a missing key never blocks on stdin or touches the network
    let api_key = youtube_api_key().ok_or(Error::ApiKeyMissing)?;

    let query = resolve_query(query, search, std::io::stdin().lock());
    let client = Arc::new(YouTubeClient::new(api_key)?);

    let stdout = std::io::stdout();
    search_and_print(client, &query, max_results, &mut stdout.lock()).await
}

/// Search, enrich every video hit and print the table to `out`.
///
/// Nothing is written unless every lookup succeeded.
pub async fn search_and_print<S: VideoSource, W: Write>(
    source: Arc<S>,
    query: &str,
    max_results: u32,
    out: &mut W,
) -> Result<()> {
    let max_results = clamp_max_results(max_results);
    tracing::debug!(query, max_results, "searching YouTube");

    let results = source.search(query, max_results).await?;
    tracing::debug!(count = results.len(), "search returned");

    let records = fetch_details(source, &results).await?;

    print_videos(out, &records)
}
