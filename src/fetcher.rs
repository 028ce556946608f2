use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::api::{ResourceKind, SearchResult, VideoRecord, VideoSource};
use crate::error::{Error, Result};

/// Resolve every video-kind search result into a [`VideoRecord`].
///
/// Spawns one task per video and waits for all of them. Each task hands its
/// record back through the join set, so the coordinator is the only writer of
/// the merged list. The first failed lookup aborts the remaining tasks and
/// fails the whole fetch. IDs the API returns nothing for are dropped, and an
/// ID listed more than once is looked up only for its best rank.
///
/// The returned records are ordered by search rank.
pub async fn fetch_details<S: VideoSource>(
    source: Arc<S>,
    results: &[SearchResult],
) -> Result<Vec<VideoRecord>> {
    let mut tasks = JoinSet::new();
    let mut queued = HashSet::new();

    for result in results.iter().filter(|r| r.kind == ResourceKind::Video) {
        if !queued.insert(result.id.as_str()) {
            tracing::debug!(id = %result.id, rank = result.rank, "duplicate search result, skipping");
            continue;
        }
        let source = Arc::clone(&source);
        let result = result.clone();
        tasks.spawn(async move {
            let details = source.video_details(&result).await;
            (result.id, details)
        });
    }

    let mut records = Vec::with_capacity(tasks.len());

    while let Some(joined) = tasks.join_next().await {
        let (id, details) = joined?;
        match details {
            Ok(Some(record)) => records.push(record),
            Ok(None) => tracing::debug!(%id, "no video details returned, skipping"),
            Err(e) => {
                tasks.abort_all();
                return Err(Error::DetailFetch {
                    id,
                    source: Box::new(e),
                });
            }
        }
    }

    records.sort_by_key(|r| r.rank);
    Ok(records)
}
