//! Minimal YouTube Data API v3 client covering `search.list` and `videos.list`.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::config::{api_base_url, request_timeout};
use crate::error::{Error, Result};

/// Kind tag of a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ResourceKind {
    #[serde(rename = "youtube#video")]
    Video,
    #[serde(rename = "youtube#channel")]
    Channel,
    #[serde(rename = "youtube#playlist")]
    Playlist,
    #[serde(other)]
    Unknown,
}

/// A ranked identifier returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub kind: ResourceKind,
    pub id: String,
    /// Position in the search response, zero-based
    pub rank: usize,
}

/// A video resolved into the fields the table shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    /// RFC 3339 timestamp as sent by the API
    pub published_at: String,
    pub view_count: u64,
    pub rank: usize,
}

/// Anything that can resolve search queries and video details.
///
/// The HTTP client implements it; tests substitute an in-memory source.
pub trait VideoSource: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<Vec<SearchResult>>> + Send;

    /// Fetch snippet and statistics for one video. `Ok(None)` when the API
    /// knows nothing about the ID.
    fn video_details(
        &self,
        result: &SearchResult,
    ) -> impl Future<Output = Result<Option<VideoRecord>>> + Send;
}

#[derive(Debug, Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: ResourceId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourceId {
    kind: ResourceKind,
    video_id: Option<String>,
    channel_id: Option<String>,
    playlist_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<Video>,
}

#[derive(Debug, Deserialize)]
struct Video {
    id: String,
    snippet: Option<VideoSnippet>,
    statistics: Option<VideoStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoSnippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoStatistics {
    /// The API encodes counts as decimal strings
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl SearchListResponse {
    fn into_results(self) -> Vec<SearchResult> {
        self.items
            .into_iter()
            .enumerate()
            .filter_map(|(rank, item)| {
                let ResourceId {
                    kind,
                    video_id,
                    channel_id,
                    playlist_id,
                } = item.id;
                let id = match kind {
                    ResourceKind::Video => video_id,
                    ResourceKind::Channel => channel_id,
                    ResourceKind::Playlist => playlist_id,
                    ResourceKind::Unknown => video_id.or(channel_id).or(playlist_id),
                }?;
                Some(SearchResult { kind, id, rank })
            })
            .collect()
    }
}

impl Video {
    fn into_record(self, rank: usize) -> VideoRecord {
        let snippet = self.snippet.unwrap_or_default();
        let view_count = self
            .statistics
            .and_then(|s| s.view_count)
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        VideoRecord {
            id: self.id,
            title: snippet.title,
            channel_title: snippet.channel_title,
            published_at: snippet.published_at,
            view_count,
            rank,
        }
    }
}

/// Pull a readable message out of a failed response body
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// YouTube Data API client authenticated with an API key
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, api_base_url(), request_timeout()?)
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        tracing::debug!(endpoint, ?params, "calling YouTube API");

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

impl VideoSource for YouTubeClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        let max_results = max_results.to_string();
        let response: SearchListResponse = self
            .get(
                "search",
                &[
                    ("part", "id"),
                    ("q", query),
                    ("maxResults", max_results.as_str()),
                    ("order", "viewCount"),
                ],
            )
            .await?;

        Ok(response.into_results())
    }

    async fn video_details(&self, result: &SearchResult) -> Result<Option<VideoRecord>> {
        let response: VideoListResponse = self
            .get(
                "videos",
                &[("part", "snippet,statistics"), ("id", result.id.as_str())],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .next()
            .map(|video| video.into_record(result.rank)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_response_keeps_rank_and_kind() {
        let body = r#"{
            "kind": "youtube#searchListResponse",
            "items": [
                {"kind": "youtube#searchResult", "id": {"kind": "youtube#video", "videoId": "abc"}},
                {"kind": "youtube#searchResult", "id": {"kind": "youtube#channel", "channelId": "UC1"}},
                {"kind": "youtube#searchResult", "id": {"kind": "youtube#playlist", "playlistId": "PL1"}},
                {"kind": "youtube#searchResult", "id": {"kind": "youtube#video", "videoId": "def"}}
            ]
        }"#;

        let response: SearchListResponse = serde_json::from_str(body).unwrap();
        let results = response.into_results();

        assert_eq!(
            results,
            vec![
                SearchResult { kind: ResourceKind::Video, id: "abc".into(), rank: 0 },
                SearchResult { kind: ResourceKind::Channel, id: "UC1".into(), rank: 1 },
                SearchResult { kind: ResourceKind::Playlist, id: "PL1".into(), rank: 2 },
                SearchResult { kind: ResourceKind::Video, id: "def".into(), rank: 3 },
            ]
        );
    }

    #[test]
    fn unknown_kind_does_not_fail_decoding() {
        let body = r#"{"items": [{"id": {"kind": "youtube#short", "videoId": "x"}}]}"#;
        let response: SearchListResponse = serde_json::from_str(body).unwrap();
        let results = response.into_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, ResourceKind::Unknown);
    }

    #[test]
    fn video_response_maps_snippet_and_statistics() {
        let body = r#"{
            "kind": "youtube#videoListResponse",
            "items": [{
                "id": "abc",
                "snippet": {
                    "title": "Neovim from scratch",
                    "channelTitle": "chris@machine",
                    "publishedAt": "2023-05-07T12:00:00Z"
                },
                "statistics": {"viewCount": "1200000", "likeCount": "10"}
            }]
        }"#;

        let response: VideoListResponse = serde_json::from_str(body).unwrap();
        let record = response.items.into_iter().next().unwrap().into_record(4);

        assert_eq!(
            record,
            VideoRecord {
                id: "abc".into(),
                title: "Neovim from scratch".into(),
                channel_title: "chris@machine".into(),
                published_at: "2023-05-07T12:00:00Z".into(),
                view_count: 1_200_000,
                rank: 4,
            }
        );
    }

    #[test]
    fn hidden_statistics_count_as_zero_views() {
        let body = r#"{"items": [{"id": "abc", "snippet": {"title": "t"}}]}"#;
        let response: VideoListResponse = serde_json::from_str(body).unwrap();
        let record = response.items.into_iter().next().unwrap().into_record(0);
        assert_eq!(record.view_count, 0);
        assert_eq!(record.channel_title, "");
    }

    #[test]
    fn empty_video_response_has_no_items() {
        let response: VideoListResponse = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(response.items.is_empty());
        let response: VideoListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn error_message_prefers_google_envelope() {
        let body = r#"{"error": {"code": 403, "message": "quotaExceeded", "errors": []}}"#;
        assert_eq!(api_error_message(body), "quotaExceeded");
        assert_eq!(api_error_message("bad gateway\n"), "bad gateway");
    }
}
