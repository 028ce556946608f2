use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YOUTUBE_DATA_API_KEY environment variable is not set.")]
    ApiKeyMissing,

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Error getting video info for {id}: {source}")]
    DetailFetch {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Lookup task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
