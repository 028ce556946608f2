use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use crate::error::{Error, Result};

/// Query used when nothing is given on the command line or stdin
pub const DEFAULT_QUERY: &str = "neovim";

/// Default number of search results
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Largest page the search endpoint will return
pub const MAX_RESULTS_LIMIT: u32 = 50;

/// Widest the title column may grow
pub const TITLE_WIDTH_LIMIT: usize = 50;

/// Widest the channel column may grow
pub const CHANNEL_WIDTH_LIMIT: usize = 20;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the config directory (~/.config/yt-views/)
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        std::env::var("YT_VIEWS_CONFIG_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                dirs::config_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("yt-views")
            })
    })
}

/// Get the .env file path
pub fn env_file_path() -> PathBuf {
    config_dir().join(".env")
}

/// Load environment variables from the config directory's .env file
pub fn load_env() {
    let env_path = env_file_path();
    if env_path.exists() {
        let _ = dotenvy::from_path(&env_path);
    } else {
        // Try current directory as fallback
        let _ = dotenvy::dotenv();
    }
}

/// Get the YouTube Data API key, treating an empty value as unset
pub fn youtube_api_key() -> Option<String> {
    std::env::var("YOUTUBE_DATA_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Base URL of the YouTube Data API
pub fn api_base_url() -> String {
    std::env::var("YOUTUBE_API_BASE_URL")
        .ok()
        .filter(|url| !url.is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Per-request timeout for API calls
pub fn request_timeout() -> Result<Duration> {
    match std::env::var("YT_VIEWS_TIMEOUT_SECS") {
        Ok(raw) => parse_timeout(&raw),
        Err(_) => Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(Error::Config(format!(
            "YT_VIEWS_TIMEOUT_SECS must be a positive number of seconds, got {:?}",
            raw
        ))),
    }
}

/// Clamp a requested result count to what the search endpoint accepts
pub fn clamp_max_results(requested: u32) -> u32 {
    requested.min(MAX_RESULTS_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_accepts_positive_seconds() {
        assert_eq!(parse_timeout("45").unwrap(), Duration::from_secs(45));
        assert_eq!(parse_timeout(" 5 ").unwrap(), Duration::from_secs(5));
    }

    #[test]
    fn timeout_rejects_zero_and_garbage() {
        assert!(matches!(parse_timeout("0"), Err(Error::Config(_))));
        assert!(matches!(parse_timeout("soon"), Err(Error::Config(_))));
    }

    #[test]
    fn max_results_is_clamped() {
        assert_eq!(clamp_max_results(10), 10);
        assert_eq!(clamp_max_results(50), 50);
        assert_eq!(clamp_max_results(500), 50);
    }
}
