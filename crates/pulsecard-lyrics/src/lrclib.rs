//! lrclib.net lyrics provider.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use pulsecard_core::config::lyrics::LyricsConfig;
use pulsecard_core::AppResult;

use crate::lrc::{parse_plain, parse_synced, LyricLine};
use crate::provider::{LyricsProvider, TrackQuery};

/// Response document of the lrclib `get` endpoint.
#[derive(Debug, Deserialize)]
struct LrclibResponse {
    /// LRC-formatted string: lines of form `[mm:ss.xx]text`.
    #[serde(default, rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
    /// Plain text, newline-separated.
    #[serde(default, rename = "plainLyrics")]
    plain_lyrics: Option<String>,
}

/// HTTP client for the lrclib lyrics API.
#[derive(Debug, Clone)]
pub struct LrclibClient {
    http: reqwest::Client,
    api_url: String,
}

impl LrclibClient {
    /// Build a client from configuration.
    pub fn new(config: &LyricsConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            api_url: config.api_url.clone(),
        })
    }
}

#[async_trait]
impl LyricsProvider for LrclibClient {
    async fn fetch(&self, query: &TrackQuery) -> AppResult<Vec<LyricLine>> {
        let duration = query.duration_seconds.to_string();
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("track_name", query.track_name.as_str()),
                ("artist_name", query.artist_name.as_str()),
                ("album_name", query.album_name.as_str()),
                ("duration", duration.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: LrclibResponse = response.json().await?;

        if let Some(synced) = body.synced_lyrics.filter(|s| !s.is_empty()) {
            Ok(parse_synced(&synced))
        } else if let Some(plain) = body.plain_lyrics.filter(|s| !s.is_empty()) {
            Ok(parse_plain(&plain))
        } else {
            Ok(Vec::new())
        }
    }
}
