//! Lyrics lookup configuration.

use serde::{Deserialize, Serialize};

/// Lyrics provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Lookup endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Interval in milliseconds at which the active line is re-evaluated.
    #[serde(default = "default_sync_tick")]
    pub sync_tick_ms: u64,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_seconds: default_request_timeout(),
            sync_tick_ms: default_sync_tick(),
        }
    }
}

fn default_api_url() -> String {
    "https://lrclib.net/api/get".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_sync_tick() -> u64 {
    200
}
