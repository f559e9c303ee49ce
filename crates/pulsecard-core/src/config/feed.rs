//! Presence feed socket configuration.

use serde::{Deserialize, Serialize};

/// Presence feed (WebSocket) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Feed socket URL.
    #[serde(default = "default_socket_url")]
    pub socket_url: String,
    /// Heartbeat interval in milliseconds used until the server's hello
    /// frame supplies its own.
    #[serde(default = "default_heartbeat_interval")]
    pub default_heartbeat_interval_ms: u64,
    /// Base reconnect delay in milliseconds; attempt `n` waits `base * 2^n`.
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,
    /// Reconnect attempts before the transport gives up.
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            socket_url: default_socket_url(),
            default_heartbeat_interval_ms: default_heartbeat_interval(),
            backoff_base_ms: default_backoff_base(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
        }
    }
}

fn default_socket_url() -> String {
    "wss://api.lanyard.rest/socket".to_string()
}

fn default_heartbeat_interval() -> u64 {
    30_000
}

fn default_backoff_base() -> u64 {
    1_000
}

fn default_max_reconnect_attempts() -> u32 {
    5
}
