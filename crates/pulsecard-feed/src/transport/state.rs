//! Transport connection state.

use serde::{Deserialize, Serialize};

/// Lifecycle state of the feed connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// A connection attempt is in flight.
    Connecting,
    /// The socket is open and subscribed.
    Open,
    /// Closed by an explicit `disconnect()`; no reconnection.
    ClosedClean,
    /// Closed unexpectedly; a reconnect attempt is scheduled.
    ClosedRetrying,
    /// Reconnect attempts exhausted; terminal until a fresh `connect()`.
    Failed,
}

impl ConnectionState {
    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::ClosedClean => "closed_clean",
            Self::ClosedRetrying => "closed_retrying",
            Self::Failed => "failed",
        }
    }
}
