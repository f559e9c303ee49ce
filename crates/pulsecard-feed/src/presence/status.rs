//! Presence status definitions.

use serde::{Deserialize, Serialize};

/// Subject presence status as reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    /// Subject is online.
    Online,
    /// Subject is connected but idle.
    Idle,
    /// Do not disturb.
    Dnd,
    /// Subject is not connected.
    Offline,
    /// Subject is connected but appears offline.
    Invisible,
    /// The feed reported a status this client does not recognize.
    #[serde(other)]
    Unknown,
}

impl PresenceStatus {
    /// Converts to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Online => "online",
            Self::Idle => "idle",
            Self::Dnd => "dnd",
            Self::Offline => "offline",
            Self::Invisible => "invisible",
            Self::Unknown => "unknown",
        }
    }
}

impl Default for PresenceStatus {
    fn default() -> Self {
        Self::Offline
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        let status: PresenceStatus = serde_json::from_str("\"dnd\"").unwrap();
        assert_eq!(status, PresenceStatus::Dnd);
    }

    #[test]
    fn unrecognized_status_maps_to_unknown() {
        let status: PresenceStatus = serde_json::from_str("\"streaming\"").unwrap();
        assert_eq!(status, PresenceStatus::Unknown);
    }
}
