//! The presence snapshot delivered by state frames.

use serde::{Deserialize, Serialize};

use super::activity::Activity;
use super::status::PresenceStatus;

/// The latest decoded presence payload for one subject.
///
/// Replaced wholesale on each push; there is no partial merge. Consumers
/// read it through the store and never mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    /// Reported status.
    #[serde(rename = "discord_status", default)]
    pub status: PresenceStatus,
    /// Rich-presence entries, in feed order.
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Whether the feed flags the subject as listening to Spotify.
    #[serde(default)]
    pub listening_to_spotify: bool,
}

impl PresenceSnapshot {
    /// Activities suitable for "now playing" rendering.
    ///
    /// Excludes the custom-status entry; feed order is preserved.
    pub fn now_playing(&self) -> impl Iterator<Item = &Activity> {
        self.activities.iter().filter(|a| !a.is_custom_status())
    }

    /// The custom status message text, if one is set.
    pub fn custom_status(&self) -> Option<&str> {
        self.activities
            .iter()
            .find(|a| a.is_custom_status())
            .and_then(|a| a.state.as_deref())
    }

    /// The first Spotify-like activity, if any.
    pub fn spotify_activity(&self) -> Option<&Activity> {
        self.now_playing().find(|a| a.is_spotify())
    }
}
