//! Rich-presence activity model.

use serde::{Deserialize, Serialize};

/// Activity id the feed uses for the subject's custom status message.
///
/// A custom status is not a "now playing" entity and must be excluded from
/// presence-card media rendering.
pub const CUSTOM_STATUS_ID: &str = "custom";

/// Activity kind, decoded from the feed's numeric `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum ActivityKind {
    /// Playing a game.
    Playing,
    /// Streaming.
    Streaming,
    /// Listening to music.
    Listening,
    /// Watching something.
    Watching,
    /// Custom status message.
    Custom,
    /// Competing in an event.
    Competing,
    /// Unrecognized kind.
    Unknown,
}

impl From<u8> for ActivityKind {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Playing,
            1 => Self::Streaming,
            2 => Self::Listening,
            3 => Self::Watching,
            4 => Self::Custom,
            5 => Self::Competing,
            _ => Self::Unknown,
        }
    }
}

impl From<ActivityKind> for u8 {
    fn from(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Playing => 0,
            ActivityKind::Streaming => 1,
            ActivityKind::Listening => 2,
            ActivityKind::Watching => 3,
            ActivityKind::Custom => 4,
            ActivityKind::Competing => 5,
            ActivityKind::Unknown => u8::MAX,
        }
    }
}

impl Default for ActivityKind {
    fn default() -> Self {
        Self::Unknown
    }
}

/// Start/end instants of an activity, millisecond epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTimestamps {
    /// When the activity started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    /// When the activity ends; absent for open-ended activities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Image references attached to an activity.
///
/// The raw strings are scheme-prefixed and require kind-specific URL
/// resolution before they can be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityAssets {
    /// Large image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image: Option<String>,
    /// Large image hover text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_text: Option<String>,
    /// Small image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image: Option<String>,
    /// Small image hover text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_text: Option<String>,
}

/// One rich-presence entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Activity id.
    #[serde(default)]
    pub id: String,
    /// Display name (e.g. "Spotify").
    #[serde(default)]
    pub name: String,
    /// Activity kind.
    #[serde(rename = "type", default)]
    pub kind: ActivityKind,
    /// First detail line (track name for Spotify).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Second detail line (artist name for Spotify).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Start/end instants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<ActivityTimestamps>,
    /// Image references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<ActivityAssets>,
    /// Owning application id, used for asset URL resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    /// Track identity key for lyrics lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_id: Option<String>,
}

impl Activity {
    /// Whether this entry is the subject's custom status message.
    pub fn is_custom_status(&self) -> bool {
        self.id == CUSTOM_STATUS_ID
    }

    /// Whether this is a Spotify-like "now playing" activity.
    pub fn is_spotify(&self) -> bool {
        self.name == "Spotify"
            || self.id.starts_with("spotify:")
            || (self.kind == ActivityKind::Listening && self.sync_id.is_some())
    }

    /// Track identity key used to detect track changes.
    pub fn track_key(&self) -> Option<&str> {
        self.sync_id.as_deref().or(self.details.as_deref())
    }

    /// Track length in whole seconds, when both instants are present.
    pub fn duration_seconds(&self) -> Option<u64> {
        let ts = self.timestamps?;
        match (ts.start, ts.end) {
            (Some(start), Some(end)) if end > start => Some(((end - start) / 1000) as u64),
            _ => None,
        }
    }

    /// Resolved URL of the large image, if any.
    pub fn large_image_url(&self) -> Option<String> {
        let image = self.assets.as_ref()?.large_image.as_deref()?;
        Some(resolve_asset_url(image, self.application_id.as_deref()))
    }

    /// Resolved URL of the small image, if any.
    pub fn small_image_url(&self) -> Option<String> {
        let image = self.assets.as_ref()?.small_image.as_deref()?;
        Some(resolve_asset_url(image, self.application_id.as_deref()))
    }
}

/// Resolve a raw asset reference into a fetchable URL.
///
/// `spotify:<id>` references point at the Spotify image CDN, `mp:external/`
/// references at the Discord media proxy, and everything else at the owning
/// application's asset path.
fn resolve_asset_url(image: &str, application_id: Option<&str>) -> String {
    if let Some(id) = image.strip_prefix("spotify:") {
        return format!("https://i.scdn.co/image/{id}");
    }
    if let Some(path) = image.strip_prefix("mp:external/") {
        return format!("https://media.discordapp.net/external/{path}");
    }
    format!(
        "https://cdn.discordapp.com/app-assets/{}/{image}.png",
        application_id.unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spotify_activity() -> Activity {
        Activity {
            id: "spotify:1".to_string(),
            name: "Spotify".to_string(),
            kind: ActivityKind::Listening,
            details: Some("Song A".to_string()),
            state: Some("Artist A".to_string()),
            timestamps: Some(ActivityTimestamps {
                start: Some(1_000),
                end: Some(181_000),
            }),
            assets: Some(ActivityAssets {
                large_image: Some("spotify:ab67616d".to_string()),
                large_text: Some("Album A".to_string()),
                ..Default::default()
            }),
            application_id: None,
            sync_id: Some("track-a".to_string()),
        }
    }

    #[test]
    fn decodes_kind_from_numeric_type() {
        let activity: Activity =
            serde_json::from_str(r#"{"id":"x","name":"Game","type":0}"#).unwrap();
        assert_eq!(activity.kind, ActivityKind::Playing);

        let activity: Activity =
            serde_json::from_str(r#"{"id":"x","name":"?","type":42}"#).unwrap();
        assert_eq!(activity.kind, ActivityKind::Unknown);
    }

    #[test]
    fn custom_status_detection() {
        let activity = Activity {
            id: CUSTOM_STATUS_ID.to_string(),
            kind: ActivityKind::Custom,
            state: Some("hello world".to_string()),
            ..Default::default()
        };
        assert!(activity.is_custom_status());
        assert!(!spotify_activity().is_custom_status());
    }

    #[test]
    fn spotify_detection() {
        assert!(spotify_activity().is_spotify());
        let game = Activity {
            id: "abc".to_string(),
            name: "Some Game".to_string(),
            kind: ActivityKind::Playing,
            ..Default::default()
        };
        assert!(!game.is_spotify());
    }

    #[test]
    fn track_key_prefers_sync_id() {
        let mut activity = spotify_activity();
        assert_eq!(activity.track_key(), Some("track-a"));
        activity.sync_id = None;
        assert_eq!(activity.track_key(), Some("Song A"));
    }

    #[test]
    fn duration_seconds_requires_both_instants() {
        assert_eq!(spotify_activity().duration_seconds(), Some(180));

        let mut open_ended = spotify_activity();
        open_ended.timestamps = Some(ActivityTimestamps {
            start: Some(1_000),
            end: None,
        });
        assert_eq!(open_ended.duration_seconds(), None);
    }

    #[test]
    fn resolves_spotify_asset_url() {
        assert_eq!(
            spotify_activity().large_image_url().unwrap(),
            "https://i.scdn.co/image/ab67616d"
        );
    }

    #[test]
    fn resolves_media_proxy_asset_url() {
        let activity = Activity {
            assets: Some(ActivityAssets {
                large_image: Some("mp:external/abc/def.png".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            activity.large_image_url().unwrap(),
            "https://media.discordapp.net/external/abc/def.png"
        );
    }

    #[test]
    fn resolves_application_asset_url() {
        let activity = Activity {
            application_id: Some("383226320970055681".to_string()),
            assets: Some(ActivityAssets {
                small_image: Some("vscode-icon".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            activity.small_image_url().unwrap(),
            "https://cdn.discordapp.com/app-assets/383226320970055681/vscode-icon.png"
        );
    }
}
