//! Lyrics provider seam.

use async_trait::async_trait;

use pulsecard_core::AppResult;
use pulsecard_feed::Activity;

use crate::lrc::LyricLine;

/// Lookup key for one track's lyrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    /// Track name.
    pub track_name: String,
    /// Artist name.
    pub artist_name: String,
    /// Album name.
    pub album_name: String,
    /// Track length in whole seconds; zero when unknown.
    pub duration_seconds: u64,
}

impl TrackQuery {
    /// Build the lookup key from a music activity.
    ///
    /// For Spotify-like activities the feed carries the track name in
    /// `details`, the artist in `state`, and the album in the large-image
    /// hover text.
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            track_name: activity.details.clone().unwrap_or_default(),
            artist_name: activity.state.clone().unwrap_or_default(),
            album_name: activity
                .assets
                .as_ref()
                .and_then(|a| a.large_text.clone())
                .unwrap_or_default(),
            duration_seconds: activity.duration_seconds().unwrap_or(0),
        }
    }
}

/// Source of time-tagged lyrics.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    /// Fetch lyrics for a track.
    ///
    /// An empty result means "no lyrics available" and is not an error.
    async fn fetch(&self, query: &TrackQuery) -> AppResult<Vec<LyricLine>>;
}
