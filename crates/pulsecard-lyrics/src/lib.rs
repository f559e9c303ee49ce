//! # pulsecard-lyrics
//!
//! Lyrics synchronizer for pulsecard. Given the currently playing music
//! activity, fetches time-tagged lyrics once per distinct track and
//! continuously maps elapsed playback time to the active line.

pub mod lrc;
pub mod lrclib;
pub mod provider;
pub mod sync;

pub use lrc::{current_line, LyricLine};
pub use lrclib::LrclibClient;
pub use provider::{LyricsProvider, TrackQuery};
pub use sync::LyricsSync;
