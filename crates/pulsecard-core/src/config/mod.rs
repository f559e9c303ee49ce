//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod feed;
pub mod logging;
pub mod lyrics;
pub mod profile;

use serde::{Deserialize, Serialize};

use self::feed::FeedConfig;
use self::logging::LoggingConfig;
use self::lyrics::LyricsConfig;
use self::profile::ProfileConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Watched subject settings.
    #[serde(default)]
    pub subject: SubjectConfig,
    /// Presence feed socket settings.
    #[serde(default)]
    pub feed: FeedConfig,
    /// Lyrics lookup settings.
    #[serde(default)]
    pub lyrics: LyricsConfig,
    /// Profile REST settings.
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default subject to subscribe to when none is given on the command line.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubjectConfig {
    /// Subject id (snowflake string).
    #[serde(default)]
    pub id: Option<String>,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `PULSECARD_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("PULSECARD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            subject: SubjectConfig::default(),
            feed: FeedConfig::default(),
            lyrics: LyricsConfig::default(),
            profile: ProfileConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
