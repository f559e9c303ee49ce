//! Profile REST client.

use std::time::Duration;

use pulsecard_core::config::profile::ProfileConfig;
use pulsecard_core::{AppResult, SubjectId};

use crate::model::Profile;

/// HTTP client for the profile API.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    api_base: String,
}

impl ProfileClient {
    /// Build a client from configuration.
    pub fn new(config: &ProfileConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the profile document for a subject. One-shot; callers decide
    /// whether and when to re-fetch.
    pub async fn fetch(&self, subject_id: &SubjectId) -> AppResult<Profile> {
        let url = format!("{}/{}", self.api_base, subject_id);
        let profile = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(profile)
    }
}
