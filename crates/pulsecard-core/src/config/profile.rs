//! Profile REST configuration.

use serde::{Deserialize, Serialize};

/// Profile document fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Base URL of the profile API; the subject id is appended.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_api_base() -> String {
    "https://dcdn.dstn.to/profile/".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
