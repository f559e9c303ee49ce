//! Profile snapshot document.

use serde::{Deserialize, Serialize};

/// Profile document returned by `GET {api_base}{subject_id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Core user record.
    #[serde(default)]
    pub user: Option<ProfileUser>,
    /// Extended profile fields.
    #[serde(default)]
    pub user_profile: Option<UserProfile>,
    /// Earned badges.
    #[serde(default)]
    pub badges: Vec<Badge>,
    /// Linked third-party accounts.
    #[serde(default)]
    pub connected_accounts: Vec<ConnectedAccount>,
    /// Premium subscription start, RFC 3339.
    #[serde(default)]
    pub premium_since: Option<String>,
    /// Username from before the global-name migration.
    #[serde(default)]
    pub legacy_username: Option<String>,
}

/// Core user record inside a profile document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUser {
    /// User id.
    #[serde(default)]
    pub id: String,
    /// Unique username.
    #[serde(default)]
    pub username: String,
    /// Display name.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Avatar hash.
    #[serde(default)]
    pub avatar: Option<String>,
    /// Banner hash.
    #[serde(default)]
    pub banner: Option<String>,
    /// Accent color as a packed integer.
    #[serde(default)]
    pub accent_color: Option<u32>,
    /// Bio markdown.
    #[serde(default)]
    pub bio: Option<String>,
}

/// Extended profile fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Bio markdown.
    #[serde(default)]
    pub bio: Option<String>,
    /// Pronouns line.
    #[serde(default)]
    pub pronouns: Option<String>,
    /// Profile theme gradient stops as packed integers.
    #[serde(default)]
    pub theme_colors: Vec<u32>,
}

/// One earned badge.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Badge {
    /// Badge id.
    #[serde(default)]
    pub id: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Icon hash.
    #[serde(default)]
    pub icon: Option<String>,
    /// Detail link.
    #[serde(default)]
    pub link: Option<String>,
}

/// A linked third-party account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectedAccount {
    /// Account type (e.g. "spotify", "github").
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Account id on the external service.
    #[serde(default)]
    pub id: String,
    /// Display name on the external service.
    #[serde(default)]
    pub name: String,
    /// Whether the link is verified.
    #[serde(default)]
    pub verified: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_document() {
        let profile: Profile = serde_json::from_str(
            r#"{
                "user": {
                    "id": "1",
                    "username": "cam",
                    "global_name": "Cam",
                    "bio": "hello"
                },
                "user_profile": {
                    "pronouns": "they/them",
                    "theme_colors": [2303015, 5793266]
                },
                "badges": [{"id": "active_developer"}],
                "connected_accounts": [
                    {"type": "github", "id": "9", "name": "cam", "verified": true}
                ],
                "legacy_username": "cam#0001"
            }"#,
        )
        .unwrap();

        assert_eq!(profile.user.unwrap().username, "cam");
        let extended = profile.user_profile.unwrap();
        assert_eq!(extended.pronouns.as_deref(), Some("they/them"));
        assert_eq!(extended.theme_colors.len(), 2);
        assert_eq!(profile.badges.len(), 1);
        assert_eq!(profile.connected_accounts[0].kind, "github");
    }

    #[test]
    fn decodes_an_empty_document() {
        let profile: Profile = serde_json::from_str("{}").unwrap();
        assert!(profile.user.is_none());
        assert!(profile.badges.is_empty());
    }
}
