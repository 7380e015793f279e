use std::time::Duration;

use homepage_api::DEFAULT_BASE_URL;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Runtime configuration of the admin front-end.
#[derive(Debug)]
pub(crate) struct AdminConfig {
    base_url: String,
    username: Option<String>,
    password: Option<SecretString>,
    visible_only: Option<bool>,
    request_timeout_secs: u64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            username: None,
            password: None,
            visible_only: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AdminConfig {
    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Visibility filter passed to the category listing.
    pub(crate) fn visible_only(&self) -> Option<bool> {
        self.visible_only
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Login credentials, present only when both fields are set.
    pub(crate) fn credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) if !username.is_empty() => {
                Some((username.as_str(), password))
            },
            _ => None,
        }
    }
}

/// On-disk shape of [`AdminConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AdminConfigFile {
    pub(crate) base_url: String,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) visible_only: Option<bool>,
    pub(crate) request_timeout_secs: u64,
}

impl Default for AdminConfigFile {
    fn default() -> Self {
        Self::from(&AdminConfig::default())
    }
}

impl From<AdminConfigFile> for AdminConfig {
    fn from(file: AdminConfigFile) -> Self {
        let base_url = match file.base_url.trim() {
            "" => String::from(DEFAULT_BASE_URL),
            url => url.to_string(),
        };
        let request_timeout_secs = match file.request_timeout_secs {
            0 => DEFAULT_REQUEST_TIMEOUT_SECS,
            secs => secs,
        };

        Self {
            base_url,
            username: file.username,
            password: file.password.map(SecretString::from),
            visible_only: file.visible_only,
            request_timeout_secs,
        }
    }
}

impl From<&AdminConfig> for AdminConfigFile {
    fn from(config: &AdminConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            username: config.username.clone(),
            password: config
                .password
                .as_ref()
                .map(|password| password.expose_secret().to_owned()),
            visible_only: config.visible_only,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_partial_file_when_parsed_then_missing_fields_use_defaults() {
        let json = serde_json::json!({ "username": "admin" });

        let file: AdminConfigFile =
            serde_json::from_value(json).expect("should deserialize");
        let config = AdminConfig::from(file);

        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert!(config.credentials().is_none());
    }

    #[test]
    fn given_username_and_password_then_credentials_are_available() {
        let file = AdminConfigFile {
            username: Some(String::from("admin")),
            password: Some(String::from("secret")),
            ..AdminConfigFile::default()
        };

        let config = AdminConfig::from(file);
        let (username, password) =
            config.credentials().expect("credentials should be set");

        assert_eq!(username, "admin");
        assert_eq!(password.expose_secret(), "secret");
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn given_zero_timeout_when_converted_then_default_timeout_is_used() {
        let file = AdminConfigFile {
            request_timeout_secs: 0,
            ..AdminConfigFile::default()
        };

        let config = AdminConfig::from(file);

        assert_eq!(
            config.request_timeout(),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }
}
