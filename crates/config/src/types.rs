//! The settings record produced by the loader.
//!
//! Responsibilities:
//! - Hold the four recognized values exactly as they were read.
//! - Decide which required keys are missing or blank.
//!
//! Does NOT handle:
//! - Reading from the environment or override files (see `loader`).
//! - Caching (see `cache`).
//!
//! Invariants:
//! - Secret-bearing fields are `SecretString` and never appear in `Debug` output.
//! - A value that is empty after trimming counts as missing, the same as `None`.

use secrecy::{ExposeSecret, SecretString};

use crate::constants::{
    GEMINI_API_KEY, GITHUB_TOKEN, GITHUB_USERNAME, REQUIRED_KEYS, STUDENT_SECRET,
};
use crate::loader::ConfigError;

/// Settings read from the environment.
///
/// Values returned by [`crate::get_settings`] have passed
/// [`Settings::validate_required`], so every accessor returns `Some`.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub(crate) gemini_api_key: Option<SecretString>,
    pub(crate) github_token: Option<SecretString>,
    pub(crate) student_secret: Option<SecretString>,
    pub(crate) github_username: Option<String>,
}

impl Settings {
    /// The Gemini API key (`GEMINI_API_KEY`).
    pub fn gemini_api_key(&self) -> Option<&SecretString> {
        self.gemini_api_key.as_ref()
    }

    /// The GitHub access token (`GITHUB_TOKEN`).
    pub fn github_token(&self) -> Option<&SecretString> {
        self.github_token.as_ref()
    }

    /// The student secret (`STUDENT_SECRET`).
    pub fn student_secret(&self) -> Option<&SecretString> {
        self.student_secret.as_ref()
    }

    /// The GitHub account name (`GITHUB_USERNAME`).
    pub fn github_username(&self) -> Option<&str> {
        self.github_username.as_deref()
    }

    /// Raw value for a required key name, or `None` for unknown keys.
    pub(crate) fn raw(&self, key: &str) -> Option<&str> {
        match key {
            GEMINI_API_KEY => self.gemini_api_key.as_ref().map(|s| s.expose_secret()),
            GITHUB_TOKEN => self.github_token.as_ref().map(|s| s.expose_secret()),
            STUDENT_SECRET => self.student_secret.as_ref().map(|s| s.expose_secret()),
            GITHUB_USERNAME => self.github_username.as_deref(),
            _ => None,
        }
    }

    /// Names of required keys that are absent or blank, in declaration order.
    pub fn missing_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .into_iter()
            .filter(|key| self.raw(key).is_none_or(|value| value.trim().is_empty()))
            .collect()
    }

    /// Check that every required key is present and non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] listing every missing key,
    /// not just the first one found.
    pub fn validate_required(&self) -> Result<(), ConfigError> {
        let keys = self.missing_keys();
        if keys.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingRequired { keys })
        }
    }
}
