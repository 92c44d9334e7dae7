//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` over an injectable [`EnvSource`].
//! - Layer the source over `.env` override files and read the recognized keys.
//! - Run the required-key validation pass.
//!
//! Does NOT handle:
//! - Override file parsing (delegated to dotenv.rs).
//! - Caching the result (see cache.rs).
//!
//! Invariants / Assumptions:
//! - The source takes precedence over override files.
//! - Earlier override files take precedence over later ones.
//! - Unrecognized keys are never read.

use secrecy::SecretString;
use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::dotenv::{default_override_files, read_override_files, seed_process_env};
use super::error::ConfigError;
use super::source::{EnvSource, Layered, ProcessEnv};
use crate::constants::{
    GEMINI_API_KEY, GITHUB_TOKEN, GITHUB_USERNAME, REQUIRED_KEYS, STUDENT_SECRET,
};
use crate::types::Settings;

/// Loader that builds [`Settings`] from an environment source and override files.
pub struct ConfigLoader {
    source: Box<dyn EnvSource>,
    override_files: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("override_files", &self.override_files)
            .finish_non_exhaustive()
    }
}

impl ConfigLoader {
    /// Create a loader over the process environment with no override files.
    pub fn new() -> Self {
        Self {
            source: Box::new(ProcessEnv),
            override_files: Vec::new(),
        }
    }

    /// Create a loader over the process environment and the default `.env` files.
    ///
    /// This is the loader used by [`crate::get_settings`].
    pub fn from_process_env() -> Self {
        Self::new().with_default_override_files()
    }

    /// Replace the environment source (primarily for testing).
    pub fn with_source(mut self, source: impl EnvSource + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Add an override file after any already configured.
    pub fn with_override_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.override_files.push(path.into());
        self
    }

    /// Add the default override files: `.env` in the working directory, then
    /// `.env` next to this crate.
    pub fn with_default_override_files(mut self) -> Self {
        self.override_files.extend(default_override_files());
        self
    }

    /// Override files consulted by [`ConfigLoader::load`], highest precedence first.
    pub fn override_files(&self) -> &[PathBuf] {
        &self.override_files
    }

    /// Load the configured override files into the process environment.
    ///
    /// Existing variables are not replaced. Useful when other code reads
    /// `std::env` directly. Missing or malformed files are skipped, and
    /// `DOTENV_DISABLED=1` turns this into a no-op.
    pub fn load_dotenv(self) -> Self {
        seed_process_env(&self.override_files);
        self
    }

    /// Read every recognized key without validating.
    ///
    /// Missing keys become `None`; blank values are kept as read.
    pub fn load(&self) -> Settings {
        let overrides = read_override_files(&self.override_files);
        let source = Layered::new(&*self.source, overrides);

        let secret = |key: &str| source.get(key).map(|v| SecretString::new(v.into()));
        let settings = Settings {
            gemini_api_key: secret(GEMINI_API_KEY),
            github_token: secret(GITHUB_TOKEN),
            student_secret: secret(STUDENT_SECRET),
            github_username: source.get(GITHUB_USERNAME),
        };

        let found: Vec<&str> = REQUIRED_KEYS
            .into_iter()
            .filter(|key| settings.raw(key).is_some())
            .collect();
        debug!(?found, "read settings from environment");

        settings
    }

    /// Read every recognized key and require all of them to be non-blank.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequired`] naming every missing or blank key.
    pub fn load_and_validate(&self) -> Result<Settings, ConfigError> {
        let settings = self.load();
        if let Err(e) = settings.validate_required() {
            warn!(missing = ?e.missing_keys(), "required settings are missing");
            return Err(e);
        }
        Ok(settings)
    }
}
