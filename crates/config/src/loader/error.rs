//! Error types for settings loading.
//!
//! Invariants:
//! - Errors carry key names only, never values.
//! - Override file problems are not errors; see `dotenv.rs`.

use thiserror::Error;

/// Errors that can occur while loading settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more required keys are absent or blank.
    ///
    /// `keys` lists every missing key in declaration order.
    #[error(
        "Missing required environment variables: {}.\nPlease create a .env file (see .env.example) or set these in your environment.",
        .keys.join(", ")
    )]
    MissingRequired { keys: Vec<&'static str> },
}

impl ConfigError {
    /// Names of the missing keys.
    pub fn missing_keys(&self) -> &[&'static str] {
        match self {
            ConfigError::MissingRequired { keys } => keys,
        }
    }
}
