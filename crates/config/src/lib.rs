//! Environment-driven settings for the project.
//!
//! This crate reads the required API keys and tokens from the process
//! environment (optionally seeded from a local `.env` file), validates that
//! none of them are missing or blank, and hands out one cached, validated
//! [`Settings`] instance per process.
//!
//! ```no_run
//! use secrecy::ExposeSecret;
//!
//! let settings = project_config::get_settings()?;
//! let token = settings.github_token().map(|t| t.expose_secret());
//! # let _ = token;
//! # Ok::<(), project_config::ConfigError>(())
//! ```

mod cache;
pub mod constants;
mod loader;
mod types;

pub use cache::{SettingsCell, get_settings, reset_settings};
pub use loader::{ConfigError, ConfigLoader, EnvSource, Layered, MapSource, ProcessEnv};
pub use types::Settings;
